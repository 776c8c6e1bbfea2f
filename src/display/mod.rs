//! Display and editor shapes.
//!
//! A shape is an entity rendered through the Tera template bound to its
//! (shape type, display type) pair in the [`ShapeTable`]. Pages embed the
//! pre-rendered HTML of their shapes.

use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

pub mod model_state;
pub mod shape_table;

pub use model_state::ModelState;
pub use shape_table::ShapeTable;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum DisplayType {
    Detail,
    SummaryAdmin,
    Edit,
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("no template bound to shape {shape_type} ({display_type:?})")]
    MissingBinding {
        shape_type: &'static str,
        display_type: DisplayType,
    },

    #[error("template error: {0}")]
    Render(#[from] tera::Error),
}

pub type DisplayResult<T> = Result<T, DisplayError>;

/// Rendered shape ready to be embedded in a page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Shape {
    pub shape_type: &'static str,
    pub display_type: DisplayType,
    pub template: String,
    pub html: String,
}

/// Entity that can be rendered as a shape. The serialized entity is exposed
/// to its template as `model`.
pub trait Displayable: Serialize {
    const SHAPE_TYPE: &'static str;
}

/// Entity whose editor accepts submitted form values.
pub trait Editable: Displayable {
    type Form;

    /// Copies the submitted values into `self` and records validation errors.
    /// Entered values are kept even when invalid so the editor can show them.
    fn apply_form(&mut self, form: Self::Form, state: &mut ModelState);
}

/// Per-request state shared by the shapes of one page.
pub struct BuildContext<'a> {
    pub user: &'a AuthenticatedUser,
    pub model_state: ModelState,
}

impl<'a> BuildContext<'a> {
    pub fn new(user: &'a AuthenticatedUser) -> Self {
        Self {
            user,
            model_state: ModelState::new(),
        }
    }
}

pub struct DisplayManager {
    tera: Tera,
    shapes: ShapeTable,
}

impl DisplayManager {
    pub fn new(tera: Tera, shapes: ShapeTable) -> Self {
        Self { tera, shapes }
    }

    /// Page templates live in the same Tera instance as shape templates.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Renders `entity` with the template bound to its shape and
    /// `display_type`. Rendering is synchronous; the future resolves on first
    /// poll, so awaiting several shapes together keeps their order but does
    /// not render them in parallel.
    pub async fn build_display<T: Displayable>(
        &self,
        entity: &T,
        ctx: &BuildContext<'_>,
        display_type: DisplayType,
    ) -> DisplayResult<Shape> {
        self.render(T::SHAPE_TYPE, display_type, entity, ctx)
    }

    pub async fn build_editor<T: Editable>(
        &self,
        entity: &T,
        ctx: &BuildContext<'_>,
    ) -> DisplayResult<Shape> {
        self.render(T::SHAPE_TYPE, DisplayType::Edit, entity, ctx)
    }

    /// Applies the submitted form to `entity`, validating into
    /// `ctx.model_state`, and renders the resulting editor.
    pub async fn update_editor<T: Editable>(
        &self,
        entity: &mut T,
        form: T::Form,
        ctx: &mut BuildContext<'_>,
    ) -> DisplayResult<Shape> {
        entity.apply_form(form, &mut ctx.model_state);
        self.build_editor(entity, ctx).await
    }

    fn render<T: Serialize>(
        &self,
        shape_type: &'static str,
        display_type: DisplayType,
        entity: &T,
        ctx: &BuildContext<'_>,
    ) -> DisplayResult<Shape> {
        let template = self.shapes.resolve(shape_type, display_type).ok_or(
            DisplayError::MissingBinding {
                shape_type,
                display_type,
            },
        )?;

        let mut context = Context::new();
        context.insert("model", entity);
        context.insert("errors", ctx.model_state.errors());
        context.insert("current_user", ctx.user);

        let html = self.tera.render(template, &context)?;

        Ok(Shape {
            shape_type,
            display_type,
            template: template.to_string(),
            html,
        })
    }
}
