//! Static lookup of the template bound to each (shape type, display type).

use std::collections::HashMap;

use crate::display::DisplayType;

#[derive(Debug, Clone, Default)]
pub struct ShapeTable {
    bindings: HashMap<(&'static str, DisplayType), String>,
}

impl ShapeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings for every shape rendered by the administration pages.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.bind("User", DisplayType::SummaryAdmin, "users/summary_admin.html");
        table.bind("User", DisplayType::Edit, "users/edit_fields.html");
        table.bind("Pager", DisplayType::Detail, "shared/pager.html");
        table
    }

    /// Later bindings replace earlier ones.
    pub fn bind(
        &mut self,
        shape_type: &'static str,
        display_type: DisplayType,
        template: impl Into<String>,
    ) {
        self.bindings
            .insert((shape_type, display_type), template.into());
    }

    pub fn resolve(&self, shape_type: &'static str, display_type: DisplayType) -> Option<&str> {
        self.bindings
            .get(&(shape_type, display_type))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bound_templates_only() {
        let table = ShapeTable::with_defaults();
        assert_eq!(
            table.resolve("User", DisplayType::SummaryAdmin),
            Some("users/summary_admin.html")
        );
        assert_eq!(table.resolve("User", DisplayType::Detail), None);
        assert_eq!(table.resolve("Role", DisplayType::SummaryAdmin), None);
    }

    #[test]
    fn rebinding_overrides_template() {
        let mut table = ShapeTable::with_defaults();
        table.bind("User", DisplayType::SummaryAdmin, "custom/row.html");
        assert_eq!(
            table.resolve("User", DisplayType::SummaryAdmin),
            Some("custom/row.html")
        );
    }
}
