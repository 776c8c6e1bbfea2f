//! Pager state and the pager shape rendered under list pages.

use serde::{Deserialize, Serialize};

use crate::display::Displayable;
use crate::domain::types::PageSize;

/// Raw pagination parameters taken from the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct PagerParameters {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Resolved pagination state for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: PageSize,
    page_size_overridden: bool,
}

impl Pager {
    /// Uses the requested page size when present, otherwise `default_page_size`.
    /// Page numbers start at 1; 0 is treated as 1.
    pub fn new(params: PagerParameters, default_page_size: PageSize) -> Self {
        let page = params.page.unwrap_or(1).max(1);
        let page_size = params
            .page_size
            .map(PageSize::clamped)
            .unwrap_or(default_page_size);

        Self {
            page,
            page_size,
            page_size_overridden: params.page_size.is_some(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of rows to skip before the current page.
    pub fn start_index(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size.get())
    }

    pub fn total_pages(&self, total_item_count: usize) -> usize {
        total_item_count.div_ceil(self.page_size.get())
    }
}

/// Query values carried forward by every pager link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteData {
    values: Vec<(String, String)>,
}

impl RouteData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty values are skipped so links stay short.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.values.push((key.into(), value));
        }
    }

    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub current: bool,
}

/// Pager shape model. `None` entries in `links` render as an ellipsis.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PagerShape {
    pub page: usize,
    pub page_size: usize,
    pub total_item_count: usize,
    pub total_pages: usize,
    pub links: Vec<Option<PageLink>>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl Displayable for PagerShape {
    const SHAPE_TYPE: &'static str = "Pager";
}

impl PagerShape {
    pub fn new(pager: &Pager, total_item_count: usize, base_path: &str, route: &RouteData) -> Self {
        let total_pages = pager.total_pages(total_item_count);
        let current = pager.page();

        let url = |page: usize| {
            let mut pairs = route.values().to_vec();
            pairs.push(("page".to_string(), page.to_string()));
            if pager.page_size_overridden {
                pairs.push(("page_size".to_string(), pager.page_size().to_string()));
            }
            match serde_html_form::to_string(&pairs) {
                Ok(query) => format!("{base_path}?{query}"),
                Err(err) => {
                    log::error!("Failed to encode pager link: {err}");
                    base_path.to_string()
                }
            }
        };

        let links = get_pages(total_pages, current, 2, 2, 4, 2)
            .into_iter()
            .map(|page| {
                page.map(|number| PageLink {
                    number,
                    url: url(number),
                    current: number == current,
                })
            })
            .collect();

        Self {
            page: current,
            page_size: pager.page_size(),
            total_item_count,
            total_pages,
            links,
            previous: (current > 1 && current <= total_pages).then(|| url(current - 1)),
            next: (current < total_pages).then(|| url(current + 1)),
        }
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    // Pages past the end are windowed around the last page.
    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = left_edge.saturating_add(1).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_size(value: usize) -> PageSize {
        PageSize::new(value).expect("valid page size")
    }

    #[test]
    fn pager_defaults_to_first_page_and_site_page_size() {
        let pager = Pager::new(PagerParameters::default(), page_size(10));
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_size(), 10);
        assert_eq!(pager.start_index(), 0);
    }

    #[test]
    fn pager_start_index_and_clamped_override() {
        let pager = Pager::new(
            PagerParameters {
                page: Some(3),
                page_size: Some(500),
            },
            page_size(10),
        );
        assert_eq!(pager.page_size(), PageSize::MAX);
        assert_eq!(pager.start_index(), 2 * PageSize::MAX);

        let pager = Pager::new(
            PagerParameters {
                page: Some(0),
                page_size: None,
            },
            page_size(10),
        );
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn get_pages_inserts_ellipses() {
        assert_eq!(get_pages(0, 1, 2, 2, 4, 2), Vec::<Option<usize>>::new());
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn pager_links_carry_route_data() {
        let pager = Pager::new(
            PagerParameters {
                page: Some(2),
                page_size: None,
            },
            page_size(10),
        );
        let mut route = RouteData::new();
        route.insert("filter", "Approved");
        route.insert("search", "al ice");
        route.insert("order", "");

        let shape = PagerShape::new(&pager, 25, "/users", &route);

        assert_eq!(shape.total_pages, 3);
        assert_eq!(shape.links.len(), 3);
        assert_eq!(
            shape.previous.as_deref(),
            Some("/users?filter=Approved&search=al+ice&page=1")
        );
        assert_eq!(
            shape.next.as_deref(),
            Some("/users?filter=Approved&search=al+ice&page=3")
        );
        let current = shape.links[1].as_ref().expect("second page link");
        assert!(current.current);
        assert!(!current.url.contains("order="));
    }

    #[test]
    fn page_past_the_end_does_not_overflow() {
        let pager = Pager::new(
            PagerParameters {
                page: Some(usize::MAX),
                page_size: None,
            },
            page_size(10),
        );
        assert_eq!(pager.start_index(), usize::MAX);

        let shape = PagerShape::new(&pager, 25, "/users", &RouteData::new());

        let numbers: Vec<usize> = shape.links.iter().flatten().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(shape.links.iter().flatten().all(|l| !l.current));
        assert_eq!(shape.previous, None);
        assert_eq!(shape.next, None);
    }

    #[test]
    fn empty_result_has_no_links() {
        let pager = Pager::new(PagerParameters::default(), page_size(10));
        let shape = PagerShape::new(&pager, 0, "/users", &RouteData::new());
        assert!(shape.links.is_empty());
        assert_eq!(shape.previous, None);
        assert_eq!(shape.next, None);
    }
}
