use folio_core::{page_numbers, PageMarker};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavItem {
    Page { number: u32, href: String, active: bool },
    Ellipsis,
}

/// Everything needed to draw a pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationNav {
    pub previous: NavLink,
    pub items: Vec<NavItem>,
    pub next: NavLink,
}

impl PaginationNav {
    /// `None` when there is nothing to page through.
    pub fn build<F>(current_page: u32, total_pages: u32, href: F) -> Option<Self>
    where
        F: Fn(u32) -> String,
    {
        if total_pages <= 1 {
            return None;
        }

        let items = page_numbers(current_page, total_pages)
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(number) => NavItem::Page {
                    number,
                    href: href(number),
                    active: number == current_page,
                },
                PageMarker::Ellipsis => NavItem::Ellipsis,
            })
            .collect();

        Some(Self {
            previous: NavLink {
                href: href(current_page.saturating_sub(1).max(1)),
                disabled: current_page == 1,
            },
            items,
            next: NavLink {
                href: href(current_page.saturating_add(1).min(total_pages)),
                disabled: current_page == total_pages,
            },
        })
    }

    pub fn active_page(&self) -> Option<u32> {
        self.items.iter().find_map(|item| match item {
            NavItem::Page { number, active: true, .. } => Some(*number),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn href(page: u32) -> String {
        format!("/articles?page={}", page)
    }

    #[test]
    fn test_single_page_has_no_nav() {
        assert!(PaginationNav::build(1, 1, href).is_none());
        assert!(PaginationNav::build(1, 0, href).is_none());
    }

    #[test]
    fn test_first_page_disables_previous() {
        let nav = PaginationNav::build(1, 3, href).unwrap();
        assert!(nav.previous.disabled);
        assert_eq!(nav.previous.href, "/articles?page=1");
        assert!(!nav.next.disabled);
        assert_eq!(nav.next.href, "/articles?page=2");
        assert_eq!(nav.active_page(), Some(1));
    }

    #[test]
    fn test_last_page_disables_next() {
        let nav = PaginationNav::build(10, 10, href).unwrap();
        assert!(nav.next.disabled);
        assert_eq!(nav.next.href, "/articles?page=10");
        assert_eq!(nav.previous.href, "/articles?page=9");
        assert_eq!(nav.items[1], NavItem::Ellipsis);
    }

    #[test]
    fn test_items_follow_page_numbers() {
        let nav = PaginationNav::build(5, 10, href).unwrap();
        let labels: Vec<String> = nav
            .items
            .iter()
            .map(|item| match item {
                NavItem::Page { number, .. } => number.to_string(),
                NavItem::Ellipsis => "...".to_string(),
            })
            .collect();
        assert_eq!(labels, ["1", "...", "4", "5", "6", "...", "10"]);
        assert_eq!(nav.active_page(), Some(5));
    }
}
