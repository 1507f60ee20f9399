use super::BrowseEvent;

/// Current page, page count and active query.
///
/// Owned by the [`RenderController`](super::RenderController); only a
/// successful, non-superseded fetch writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    page: u32,
    total_pages: u32,
    query: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            query: String::new(),
        }
    }
}

/// Page and query a fetch is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub page: u32,
    pub query: String,
}

impl SearchState {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// True when no search is active and the listing path is used.
    pub fn is_listing(&self) -> bool {
        self.query.is_empty()
    }

    /// Where `event` wants to go from here, or `None` if it does not fetch.
    ///
    /// | event          | page   | query        |
    /// |----------------|--------|--------------|
    /// | `Search(text)` | 1      | `trim(text)` |
    /// | `Clear`        | 1      | `""`         |
    /// | `Navigate(n)`  | `n`    | unchanged    |
    /// | `Retry`        | same   | unchanged    |
    ///
    /// `Navigate(0)` is clamped to page 1. No upper bound is applied here;
    /// the provider's page count is only known once the fetch resolves.
    pub fn target(&self, event: &BrowseEvent) -> Option<FetchTarget> {
        match event {
            BrowseEvent::Search(text) => Some(FetchTarget {
                page: 1,
                query: text.trim().to_string(),
            }),
            BrowseEvent::Clear => Some(FetchTarget {
                page: 1,
                query: String::new(),
            }),
            BrowseEvent::Navigate(page) => Some(FetchTarget {
                page: (*page).max(1),
                query: self.query.clone(),
            }),
            BrowseEvent::Retry => Some(FetchTarget {
                page: self.page,
                query: self.query.clone(),
            }),
            BrowseEvent::OpenItem(_) => None,
        }
    }

    /// Record a successful fetch for `target`.
    ///
    /// The controller only commits pages within `total_pages`; the clamp
    /// keeps `page <= total_pages` even so.
    pub(super) fn commit(&mut self, target: FetchTarget, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.page = target.page.clamp(1, self.total_pages);
        self.query = target.query;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(page: u32, total_pages: u32, query: &str) -> SearchState {
        SearchState {
            page,
            total_pages,
            query: query.to_string(),
        }
    }

    #[test]
    fn search_trims_and_resets_page() {
        let target = state(4, 9, "old")
            .target(&BrowseEvent::Search("  Inception  ".to_string()))
            .unwrap();
        assert_eq!(target.page, 1);
        assert_eq!(target.query, "Inception");
    }

    #[test]
    fn clear_targets_listing_page_one() {
        let target = state(3, 9, "alien").target(&BrowseEvent::Clear).unwrap();
        assert_eq!(target, FetchTarget { page: 1, query: String::new() });
    }

    #[test]
    fn navigate_keeps_query_and_clamps_zero() {
        let current = state(2, 9, "alien");
        assert_eq!(
            current.target(&BrowseEvent::Navigate(7)).unwrap(),
            FetchTarget { page: 7, query: "alien".to_string() }
        );
        assert_eq!(current.target(&BrowseEvent::Navigate(0)).unwrap().page, 1);
    }

    #[test]
    fn navigate_has_no_upper_bound_before_fetch() {
        let target = state(1, 1, "").target(&BrowseEvent::Navigate(40)).unwrap();
        assert_eq!(target.page, 40);
    }

    #[test]
    fn open_item_does_not_fetch() {
        assert!(state(1, 1, "").target(&BrowseEvent::OpenItem(42)).is_none());
    }

    #[test]
    fn commit_clamps_page_to_total() {
        let mut current = SearchState::default();
        current.commit(FetchTarget { page: 12, query: "x".to_string() }, 10);
        assert_eq!(current.page(), 10);
        assert_eq!(current.total_pages(), 10);

        current.commit(FetchTarget { page: 1, query: String::new() }, 0);
        assert_eq!(current.total_pages(), 1);
        assert!(current.is_listing());
    }
}
