//! Pagination state, the render controller and the page-control window.

mod controller;
mod panel;
mod state;
mod window;

pub use controller::{FetchTicket, RenderController, RenderResult, Resolution};
pub use panel::{open_item, ArchiveMatch, ItemPanel};
pub use state::{FetchTarget, SearchState};
pub use window::{PageControl, PageWindow};

/// Every action the user can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEvent {
    /// Search titles; the text is trimmed.
    Search(String),
    /// Drop the query and return to the listing.
    Clear,
    /// Go to a page of the current result set.
    Navigate(u32),
    /// Re-issue the current page after a failure.
    Retry,
    /// Open the panel for an item.
    OpenItem(u64),
}
