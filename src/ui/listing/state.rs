use crate::catalog::ResultItem;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingState {
    #[default]
    Loading,
    Items {
        items: Vec<ResultItem>,
        selected: usize,
    },
    Empty,
    Failed {
        /// Short message for the error view.
        message: String,
        /// Full error text, shown under the message.
        details: String,
    },
}

impl UiState for ListingState {}

impl ListingState {
    pub fn selected_item(&self) -> Option<&ResultItem> {
        match self {
            ListingState::Items { items, selected } => items.get(*selected),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListingState::Failed { .. })
    }
}
