use crate::browse::ItemPanel;
use crate::catalog::ResultItem;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum PanelIntent {
    /// User opened an item; lookups start.
    Open { item: ResultItem },
    /// Lookups for an item finished.
    Loaded { panel: Box<ItemPanel> },
    Close,
    ScrollUp,
    ScrollDown,
}

impl Intent for PanelIntent {}
