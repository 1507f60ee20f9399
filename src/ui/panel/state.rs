use crate::browse::ItemPanel;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    /// Links are ready; trailer and archive lookups are in flight.
    Loading { panel: Box<ItemPanel> },
    Ready { panel: Box<ItemPanel>, scroll: u16 },
}

impl UiState for PanelState {}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn panel(&self) -> Option<&ItemPanel> {
        match self {
            PanelState::Hidden => None,
            PanelState::Loading { panel } | PanelState::Ready { panel, .. } => Some(panel),
        }
    }
}
