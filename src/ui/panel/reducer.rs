use crate::browse::ItemPanel;
use crate::ui::mvi::Reducer;
use crate::ui::panel::intent::PanelIntent;
use crate::ui::panel::state::PanelState;

pub struct PanelReducer;

impl Reducer for PanelReducer {
    type State = PanelState;
    type Intent = PanelIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PanelIntent::Open { item } => PanelState::Loading {
                panel: Box::new(ItemPanel::links_only(item)),
            },
            PanelIntent::Loaded { panel } => match state {
                // Only the item still being loaded accepts results; a lookup
                // for an item that was closed or replaced is dropped.
                PanelState::Loading { panel: current } if current.item.id == panel.item.id => {
                    PanelState::Ready { panel, scroll: 0 }
                }
                other => other,
            },
            PanelIntent::Close => PanelState::Hidden,
            PanelIntent::ScrollUp => match state {
                PanelState::Ready { panel, scroll } => PanelState::Ready {
                    panel,
                    scroll: scroll.saturating_sub(1),
                },
                other => other,
            },
            PanelIntent::ScrollDown => match state {
                PanelState::Ready { panel, scroll } => PanelState::Ready {
                    panel,
                    scroll: scroll.saturating_add(1),
                },
                other => other,
            },
        }
    }
}
