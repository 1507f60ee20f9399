use crate::browse::RenderResult;
use crate::ui::listing::intent::ListingIntent;
use crate::ui::listing::state::ListingState;
use crate::ui::mvi::Reducer;

pub struct ListingReducer;

impl Reducer for ListingReducer {
    type State = ListingState;
    type Intent = ListingIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListingIntent::Loading => ListingState::Loading,
            ListingIntent::Rendered(result) => match result {
                RenderResult::Ok(items) => ListingState::Items { items, selected: 0 },
                RenderResult::Empty => ListingState::Empty,
                RenderResult::Failed(err) => ListingState::Failed {
                    message: err.user_message().to_string(),
                    details: err.to_string(),
                },
            },
            ListingIntent::NotScheduled { details } => ListingState::Failed {
                message: "The request could not be started".to_string(),
                details,
            },
            ListingIntent::MoveUp => match state {
                ListingState::Items { items, selected } => {
                    let selected = if selected == 0 {
                        items.len().saturating_sub(1)
                    } else {
                        selected - 1
                    };
                    ListingState::Items { items, selected }
                }
                other => other,
            },
            ListingIntent::MoveDown => match state {
                ListingState::Items { items, selected } => {
                    let selected = if selected + 1 >= items.len() {
                        0
                    } else {
                        selected + 1
                    };
                    ListingState::Items { items, selected }
                }
                other => other,
            },
        }
    }
}
