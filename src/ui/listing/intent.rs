use crate::browse::RenderResult;
use crate::ui::mvi::Intent;

#[derive(Debug)]
pub enum ListingIntent {
    /// A fetch was issued for the listing.
    Loading,
    /// The latest fetch resolved.
    Rendered(RenderResult),
    /// The fetch never reached the worker, so nothing will resolve it.
    NotScheduled { details: String },
    MoveUp,
    MoveDown,
}

impl Intent for ListingIntent {}
