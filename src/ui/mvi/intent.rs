/// Marker trait for intent objects.
///
/// Intents are user actions (key presses) or system events (a fetch
/// resolved) that a reducer folds into state.
pub trait Intent: Send + 'static {}
