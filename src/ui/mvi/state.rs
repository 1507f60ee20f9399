/// Marker trait for UI state objects.
///
/// States are cloned to produce new states, compared to detect changes,
/// and hold everything the view needs to draw them.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
