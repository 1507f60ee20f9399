//! Model-View-Intent (MVI) primitives for the terminal UI.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Listing and panel state both go through a reducer; side effects
//! (fetches, lookups) stay in [`App`](crate::ui::app::App).

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
