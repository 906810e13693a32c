//! Catalog navigation: what is on screen, what is loading, and the trail back.

pub mod action;
pub mod reducer;
pub mod state;

pub use action::{Action, RequestId, RequestSequence};
pub use reducer::reduce;
pub use state::{HistoryEntry, NavigationState, CATALOG_ROOT_LABEL};
