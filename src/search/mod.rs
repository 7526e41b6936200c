//! Debounced search input mirrored into the URL
//!
//! - [`debounce`]: arm/cancel/fire scheduled callbacks
//! - [`params`]: query-string parameters and the search state they carry
//! - [`synchronizer`]: the controller tying keystrokes to location updates

pub mod debounce;
pub mod params;
pub mod synchronizer;

pub use debounce::{DebounceState, Debouncer};
pub use params::{QueryParams, SearchState};
pub use synchronizer::{MemoryNavigator, Navigator, SearchSynchronizer, search_location};
