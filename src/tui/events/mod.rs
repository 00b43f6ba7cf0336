//! # Events Module
//!
//! Shared enums and the view-event vocabulary.

pub mod types;
pub mod view_events;

pub use types::{ListingMode, LoginField, Route};
pub use view_events::{coalesce, ViewEvent};
