//! # View Events
//!
//! Emitted by view models when something on screen has gone stale.
//! The controller collects them after each input or tick and asks the
//! renderer for the cheapest redraw that covers them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Whole screen must be redrawn (route change, list change, modal)
    FullRedrawRequired,

    /// Only the bottom status bar changed (loading flags, hints)
    StatusBarUpdateRequired,
}

/// Collapse a batch of events into the single redraw that covers them
pub fn coalesce(events: &[ViewEvent]) -> Option<ViewEvent> {
    if events.contains(&ViewEvent::FullRedrawRequired) {
        Some(ViewEvent::FullRedrawRequired)
    } else if events.is_empty() {
        None
    } else {
        Some(ViewEvent::StatusBarUpdateRequired)
    }
}
