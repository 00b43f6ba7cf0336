//! # Command Context
//!
//! Read-only snapshot of view-model state handed to commands, so that
//! relevance checks and event production never need mutable access.

use crate::tui::events::{ListingMode, Route};
use crate::tui::models::UserField;
use crate::tui::view_models::AppViewModel;

/// Read-only snapshot of AppViewModel state for commands
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelSnapshot {
    pub route: Route,
    pub acknowledging: bool,
    pub listing_mode: Option<ListingMode>,
    pub selected_user_id: Option<u64>,
    pub editing_user_id: Option<u64>,
    /// Focused edit input and its current text
    pub edit_focus: Option<(UserField, String)>,
}

impl ViewModelSnapshot {
    /// Create snapshot from current AppViewModel state
    pub fn from_view_model(view_model: &AppViewModel) -> Self {
        let listing = view_model.listing();
        let editing = listing.and_then(|listing| listing.editing());
        Self {
            route: view_model.current_route(),
            acknowledging: view_model.acknowledgement().is_some(),
            listing_mode: listing.map(|listing| listing.mode()),
            selected_user_id: listing
                .and_then(|listing| listing.selected_user())
                .map(|user| user.id),
            editing_user_id: editing.map(|form| form.user_id()),
            edit_focus: editing.map(|form| (form.focus(), form.input(form.focus()).to_string())),
        }
    }

    /// Snapshot of a signed-out app showing the login form
    #[cfg(test)]
    pub fn login_screen() -> Self {
        Self {
            route: Route::Login,
            acknowledging: false,
            listing_mode: None,
            selected_user_id: None,
            editing_user_id: None,
            edit_focus: None,
        }
    }

    /// Snapshot of the listing in the given mode
    #[cfg(test)]
    pub fn listing_screen(mode: ListingMode) -> Self {
        Self {
            route: Route::Users,
            listing_mode: Some(mode),
            ..Self::login_screen()
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    /// Login form has input focus
    pub fn on_login(&self) -> bool {
        self.state.route == Route::Login && !self.state.acknowledging
    }

    /// Listing has input focus in the given mode
    pub fn in_listing_mode(&self, mode: ListingMode) -> bool {
        self.state.route == Route::Users
            && !self.state.acknowledging
            && self.state.listing_mode == Some(mode)
    }
}
