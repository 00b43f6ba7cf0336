//! # Core Event Types
//!
//! Small enums shared by view models, commands and the renderer.

/// Screens the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Always reachable
    Login,
    /// Requires a session
    Users,
}

/// Input mode of the listing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// Moving the selection, paging, issuing row actions
    Browse,
    /// Typing into the search bar
    Search,
    /// Edit modal is open
    Edit,
}

/// Focused input on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}
