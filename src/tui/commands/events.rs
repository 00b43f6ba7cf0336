//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the
//! view model.

use crate::tui::models::{PageStep, UserField};

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Request to quit application
    QuitRequested,

    /// Dismiss the logout acknowledgement
    AcknowledgeRequested,

    // Login form
    LoginCharRequested { ch: char },
    LoginBackspaceRequested,
    LoginFocusToggleRequested,
    LoginSubmitRequested,

    // Listing, browse mode
    SelectionMoveRequested { delta: isize },
    PageChangeRequested { step: PageStep },
    EditStartRequested { user_id: u64 },
    DeleteRequested { user_id: u64 },
    LogoutRequested,

    // Listing, search mode
    SearchStartRequested,
    SearchCharRequested { ch: char },
    SearchBackspaceRequested,
    /// Leave search keeping the query
    SearchFinishRequested,
    /// Leave search dropping the query
    SearchClearRequested,

    // Edit modal
    DraftFieldChangeRequested { field: UserField, value: String },
    EditFocusRequested { forward: bool },
    SaveRequested { user_id: u64 },
    CancelEditRequested,
}
