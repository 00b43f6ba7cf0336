//! # Roster - Terminal Client for a Paginated User Directory
//!
//! Sign in, page through users, filter them, edit and remove records.
//! Built on the same MVVM layout as a vim-style REPL:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌──────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│ Services │
//! │             │              │              │              │          │
//! │ - Terminal  │              │ - Login      │              │ - HTTP   │
//! │ - Rendering │              │ - Listing    │              │ - Session│
//! └─────────────┘              └──────────────┘              └──────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Key Mapping│
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod tui;

// Re-export main types for easy access
pub use tui::*;
