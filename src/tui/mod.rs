//! # Terminal User Interface
//!
//! The user-directory client: a login gate in front of a paginated,
//! searchable, editable listing.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod routing;
pub mod services;
pub mod view_models;
pub mod views;

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};
pub use controllers::AppController;
pub use events::{ListingMode, LoginField, Route, ViewEvent};
pub use models::{EditDraft, PageCursor, PageStep, Session, SessionStore, User, UserField, UserPage};
pub use routing::Router;
pub use services::{ApiResponse, Credentials, DirectoryService, MockUserApi, ReqresClient, UserApi};
pub use view_models::{AppViewModel, ListingViewModel, LoginViewModel};
pub use views::{TerminalRenderer, ViewRenderer};
