//! # Services Layer
//!
//! Everything that reaches outside the process: the directory API client
//! and the background dispatcher that runs its calls.

pub mod api;
pub mod directory;
pub mod mock;

pub use api::{ApiFuture, Credentials, ReqresClient, UserApi};
pub use directory::{ApiResponse, DirectoryService, ResponseQueue};
pub use mock::MockUserApi;
