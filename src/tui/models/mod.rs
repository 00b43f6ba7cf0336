//! # Models
//!
//! Plain data and state types. Nothing here talks to the network or the
//! terminal; the view models compose these.

pub mod draft;
pub mod flash_message;
pub mod page_cursor;
pub mod session;
pub mod user;

pub use draft::{EditDraft, UserField};
pub use flash_message::{FlashMessage, FLASH_DURATION};
pub use page_cursor::{PageCursor, PageStep};
pub use session::{Session, SessionStore};
pub use user::{filter_users, User, UserPage};
