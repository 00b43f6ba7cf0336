//! # View Models
//!
//! Screen state and the operations the commands drive.

pub mod app;
pub mod edit_form;
pub mod listing;
pub mod login;

pub use app::AppViewModel;
pub use edit_form::EditForm;
pub use listing::ListingViewModel;
pub use login::LoginViewModel;
