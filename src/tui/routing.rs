//! # Router / Gate
//!
//! Decides which screen a navigation lands on. The listing route needs a
//! session; without one the navigation is discarded in favour of the login
//! route. The check runs at render and navigation time only.

use crate::tui::events::Route;
use crate::tui::models::Session;

pub struct Router;

impl Router {
    /// Resolve a requested route against the current session
    pub fn resolve(requested: Route, session: &Session) -> Route {
        match requested {
            Route::Users if !session.is_present() => {
                tracing::debug!("No session; redirecting {:?} to {:?}", requested, Route::Login);
                Route::Login
            }
            route => route,
        }
    }
}
