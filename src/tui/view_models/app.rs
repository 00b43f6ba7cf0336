//! # Application View Model
//!
//! Root of the view-model tree. Holds the session context, the requested
//! route, the login form, the mounted listing (if any) and the logout
//! acknowledgement. Routes API responses to whichever screen issued them.
//!
//! Every listing mount gets a fresh generation number. Listing responses
//! whose generation differs from the mounted listing's are dropped, so
//! nothing issued before a logout reaches the listing mounted after it.

use std::time::Instant;

use crate::tui::events::{Route, ViewEvent};
use crate::tui::models::Session;
use crate::tui::routing::Router;
use crate::tui::services::{ApiResponse, DirectoryService, ResponseQueue};
use crate::tui::view_models::{ListingViewModel, LoginViewModel};

pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

pub struct AppViewModel {
    session: Session,
    service: DirectoryService,
    responses: ResponseQueue,
    requested_route: Route,
    login: LoginViewModel,
    listing: Option<ListingViewModel>,
    listing_generation: u64,
    acknowledgement: Option<String>,
    terminal_size: (u16, u16),
    pending_view_events: Vec<ViewEvent>,
}

impl AppViewModel {
    pub fn new(session: Session, service: DirectoryService, responses: ResponseQueue) -> Self {
        let login = LoginViewModel::new(service.clone());
        Self {
            session,
            service,
            responses,
            requested_route: Route::Login,
            login,
            listing: None,
            listing_generation: 0,
            acknowledgement: None,
            terminal_size: (80, 24),
            pending_view_events: Vec::new(),
        }
    }

    /// Initial navigation: straight to the listing, letting the gate
    /// send signed-out users to the login screen
    pub fn start(&mut self) {
        self.navigate(Route::Users);
    }

    // === Routing ===

    /// Route that renders right now, re-checked against the session
    pub fn current_route(&self) -> Route {
        Router::resolve(self.requested_route, &self.session)
    }

    /// Navigate to a route, mounting or unmounting the listing as needed
    pub fn navigate(&mut self, requested: Route) {
        self.requested_route = requested;
        let resolved = self.current_route();
        tracing::info!("Navigate {:?} -> {:?}", requested, resolved);

        match resolved {
            Route::Users => {
                if self.listing.is_none() {
                    self.listing_generation += 1;
                    self.listing = Some(ListingViewModel::mount(
                        self.service.clone(),
                        self.listing_generation,
                    ));
                }
            }
            Route::Login => {
                if let Some(listing) = self.listing.take() {
                    listing.unmount();
                }
            }
        }
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&self) -> &LoginViewModel {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut LoginViewModel {
        &mut self.login
    }

    pub fn listing(&self) -> Option<&ListingViewModel> {
        self.listing.as_ref()
    }

    pub fn listing_mut(&mut self) -> Option<&mut ListingViewModel> {
        self.listing.as_mut()
    }

    // === Session lifecycle ===

    /// Clear the session, drop all listing state and block on an
    /// acknowledgement before returning to the login screen
    pub fn logout(&mut self) {
        if let Err(e) = self.session.teardown() {
            tracing::error!("Failed to clear stored session: {:#}", e);
        }
        if let Some(listing) = self.listing.take() {
            listing.unmount();
        }
        self.login = LoginViewModel::new(self.service.clone());
        self.acknowledgement = Some(LOGGED_OUT_MESSAGE.to_string());
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn acknowledgement(&self) -> Option<&str> {
        self.acknowledgement.as_deref()
    }

    /// Dismiss the logout acknowledgement and land on the login screen
    pub fn acknowledge(&mut self) {
        if self.acknowledgement.take().is_some() {
            self.navigate(Route::Login);
        }
    }

    fn finish_login(&mut self, result: anyhow::Result<String>) {
        let Some(token) = self.login.finish_login(result) else {
            return;
        };
        if let Err(e) = self.session.sign_in(token) {
            // Same outcome as a rejected login: stay on the form
            self.login
                .finish_login(Err(e.context("failed to store session")));
            return;
        }
        self.login = LoginViewModel::new(self.service.clone());
        self.navigate(Route::Users);
    }

    // === Responses and time ===

    /// Route one API response to the screen that issued it
    pub fn dispatch_response(&mut self, response: ApiResponse, now: Instant) {
        match response {
            ApiResponse::LoggedIn { result } => self.finish_login(result),
            response => match self.listing.as_mut() {
                Some(listing) if response.generation() == Some(listing.generation()) => {
                    listing.handle_response(response, now)
                }
                _ => tracing::debug!("Dropping response for unmounted listing: {:?}", response),
            },
        }
    }

    /// Apply every response that has completed so far. Returns how many.
    pub fn drain_responses(&mut self, now: Instant) -> usize {
        let mut count = 0;
        while let Some(response) = self.responses.poll_response() {
            self.dispatch_response(response, now);
            count += 1;
        }
        count
    }

    /// Wait for the next response and apply it. Returns false once every
    /// sender is gone.
    pub async fn wait_for_response(&mut self) -> bool {
        match self.responses.next_response().await {
            Some(response) => {
                self.dispatch_response(response, Instant::now());
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(listing) = self.listing.as_mut() {
            listing.tick(now);
        }
    }

    // === Terminal ===

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit(ViewEvent::FullRedrawRequired);
    }

    // === View events ===

    fn emit(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
    }

    /// Gather view events from every screen
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        let mut events = std::mem::take(&mut self.pending_view_events);
        events.extend(self.login.collect_pending_view_events());
        if let Some(listing) = self.listing.as_mut() {
            events.extend(listing.collect_pending_view_events());
        }
        events
    }
}
