//! # Login View Model
//!
//! Email/password form that trades credentials for a session token.
//! No local validation: whatever was typed is sent.

use crate::tui::events::{LoginField, ViewEvent};
use crate::tui::services::{Credentials, DirectoryService};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

pub struct LoginViewModel {
    service: DirectoryService,
    email: String,
    password: String,
    focus: LoginField,
    submitting: bool,
    error: Option<String>,
    pending_view_events: Vec<ViewEvent>,
}

impl LoginViewModel {
    pub fn new(service: DirectoryService) -> Self {
        Self {
            service,
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            submitting: false,
            error: None,
            pending_view_events: Vec::new(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password as shown on screen
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.focused_input().push(ch);
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn backspace(&mut self) {
        self.focused_input().pop();
        self.emit(ViewEvent::FullRedrawRequired);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
        self.emit(ViewEvent::FullRedrawRequired);
    }

    /// Send the form. Ignored while a previous attempt is in flight.
    pub fn submit(&mut self) -> bool {
        if self.submitting {
            tracing::debug!("Login already in flight");
            return false;
        }
        self.submitting = true;
        self.error = None;
        self.service.request_login(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        });
        self.emit(ViewEvent::FullRedrawRequired);
        true
    }

    /// Apply a login result. Returns the token on success.
    pub fn finish_login(&mut self, result: anyhow::Result<String>) -> Option<String> {
        self.submitting = false;
        self.emit(ViewEvent::FullRedrawRequired);
        match result {
            Ok(token) => {
                tracing::info!("Login succeeded for {}", self.email);
                Some(token)
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {:#}", self.email, e);
                self.error = Some(LOGIN_FAILED_MESSAGE.to_string());
                None
            }
        }
    }

    fn emit(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
    }

    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::services::{ApiResponse, MockUserApi};
    use std::sync::Arc;

    fn login_with(api: &MockUserApi) -> (LoginViewModel, crate::tui::services::ResponseQueue) {
        let (service, queue) = DirectoryService::channel(Arc::new(api.clone()));
        (LoginViewModel::new(service), queue)
    }

    fn type_text(login: &mut LoginViewModel, text: &str) {
        for ch in text.chars() {
            login.insert_char(ch);
        }
    }

    #[test]
    fn typing_should_go_to_focused_field() {
        let (mut login, _queue) = login_with(&MockUserApi::new());
        type_text(&mut login, "eve.holt@reqres.in");
        login.toggle_focus();
        type_text(&mut login, "pistol");
        login.backspace();

        assert_eq!(login.email(), "eve.holt@reqres.in");
        assert_eq!(login.password(), "pisto");
        assert_eq!(login.masked_password(), "*****");
        assert_eq!(login.focus(), LoginField::Password);
    }

    #[tokio::test]
    async fn submit_should_send_credentials_and_return_token() {
        let api = MockUserApi::new();
        let (mut login, mut queue) = login_with(&api);
        type_text(&mut login, "eve.holt@reqres.in");
        login.toggle_focus();
        type_text(&mut login, "cityslicka");

        assert!(login.submit());
        assert!(!login.submit());

        let token = match queue.next_response().await {
            Some(ApiResponse::LoggedIn { result }) => login.finish_login(result),
            other => panic!("unexpected response: {other:?}"),
        };
        assert_eq!(token.as_deref(), Some("QpwL5tke4Pnpja7X4"));
        assert!(!login.is_submitting());
        assert_eq!(
            api.logins(),
            vec![Credentials {
                email: "eve.holt@reqres.in".to_string(),
                password: "cityslicka".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn failed_submit_should_show_error() {
        let api = MockUserApi::new();
        api.fail_logins(true);
        let (mut login, mut queue) = login_with(&api);

        login.submit();
        let token = match queue.next_response().await {
            Some(ApiResponse::LoggedIn { result }) => login.finish_login(result),
            other => panic!("unexpected response: {other:?}"),
        };

        assert!(token.is_none());
        assert_eq!(login.error(), Some(LOGIN_FAILED_MESSAGE));
        // Empty email was sent as-is
        assert_eq!(api.logins()[0].email, "");
    }
}
