//! # Directory Service
//!
//! Runs [`UserApi`] calls off the event loop. Each request is spawned as a
//! tokio task and its completion comes back as an [`ApiResponse`] through a
//! channel, which the application drains on every loop tick.
//!
//! Listing requests carry the generation of the listing mount that issued
//! them, so a response outliving its screen can be told apart from one
//! for the screen mounted now.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::api::{Credentials, UserApi};
use crate::tui::models::{EditDraft, UserPage};

/// Completion of a spawned API call
#[derive(Debug)]
pub enum ApiResponse {
    /// Result of fetching a page, tagged with the page that was requested
    Page {
        generation: u64,
        page: u32,
        result: Result<UserPage>,
    },
    /// Result of a partial update, carrying the draft that was sent
    Updated {
        generation: u64,
        id: u64,
        draft: EditDraft,
        result: Result<()>,
    },
    /// Result of a login attempt
    LoggedIn { result: Result<String> },
}

impl ApiResponse {
    /// Listing mount that issued the request, if it came from a listing
    pub fn generation(&self) -> Option<u64> {
        match self {
            ApiResponse::Page { generation, .. } | ApiResponse::Updated { generation, .. } => {
                Some(*generation)
            }
            ApiResponse::LoggedIn { .. } => None,
        }
    }
}

/// Cloneable handle for issuing API calls
#[derive(Clone)]
pub struct DirectoryService {
    api: Arc<dyn UserApi>,
    response_sender: mpsc::UnboundedSender<ApiResponse>,
}

/// Receiving end of the response channel
pub struct ResponseQueue {
    response_receiver: mpsc::UnboundedReceiver<ApiResponse>,
}

impl DirectoryService {
    /// Create a service together with the queue its responses arrive on
    pub fn channel(api: Arc<dyn UserApi>) -> (Self, ResponseQueue) {
        let (response_sender, response_receiver) = mpsc::unbounded_channel();
        (
            Self {
                api,
                response_sender,
            },
            ResponseQueue { response_receiver },
        )
    }

    /// Fetch a page in the background
    pub fn request_page(&self, generation: u64, page: u32) {
        tracing::debug!("Requesting users page {} (mount {})", page, generation);
        let api = Arc::clone(&self.api);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = api.list_users(page).await;
            // Receiver may be gone if the app is shutting down
            let _ = sender.send(ApiResponse::Page {
                generation,
                page,
                result,
            });
        });
    }

    /// Send a partial update in the background
    pub fn request_update(&self, generation: u64, id: u64, draft: EditDraft) {
        tracing::debug!("Requesting update of user {} ({} fields)", id, draft.len());
        let api = Arc::clone(&self.api);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = api.update_user(id, &draft).await;
            let _ = sender.send(ApiResponse::Updated {
                generation,
                id,
                draft,
                result,
            });
        });
    }

    /// Attempt a login in the background
    pub fn request_login(&self, credentials: Credentials) {
        tracing::debug!("Requesting login for {}", credentials.email);
        let api = Arc::clone(&self.api);
        let sender = self.response_sender.clone();
        tokio::spawn(async move {
            let result = api.login(&credentials).await;
            let _ = sender.send(ApiResponse::LoggedIn { result });
        });
    }
}

impl ResponseQueue {
    /// Next completed response, if any (non-blocking)
    pub fn poll_response(&mut self) -> Option<ApiResponse> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next completed response
    pub async fn next_response(&mut self) -> Option<ApiResponse> {
        self.response_receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::models::user::sample_users;
    use crate::tui::models::UserField;
    use crate::tui::services::MockUserApi;

    #[tokio::test]
    async fn page_response_should_be_tagged_with_requested_page() {
        let api = MockUserApi::with_pages(vec![sample_users()]);
        let (service, mut queue) = DirectoryService::channel(Arc::new(api));

        service.request_page(3, 1);

        match queue.next_response().await {
            Some(ApiResponse::Page {
                generation,
                page,
                result,
            }) => {
                assert_eq!(generation, 3);
                assert_eq!(page, 1);
                assert_eq!(result.unwrap().data.len(), 5);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_response_should_carry_sent_draft() {
        let api = MockUserApi::with_pages(vec![sample_users()]);
        let (service, mut queue) = DirectoryService::channel(Arc::new(api.clone()));
        let mut draft = EditDraft::new();
        draft.set(UserField::Email, "new@reqres.in");

        service.request_update(1, 4, draft.clone());

        match queue.next_response().await {
            Some(ApiResponse::Updated {
                generation,
                id,
                draft: sent,
                result,
            }) => {
                assert_eq!(generation, 1);
                assert_eq!(id, 4);
                assert_eq!(sent, draft);
                assert!(result.is_ok());
            }
            other => panic!("unexpected response: {other:?}"),
        }
        assert_eq!(api.updates(), vec![(4, draft)]);
    }

    #[tokio::test]
    async fn failed_login_should_arrive_as_error() {
        let api = MockUserApi::new();
        api.fail_logins(true);
        let (service, mut queue) = DirectoryService::channel(Arc::new(api));

        service.request_login(Credentials {
            email: "eve.holt@reqres.in".to_string(),
            password: "cityslicka".to_string(),
        });

        let response = queue.next_response().await.unwrap();
        assert_eq!(response.generation(), None);
        match response {
            ApiResponse::LoggedIn { result } => assert!(result.is_err()),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn poll_should_return_none_when_nothing_completed() {
        let (_service, mut queue) = DirectoryService::channel(Arc::new(MockUserApi::new()));
        assert!(queue.poll_response().is_none());
    }
}
