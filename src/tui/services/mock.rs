//! # Mock Directory API
//!
//! In-memory [`UserApi`] for tests. Serves fixed pages, records every call
//! and can be told to fail any class of request.

use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};

use super::api::{ApiFuture, Credentials, UserApi};
use crate::tui::models::{EditDraft, User, UserPage};

#[derive(Debug, Default)]
struct MockState {
    pages: Vec<Vec<User>>,
    token: String,
    fail_pages: bool,
    fail_updates: bool,
    fail_logins: bool,
    page_requests: Vec<u32>,
    updates: Vec<(u64, EditDraft)>,
    logins: Vec<Credentials>,
}

/// Mock API whose state is shared between clones
#[derive(Debug, Clone, Default)]
pub struct MockUserApi {
    state: Arc<Mutex<MockState>>,
}

impl MockUserApi {
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    /// Serve `pages[n - 1]` for page `n`; pages past the end come back empty
    pub fn with_pages(pages: Vec<Vec<User>>) -> Self {
        let api = Self::default();
        {
            let mut state = api.lock();
            state.pages = pages;
            state.token = "QpwL5tke4Pnpja7X4".to_string();
        }
        api
    }

    pub fn fail_pages(&self, fail: bool) {
        self.lock().fail_pages = fail;
    }

    pub fn fail_updates(&self, fail: bool) {
        self.lock().fail_updates = fail;
    }

    pub fn fail_logins(&self, fail: bool) {
        self.lock().fail_logins = fail;
    }

    /// Pages requested so far, in order
    pub fn page_requests(&self) -> Vec<u32> {
        self.lock().page_requests.clone()
    }

    /// Updates received so far, in order
    pub fn updates(&self) -> Vec<(u64, EditDraft)> {
        self.lock().updates.clone()
    }

    pub fn logins(&self) -> Vec<Credentials> {
        self.lock().logins.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn page(&self, page: u32) -> Result<UserPage> {
        let mut state = self.lock();
        state.page_requests.push(page);
        if state.fail_pages {
            anyhow::bail!("list users: server responded 500 Internal Server Error");
        }
        let total_pages = state.pages.len() as u32;
        let data = (page as usize)
            .checked_sub(1)
            .and_then(|index| state.pages.get(index))
            .cloned()
            .unwrap_or_default();
        Ok(UserPage {
            per_page: Some(data.len() as u32),
            data,
            page: Some(page),
            total: None,
            total_pages: Some(total_pages),
        })
    }

    fn update(&self, id: u64, changes: &EditDraft) -> Result<()> {
        let mut state = self.lock();
        state.updates.push((id, changes.clone()));
        if state.fail_updates {
            anyhow::bail!("update user: server responded 503 Service Unavailable");
        }
        Ok(())
    }

    fn sign_in(&self, credentials: &Credentials) -> Result<String> {
        let mut state = self.lock();
        state.logins.push(credentials.clone());
        if state.fail_logins {
            anyhow::bail!("login: server responded 400 Bad Request: user not found");
        }
        Ok(state.token.clone())
    }
}

impl UserApi for MockUserApi {
    fn list_users(&self, page: u32) -> ApiFuture<'_, UserPage> {
        let result = self.page(page);
        Box::pin(async move { result })
    }

    fn update_user<'a>(&'a self, id: u64, changes: &'a EditDraft) -> ApiFuture<'a, ()> {
        let result = self.update(id, changes);
        Box::pin(async move { result })
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, String> {
        let result = self.sign_in(credentials);
        Box::pin(async move { result })
    }
}
