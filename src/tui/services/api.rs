//! # Directory API Client
//!
//! The remote user collection is a fixed external collaborator. [`UserApi`]
//! is the seam the rest of the application talks to; [`ReqresClient`] is the
//! reqwest-backed implementation for reqres-style endpoints:
//!
//! ```text
//! GET  {base}/users?page={n}   -> { "data": [User, ...], "total_pages": .. }
//! PUT  {base}/users/{id}       <- { changed fields }
//! POST {base}/login            <- { "email", "password" }  -> { "token" }
//! ```

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::Profile;
use crate::tui::models::{EditDraft, UserPage};

/// Boxed future returned by [`UserApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Header carrying the API key, when one is configured
pub const API_KEY_HEADER: &str = "x-api-key";

/// Login form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Operations the client needs from the remote user collection
pub trait UserApi: Send + Sync {
    /// Fetch one page of users
    fn list_users(&self, page: u32) -> ApiFuture<'_, UserPage>;

    /// Send a partial update for a user. The response body is ignored.
    fn update_user<'a>(&'a self, id: u64, changes: &'a EditDraft) -> ApiFuture<'a, ()>;

    /// Exchange credentials for a session token
    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, String>;
}

/// reqwest-backed [`UserApi`]
#[derive(Debug, Clone)]
pub struct ReqresClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReqresClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        tracing::debug!("ReqresClient created for {}", base_url);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build a client from a connection profile
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Self::new(&profile.base_url, profile.api_key.clone(), profile.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("{what}: request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{what}: server responded {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                body.trim()
            );
        }
        Ok(response)
    }

    async fn fetch_page(&self, page: u32) -> Result<UserPage> {
        let builder = self.request(Method::GET, "users").query(&[("page", page)]);
        let response = Self::send(builder, "list users").await?;
        response
            .json::<UserPage>()
            .await
            .context("list users: malformed response body")
    }

    async fn put_user(&self, id: u64, changes: &EditDraft) -> Result<()> {
        let builder = self
            .request(Method::PUT, &format!("users/{id}"))
            .json(changes);
        Self::send(builder, "update user").await?;
        Ok(())
    }

    async fn post_login(&self, credentials: &Credentials) -> Result<String> {
        let builder = self.request(Method::POST, "login").json(credentials);
        let response = Self::send(builder, "login").await?;
        let body: TokenResponse = response
            .json()
            .await
            .context("login: response did not carry a token")?;
        Ok(body.token)
    }
}

impl UserApi for ReqresClient {
    fn list_users(&self, page: u32) -> ApiFuture<'_, UserPage> {
        Box::pin(self.fetch_page(page))
    }

    fn update_user<'a>(&'a self, id: u64, changes: &'a EditDraft) -> ApiFuture<'a, ()> {
        Box::pin(self.put_user(id, changes))
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, String> {
        Box::pin(self.post_login(credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ReqresClient {
        ReqresClient::new(base, None, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_should_drop_trailing_slash() {
        let client = client("https://reqres.in/api/");
        assert_eq!(client.base_url(), "https://reqres.in/api");
        assert_eq!(client.url("users"), "https://reqres.in/api/users");
        assert_eq!(client.url("/users/2"), "https://reqres.in/api/users/2");
    }

    #[test]
    fn request_should_carry_api_key_when_configured() {
        let client = ReqresClient::new(
            "https://reqres.in/api",
            Some("reqres-free-v1".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let request = client.request(Method::GET, "users").build().unwrap();
        assert_eq!(
            request.headers().get(API_KEY_HEADER).unwrap(),
            "reqres-free-v1"
        );
    }

    #[test]
    fn page_request_should_encode_page_query() {
        let client = client("https://reqres.in/api");
        let request = client
            .request(Method::GET, "users")
            .query(&[("page", 3u32)])
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "https://reqres.in/api/users?page=3");
        assert!(request.headers().get(API_KEY_HEADER).is_none());
    }

    #[tokio::test]
    async fn unreachable_server_should_yield_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = ReqresClient::new("http://127.0.0.1:9", None, Duration::from_millis(500))
            .unwrap();
        assert!(client.list_users(1).await.is_err());
    }
}
