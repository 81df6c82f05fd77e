//! Remote-auth HTTP client.
//!
//! [`AuthApi`] is the capability set the session manager depends on;
//! [`RemoteAuthClient`] is its production implementation over the
//! server's REST surface. Tests substitute an in-memory fake.
//!
//! Every call either returns the typed success payload or a
//! [`RemoteError`]. When the server supplies a structured reason
//! (`{"detail": …}`) that string becomes the message; otherwise the
//! fixed per-operation fallback is used, including for transport
//! failures where no body exists at all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::error::{RemoteError, Result};
use super::types::{RegisterProfile, User};

/// Fallback message for failed registration calls.
pub const REGISTER_FALLBACK: &str = "Registration error";
/// Fallback message for failed login and identity-lookup calls.
pub const LOGIN_FALLBACK: &str = "Login error";
/// Fallback message for failed email-verification calls.
pub const VERIFY_FALLBACK: &str = "Email verification failed";

/// Capability set for the remote authentication service.
///
/// The session manager holds this trait object rather than the concrete
/// client so flows can be exercised without a network.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Registers a new account and returns the created user record.
    async fn register(&self, profile: &RegisterProfile) -> Result<User>;

    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Fetches the user record the given bearer token belongs to.
    async fn fetch_current_user(&self, token: &str) -> Result<User>;

    /// Confirms an email address with a verification token.
    ///
    /// Returns the server's confirmation message.
    async fn verify_email(&self, token: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    // FastAPI-style servers send a string for handled errors and a
    // structured list for request-validation errors; only the string
    // form is surfaced to users.
    detail: Option<serde_json::Value>,
}

/// Reqwest-based [`AuthApi`] implementation.
pub struct RemoteAuthClient {
    client: Client,
    base_url: String,
}

impl RemoteAuthClient {
    /// Creates a client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| RemoteError::network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Maps a transport-level failure to a network error carrying the
    /// operation's fallback message (there is no server reason to show).
    fn transport_error(&self, fallback: &str, err: &reqwest::Error) -> RemoteError {
        if err.is_connect() {
            debug!(base_url = %self.base_url, "connection failed: {err}");
        } else {
            debug!("request failed: {err}");
        }
        RemoteError::network(fallback)
    }

    /// Maps a non-success response to an error, preferring the server's
    /// `detail` string over the fallback message.
    async fn error_from_response(fallback: &str, response: Response) -> RemoteError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| detail.as_str().map(str::to_owned))
            .unwrap_or_else(|| fallback.to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::auth(message),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                RemoteError::validation(message)
            }
            _ => RemoteError::network(message),
        }
    }

    /// Decodes a success body, failing closed as a network error when the
    /// payload does not match the expected schema.
    async fn decode<T: serde::de::DeserializeOwned>(
        fallback: &str,
        response: Response,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            debug!("response body did not match expected schema: {e}");
            RemoteError::network(fallback)
        })
    }
}

#[async_trait]
impl AuthApi for RemoteAuthClient {
    async fn register(&self, profile: &RegisterProfile) -> Result<User> {
        debug!(username = %profile.username, "POST /auth/register");
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(profile)
            .send()
            .await
            .map_err(|e| self.transport_error(REGISTER_FALLBACK, &e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(REGISTER_FALLBACK, response).await);
        }
        Self::decode(REGISTER_FALLBACK, response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String> {
        debug!(%username, "POST /auth/login");
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| self.transport_error(LOGIN_FALLBACK, &e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(LOGIN_FALLBACK, response).await);
        }
        let token: TokenResponse = Self::decode(LOGIN_FALLBACK, response).await?;
        Ok(token.access_token)
    }

    async fn fetch_current_user(&self, token: &str) -> Result<User> {
        debug!("GET /users/me");
        let response = self
            .client
            .get(self.url("/users/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.transport_error(LOGIN_FALLBACK, &e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(LOGIN_FALLBACK, response).await);
        }
        Self::decode(LOGIN_FALLBACK, response).await
    }

    async fn verify_email(&self, token: &str) -> Result<String> {
        debug!("GET /auth/verify-email");
        let response = self
            .client
            .get(self.url("/auth/verify-email"))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| self.transport_error(VERIFY_FALLBACK, &e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(VERIFY_FALLBACK, response).await);
        }
        let body: VerifyResponse = Self::decode(VERIFY_FALLBACK, response).await?;
        Ok(body.message)
    }
}

impl std::fmt::Debug for RemoteAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAuthClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
