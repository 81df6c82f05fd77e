//! Reusable test helpers for phonebook-core integration tests.
//!
//! [`ScriptedApi`] is an in-memory stand-in for the remote auth
//! service: each capability is scripted to succeed with a canned
//! payload or fail with a chosen error, and every call is recorded so
//! tests can assert on call order. No network is involved anywhere in
//! the test suite.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use phonebook_core::auth::{AuthApi, RegisterProfile, RemoteError, User};

/// Builds the user record the scripted API returns by default.
pub fn sample_user() -> User {
    User {
        id: 1,
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        avatar: Some("https://example.com/avatar.png".to_string()),
        role: Some("user".to_string()),
    }
}

type Outcome<T> = Result<T, RemoteError>;

struct Inner {
    register: Outcome<User>,
    login: Outcome<String>,
    me: Outcome<User>,
    verify: Outcome<String>,
    calls: Mutex<Vec<&'static str>>,
}

impl Inner {
    fn ok() -> Self {
        Self {
            register: Ok(sample_user()),
            login: Ok("tok-1".to_string()),
            me: Ok(sample_user()),
            verify: Ok("Email successfully verified".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

/// Scripted in-memory [`AuthApi`].
#[derive(Clone)]
pub struct ScriptedApi(Arc<Inner>);

impl ScriptedApi {
    /// All four capabilities succeed with canned payloads.
    pub fn ok() -> Self {
        Self(Arc::new(Inner::ok()))
    }

    /// Login step 1 fails with the given error.
    pub fn login_fails(error: RemoteError) -> Self {
        Self(Arc::new(Inner {
            login: Err(error),
            ..Inner::ok()
        }))
    }

    /// Login step 1 succeeds but the identity lookup fails.
    pub fn me_fails(error: RemoteError) -> Self {
        Self(Arc::new(Inner {
            me: Err(error),
            ..Inner::ok()
        }))
    }

    /// Registration fails with the given error.
    pub fn register_fails(error: RemoteError) -> Self {
        Self(Arc::new(Inner {
            register: Err(error),
            ..Inner::ok()
        }))
    }

    /// Verification fails with the given error.
    pub fn verify_fails(error: RemoteError) -> Self {
        Self(Arc::new(Inner {
            verify: Err(error),
            ..Inner::ok()
        }))
    }

    /// Names of the remote calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.0.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.0.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AuthApi for ScriptedApi {
    async fn register(&self, _profile: &RegisterProfile) -> Outcome<User> {
        self.record("register");
        self.0.register.clone()
    }

    async fn login(&self, _username: &str, _password: &str) -> Outcome<String> {
        self.record("login");
        self.0.login.clone()
    }

    async fn fetch_current_user(&self, _token: &str) -> Outcome<User> {
        self.record("me");
        self.0.me.clone()
    }

    async fn verify_email(&self, _token: &str) -> Outcome<String> {
        self.record("verify");
        self.0.verify.clone()
    }
}
