//! Session state machine.
//!
//! [`SessionManager`] owns all authentication state: the current
//! identity, the verification flag, the loading flag, the last remote
//! failure, and the roster of users created through registration. Every
//! transition runs to completion under `&mut self`; the only suspension
//! points are the remote calls themselves.

use std::sync::Arc;

use tracing::debug;

use super::client::AuthApi;
use super::error::{RemoteError, SessionError};
use super::types::{Credentials, Identity, OpFamily, RegisterProfile, User};

/// Owner of the authentication state machine.
///
/// Anonymous by default; may be re-hydrated to an authenticated state
/// at startup from a persisted snapshot.
pub struct SessionManager {
    client: Arc<dyn AuthApi>,
    identity: Option<Identity>,
    is_verified: bool,
    is_loading: bool,
    last_error: Option<SessionError>,
    roster: Vec<User>,
}

impl SessionManager {
    /// Creates an anonymous session backed by the given remote API.
    #[must_use]
    pub fn new(client: Arc<dyn AuthApi>) -> Self {
        Self {
            client,
            identity: None,
            is_verified: false,
            is_loading: false,
            last_error: None,
            roster: Vec::new(),
        }
    }

    /// Seeds session state from a persisted snapshot at startup.
    ///
    /// Called once before any intent is accepted; a present identity
    /// re-hydrates the session straight to authenticated.
    pub fn rehydrate(&mut self, identity: Option<Identity>, is_verified: bool) {
        if identity.is_some() {
            debug!("re-hydrated authenticated session from snapshot");
        }
        self.identity = identity;
        self.is_verified = is_verified;
    }

    // ==================== Intents ====================

    /// Registers a new account.
    ///
    /// Success appends the created user to the local roster; it does
    /// not authenticate the caller.
    ///
    /// # Errors
    ///
    /// Returns the normalized remote failure, which is also recorded in
    /// [`last_error`](Self::last_error). The session is otherwise
    /// unchanged on failure.
    pub async fn register(&mut self, profile: &RegisterProfile) -> Result<User, SessionError> {
        self.begin(OpFamily::Register);
        match self.client.register(profile).await {
            Ok(user) => {
                debug!(username = %user.username, "registered new user");
                self.is_loading = false;
                self.roster.push(user.clone());
                Ok(user)
            }
            Err(err) => Err(self.fail(OpFamily::Register, err)),
        }
    }

    /// Logs in with the given credentials.
    ///
    /// One composed task: obtain a bearer token, then fetch the identity
    /// it belongs to. Both calls must succeed; a failure in the second
    /// discards the token, so the session never holds a token without a
    /// user.
    ///
    /// # Errors
    ///
    /// Returns the normalized remote failure, also recorded in
    /// [`last_error`](Self::last_error). Identity is untouched on
    /// failure.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        self.begin(OpFamily::Login);
        match Self::login_task(self.client.as_ref(), credentials).await {
            Ok(identity) => {
                debug!(username = %identity.user.username, "session authenticated");
                self.is_loading = false;
                self.identity = Some(identity);
                Ok(())
            }
            Err(err) => Err(self.fail(OpFamily::Login, err)),
        }
    }

    /// The two remote login steps as a single unit.
    async fn login_task(
        client: &dyn AuthApi,
        credentials: &Credentials,
    ) -> Result<Identity, RemoteError> {
        let token = client
            .login(&credentials.username, &credentials.password)
            .await?;
        let user = client.fetch_current_user(&token).await?;
        Ok(Identity { user, token })
    }

    /// Confirms the user's email address with a verification token.
    ///
    /// Success sets the verified flag without touching the identity.
    ///
    /// # Errors
    ///
    /// Returns the normalized remote failure, also recorded in
    /// [`last_error`](Self::last_error); the verified flag stays false.
    pub async fn verify_email(&mut self, token: &str) -> Result<String, SessionError> {
        self.begin(OpFamily::Verify);
        match self.client.verify_email(token).await {
            Ok(message) => {
                debug!("email verified");
                self.is_loading = false;
                self.is_verified = true;
                Ok(message)
            }
            Err(err) => Err(self.fail(OpFamily::Verify, err)),
        }
    }

    /// Ends the session.
    ///
    /// Local-only and infallible: clears identity and the verified flag
    /// atomically, whether or not a session was active.
    pub fn logout(&mut self) {
        if self.identity.is_some() {
            debug!("session logged out");
        }
        self.identity = None;
        self.is_verified = false;
    }

    // ==================== State reads ====================

    /// Whether a bearer token is currently held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The current identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The current user record, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.identity.as_ref().map(|identity| &identity.user)
    }

    /// The current bearer token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.token.as_str())
    }

    /// Whether the user's email has been verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Whether a remote call is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The most recent remote failure, if its family has not been
    /// re-attempted since.
    #[must_use]
    pub const fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Users created through registration this process lifetime.
    #[must_use]
    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    // ==================== Transition plumbing ====================

    /// Marks an attempt as started: raises the loading flag and clears
    /// a previous error of the same family only.
    fn begin(&mut self, family: OpFamily) {
        debug!(family = family.as_str(), "session operation started");
        self.is_loading = true;
        if self
            .last_error
            .as_ref()
            .is_some_and(|err| err.family == family)
        {
            self.last_error = None;
        }
    }

    /// Records a failed attempt, clearing the loading flag.
    fn fail(&mut self, family: OpFamily, error: RemoteError) -> SessionError {
        debug!(
            family = family.as_str(),
            kind = error.kind.as_str(),
            "session operation failed: {}",
            error.message
        );
        self.is_loading = false;
        let err = SessionError::new(family, error);
        self.last_error = Some(err.clone());
        err
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("identity", &self.identity)
            .field("is_verified", &self.is_verified)
            .field("is_loading", &self.is_loading)
            .field("last_error", &self.last_error)
            .field("roster_len", &self.roster.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::auth::error::ErrorKind;

    /// Scripted fake: each capability either succeeds canned or fails.
    struct FakeApi {
        register: Result<User, RemoteError>,
        login: Result<String, RemoteError>,
        me: Result<User, RemoteError>,
        verify: Result<String, RemoteError>,
    }

    impl Default for FakeApi {
        fn default() -> Self {
            Self {
                register: Ok(sample_user()),
                login: Ok("tok-1".to_string()),
                me: Ok(sample_user()),
                verify: Ok("Email successfully verified".to_string()),
            }
        }
    }

    #[async_trait]
    impl AuthApi for FakeApi {
        async fn register(&self, _profile: &RegisterProfile) -> Result<User, RemoteError> {
            self.register.clone()
        }
        async fn login(&self, _username: &str, _password: &str) -> Result<String, RemoteError> {
            self.login.clone()
        }
        async fn fetch_current_user(&self, _token: &str) -> Result<User, RemoteError> {
            self.me.clone()
        }
        async fn verify_email(&self, _token: &str) -> Result<String, RemoteError> {
            self.verify.clone()
        }
    }

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            avatar: None,
            role: None,
        }
    }

    fn manager(api: FakeApi) -> SessionManager {
        SessionManager::new(Arc::new(api))
    }

    #[tokio::test]
    async fn login_sets_identity_atomically() {
        let mut session = manager(FakeApi::default());
        session
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-1"));
        assert_eq!(session.current_user().unwrap().username, "alice");
        assert!(!session.is_loading());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn login_step_two_failure_leaves_anonymous() {
        let mut session = manager(FakeApi {
            me: Err(RemoteError::auth("Could not validate credentials")),
            ..FakeApi::default()
        });

        let err = session
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(!session.is_authenticated());
        assert!(session.token().is_none(), "token must be discarded");
        assert!(session.current_user().is_none());
        assert!(!session.is_loading());
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn register_appends_roster_without_authenticating() {
        let mut session = manager(FakeApi::default());
        let user = session
            .register(&RegisterProfile::new("alice", "alice@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(session.roster().len(), 1);
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn register_failure_sets_last_error_only() {
        let mut session = manager(FakeApi {
            register: Err(RemoteError::validation("email taken")),
            ..FakeApi::default()
        });

        let result = session
            .register(&RegisterProfile::new("alice", "alice@example.com", "pw"))
            .await;

        assert!(result.is_err());
        assert!(session.roster().is_empty());
        assert_eq!(
            session.last_error().unwrap().error.message,
            "email taken"
        );
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn verify_email_sets_flag_without_touching_identity() {
        let mut session = manager(FakeApi::default());
        session
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap();

        session.verify_email("verify-token").await.unwrap();

        assert!(session.is_verified());
        assert_eq!(session.token(), Some("tok-1"));
    }

    #[tokio::test]
    async fn verify_failure_leaves_unverified() {
        let mut session = manager(FakeApi {
            verify: Err(RemoteError::validation("Invalid or expired token")),
            ..FakeApi::default()
        });

        let result = session.verify_email("stale").await;

        assert!(result.is_err());
        assert!(!session.is_verified());
    }

    #[tokio::test]
    async fn logout_clears_everything_and_never_fails() {
        let mut session = manager(FakeApi::default());
        session
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap();
        session.verify_email("t").await.unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.token().is_none());
        assert!(!session.is_verified());

        // Idempotent with no session active.
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn error_clears_per_family_only() {
        let mut session = manager(FakeApi {
            login: Err(RemoteError::auth("bad password")),
            ..FakeApi::default()
        });

        let _ = session.login(&Credentials::new("alice", "wrong")).await;
        assert!(session.last_error().is_some());

        // An unrelated family leaves the login error visible.
        session
            .register(&RegisterProfile::new("bob", "bob@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(session.last_error().unwrap().family, OpFamily::Login);

        // A fresh login attempt clears it at start; this one succeeds.
        let mut retry = manager(FakeApi::default());
        let _ = retry.login(&Credentials::new("alice", "wrong")).await;
        retry.login(&Credentials::new("alice", "pw")).await.unwrap();
        assert!(retry.last_error().is_none());
    }

    #[tokio::test]
    async fn rehydrate_restores_authenticated_state() {
        let mut session = manager(FakeApi::default());
        session.rehydrate(
            Some(Identity {
                user: sample_user(),
                token: "persisted-token".to_string(),
            }),
            true,
        );

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("persisted-token"));
        assert!(session.is_verified());
    }
}
