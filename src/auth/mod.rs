//! Authentication: the session state machine and its remote API client.
//!
//! # Architecture
//!
//! ```text
//! SessionManager (state machine, owns Session)
//!     └── dyn AuthApi (capability set)
//!             └── RemoteAuthClient (reqwest, production)
//! ```
//!
//! The session holds `currentUser` and `token` as one [`Identity`]
//! value, so the two are set and cleared together by construction.
//! Remote failures never escape as panics or process errors; they are
//! normalized to [`RemoteError`] and recorded as the session's last
//! error.

mod client;
mod error;
mod session;
pub mod types;

pub use client::{AuthApi, RemoteAuthClient, LOGIN_FALLBACK, REGISTER_FALLBACK, VERIFY_FALLBACK};
pub use error::{ErrorKind, RemoteError, Result, SessionError};
pub use session::SessionManager;
pub use types::{Credentials, Identity, OpFamily, RegisterProfile, User};
