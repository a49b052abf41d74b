//! Authentication capability.
//!
//! The login surface is split from persistence: an [`Authenticator`] only
//! knows how to sign a user in and hand out bearer tokens. The session owns
//! the data and talks to the backend.

pub mod credentials;
pub mod mock;
pub mod remote;

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::backend::BackendError;

pub use credentials::{CredentialStore, Credentials};
pub use mock::MockAuth;
pub use remote::{ProviderSettings, RemoteAuth};

/// Which family of implementations a session was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Offline: fixed catalog, local store, no network.
    Mock,
    /// Identity provider + REST backend.
    Remote,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Mock => "mock",
            SessionKind::Remote => "remote",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller must do after `login()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Signed in already.
    Complete,
    /// Open this URL; finish with `complete_login` once a token is obtained.
    Redirect(Url),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("access token expired and no refresh token is available")]
    Expired,

    #[error("token refresh failed: {0}")]
    Refresh(#[source] BackendError),

    #[error("invalid identity provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Sign-in state and bearer tokens for the current user.
pub trait Authenticator {
    fn kind(&self) -> SessionKind;

    /// Begin signing in.
    fn login(&mut self) -> Result<LoginStep, AuthError>;

    /// Forget credentials. Returns the provider's logout URL, if any.
    fn logout(&mut self) -> Result<Option<Url>, AuthError>;

    fn is_authenticated(&self) -> bool;

    /// True between `login()` and `complete_login()`.
    fn is_processing(&self) -> bool;

    /// Persist credentials obtained from the provider.
    fn complete_login(&mut self, credentials: Credentials) -> Result<(), AuthError>;

    /// A bearer token, refreshed through the provider when expired.
    fn access_token(&mut self) -> Result<String, AuthError>;

    fn email(&self) -> Option<String>;
}
