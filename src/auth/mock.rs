//! Offline authenticator. Login completes immediately.

use url::Url;

use crate::auth::{AuthError, Authenticator, Credentials, LoginStep, SessionKind};

pub const MOCK_EMAIL: &str = "mock@cupboard.local";
const MOCK_TOKEN: &str = "mock-access-token";

#[derive(Debug, Clone)]
pub struct MockAuth {
    authenticated: bool,
    email: String,
}

impl MockAuth {
    /// A mock user that is already signed in.
    pub fn signed_in() -> Self {
        MockAuth {
            authenticated: true,
            email: MOCK_EMAIL.to_string(),
        }
    }

    pub fn signed_out() -> Self {
        MockAuth {
            authenticated: false,
            email: MOCK_EMAIL.to_string(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        MockAuth::signed_in()
    }
}

impl Authenticator for MockAuth {
    fn kind(&self) -> SessionKind {
        SessionKind::Mock
    }

    fn login(&mut self) -> Result<LoginStep, AuthError> {
        self.authenticated = true;
        Ok(LoginStep::Complete)
    }

    fn logout(&mut self) -> Result<Option<Url>, AuthError> {
        self.authenticated = false;
        Ok(None)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn is_processing(&self) -> bool {
        false
    }

    fn complete_login(&mut self, credentials: Credentials) -> Result<(), AuthError> {
        if let Some(email) = credentials.email {
            self.email = email;
        }
        self.authenticated = true;
        Ok(())
    }

    fn access_token(&mut self) -> Result<String, AuthError> {
        if !self.authenticated {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(MOCK_TOKEN.to_string())
    }

    fn email(&self) -> Option<String> {
        self.authenticated.then(|| self.email.clone())
    }
}
