//! Identity-provider-backed authenticator (Auth0-style tenant).
//!
//! Login is redirect based: `login()` yields the authorize URL and the user
//! finishes with the token the provider hands back. Expired access tokens
//! are renewed through the provider's token endpoint when a refresh token
//! is available.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{AuthError, Authenticator, CredentialStore, Credentials, LoginStep, SessionKind};
use crate::backend::transport::{HttpRequest, Transport};

pub const DEFAULT_SCOPE: &str = "openid profile email offline_access";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/logged-in";

/// Identity provider settings resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub domain: String,
    pub client_id: String,
    pub audience: Option<String>,
    pub scope: String,
    pub redirect_uri: String,
}

impl ProviderSettings {
    pub fn new(domain: impl Into<String>, client_id: impl Into<String>) -> Self {
        ProviderSettings {
            domain: domain.into(),
            client_id: client_id.into(),
            audience: None,
            scope: DEFAULT_SCOPE.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }

    /// Provider base URL. A bare domain gets `https://`.
    fn base_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }

    pub fn authorize_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/authorize", self.base_url()))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "token")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri)
                .append_pair("scope", &self.scope);
            if let Some(audience) = &self.audience {
                query.append_pair("audience", audience);
            }
        }
        Ok(url)
    }

    pub fn logout_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/v2/logout", self.base_url()))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", &self.redirect_uri);
        Ok(url)
    }

    pub fn token_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}/oauth/token", self.base_url()))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

pub struct RemoteAuth {
    settings: ProviderSettings,
    store: CredentialStore,
    credentials: Option<Credentials>,
    processing: bool,
    transport: Arc<dyn Transport>,
}

impl RemoteAuth {
    /// Create an authenticator, picking up any stored credentials.
    ///
    /// An unreadable credential file is treated as signed out.
    pub fn new(settings: ProviderSettings, store: CredentialStore, transport: Arc<dyn Transport>) -> Self {
        let credentials = store.load().unwrap_or_else(|e| {
            warn!("ignoring stored credentials: {:#}", e);
            None
        });
        RemoteAuth {
            settings,
            store,
            credentials,
            processing: false,
            transport,
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn refresh(&mut self, refresh_token: &str) -> Result<Credentials, AuthError> {
        let url = self.settings.token_url()?;
        let mut body = json!({
            "grant_type": "refresh_token",
            "client_id": self.settings.client_id,
            "refresh_token": refresh_token,
        });
        if let Some(audience) = &self.settings.audience {
            body["audience"] = json!(audience);
        }

        debug!(%url, "refreshing access token");
        let response = self
            .transport
            .send(HttpRequest::post(url.clone(), body))
            .map_err(AuthError::Refresh)?;
        let token: TokenResponse = response.json(&url).map_err(AuthError::Refresh)?;

        let previous = self.credentials.clone();
        let mut credentials = Credentials::new(token.access_token);
        credentials.refresh_token = token
            .refresh_token
            .or_else(|| Some(refresh_token.to_string()));
        if let Some(seconds) = token.expires_in {
            credentials = credentials.expires_in(seconds);
        }
        credentials.email = previous.and_then(|c| c.email);
        Ok(credentials)
    }
}

impl Authenticator for RemoteAuth {
    fn kind(&self) -> SessionKind {
        SessionKind::Remote
    }

    fn login(&mut self) -> Result<LoginStep, AuthError> {
        let url = self.settings.authorize_url()?;
        self.processing = true;
        Ok(LoginStep::Redirect(url))
    }

    fn logout(&mut self) -> Result<Option<Url>, AuthError> {
        self.credentials = None;
        self.processing = false;
        self.store.clear()?;
        Ok(Some(self.settings.logout_url()?))
    }

    fn is_authenticated(&self) -> bool {
        match &self.credentials {
            Some(c) => !c.is_expired() || c.refresh_token.is_some(),
            None => false,
        }
    }

    fn is_processing(&self) -> bool {
        self.processing
    }

    fn complete_login(&mut self, credentials: Credentials) -> Result<(), AuthError> {
        self.processing = false;
        self.store.save(&credentials)?;
        self.credentials = Some(credentials);
        info!("stored access token");
        Ok(())
    }

    fn access_token(&mut self) -> Result<String, AuthError> {
        let credentials = self.credentials.as_ref().ok_or(AuthError::NotAuthenticated)?;
        if !credentials.is_expired() {
            return Ok(credentials.access_token.clone());
        }

        let refresh_token = credentials.refresh_token.clone().ok_or(AuthError::Expired)?;
        let refreshed = self.refresh(&refresh_token)?;
        self.store.save(&refreshed)?;
        let token = refreshed.access_token.clone();
        self.credentials = Some(refreshed);
        Ok(token)
    }

    fn email(&self) -> Option<String> {
        self.credentials.as_ref().and_then(|c| c.email.clone())
    }
}
