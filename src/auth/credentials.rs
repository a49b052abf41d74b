//! Stored access credentials.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::{read_to_string, remove_file_if_exists, write_string};

/// Tokens issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Unix timestamp (seconds) after which the access token is stale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Credentials {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            email: None,
        }
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Set expiry relative to now.
    pub fn expires_in(mut self, seconds: u64) -> Self {
        self.expires_at = Some(now_secs().saturating_add(seconds));
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs())
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// JSON file holding the signed-in user's credentials.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = read_to_string(&self.path)?;
        let credentials = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse credentials: {}", self.path.display()))?;
        Ok(Some(credentials))
    }

    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(credentials).context("failed to serialize credentials")?;
        write_string(&self.path, &contents)
    }

    pub fn clear(&self) -> Result<()> {
        remove_file_if_exists(&self.path)
    }
}
