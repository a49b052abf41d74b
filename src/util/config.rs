//! Configuration file support for Cupboard.
//!
//! Cupboard supports two configuration file locations:
//! - Global: `~/.cupboard/config.toml` - User-wide defaults
//! - Project: `.cupboard/config.toml` - Directory-specific overrides
//!
//! Project config takes precedence over global config, and `CUPBOARD_*`
//! environment variables take precedence over both.
//!
//! A config with an identity domain and client id selects the remote
//! session; anything less runs offline against the mock backend.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::remote::{DEFAULT_REDIRECT_URI, DEFAULT_SCOPE};
use crate::auth::{ProviderSettings, SessionKind};
use crate::backend::rest::DEFAULT_CREATE_USER_PATH;

/// Backend host used when none is configured.
pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:8080";

pub const ENV_BACKEND_HOST: &str = "CUPBOARD_BACKEND_HOST";
pub const ENV_CREATE_USER_PATH: &str = "CUPBOARD_CREATE_USER_PATH";
pub const ENV_AUTH_DOMAIN: &str = "CUPBOARD_AUTH_DOMAIN";
pub const ENV_AUTH_CLIENT_ID: &str = "CUPBOARD_AUTH_CLIENT_ID";
pub const ENV_AUTH_AUDIENCE: &str = "CUPBOARD_AUTH_AUDIENCE";
pub const ENV_AUTH_SCOPE: &str = "CUPBOARD_AUTH_SCOPE";

/// Cupboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REST backend settings
    pub backend: BackendConfig,

    /// Identity provider settings
    pub identity: IdentityConfig,

    /// Network settings
    pub net: NetConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend (e.g., https://api.example.com)
    pub host: Option<String>,

    /// Path of the user registration endpoint
    pub create_user_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Identity provider tenant domain
    pub domain: Option<String>,

    pub client_id: Option<String>,

    /// API audience requested with the access token
    pub audience: Option<String>,

    pub scope: Option<String>,

    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Request timeout in seconds (None = client default)
    pub timeout_secs: Option<u64>,
}

impl NetConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Config::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Config::default()
            })
        } else {
            Config::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        merge_opt(&mut self.backend.host, other.backend.host);
        merge_opt(&mut self.backend.create_user_path, other.backend.create_user_path);

        merge_opt(&mut self.identity.domain, other.identity.domain);
        merge_opt(&mut self.identity.client_id, other.identity.client_id);
        merge_opt(&mut self.identity.audience, other.identity.audience);
        merge_opt(&mut self.identity.scope, other.identity.scope);
        merge_opt(&mut self.identity.redirect_uri, other.identity.redirect_uri);

        merge_opt(&mut self.net.timeout_secs, other.net.timeout_secs);
    }

    /// Apply `CUPBOARD_*` overrides. Empty values are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        merge_opt(&mut self.backend.host, get(ENV_BACKEND_HOST));
        merge_opt(&mut self.backend.create_user_path, get(ENV_CREATE_USER_PATH));
        merge_opt(&mut self.identity.domain, get(ENV_AUTH_DOMAIN));
        merge_opt(&mut self.identity.client_id, get(ENV_AUTH_CLIENT_ID));
        merge_opt(&mut self.identity.audience, get(ENV_AUTH_AUDIENCE));
        merge_opt(&mut self.identity.scope, get(ENV_AUTH_SCOPE));
    }

    /// Identity provider settings, if both domain and client id are set.
    pub fn provider_settings(&self) -> Option<ProviderSettings> {
        let domain = self.identity.domain.as_ref()?;
        let client_id = self.identity.client_id.as_ref()?;

        let mut settings = ProviderSettings::new(domain.clone(), client_id.clone());
        settings.audience = self.identity.audience.clone();
        settings.scope = self
            .identity
            .scope
            .clone()
            .unwrap_or_else(|| DEFAULT_SCOPE.to_string());
        settings.redirect_uri = self
            .identity
            .redirect_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        Some(settings)
    }

    pub fn backend_host(&self) -> &str {
        self.backend.host.as_deref().unwrap_or(DEFAULT_BACKEND_HOST)
    }

    pub fn create_user_path(&self) -> &str {
        self.backend
            .create_user_path
            .as_deref()
            .unwrap_or(DEFAULT_CREATE_USER_PATH)
    }

    /// Which session family this config selects.
    pub fn session_kind(&self) -> SessionKind {
        if self.provider_settings().is_some() {
            SessionKind::Remote
        } else {
            SessionKind::Mock
        }
    }
}

fn merge_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cupboard/config.toml)
/// 2. Global config (~/.cupboard/config.toml)
/// 3. Defaults
///
/// Environment overrides are applied separately with [`Config::apply_env`].
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    if project_path != global_path && project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::configs;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.backend.host.is_none());
        assert_eq!(config.backend_host(), DEFAULT_BACKEND_HOST);
        assert_eq!(config.create_user_path(), DEFAULT_CREATE_USER_PATH);
        assert_eq!(config.session_kind(), SessionKind::Mock);
        assert!(config.net.timeout().is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[backend]
host = "https://api.cupboard.test"
create_user_path = "/api/users"

[identity]
domain = "tenant.example.com"
client_id = "abc"
audience = "https://api.cupboard.test"

[net]
timeout_secs = 15
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.backend_host(), "https://api.cupboard.test");
        assert_eq!(config.create_user_path(), "/api/users");
        assert_eq!(config.identity.client_id, Some("abc".to_string()));
        assert_eq!(config.net.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.session_kind(), SessionKind::Remote);
    }

    #[test]
    fn test_config_load_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[backend\nhost = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.backend.host = Some("http://one".to_string());
        base.identity.domain = Some("tenant".to_string());

        let mut override_cfg = Config::default();
        override_cfg.backend.host = Some("http://two".to_string());

        base.merge(override_cfg);

        assert_eq!(base.backend_host(), "http://two");
        assert_eq!(base.identity.domain, Some("tenant".to_string())); // Not overridden
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND_HOST, "http://env-host"),
            (ENV_AUTH_DOMAIN, "env.example.com"),
            (ENV_AUTH_CLIENT_ID, "env-client"),
            (ENV_AUTH_SCOPE, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.identity.scope = Some("openid".to_string());
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend_host(), "http://env-host");
        assert_eq!(config.identity.scope, Some("openid".to_string()));

        let settings = config.provider_settings().unwrap();
        assert_eq!(settings.domain, "env.example.com");
        assert_eq!(settings.client_id, "env-client");
        assert_eq!(settings.scope, "openid");
        assert_eq!(settings.redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn test_domain_without_client_id_stays_mock() {
        let mut config = Config::default();
        config.identity.domain = Some("tenant".to_string());
        assert!(config.provider_settings().is_none());
        assert_eq!(config.session_kind(), SessionKind::Mock);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            configs::remote("http://global-host", "tenant.example.com", "abc"),
        )
        .unwrap();
        std::fs::write(&project_path, configs::backend_only("http://project-host")).unwrap();

        let config = load_config(&global_path, &project_path);

        // Project config should override the host
        assert_eq!(config.backend_host(), "http://project-host");
        // Global identity should be preserved
        assert_eq!(config.identity.domain, Some("tenant.example.com".to_string()));
        assert_eq!(config.session_kind(), SessionKind::Remote);
    }
}
