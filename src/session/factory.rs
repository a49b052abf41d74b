//! Build a [`Session`] from configuration.
//!
//! The configured identity provider decides the session family. Without
//! one, the session runs offline: mock auth plus a file-backed mock store
//! in the state directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::auth::{Authenticator, CredentialStore, MockAuth, RemoteAuth, SessionKind};
use crate::backend::{Backend, MockBackend, ReqwestTransport, RestBackend, Transport};
use crate::session::Session;
use crate::util::{Config, CupboardContext};

/// Create the session for this invocation and fill its cache.
pub fn create_session(config: &Config, ctx: &CupboardContext) -> Result<Session> {
    let transport: Option<Arc<dyn Transport>> = match config.session_kind() {
        SessionKind::Remote => Some(Arc::new(
            ReqwestTransport::new(config.net.timeout()).context("failed to create HTTP client")?,
        )),
        SessionKind::Mock => None,
    };
    create_session_with_transport(config, ctx, transport)
}

/// Like [`create_session`] with a caller-supplied transport for the remote
/// family. Offline sessions ignore it.
pub fn create_session_with_transport(
    config: &Config,
    ctx: &CupboardContext,
    transport: Option<Arc<dyn Transport>>,
) -> Result<Session> {
    let (auth, backend): (Box<dyn Authenticator>, Box<dyn Backend>) =
        match (config.provider_settings(), transport) {
            (Some(settings), Some(transport)) => {
                debug!(
                    domain = %settings.domain,
                    host = config.backend_host(),
                    "using remote session"
                );
                let store = CredentialStore::new(ctx.credentials_path());
                let auth = RemoteAuth::new(settings, store, transport.clone());
                let backend =
                    RestBackend::new(config.backend_host(), config.create_user_path(), transport);
                (Box::new(auth), Box::new(backend))
            }
            (Some(_), None) => {
                anyhow::bail!("remote session requires an HTTP transport");
            }
            (None, _) => {
                let path = ctx.mock_store_path();
                debug!(store = %path.display(), "using offline session");
                (Box::new(MockAuth::signed_in()), Box::new(MockBackend::open(&path)?))
            }
        };

    let mut session = Session::new(auth, backend);
    if session.is_authenticated() {
        session.refresh();
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::backend::transport::Method;
    use crate::test_support::{tomato, MockHttpResponse, MockTransport};
    use serde_json::json;
    use tempfile::TempDir;

    fn ctx(tmp: &TempDir) -> CupboardContext {
        CupboardContext::with_paths(tmp.path(), tmp.path().join("home"))
    }

    fn remote_config() -> Config {
        let mut config = Config::default();
        config.backend.host = Some("http://cupboard.test".to_string());
        config.identity.domain = Some("tenant.example.com".to_string());
        config.identity.client_id = Some("client".to_string());
        config
    }

    #[test]
    fn test_default_config_is_offline() {
        let tmp = TempDir::new().unwrap();
        let session = create_session(&Config::default(), &ctx(&tmp)).unwrap();
        assert_eq!(session.kind(), SessionKind::Mock);
        assert_eq!(session.all_ingredients().len(), 4);
        assert_eq!(session.lists().len(), 2);
    }

    #[test]
    fn test_offline_state_persists_between_sessions() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx(&tmp);

        let mut first = create_session(&Config::default(), &ctx).unwrap();
        assert!(first.create_list("Grocery", vec![tomato(4.0)]));
        assert!(ctx.mock_store_path().exists());

        let second = create_session(&Config::default(), &ctx).unwrap();
        assert_eq!(second.list("Grocery").unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_offline_store_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx(&tmp);
        std::fs::create_dir_all(ctx.state_dir()).unwrap();
        std::fs::write(ctx.mock_store_path(), "{not json").unwrap();

        let err = create_session(&Config::default(), &ctx).err().unwrap();
        assert!(format!("{:#}", err).contains("failed to parse offline store"));
    }

    #[test]
    fn test_remote_config_without_credentials() {
        let tmp = TempDir::new().unwrap();
        let transport = Arc::new(MockTransport::new());
        let session =
            create_session_with_transport(&remote_config(), &ctx(&tmp), Some(transport.clone()))
                .unwrap();

        assert_eq!(session.kind(), SessionKind::Remote);
        assert!(!session.is_authenticated());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_remote_config_with_stored_credentials_fetches() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx(&tmp);
        CredentialStore::new(ctx.credentials_path())
            .save(&Credentials::new("stored-token"))
            .unwrap();

        let transport = Arc::new(MockTransport::new());
        transport.mock(Method::Get, "/api/get_all_ingredients", MockHttpResponse::json(json!([])));
        transport.mock(Method::Get, "/api/get_my_lists", MockHttpResponse::json(json!([])));
        transport.mock(Method::Get, "/api/get_all_recipes", MockHttpResponse::json(json!([])));

        let session =
            create_session_with_transport(&remote_config(), &ctx, Some(transport.clone())).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.requests()[0].url.as_str(), "http://cupboard.test/api/get_all_ingredients");
    }

    #[test]
    fn test_remote_without_transport_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(create_session_with_transport(&remote_config(), &ctx(&tmp), None).is_err());
    }
}
