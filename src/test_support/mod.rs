//! Test utilities and mocks for Cupboard unit tests.
//!
//! The main piece is [`MockTransport`], a stand-in for the reqwest client
//! that replays canned responses and records every request, so the REST
//! backend and the identity provider can be tested without a server.
//!
//! # Example
//!
//! ```rust,ignore
//! use cupboard::test_support::{MockHttpResponse, MockTransport};
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.mock(Method::Get, "/api/get_my_lists", MockHttpResponse::json(json!([])));
//! let mut backend = RestBackend::new("http://cupboard.test", "/api/create_user", transport.clone());
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::backend::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::backend::BackendError;

pub use fixtures::*;

/// Canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockHttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl MockHttpResponse {
    /// 200 with a raw body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        MockHttpResponse {
            status: 200,
            body: body.into(),
        }
    }

    /// 200 with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockHttpResponse::ok(value.to_string())
    }

    /// Empty body with the given status.
    pub fn status(status: u16) -> Self {
        MockHttpResponse {
            status,
            body: Vec::new(),
        }
    }

    pub fn not_found() -> Self {
        MockHttpResponse {
            status: 404,
            body: b"Not Found".to_vec(),
        }
    }
}

#[derive(Debug, Default)]
struct MockTransportState {
    responses: HashMap<(&'static str, String), MockHttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Transport that answers from a table keyed by method and URL path.
///
/// Unmatched requests fail with [`BackendError::Transport`], which is how a
/// connection failure surfaces from the real client.
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockTransportState>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Register a response for `method path`.
    pub fn mock(&self, method: Method, path: &str, response: MockHttpResponse) -> &Self {
        let mut state = self.state.lock().unwrap();
        state
            .responses
            .insert((method.as_str(), path.to_string()), response);
        self
    }

    /// All requests sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Paths of all requests sent so far.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, BackendError> {
        let mut state = self.state.lock().unwrap();
        let key = (request.method.as_str(), request.url.path().to_string());
        let url = request.url.to_string();
        state.requests.push(request);

        match state.responses.get(&key) {
            Some(response) => Ok(HttpResponse {
                status: response.status,
                body: response.body.clone(),
            }),
            None => Err(BackendError::Transport {
                url,
                message: "connection refused (no mock response)".to_string(),
            }),
        }
    }
}

/// Assertion helpers for testing.
pub mod assertions {
    /// Assert that an error message contains a substring.
    pub fn assert_error_contains<T: std::fmt::Debug, E: std::fmt::Display>(
        result: Result<T, E>,
        substring: &str,
    ) {
        match result {
            Ok(v) => panic!("expected Err containing '{}', got Ok: {:?}", substring, v),
            Err(e) => {
                let msg = e.to_string();
                assert!(
                    msg.contains(substring),
                    "error '{}' does not contain '{}'",
                    msg,
                    substring
                );
            }
        }
    }
}

/// Capture `tracing` output emitted while a closure runs.
pub mod logs {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a thread-local subscriber and return its result along
    /// with everything logged, one event per line without ANSI codes.
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();

        let value = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
        (value, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_mock_transport_replays_and_records() {
        let transport = MockTransport::new();
        transport.mock(
            Method::Get,
            "/api/get_all_recipes",
            MockHttpResponse::json(serde_json::json!([])),
        );

        let url = Url::parse("http://cupboard.test/api/get_all_recipes").unwrap();
        let response = transport.send(HttpRequest::get(url).bearer("t")).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"[]");
        assert_eq!(transport.paths(), vec!["/api/get_all_recipes"]);

        transport.clear_requests();
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_mock_transport_method_matters() {
        let transport = MockTransport::new();
        transport.mock(Method::Get, "/api/delete_list", MockHttpResponse::not_found());

        let url = Url::parse("http://cupboard.test/api/delete_list").unwrap();
        let err = transport
            .send(HttpRequest::post(url, serde_json::json!({})))
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport { .. }));
    }

    #[test]
    fn test_capture_logs() {
        let (value, output) = logs::capture(|| {
            tracing::error!(list = "Grocery", "list not found");
            7
        });
        assert_eq!(value, 7);
        assert!(output.contains("ERROR"));
        assert!(output.contains("list not found"));
        assert!(output.contains("list=\"Grocery\""));
    }

    #[test]
    fn test_assertions() {
        use assertions::*;

        let err_result: Result<i32, &str> = Err("list not found");
        assert_error_contains(err_result, "not found");
    }
}
