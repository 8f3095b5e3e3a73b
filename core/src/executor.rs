//! Request building, execution and outcome normalization.
//!
//! # Design
//! `build_request` and `normalize` are pure and carry all of the request and
//! response rules, so they can be driven by any host that does its own I/O.
//! `Executor` glues them to a `Transport`. Every path through `execute`
//! ends in exactly one `RequestOutcome`, and `dispatch` hands that outcome to
//! a `FnOnce` callback from a single call site, so a callback runs once.

use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::security::RequestConfig;
use crate::transport::{Transport, UreqTransport};

/// A 2xx payload: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Result of one request: either an error or a (possibly empty) body.
///
/// `raw` is present whenever the server answered, including non-2xx
/// responses, and absent when no response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    pub result: Result<Option<ResponseBody>, ApiError>,
    pub raw: Option<HttpResponse>,
}

impl RequestOutcome {
    pub fn failed(error: ApiError) -> Self {
        Self {
            result: Err(error),
            raw: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.result.as_ref().err()
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        self.result.as_ref().ok().and_then(Option::as_ref)
    }
}

/// Build the outgoing request from an already decorated configuration.
///
/// Query parameters are form-urlencoded onto `url`. A JSON body gets a
/// `content-type: application/json` header unless the caller set one.
pub fn build_request(
    method: HttpMethod,
    url: &str,
    config: &RequestConfig,
    body: Option<&serde_json::Value>,
) -> HttpRequest {
    let mut full_url = url.to_string();
    if !config.query_parameters.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(config.query_parameters.iter())
            .finish();
        full_url.push(if url.contains('?') { '&' } else { '?' });
        full_url.push_str(&query);
    }

    let mut headers: Vec<(String, String)> = config
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let body = body.map(|value| {
        if config.header_value("content-type").is_none() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        value.to_string()
    });

    HttpRequest {
        method,
        url: full_url,
        headers,
        body,
    }
}

/// Turn a received response into an outcome.
pub fn normalize(response: HttpResponse) -> RequestOutcome {
    if response.is_success() {
        let body = parse_body(&response.body);
        return RequestOutcome {
            result: Ok(body),
            raw: Some(response),
        };
    }

    let error = ApiError::Http {
        status: response.status,
        message: error_message(&response),
    };
    RequestOutcome {
        result: Err(error),
        raw: Some(response),
    }
}

fn parse_body(body: &str) -> Option<ResponseBody> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(value) => Some(ResponseBody::Json(value)),
        Err(_) => Some(ResponseBody::Text(body.to_string())),
    }
}

/// Best-effort diagnostic for a non-2xx response.
fn error_message(response: &HttpResponse) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(&response.body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(msg)) = fields.get(key) {
                return msg.clone();
            }
        }
    }
    let text = response.body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    ureq::http::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("unexpected status")
        .to_string()
}

/// Runs built requests over a transport.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform the request and normalize whatever happens.
    pub fn execute(&self, request: &HttpRequest) -> RequestOutcome {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        match self.transport.send(request) {
            Ok(response) => {
                tracing::debug!(status = response.status, url = %request.url, "received response");
                normalize(response)
            }
            Err(err) => {
                tracing::warn!(url = %request.url, error = %err, "transport failure");
                RequestOutcome::failed(err.into())
            }
        }
    }

    /// Execute on a worker thread and hand the outcome to `callback`.
    pub fn dispatch<F>(&self, request: HttpRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(RequestOutcome) + Send + 'static,
    {
        let executor = self.clone();
        std::thread::spawn(move || {
            let outcome = executor.execute(&request);
            callback(outcome);
        })
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(Arc::new(UreqTransport::new()))
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}
