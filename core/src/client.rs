//! Facade over the Criticide Probability Engine API.
//!
//! # Design
//! `CriticideClient` holds the endpoint, the global security descriptor and
//! the named security schemes. Each API operation is a fixed (verb, path)
//! pair and comes in three shapes:
//! - `build_*` produces an `HttpRequest` for hosts that do their own I/O;
//! - the plain method executes it and returns a `RequestOutcome`;
//! - the `*_with` method executes it on a worker thread and hands the
//!   outcome to a one-shot callback.
//!
//! Security is read when the request is built, so an in-flight request
//! always uses the descriptor captured at call time. Reconfiguring takes
//! `&mut self`; a client shared behind a lock gives no ordering guarantee
//! between a reconfiguration and a concurrent call.

use std::sync::Arc;
use std::thread::JoinHandle;

use serde::Serialize;

use crate::error::{ApiError, ConfigError};
use crate::executor::{build_request, Executor, RequestOutcome, ResponseBody};
use crate::http::{HttpMethod, HttpRequest};
use crate::security::{decorate, RequestConfig, SecurityDescriptor, SecuritySchemes};
use crate::transport::Transport;
use crate::types::ServiceAccount;

pub const DEFAULT_ENDPOINT: &str = "https://api.criticide.io/next_version";

#[derive(Debug, Clone)]
pub struct CriticideClient {
    endpoint: String,
    global_security: SecurityDescriptor,
    security_schemes: SecuritySchemes,
    executor: Executor,
}

impl CriticideClient {
    /// Create a client for `endpoint`, or `DEFAULT_ENDPOINT` when `None`.
    ///
    /// Trailing slashes are stripped; an endpoint that is empty afterwards
    /// is rejected.
    pub fn new(endpoint: Option<&str>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT).trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(Self::with_endpoint(endpoint.to_string()))
    }

    fn with_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            global_security: SecurityDescriptor::None,
            security_schemes: SecuritySchemes::new(),
            executor: Executor::default(),
        }
    }

    /// Replace the bundled `ureq` transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.executor = Executor::new(transport);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn global_security(&self) -> &SecurityDescriptor {
        &self.global_security
    }

    pub fn security_schemes(&self) -> &SecuritySchemes {
        &self.security_schemes
    }

    /// Authenticate with an API key sent as a header or query parameter.
    ///
    /// `location` is `HEADER` or `QUERY` in any case and defaults to
    /// `HEADER`. The previous global security is only replaced on success.
    pub fn configure_global_api_token(
        &mut self,
        name: &str,
        value: &str,
        location: Option<&str>,
    ) -> Result<(), ConfigError> {
        self.global_security = SecurityDescriptor::api_key(name, value, location)?;
        Ok(())
    }

    pub fn configure_global_oauth2_token(&mut self, token: &str) {
        self.global_security = SecurityDescriptor::oauth2(token);
    }

    pub fn configure_global_basic_authentication(&mut self, username: &str, key: &str) {
        self.global_security = SecurityDescriptor::basic(username, key);
    }

    /// Register a descriptor that requests can select with
    /// `RequestConfig::scheme(name)`. Re-registering a name replaces it.
    pub fn configure_security_scheme(&mut self, name: &str, descriptor: SecurityDescriptor) {
        self.security_schemes.insert(name.to_string(), descriptor);
    }

    // -----------------------------------------------------------------------
    // POST /data-source
    // -----------------------------------------------------------------------

    pub fn build_post_data_source<B: Serialize>(
        &self,
        body: &B,
        config: Option<&RequestConfig>,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build(HttpMethod::Post, "/data-source", config, Some(&body)))
    }

    pub fn post_data_source<B: Serialize>(
        &self,
        body: &B,
        config: Option<&RequestConfig>,
    ) -> RequestOutcome {
        match self.build_post_data_source(body, config) {
            Ok(request) => self.executor.execute(&request),
            Err(err) => RequestOutcome::failed(err),
        }
    }

    pub fn post_data_source_with<B, F>(
        &self,
        body: &B,
        config: Option<&RequestConfig>,
        callback: F,
    ) -> JoinHandle<()>
    where
        B: Serialize,
        F: FnOnce(RequestOutcome) + Send + 'static,
    {
        match self.build_post_data_source(body, config) {
            Ok(request) => self.executor.dispatch(request, callback),
            Err(err) => std::thread::spawn(move || callback(RequestOutcome::failed(err))),
        }
    }

    // -----------------------------------------------------------------------
    // GET /service-account
    // -----------------------------------------------------------------------

    pub fn build_get_service_account(&self, config: Option<&RequestConfig>) -> HttpRequest {
        self.build(HttpMethod::Get, "/service-account", config, None)
    }

    pub fn get_service_account(&self, config: Option<&RequestConfig>) -> RequestOutcome {
        self.executor.execute(&self.build_get_service_account(config))
    }

    pub fn get_service_account_with<F>(
        &self,
        config: Option<&RequestConfig>,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(RequestOutcome) + Send + 'static,
    {
        self.executor
            .dispatch(self.build_get_service_account(config), callback)
    }

    /// Decode a `get_service_account` outcome into a `ServiceAccount`.
    pub fn parse_get_service_account(
        &self,
        outcome: &RequestOutcome,
    ) -> Result<ServiceAccount, ApiError> {
        match &outcome.result {
            Err(err) => Err(err.clone()),
            Ok(Some(ResponseBody::Json(value))) => serde_json::from_value(value.clone())
                .map_err(|e| ApiError::Deserialization(e.to_string())),
            Ok(Some(ResponseBody::Text(text))) => Err(ApiError::Deserialization(format!(
                "expected a JSON service account, got: {text}"
            ))),
            Ok(None) => Err(ApiError::Deserialization(
                "empty service account response".to_string(),
            )),
        }
    }

    fn build(
        &self,
        method: HttpMethod,
        path: &str,
        config: Option<&RequestConfig>,
        body: Option<&serde_json::Value>,
    ) -> HttpRequest {
        let effective = decorate(config, &self.global_security, &self.security_schemes);
        build_request(method, &format!("{}{path}", self.endpoint), &effective, body)
    }
}

impl Default for CriticideClient {
    fn default() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string())
    }
}
