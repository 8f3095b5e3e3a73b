//! Client SDK for the Criticide Probability Engine API.
//!
//! # Overview
//! Builds authenticated requests for the data-source and service-account
//! endpoints, executes them through a pluggable transport and normalizes
//! every result into a `RequestOutcome`: an error or a body, never both.
//!
//! # Design
//! - `security::decorate` merges the global or named security descriptor
//!   with per-call headers and query parameters; caller values win.
//! - `executor` holds the pure request/response rules (`build_request`,
//!   `normalize`) and the `Executor` that runs them over a `Transport`.
//! - `CriticideClient` maps each operation to a fixed (verb, path) and
//!   offers host-does-IO (`build_*`), blocking and callback entry points.
//! - Configuration errors are returned synchronously; request-time errors
//!   only ever appear inside an outcome.

pub mod client;
pub mod error;
pub mod executor;
pub mod http;
pub mod security;
pub mod transport;
pub mod types;

pub use client::{CriticideClient, DEFAULT_ENDPOINT};
pub use error::{ApiError, ConfigError, TransportError, TRANSPORT_FAILURE_STATUS};
pub use executor::{build_request, normalize, Executor, RequestOutcome, ResponseBody};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use security::{decorate, RequestConfig, SecurityDescriptor, SecuritySchemes, TokenPlacement};
pub use transport::{Transport, UreqTransport};
pub use types::{DataResourceDefinition, ServiceAccount};
