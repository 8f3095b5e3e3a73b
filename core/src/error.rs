//! Error types for the Criticide API client.
//!
//! # Design
//! Errors are split by when they surface. `ConfigError` is returned
//! synchronously while a client is being constructed or its security is
//! being configured. `ApiError` is only ever delivered inside a
//! `RequestOutcome`: request-time failures are values, never panics.
//! `TransportError` is what a `Transport` reports when no response was
//! received at all, or when a response started but its body could not be
//! read; in the latter case the status line is kept.

use thiserror::Error;

/// Status reported by `ApiError::status` when no HTTP response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Invalid constructor or security-configuration arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint parameter must be a non-empty string")]
    EmptyEndpoint,

    /// Token location other than HEADER or QUERY (compared case-insensitively).
    #[error("unknown location: {0}")]
    UnknownLocation(String),
}

/// Network-level failure: DNS, refused connection, broken stream, ...
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    /// Status line received before the failure, if any.
    pub status: Option<u16>,
}

impl TransportError {
    /// Failure before any response arrived.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Failure while reading the body of a response with `status`.
    pub fn after_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// Errors delivered in the error channel of a request outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received, or its body could not be read.
    #[error("transport failure: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The server answered with a status outside `[200, 300)`.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A success body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// HTTP status of the failure, or `TRANSPORT_FAILURE_STATUS` when the
    /// request never produced a status line.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Transport {
                status: Some(status),
                ..
            } => *status,
            _ => TRANSPORT_FAILURE_STATUS,
        }
    }

    /// Human-readable diagnostic. Not a parseable contract.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::Transport { message, .. } => {
                message.clone()
            }
            ApiError::Serialization(msg)
            | ApiError::Deserialization(msg) => msg.clone(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport {
            status: err.status,
            message: err.message,
        }
    }
}
