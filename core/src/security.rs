//! Security descriptors and the request decorator.
//!
//! # Design
//! A client carries one global `SecurityDescriptor` plus any number of named
//! descriptors (`SecuritySchemes`). `decorate` is a pure function that turns
//! the active descriptor and the caller's `RequestConfig` into the final
//! headers and query parameters of a request. Caller-supplied values are
//! merged last so they can deliberately override injected credentials.

use std::collections::BTreeMap;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ConfigError;

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    Header,
    Query,
}

impl FromStr for TokenPlacement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("HEADER") {
            Ok(TokenPlacement::Header)
        } else if s.eq_ignore_ascii_case("QUERY") {
            Ok(TokenPlacement::Query)
        } else {
            Err(ConfigError::UnknownLocation(s.to_string()))
        }
    }
}

/// The authentication mechanism applied to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecurityDescriptor {
    #[default]
    None,
    ApiKey {
        name: String,
        token: String,
        placement: TokenPlacement,
    },
    OAuth2 {
        token: String,
    },
    /// `credentials` is already base64 of `user:key`.
    Basic {
        credentials: String,
    },
}

impl SecurityDescriptor {
    /// API key descriptor. A missing `location` defaults to `HEADER`.
    pub fn api_key(name: &str, token: &str, location: Option<&str>) -> Result<Self, ConfigError> {
        let placement = match location {
            Some(location) => location.parse()?,
            None => {
                tracing::warn!("no token location given, defaulting to HEADER");
                TokenPlacement::Header
            }
        };
        Ok(SecurityDescriptor::ApiKey {
            name: name.to_string(),
            token: token.to_string(),
            placement,
        })
    }

    pub fn oauth2(token: &str) -> Self {
        SecurityDescriptor::OAuth2 {
            token: token.to_string(),
        }
    }

    pub fn basic(username: &str, key: &str) -> Self {
        SecurityDescriptor::Basic {
            credentials: STANDARD.encode(format!("{username}:{key}")),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SecurityDescriptor::None)
    }
}

/// Named descriptors selectable per request through `RequestConfig::scheme`.
pub type SecuritySchemes = BTreeMap<String, SecurityDescriptor>;

/// Per-call headers, query parameters and optional security scheme override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    pub headers: BTreeMap<String, String>,
    pub query_parameters: BTreeMap<String, String>,
    pub security_scheme: Option<String>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    pub fn scheme(mut self, name: impl Into<String>) -> Self {
        self.security_scheme = Some(name.into());
        self
    }

    /// Header value whose name matches `name` case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Merge the active security descriptor with the caller's configuration.
///
/// The descriptor named by `config.security_scheme` wins over `global` when
/// it is registered in `schemes`. Caller headers replace injected ones
/// case-insensitively; caller query parameters replace injected ones by
/// exact name.
pub fn decorate(
    config: Option<&RequestConfig>,
    global: &SecurityDescriptor,
    schemes: &SecuritySchemes,
) -> RequestConfig {
    let default_config = RequestConfig::default();
    let config = config.unwrap_or(&default_config);

    let descriptor = match config.security_scheme.as_deref() {
        Some(name) => match schemes.get(name) {
            Some(descriptor) => descriptor,
            None => {
                tracing::warn!(scheme = name, "unknown security scheme, using global security");
                global
            }
        },
        None => global,
    };

    let mut effective = RequestConfig {
        security_scheme: config.security_scheme.clone(),
        ..RequestConfig::default()
    };

    match descriptor {
        SecurityDescriptor::None => {}
        SecurityDescriptor::ApiKey {
            name,
            token,
            placement: TokenPlacement::Header,
        } => {
            effective.headers.insert(name.clone(), token.clone());
        }
        SecurityDescriptor::ApiKey {
            name,
            token,
            placement: TokenPlacement::Query,
        } => {
            effective.query_parameters.insert(name.clone(), token.clone());
        }
        SecurityDescriptor::OAuth2 { token } => {
            effective
                .headers
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        SecurityDescriptor::Basic { credentials } => {
            effective
                .headers
                .insert("Authorization".to_string(), format!("Basic {credentials}"));
        }
    }

    for (name, value) in &config.headers {
        effective.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
        effective.headers.insert(name.clone(), value.clone());
    }
    for (name, value) in &config.query_parameters {
        effective.query_parameters.insert(name.clone(), value.clone());
    }

    effective
}
