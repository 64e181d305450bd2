//! Gateway error types

use thiserror::Error;

/// Gateway call failure with classification.
///
/// The engines only ever surface `message` (via a slice's `error` field);
/// `kind` exists for the gateway's own auth handling and for logging.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Server, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unknown, message)
    }

    pub fn is_auth(&self) -> bool {
        self.kind == GatewayErrorKind::Auth
    }
}

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Transport problems: connection refused, timeout, malformed body
    Network,
    /// Authorization failed (401, 403)
    Auth,
    /// Bad request (400, 404)
    InvalidRequest,
    /// Server error (5xx)
    Server,
    /// Anything else
    Unknown,
}
