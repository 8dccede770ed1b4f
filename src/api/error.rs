//! Gateway error types

use thiserror::Error;

use super::Endpoint;

/// Failure of a single webhook call.
///
/// Every variant is recoverable: the caller stays on its stage and reports the
/// message to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { endpoint: Endpoint, status: u16 },
    /// The request never completed (DNS, connection refused, reset, ...)
    #[error("{message}")]
    Network { endpoint: Endpoint, message: String },
    /// 2xx response whose body is not the JSON we expect
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: Endpoint, message: String },
    /// The request payload could not be encoded
    #[error("Failed to encode {endpoint} request: {message}")]
    Encode { endpoint: Endpoint, message: String },
}

impl GatewayError {
    pub fn http(endpoint: Endpoint, status: u16) -> Self {
        GatewayError::Http { endpoint, status }
    }

    pub fn network(endpoint: Endpoint, message: impl Into<String>) -> Self {
        GatewayError::Network {
            endpoint,
            message: message.into(),
        }
    }

    pub fn malformed(endpoint: Endpoint, message: impl Into<String>) -> Self {
        GatewayError::MalformedResponse {
            endpoint,
            message: message.into(),
        }
    }

    pub fn encode(endpoint: Endpoint, message: impl Into<String>) -> Self {
        GatewayError::Encode {
            endpoint,
            message: message.into(),
        }
    }

    /// Endpoint the failed call was addressed to
    pub fn endpoint(&self) -> Endpoint {
        match self {
            GatewayError::Http { endpoint, .. }
            | GatewayError::Network { endpoint, .. }
            | GatewayError::MalformedResponse { endpoint, .. }
            | GatewayError::Encode { endpoint, .. } => *endpoint,
        }
    }

    /// HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
