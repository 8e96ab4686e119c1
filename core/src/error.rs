//! Error types for the items API client.
//!
//! # Design
//! A single `ApiError` is produced at the HTTP boundary (or by local input
//! validation) and travels unchanged through the accessor to the controller,
//! which only reads its message. The variants follow where the failure was
//! detected: before any request (`Validation`, `Serialization`), with no
//! response at all (`Transport`), or from a response the client could not
//! accept (`Server`, `Decode`).

use thiserror::Error;

use crate::http::ResponseBody;

/// Errors returned by the items client and accessor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Input was rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// No response was received (DNS, connection refused, timeout).
    #[error("{message}")]
    Transport { message: String, details: String },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        details: ResponseBody,
    },

    /// A 2xx response body did not have the expected shape.
    #[error("{message}")]
    Decode {
        status: Option<u16>,
        message: String,
        details: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Human-readable message, as surfaced to the view.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status of the offending response; `None` when no response was
    /// received or the failure happened locally.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Decode { status, .. } => *status,
            ApiError::Validation(_)
            | ApiError::Transport { .. }
            | ApiError::Serialization(_) => None,
        }
    }

    /// Raw payload attached to the failure, if any.
    pub fn details(&self) -> Option<ResponseBody> {
        match self {
            ApiError::Server { details, .. } => Some(details.clone()),
            ApiError::Transport { details, .. } | ApiError::Decode { details, .. } => {
                Some(ResponseBody::Text(details.clone()))
            }
            ApiError::Validation(_) | ApiError::Serialization(_) => None,
        }
    }
}
