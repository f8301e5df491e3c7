//! Failure classification.
//!
//! Pure, total mapping from a transport outcome to a failure category and a
//! human-readable message. No side effects.

use super::transport::TransportError;

/// Closed set of failure categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkUnreachable,
    Timeout,
    ServerHttpError {
        status: u16,
        detail: Option<String>,
    },
    NoResponseReceived,
    Unknown,
}

/// A classified failure: the category plus its display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Map a transport failure to its category and message. Every variant maps to
/// exactly one `ErrorKind`; `Other` is the guaranteed fallback arm.
pub fn classify(error: &TransportError) -> ClassifiedError {
    match error {
        TransportError::ConnectFailed(_) => ClassifiedError {
            kind: ErrorKind::NetworkUnreachable,
            message: "Network error: Cannot connect to the server. Please check the backend URL and your connection."
                .to_string(),
        },
        TransportError::TimedOut => ClassifiedError {
            kind: ErrorKind::Timeout,
            message: "The request timed out. The server might be busy or the file is too large."
                .to_string(),
        },
        TransportError::Status {
            status,
            status_text,
            detail,
        } => ClassifiedError {
            kind: ErrorKind::ServerHttpError {
                status: *status,
                detail: detail.clone(),
            },
            message: format!(
                "Server error: {} - {}",
                status,
                detail.as_deref().unwrap_or(status_text)
            ),
        },
        TransportError::NoResponse(_) => ClassifiedError {
            kind: ErrorKind::NoResponseReceived,
            message: "No response received from the server. It might be down or unreachable."
                .to_string(),
        },
        TransportError::Other(raw) => ClassifiedError {
            kind: ErrorKind::Unknown,
            message: format!("An unexpected error occurred: {}", raw),
        },
    }
}
