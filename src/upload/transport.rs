//! Transport seam between the controller and the summarizer service.
//!
//! Implementations return the raw body of a 2xx response; every failure mode
//! is expressed as one `TransportError` variant so classification downstream
//! stays total.

use async_trait::async_trait;
use thiserror::Error;

use super::UploadRequest;

/// Closed set of ways a dispatched request can fail.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// No connection could be established at all.
    #[error("connection failed: {0}")]
    ConnectFailed(String),

    /// The request exceeded its configured deadline.
    #[error("request timed out")]
    TimedOut,

    /// A response arrived with a non-2xx status.
    #[error("server returned {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// `detail` field of a JSON error body, when present.
        detail: Option<String>,
    },

    /// The request was sent and the connection completed, but no response
    /// body arrived.
    #[error("no response received: {0}")]
    NoResponse(String),

    /// Anything the above do not cover.
    #[error("{0}")]
    Other(String),
}

/// One-shot upload to the summarizer service.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Dispatch the request and return the raw 2xx response body.
    async fn upload(&self, request: &UploadRequest) -> Result<String, TransportError>;
}
