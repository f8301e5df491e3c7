//! Upload submission lifecycle.
//!
//! selection → submit → dispatch → outcome interpretation → notification.
//! The transport is injected behind a trait so the controller can be driven
//! without a live service.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod classifier;
pub mod controller;
pub mod http;
pub mod transport;

pub use classifier::{classify, ClassifiedError, ErrorKind};
pub use controller::{BusyFlag, UploadController};
pub use http::HttpTransport;
pub use transport::{TransportError, UploadTransport};

/// Email sent when the user leaves the field blank.
pub const PLACEHOLDER_EMAIL: &str = "not_provided@example.com";

/// Discriminator between the audio and transcript upload flows. Determines
/// the endpoint and the selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Audio,
    Text,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked for upload. One slot per kind; re-selection replaces it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub kind: UploadKind,
    pub name: String,
    pub data: Vec<u8>,
}

/// A single outbound submission. Built transiently at submit time, never
/// persisted.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub kind: UploadKind,
    pub file_name: String,
    pub data: Vec<u8>,
    pub email: String,
}

impl UploadRequest {
    /// Build a request from the selected file and the entered email. A blank
    /// email falls back to the placeholder the service expects.
    pub fn new(file: &SelectedFile, email: &str) -> Self {
        let email = if email.trim().is_empty() {
            PLACEHOLDER_EMAIL.to_string()
        } else {
            email.to_string()
        };

        Self {
            kind: file.kind,
            file_name: file.name.clone(),
            data: file.data.clone(),
            email,
        }
    }
}

/// The settled result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { summary_text: String },
    MalformedResponse,
    Failure { kind: ErrorKind, message: String },
}
