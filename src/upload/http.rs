//! HTTP implementation of the upload transport.
//!
//! Speaks the summarizer service contract: multipart POST with `file` and
//! `email` fields, JSON `{ "message": ... }` on success, optional JSON
//! `{ "detail": ... }` on error statuses.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use super::transport::{TransportError, UploadTransport};
use super::{UploadKind, UploadRequest};
use async_trait::async_trait;

/// Header that tells interstitial-warning tunnels (ngrok and friends) to pass
/// the request straight through.
pub const BYPASS_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    skip_browser_warning: bool,
}

impl HttpTransport {
    /// Create a transport for the given service base URL.
    ///
    /// `timeout` is the optional per-request deadline. `None` means requests
    /// may block until the connection itself fails.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        skip_browser_warning: bool,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(deadline) = timeout {
            builder = builder.timeout(deadline);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        info!("Summarizer endpoint base: {}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            skip_browser_warning,
        })
    }

    fn endpoint(&self, kind: UploadKind) -> String {
        format!("{}/upload/{}", self.base_url, kind.as_str())
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn upload(&self, request: &UploadRequest) -> Result<String, TransportError> {
        let mime_type = mime_type_for_file(&request.file_name, request.kind);

        let part = Part::bytes(request.data.clone())
            .file_name(request.file_name.clone())
            .mime_str(mime_type)
            .map_err(|e| TransportError::Other(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("email", request.email.clone());

        let url = self.endpoint(request.kind);
        debug!(
            "Uploading {} ({} bytes) to {}",
            request.file_name,
            request.data.len(),
            url
        );

        let mut outbound = self.client.post(&url).multipart(form);
        if self.skip_browser_warning {
            outbound = outbound.header(BYPASS_WARNING_HEADER, "true");
        }

        let response = outbound.send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            error!("Upload failed with status {}: {}", status, body);

            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);

            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
                detail,
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::NoResponse(e.to_string()))
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::TimedOut
    } else if err.is_connect() {
        TransportError::ConnectFailed(err.to_string())
    } else if err.is_request() {
        // The request left the client but no response came back.
        TransportError::NoResponse(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

/// Best-effort MIME type for the multipart file part.
pub fn mime_type_for_file(file_name: &str, kind: UploadKind) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match (kind, ext.as_str()) {
        (UploadKind::Audio, "wav") => "audio/wav",
        (UploadKind::Audio, "mp3") => "audio/mpeg",
        (UploadKind::Audio, "m4a") => "audio/mp4",
        (UploadKind::Audio, "flac") => "audio/flac",
        (UploadKind::Audio, "ogg") => "audio/ogg",
        (UploadKind::Audio, "opus") => "audio/opus",
        (UploadKind::Text, "txt" | "text") => "text/plain",
        (UploadKind::Text, "md") => "text/markdown",
        _ => "application/octet-stream",
    }
}
