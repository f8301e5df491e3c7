//! Submission orchestration.
//!
//! Owns the per-kind selection slots, the entered email, and the busy flag.
//! One controller drives at most one in-flight request; the outcome is
//! interpreted here and surfaced through the notification and summary
//! handles.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::notify::{DismissReason, NotificationQueue, Severity};
use crate::summary::SummaryModal;

use super::classifier::classify;
use super::transport::UploadTransport;
use super::{SelectedFile, UploadKind, UploadOutcome, UploadRequest};

/// Expected shape of a successful response body. Anything that does not
/// deserialize into this is a malformed response, checked before any field
/// access.
#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    message: String,
}

/// Process-wide single-flight flag. True for exactly the duration of one
/// dispatched request; both submit affordances are gated on it.
#[derive(Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn try_engage(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }
}

/// Clears the busy flag when dropped, so the reset runs on every exit path.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct UploadController {
    transport: Box<dyn UploadTransport>,
    audio: Option<SelectedFile>,
    text: Option<SelectedFile>,
    email: String,
    busy: BusyFlag,
    notifications: NotificationQueue,
    modal: SummaryModal,
}

impl UploadController {
    pub fn new(
        transport: Box<dyn UploadTransport>,
        notifications: NotificationQueue,
        modal: SummaryModal,
    ) -> Self {
        Self {
            transport,
            audio: None,
            text: None,
            email: String::new(),
            busy: BusyFlag::default(),
            notifications,
            modal,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Cloneable handle for gating submit affordances.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn selected(&self, kind: UploadKind) -> Option<&SelectedFile> {
        self.slot(kind).as_ref()
    }

    /// Place a file in its kind's slot, replacing any previous selection of
    /// that kind.
    pub fn select(&mut self, file: SelectedFile) {
        debug!("Selected {} file: {}", file.kind, file.name);
        let kind = file.kind;
        *self.slot_mut(kind) = Some(file);
    }

    /// Read a file from disk into the selection slot for `kind`.
    pub async fn select_path(&mut self, kind: UploadKind, path: &Path) -> Result<()> {
        if !path.exists() {
            bail!("{} file not found: {}", kind, path.display());
        }

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        self.select(SelectedFile { kind, name, data });
        Ok(())
    }

    pub fn clear_selection(&mut self, kind: UploadKind) {
        *self.slot_mut(kind) = None;
    }

    /// Submit the selected file of `kind` and settle its outcome.
    ///
    /// With no selection of that kind this emits a warning notification and
    /// fails without dispatching anything or touching the busy flag. Otherwise
    /// exactly one request goes out and exactly one notification, at most one
    /// modal open, and at most one selection clear follow.
    pub async fn submit(&mut self, kind: UploadKind) -> Result<UploadOutcome> {
        let Some(selected) = self.slot(kind).clone() else {
            self.notifications
                .show(format!("Please select a {} file.", kind), Severity::Warning)
                .await;
            bail!("No {} file selected", kind);
        };

        let Some(_busy) = self.busy.try_engage() else {
            bail!("Another submission is already in flight");
        };

        self.modal.clear().await;
        self.notifications.dismiss(DismissReason::UserAction).await;

        let request = UploadRequest::new(&selected, &self.email);
        info!(
            "Submitting {} file {} ({} bytes)",
            kind,
            request.file_name,
            request.data.len()
        );

        let outcome = match self.transport.upload(&request).await {
            Ok(body) => match serde_json::from_str::<SummaryEnvelope>(&body) {
                Ok(envelope) => UploadOutcome::Success {
                    summary_text: envelope.message,
                },
                Err(e) => {
                    warn!("Response body did not match the summary schema: {}", e);
                    UploadOutcome::MalformedResponse
                }
            },
            Err(transport_error) => {
                let classified = classify(&transport_error);
                UploadOutcome::Failure {
                    kind: classified.kind,
                    message: classified.message,
                }
            }
        };

        match &outcome {
            UploadOutcome::Success { summary_text } => {
                info!("Summary received: {} chars", summary_text.len());
                self.modal.open(summary_text.clone()).await;
                self.notifications
                    .show("Summary generated successfully!", Severity::Success)
                    .await;
                self.clear_selection(kind);
            }
            UploadOutcome::MalformedResponse => {
                self.notifications
                    .show(
                        "Received an unexpected response from the server.",
                        Severity::Error,
                    )
                    .await;
            }
            UploadOutcome::Failure { message, .. } => {
                self.notifications
                    .show(message.clone(), Severity::Error)
                    .await;
            }
        }

        Ok(outcome)
        // _busy drops here, resetting the flag on every path out of this call
    }

    fn slot(&self, kind: UploadKind) -> &Option<SelectedFile> {
        match kind {
            UploadKind::Audio => &self.audio,
            UploadKind::Text => &self.text,
        }
    }

    fn slot_mut(&mut self, kind: UploadKind) -> &mut Option<SelectedFile> {
        match kind {
            UploadKind::Audio => &mut self.audio,
            UploadKind::Text => &mut self.text,
        }
    }
}
