//! User-facing notification state.
//!
//! At most one notification is live at a time. Showing a new one replaces the
//! current one; there is no queue and no history.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Why a dismissal was requested.
///
/// `ClickAway` is ignored so an accidental click outside the notification
/// cannot close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Timeout,
    UserAction,
    ClickAway,
}

/// Shared handle to the current notification, readable by the presentation
/// layer.
#[derive(Clone, Default)]
pub struct NotificationQueue {
    inner: Arc<Mutex<Option<Notification>>>,
}

impl NotificationQueue {
    /// Show a notification, replacing any currently visible one.
    pub async fn show(&self, message: impl Into<String>, severity: Severity) {
        let mut current = self.inner.lock().await;
        *current = Some(Notification {
            message: message.into(),
            severity,
        });
    }

    /// Dismiss the current notification. A `ClickAway` dismissal is a no-op.
    pub async fn dismiss(&self, reason: DismissReason) {
        if reason == DismissReason::ClickAway {
            return;
        }
        let mut current = self.inner.lock().await;
        *current = None;
    }

    /// The currently visible notification, if any.
    pub async fn current(&self) -> Option<Notification> {
        self.inner.lock().await.clone()
    }
}
