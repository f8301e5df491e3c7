//! Summary view state and derived actions.
//!
//! Holds the latest successful summary verbatim together with its visibility
//! flag. Only a successful upload opens the view; closing it keeps the text
//! around for copy/export.

use anyhow::{anyhow, Context, Result};
use arboard::Clipboard;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub const EXPORT_FILE_NAME: &str = "meeting_summary.md";

/// Current summary view state.
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub visible: bool,
    pub summary_text: String,
}

/// Shared handle to the summary view state.
#[derive(Clone, Default)]
pub struct SummaryModal {
    inner: Arc<Mutex<ModalState>>,
}

impl SummaryModal {
    /// Open the view with the given summary text, stored verbatim.
    pub async fn open(&self, summary_text: impl Into<String>) {
        let mut state = self.inner.lock().await;
        state.visible = true;
        state.summary_text = summary_text.into();
    }

    /// Hide the view. The last summary text is retained.
    pub async fn close(&self) {
        let mut state = self.inner.lock().await;
        state.visible = false;
    }

    /// Drop the stored summary and hide the view.
    pub async fn clear(&self) {
        let mut state = self.inner.lock().await;
        *state = ModalState::default();
    }

    pub async fn state(&self) -> ModalState {
        self.inner.lock().await.clone()
    }

    pub async fn is_visible(&self) -> bool {
        self.inner.lock().await.visible
    }

    pub async fn summary_text(&self) -> String {
        self.inner.lock().await.summary_text.clone()
    }

    /// Copy the stored summary to the system clipboard.
    ///
    /// Returns `Ok(false)` without touching the clipboard when no summary is
    /// stored. A missing clipboard backend is an error, not a panic.
    pub async fn copy_to_clipboard(&self) -> Result<bool> {
        let text = self.summary_text().await;
        if text.is_empty() {
            return Ok(false);
        }

        let mut clipboard =
            Clipboard::new().map_err(|e| anyhow!("Failed to initialize clipboard: {}", e))?;
        clipboard
            .set_text(&text)
            .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;

        info!("Copied summary to clipboard ({} chars)", text.len());
        Ok(true)
    }

    /// Write the stored summary to `meeting_summary.md` in `dir`.
    ///
    /// The file content equals the stored text exactly. Returns the written
    /// path, or `Ok(None)` when no summary is stored.
    pub async fn export_as_file(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let text = self.summary_text().await;
        if text.is_empty() {
            return Ok(None);
        }

        let path = dir.join(EXPORT_FILE_NAME);
        std::fs::write(&path, text.as_bytes()).context("Failed to write summary file")?;

        info!("Summary exported to {:?}", path);
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_stores_text_verbatim() {
        let modal = SummaryModal::default();
        modal.open("## Recap\nDone").await;

        let state = modal.state().await;
        assert!(state.visible);
        assert_eq!(state.summary_text, "## Recap\nDone");
    }

    #[tokio::test]
    async fn test_close_retains_text() {
        let modal = SummaryModal::default();
        modal.open("  spaced  \n").await;
        modal.close().await;

        let state = modal.state().await;
        assert!(!state.visible);
        assert_eq!(state.summary_text, "  spaced  \n");
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let modal = SummaryModal::default();
        modal.open("text").await;
        modal.clear().await;

        let state = modal.state().await;
        assert!(!state.visible);
        assert!(state.summary_text.is_empty());
    }

    #[tokio::test]
    async fn test_copy_is_noop_when_empty() {
        let modal = SummaryModal::default();
        // Must not touch the clipboard backend at all, so this passes in
        // headless environments too.
        assert!(!modal.copy_to_clipboard().await.unwrap());
    }

    #[tokio::test]
    async fn test_export_is_noop_when_empty() {
        let modal = SummaryModal::default();
        let dir = tempfile::tempdir().unwrap();
        let written = modal.export_as_file(dir.path()).await.unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_export_writes_exact_bytes() {
        let modal = SummaryModal::default();
        modal.open("# Minutes\n\n- item one\n- item two\n").await;

        let dir = tempfile::tempdir().unwrap();
        let path = modal.export_as_file(dir.path()).await.unwrap().unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b"# Minutes\n\n- item one\n- item two\n");
    }

    #[tokio::test]
    async fn test_export_after_close_still_works() {
        let modal = SummaryModal::default();
        modal.open("kept").await;
        modal.close().await;

        let dir = tempfile::tempdir().unwrap();
        let path = modal.export_as_file(dir.path()).await.unwrap();
        assert!(path.is_some());
    }
}
