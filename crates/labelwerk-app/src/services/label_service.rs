// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label service: renders into a scratch directory, then hands the finished
// PDF to whatever destination the user picks.
//
// The scratch directory lives exactly as long as one `DraftLabel`, so every
// exit path (saved, cancelled, failed) cleans it up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_device::DeviceClient;
use labelwerk_document::job::persist;
use labelwerk_document::{LabelOutcome, LabelRequest, generate_label};
use tempfile::TempDir;

/// A rendered label waiting to be saved.
pub struct DraftLabel {
    _scratch: TempDir,
    pub outcome: LabelOutcome,
}

impl DraftLabel {
    /// Render `request` into a fresh scratch directory as `filename`.
    pub async fn render(request: &LabelRequest, filename: &str, timeout: Duration) -> Result<Self> {
        let client = DeviceClient::new(timeout)?;
        let scratch = tempfile::tempdir()?;
        let path = scratch.path().join(filename);
        let outcome = generate_label(request, &client, &path).await?;
        tracing::debug!(path = %path.display(), "draft label rendered");
        Ok(Self {
            _scratch: scratch,
            outcome,
        })
    }

    /// Copy the draft to `destination`.
    pub fn save_to(&self, destination: &Path) -> Result<PathBuf> {
        let bytes = std::fs::read(&self.outcome.path)
            .map_err(|e| LabelwerkError::RenderFailed(format!("reading draft: {e}")))?;
        persist(&bytes, destination)?;
        tracing::info!(path = %destination.display(), "label saved");
        Ok(destination.to_path_buf())
    }
}

/// Ask the user where to save, suggesting `filename`.
#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub fn choose_destination(filename: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save label")
        .set_file_name(filename)
        .add_filter("PDF", &["pdf"])
        .save_file()
}

#[cfg(any(target_os = "ios", target_os = "android"))]
pub fn choose_destination(filename: &str) -> Option<PathBuf> {
    Some(crate::services::data_dir::data_dir().join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelwerk_core::types::{Credentials, LabelSize};

    fn code_request() -> LabelRequest {
        LabelRequest {
            input: "R57NX98AAFC62AF2A".into(),
            size: LabelSize::default(),
            credentials: Credentials::new("admin", "123456"),
            logo_path: None,
        }
    }

    #[tokio::test]
    async fn draft_is_saved_and_scratch_removed() {
        let draft = DraftLabel::render(&code_request(), "label.pdf", Duration::from_secs(1))
            .await
            .unwrap();
        let scratch = draft.outcome.path.parent().unwrap().to_path_buf();
        assert!(draft.outcome.path.exists());

        let dest_dir = tempfile::tempdir().unwrap();
        let dest = dest_dir.path().join("saved.pdf");
        draft.save_to(&dest).unwrap();
        assert!(std::fs::read(&dest).unwrap().starts_with(b"%PDF"));

        drop(draft);
        assert!(!scratch.exists());
    }

    #[tokio::test]
    async fn invalid_input_leaves_nothing_behind() {
        let mut request = code_request();
        request.input = "nope".into();
        let err = DraftLabel::render(&request, "label.pdf", Duration::from_secs(1))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LabelwerkError::InvalidInput(_)));
    }
}
