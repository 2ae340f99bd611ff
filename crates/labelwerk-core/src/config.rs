// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label generation configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::{Credentials, LabelSize};

/// Settings shared by the CLI and the desktop form.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Label width in inches.
    pub width_in: f32,
    /// Label height in inches.
    pub height_in: f32,
    /// Username for the device API.
    pub username: String,
    /// Password for the device API.
    pub password: String,
    /// Where the CLI writes the PDF.
    pub output: PathBuf,
    /// Optional logo drawn in the top-right corner.
    pub logo_path: PathBuf,
    /// Per-request timeout for device queries, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            width_in: LabelSize::DEFAULT_WIDTH_IN,
            height_in: LabelSize::DEFAULT_HEIGHT_IN,
            username: "admin".into(),
            password: "123456".into(),
            output: PathBuf::from("device_label.pdf"),
            logo_path: PathBuf::from("logo.jpg"),
            fetch_timeout_secs: 10,
        }
    }
}

impl LabelConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&data)?;
        debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Write this config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Validated label size.
    pub fn label_size(&self) -> Result<LabelSize> {
        LabelSize::new(self.width_in, self.height_in)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LabelConfig::default();
        assert_eq!(config.width_in, 2.625);
        assert_eq!(config.height_in, 1.0);
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "123456");
        assert_eq!(config.output, PathBuf::from("device_label.pdf"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "width_in": 3.0, "username": "ops" }"#).unwrap();

        let config = LabelConfig::load(&path).unwrap();
        assert_eq!(config.width_in, 3.0);
        assert_eq!(config.username, "ops");
        assert_eq!(config.height_in, 1.0);
        assert_eq!(config.password, "123456");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = LabelConfig {
            height_in: 1.5,
            ..LabelConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(LabelConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn bad_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            LabelConfig::load(&path),
            Err(crate::LabelwerkError::Serialization(_))
        ));
    }
}
