// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution and the persisted form settings.

use std::path::{Path, PathBuf};

use labelwerk_core::LabelConfig;
use labelwerk_core::error::Result;

const APP_DIR: &str = "labelwerk";
const CONFIG_FILE: &str = "config.json";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> PathBuf {
    let dir = base_dir(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .join(APP_DIR);
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn base_dir(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(xdg) = xdg_data_home.filter(|p| !p.as_os_str().is_empty()) {
        return xdg;
    }
    if let Some(home) = home {
        return home.join(".local").join("share");
    }
    // Last resort
    std::env::temp_dir()
}

pub fn config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE)
}

/// Load the saved settings, or defaults when there are none yet.
pub fn load_config() -> LabelConfig {
    load_config_from(&config_path())
}

fn load_config_from(path: &Path) -> LabelConfig {
    if !path.exists() {
        return LabelConfig::default();
    }
    match LabelConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            LabelConfig::default()
        }
    }
}

/// Remember the last-used settings for the next launch.
pub fn save_config(config: &LabelConfig) -> Result<()> {
    config.save(config_path())
}
