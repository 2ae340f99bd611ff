// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments (clap derive).
//
// Every option is optional so a `--config` file can supply it; flags given on
// the command line win over the file, and the file wins over the built-in
// defaults.

use std::path::PathBuf;

use clap::Parser;
use labelwerk_core::LabelConfig;
use labelwerk_core::error::Result;

/// Generate a device registration label PDF with a QR code.
///
/// INPUT is either a device IP address (the registration code is fetched from
/// the device) or the registration code itself.
#[derive(Parser, Debug)]
#[command(name = "labelwerk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Device IP address or registration code
    pub input: String,

    /// Username for the device API [default: admin]
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for the device API [default: 123456]
    #[arg(short, long)]
    pub password: Option<String>,

    /// Output filename [default: device_label.pdf]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Label width in inches [default: 2.625]
    #[arg(short, long)]
    pub width: Option<f32>,

    /// Label height in inches [default: 1.0]
    #[arg(short = 'H', long)]
    pub height: Option<f32>,

    /// Logo image drawn in the top-right corner, if present [default: logo.jpg]
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Device request timeout in seconds [default: 10]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Built-in defaults, overlaid with `--config`, overlaid with flags.
    pub fn resolve_config(&self) -> Result<LabelConfig> {
        let base = match &self.config {
            Some(path) => LabelConfig::load(path)?,
            None => LabelConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: LabelConfig) -> LabelConfig {
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(width) = self.width {
            config.width_in = width;
        }
        if let Some(height) = self.height {
            config.height_in = height;
        }
        if let Some(logo) = &self.logo {
            config.logo_path = logo.clone();
        }
        if let Some(timeout) = self.timeout {
            config.fetch_timeout_secs = timeout;
        }
        config
    }
}
