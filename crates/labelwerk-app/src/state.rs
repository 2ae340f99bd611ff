// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Form state for the label page and its validation.

use std::path::PathBuf;

use labelwerk_core::LabelConfig;
use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_core::types::{Credentials, LabelSize, is_network_address, is_registration_code};
use labelwerk_document::LabelRequest;

/// What the user says the input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Query a device at this address for its code.
    DeviceAddress,
    /// Print the code as typed.
    RegistrationCode,
}

/// Progress of the current submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Generating,
    /// Saved to this path.
    Saved(PathBuf),
    /// Rendered, but the user closed the save dialog.
    Cancelled,
}

/// Everything the form shows.
#[derive(Debug, Clone)]
pub struct FormState {
    pub mode: InputMode,
    pub input: String,
    pub username: String,
    pub password: String,
    pub width_in: f32,
    pub height_in: f32,
    /// Output name without the `.pdf` extension.
    pub filename: String,
    pub logo_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub status: Status,
}

impl FormState {
    /// Pre-fill the form from saved settings.
    pub fn from_config(config: &LabelConfig) -> Self {
        let size = LabelSize::clamped_for_form(config.width_in, config.height_in);
        let stem = config
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "device_label".into());
        Self {
            mode: InputMode::DeviceAddress,
            input: String::new(),
            username: config.username.clone(),
            password: config.password.clone(),
            width_in: size.width_in,
            height_in: size.height_in,
            filename: stem,
            logo_path: config.logo_path.clone(),
            fetch_timeout_secs: config.fetch_timeout_secs,
            status: Status::Idle,
        }
    }

    /// Settings worth keeping for the next launch. The typed password is
    /// never written out; the saved file keeps the built-in default.
    pub fn to_config(&self) -> LabelConfig {
        LabelConfig {
            width_in: self.width_in,
            height_in: self.height_in,
            username: self.username.clone(),
            password: LabelConfig::default().password,
            output: PathBuf::from(self.output_filename()),
            logo_path: self.logo_path.clone(),
            fetch_timeout_secs: self.fetch_timeout_secs,
        }
    }

    /// Store a dimension typed by the user, clamped to the form bounds.
    pub fn set_width(&mut self, raw: &str) {
        if let Ok(value) = raw.trim().parse::<f32>() {
            self.width_in = LabelSize::clamped_for_form(value, self.height_in).width_in;
        }
    }

    pub fn set_height(&mut self, raw: &str) {
        if let Ok(value) = raw.trim().parse::<f32>() {
            self.height_in = LabelSize::clamped_for_form(self.width_in, value).height_in;
        }
    }

    /// Filename with `.pdf` appended; blank names fall back to the default.
    pub fn output_filename(&self) -> String {
        let stem = self.filename.trim().trim_end_matches(".pdf");
        let stem = if stem.is_empty() { "device_label" } else { stem };
        format!("{stem}.pdf")
    }

    /// Check the input against the selected mode and build the job.
    pub fn to_request(&self) -> Result<LabelRequest> {
        let input = self.input.trim();
        if input.is_empty() {
            return Err(LabelwerkError::InvalidInput(
                "please enter a device address or registration code".into(),
            ));
        }
        let valid = match self.mode {
            InputMode::DeviceAddress => is_network_address(input),
            InputMode::RegistrationCode => is_registration_code(input),
        };
        if !valid {
            return Err(LabelwerkError::InvalidInput(input.to_owned()));
        }

        let size = LabelSize::clamped_for_form(self.width_in, self.height_in);
        Ok(LabelRequest {
            input: input.to_owned(),
            size,
            credentials: Credentials::new(self.username.clone(), self.password.clone()),
            logo_path: Some(self.logo_path.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::from_config(&LabelConfig::default())
    }

    #[test]
    fn defaults_from_config() {
        let f = form();
        assert_eq!(f.mode, InputMode::DeviceAddress);
        assert_eq!(f.width_in, 2.625);
        assert_eq!(f.height_in, 1.0);
        assert_eq!(f.filename, "device_label");
        assert_eq!(f.status, Status::Idle);
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut f = form();
        f.input = "   ".into();
        assert!(matches!(f.to_request(), Err(LabelwerkError::InvalidInput(_))));
    }

    #[test]
    fn mode_decides_what_is_valid() {
        let mut f = form();
        f.input = "R57NX98AAFC62AF2A".into();
        assert!(f.to_request().is_err());
        f.mode = InputMode::RegistrationCode;
        assert_eq!(f.to_request().unwrap().input, "R57NX98AAFC62AF2A");

        f.input = "192.168.1.100".into();
        assert!(f.to_request().is_err());
        f.mode = InputMode::DeviceAddress;
        assert!(f.to_request().is_ok());
    }

    #[test]
    fn dimensions_are_clamped() {
        let mut f = form();
        f.set_width("25");
        f.set_height("0.1");
        assert_eq!(f.width_in, 10.0);
        assert_eq!(f.height_in, 0.5);
        f.set_width("not a number");
        assert_eq!(f.width_in, 10.0);
    }

    #[test]
    fn filename_gets_pdf_extension() {
        let mut f = form();
        f.filename = "my_label".into();
        assert_eq!(f.output_filename(), "my_label.pdf");
        f.filename = "my_label.pdf".into();
        assert_eq!(f.output_filename(), "my_label.pdf");
        f.filename = "  ".into();
        assert_eq!(f.output_filename(), "device_label.pdf");
    }

    #[test]
    fn settings_round_trip_through_config() {
        let mut f = form();
        f.username = "ops".into();
        f.set_height("1.5");
        let again = FormState::from_config(&f.to_config());
        assert_eq!(again.username, "ops");
        assert_eq!(again.height_in, 1.5);
    }

    #[test]
    fn typed_password_is_not_saved() {
        let mut f = form();
        f.password = "s3cret-device-pw".into();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        f.to_config().save(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(!json.contains("s3cret-device-pw"));
        assert_eq!(
            LabelConfig::load(&path).unwrap().password,
            LabelConfig::default().password
        );
        // The live form keeps what was typed for the current session.
        f.input = "192.168.1.100".into();
        assert_eq!(f.to_request().unwrap().credentials.password, "s3cret-device-pw");
    }
}
