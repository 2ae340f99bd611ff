// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the label form and the CLI.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::LabelwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Device unreachable or slow; trying again may work.
    Transient,
    /// User must fix something (input, credentials, dimensions).
    ActionRequired,
    /// Retrying will not help.
    Permanent,
    /// Shown as a notice; the label was still produced.
    Warning,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether pressing Generate again might succeed.
    pub retriable: bool,
    /// Severity level (drives colour in the form).
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `LabelwerkError` into a `HumanError`.
pub fn humanize_error(err: &LabelwerkError) -> HumanError {
    match err {
        LabelwerkError::InvalidInput(_) => HumanError {
            message: "That is neither a device address nor a registration code.".into(),
            suggestion: "Enter an address like 192.168.1.100 or a code like R57NX98AAFC62AF2A.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LabelwerkError::InvalidDimensions(detail) => HumanError {
            message: "The label size doesn't look right.".into(),
            suggestion: format!("Use a positive width and height in inches. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LabelwerkError::FetchFailed { endpoint, reason } => humanize_fetch(endpoint, reason),

        LabelwerkError::RenderFailed(detail) | LabelwerkError::QrEncode(detail) => HumanError {
            message: "The label could not be created.".into(),
            suggestion: format!("Check the registration code and try again. (Detail: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        LabelwerkError::AssetMissing(detail) => HumanError {
            message: "The logo was left off the label.".into(),
            suggestion: format!("Place the logo image next to the program to include it. ({detail})"),
            retriable: false,
            severity: Severity::Warning,
        },

        LabelwerkError::Io(io_err) => HumanError {
            message: "The label file could not be saved.".into(),
            suggestion: format!("Check the output folder exists and is writable. ({io_err})"),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        LabelwerkError::Serialization(detail) => HumanError {
            message: "The settings file could not be read.".into(),
            suggestion: format!("Fix or delete the configuration file. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}

/// Device query failures, split by what the reason text says happened.
fn humanize_fetch(endpoint: &str, reason: &str) -> HumanError {
    let lower = reason.to_lowercase();

    if lower.contains("401") || lower.contains("403") || lower.contains("credentials") {
        HumanError {
            message: "The device rejected the username or password.".into(),
            suggestion: "Check the device credentials and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("timed out") || lower.contains("timeout") {
        HumanError {
            message: "The device took too long to answer.".into(),
            suggestion: "Make sure the device is powered on and on the same network, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("connect") || lower.contains("refused") || lower.contains("unreachable") {
        HumanError {
            message: "We couldn't reach the device.".into(),
            suggestion: "Check the address and that this computer is on the device's network.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("empty") {
        HumanError {
            message: "The device didn't return a registration code.".into(),
            suggestion: "Enter the registration code directly instead.".into(),
            retriable: false,
            severity: Severity::Permanent,
        }
    } else {
        HumanError {
            message: "The device query failed.".into(),
            suggestion: format!("Try again, or enter the registration code directly. ({endpoint}: {reason})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_action_required() {
        let human = humanize_error(&LabelwerkError::InvalidInput("x".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn rejected_credentials_are_action_required() {
        let err = LabelwerkError::fetch("/api/system/qr", "HTTP 401 Unauthorized (credentials rejected)");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.contains("password"));
    }

    #[test]
    fn timeout_is_transient() {
        let err = LabelwerkError::fetch("/api/system/qr", "request timed out after 10s");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn missing_logo_is_only_a_warning() {
        let human = humanize_error(&LabelwerkError::AssetMissing("logo.jpg".into()));
        assert_eq!(human.severity, Severity::Warning);
    }

    #[test]
    fn render_failure_is_permanent() {
        let human = humanize_error(&LabelwerkError::QrEncode("data too long".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }
}
