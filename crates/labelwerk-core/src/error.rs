// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Labelwerk.

use thiserror::Error;

/// Top-level error type for all Labelwerk operations.
#[derive(Debug, Error)]
pub enum LabelwerkError {
    // -- Input --
    #[error("input is neither a network address nor a registration code: {0}")]
    InvalidInput(String),

    #[error("invalid label dimensions: {0}")]
    InvalidDimensions(String),

    // -- Device query --
    #[error("device query to {endpoint} failed: {reason}")]
    FetchFailed { endpoint: String, reason: String },

    // -- Rendering --
    #[error("label rendering failed: {0}")]
    RenderFailed(String),

    #[error("QR encoding failed: {0}")]
    QrEncode(String),

    /// Optional asset could not be used. Never returned from a label job;
    /// callers log it and carry on.
    #[error("asset unavailable: {0}")]
    AssetMissing(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LabelwerkError {
    /// Shorthand for a [`LabelwerkError::FetchFailed`].
    pub fn fetch(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelwerkError>;
