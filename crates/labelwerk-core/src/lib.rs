// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk: Core types, input classification, and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod source;
pub mod types;

pub use config::LabelConfig;
pub use error::LabelwerkError;
pub use source::{CodeSource, StaticCodeSource};
pub use types::*;
