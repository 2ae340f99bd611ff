// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: writing labels and reading them back.

pub mod reader;
pub mod writer;

pub use reader::LabelInspector;
pub use writer::LabelWriter;
