// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelwerk-document: Label production for Labelwerk.
//
// Provides the label layout (including the adaptive code-text fitting chain),
// QR and logo image handling, PDF writing and read-back inspection, and the
// end-to-end label job (classify, fetch, render, persist).

pub mod image;
pub mod job;
pub mod layout;
pub mod pdf;

// Re-export the primary structs so callers can use `labelwerk_document::LabelWriter` etc.
pub use crate::image::logo::Logo;
pub use crate::image::qr::{QrImage, generate_qr};
pub use job::{LabelOutcome, LabelRequest, RenderedLabel, generate_label, render_label};
pub use layout::LabelLayout;
pub use layout::fit::{FitStrategy, FittedText};
pub use pdf::reader::LabelInspector;
pub use pdf::writer::LabelWriter;
