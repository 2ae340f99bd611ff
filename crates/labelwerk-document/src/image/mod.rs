// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: QR symbol rasterisation and the optional logo.

pub mod logo;
pub mod qr;

pub use logo::Logo;
pub use qr::{QrImage, generate_qr};
