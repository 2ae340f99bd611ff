// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk Device: HTTP client for the device API. Implements the
// `CodeSource` capability from `labelwerk-core` so the label pipeline can turn
// a device address into its registration code.

pub mod client;

pub use client::DeviceClient;
