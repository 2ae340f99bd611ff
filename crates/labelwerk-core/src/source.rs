// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Code sources: where a registration code comes from when the user gives a
// device address instead of the code itself.

use std::net::Ipv4Addr;

use crate::error::{LabelwerkError, Result};
use crate::types::{Credentials, DeviceData, RegistrationCode};

/// Something that can look up a device's registration code by address.
///
/// The HTTP implementation lives in `labelwerk-device`; rendering code only
/// sees this trait.
#[allow(async_fn_in_trait)]
pub trait CodeSource {
    async fn fetch(&self, address: Ipv4Addr, credentials: &Credentials) -> Result<DeviceData>;
}

/// A source with a canned answer. Useful wherever no device is reachable.
#[derive(Debug, Clone)]
pub enum StaticCodeSource {
    /// Every fetch returns this code.
    Code(RegistrationCode),
    /// Every fetch fails with `FetchFailed` carrying this reason.
    Fail(String),
}

impl CodeSource for StaticCodeSource {
    async fn fetch(&self, address: Ipv4Addr, _credentials: &Credentials) -> Result<DeviceData> {
        match self {
            Self::Code(code) => Ok(DeviceData {
                registration_code: code.clone(),
                qr_payload: code.to_string(),
            }),
            Self::Fail(reason) => Err(LabelwerkError::fetch(address.to_string(), reason.clone())),
        }
    }
}
