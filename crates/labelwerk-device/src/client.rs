// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async client for the device's system API.
//
// Two authenticated GETs per device:
//   - /api/system/qr            the device's own QR payload (liveness + auth check)
//   - /api/system/registerCode  the registration code, plain text or
//                               `{"registerCode": "..."}`
//
// Every request carries an explicit timeout. Failures are reported once, with
// no retry.

use std::net::Ipv4Addr;
use std::time::Duration;

use labelwerk_core::error::{LabelwerkError, Result};
use labelwerk_core::source::CodeSource;
use labelwerk_core::types::{Credentials, DeviceData, RegistrationCode};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Path of the QR payload endpoint.
pub const QR_PATH: &str = "/api/system/qr";
/// Path of the registration code endpoint.
pub const REGISTER_CODE_PATH: &str = "/api/system/registerCode";
/// JSON field holding the code.
const REGISTER_CODE_FIELD: &str = "registerCode";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the device API.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: Client,
    timeout: Duration,
    /// Overrides `http://{address}`; used to point at a test server.
    base_url: Option<String>,
}

impl DeviceClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| LabelwerkError::fetch("http client", e.to_string()))?;
        Ok(Self {
            http,
            timeout,
            base_url: None,
        })
    }

    /// Send every request to `base_url` instead of the device address.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_owned());
        self
    }

    fn base_for(&self, address: Ipv4Addr) -> String {
        match &self.base_url {
            Some(base) => base.clone(),
            None => format!("http://{address}"),
        }
    }

    /// Authenticated GET returning the body text of a 2xx response.
    async fn get_text(&self, url: &str, credentials: &Credentials) -> Result<String> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| LabelwerkError::fetch(url, self.describe(&e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LabelwerkError::fetch(
                url,
                format!("HTTP {status} (credentials rejected)"),
            ));
        }
        if !status.is_success() {
            return Err(LabelwerkError::fetch(url, format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| LabelwerkError::fetch(url, format!("malformed body: {}", self.describe(&e))))
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs_f32())
        } else if err.is_connect() {
            format!("could not connect: {err}")
        } else {
            err.to_string()
        }
    }
}

impl CodeSource for DeviceClient {
    #[instrument(skip(self, credentials), fields(user = %credentials.username))]
    async fn fetch(&self, address: Ipv4Addr, credentials: &Credentials) -> Result<DeviceData> {
        let base = self.base_for(address);

        let qr_url = format!("{base}{QR_PATH}");
        info!(url = %qr_url, "Fetching QR payload");
        let qr_payload = self.get_text(&qr_url, credentials).await?;
        if qr_payload.trim().is_empty() {
            return Err(LabelwerkError::fetch(qr_url, "empty QR payload"));
        }

        let reg_url = format!("{base}{REGISTER_CODE_PATH}");
        info!(url = %reg_url, "Fetching registration code");
        let body = self.get_text(&reg_url, credentials).await?;
        let code = parse_registration_code(&body).map_err(|reason| LabelwerkError::fetch(&reg_url, reason))?;

        Ok(DeviceData {
            registration_code: RegistrationCode::new(code),
            qr_payload,
        })
    }
}

/// Extract the code from a registerCode response body.
///
/// Uses the string `registerCode` field of a JSON object, or a bare JSON
/// string. Any other body is taken as plain text.
pub fn parse_registration_code(body: &str) -> std::result::Result<String, String> {
    let code = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get(REGISTER_CODE_FIELD) {
            Some(Value::String(code)) => code.trim().to_owned(),
            _ => body.trim().to_owned(),
        },
        Ok(Value::String(code)) => code.trim().to_owned(),
        _ => body.trim().to_owned(),
    };
    if code.is_empty() {
        return Err("empty registration code".into());
    }
    Ok(code)
}
