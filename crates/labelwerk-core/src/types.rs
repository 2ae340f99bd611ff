// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Labelwerk: registration codes, label sizes, device
// credentials, and the input classifier that decides between the two input
// flows (query a device by address, or use a code directly).

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::{LabelwerkError, Result};

/// PDF user-space units per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Shortest string accepted as a registration code.
pub const MIN_CODE_LEN: usize = 10;

/// A device registration code: the QR payload and the printed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationCode(String);

impl RegistrationCode {
    /// Wrap a code string as-is.
    ///
    /// Codes fetched from a device are trusted verbatim; user-typed codes go
    /// through [`classify`] first.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for RegistrationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistrationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What a user-supplied string turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Dotted-decimal IPv4 address of a device to query.
    NetworkAddress(Ipv4Addr),
    /// A registration code to print directly.
    OpaqueCode(RegistrationCode),
    /// Neither; the caller must reject the input.
    Unrecognized,
}

impl InputKind {
    /// Short label for logs and CLI output.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NetworkAddress(_) => "network address",
            Self::OpaqueCode(_) => "registration code",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Classify `input` as a network address, a registration code, or neither.
///
/// The two recognised forms cannot overlap: addresses always contain dots and
/// codes never do.
pub fn classify(input: &str) -> InputKind {
    if let Some(addr) = parse_dotted_quad(input) {
        return InputKind::NetworkAddress(addr);
    }
    if is_registration_code(input) {
        return InputKind::OpaqueCode(RegistrationCode::new(input));
    }
    InputKind::Unrecognized
}

/// Classify and reject anything that is not a recognised form.
pub fn classify_strict(input: &str) -> Result<InputKind> {
    match classify(input) {
        InputKind::Unrecognized => Err(LabelwerkError::InvalidInput(input.to_owned())),
        kind => Ok(kind),
    }
}

/// Whether `input` is a four-octet dotted-decimal address.
pub fn is_network_address(input: &str) -> bool {
    parse_dotted_quad(input).is_some()
}

/// Whether `input` looks like a registration code: at least
/// [`MIN_CODE_LEN`] characters, no dots, at least one letter and one ASCII digit.
pub fn is_registration_code(input: &str) -> bool {
    if input.chars().count() < MIN_CODE_LEN || input.contains('.') {
        return false;
    }
    let has_letter = input.chars().any(char::is_alphabetic);
    let has_digit = input.chars().any(|c| c.is_ascii_digit());
    has_letter && has_digit
}

/// Parse exactly four dot-separated groups of 1-3 ASCII digits, each <= 255.
///
/// Unlike `Ipv4Addr::from_str` this accepts leading zeros (`010.0.0.1`).
fn parse_dotted_quad(input: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut groups = input.split('.');
    for slot in octets.iter_mut() {
        let group = groups.next()?;
        if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u16 = group.parse().ok()?;
        *slot = u8::try_from(value).ok()?;
    }
    if groups.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Physical label dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub width_in: f32,
    pub height_in: f32,
}

impl LabelSize {
    /// Default label width (2 5/8").
    pub const DEFAULT_WIDTH_IN: f32 = 2.625;
    /// Default label height.
    pub const DEFAULT_HEIGHT_IN: f32 = 1.0;

    /// Width bounds offered by the interactive form.
    pub const FORM_WIDTH_RANGE: (f32, f32) = (1.0, 10.0);
    /// Height bounds offered by the interactive form.
    pub const FORM_HEIGHT_RANGE: (f32, f32) = (0.5, 5.0);
    /// Step of the form's dimension inputs.
    pub const FORM_STEP_IN: f32 = 0.125;

    /// Validated constructor: both dimensions must be finite and positive.
    pub fn new(width_in: f32, height_in: f32) -> Result<Self> {
        for (name, value) in [("width", width_in), ("height", height_in)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LabelwerkError::InvalidDimensions(format!(
                    "{name} must be a positive number of inches, got {value}"
                )));
            }
        }
        Ok(Self {
            width_in,
            height_in,
        })
    }

    /// Clamp to the bounds the interactive form allows.
    pub fn clamped_for_form(width_in: f32, height_in: f32) -> Self {
        let (w_min, w_max) = Self::FORM_WIDTH_RANGE;
        let (h_min, h_max) = Self::FORM_HEIGHT_RANGE;
        let clamp = |v: f32, lo: f32, hi: f32| if v.is_finite() { v.clamp(lo, hi) } else { lo };
        Self {
            width_in: clamp(width_in, w_min, w_max),
            height_in: clamp(height_in, h_min, h_max),
        }
    }

    /// Dimensions in PDF points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        (
            self.width_in * POINTS_PER_INCH,
            self.height_in * POINTS_PER_INCH,
        )
    }

    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        (self.width_in * 25.4, self.height_in * 25.4)
    }
}

impl Default for LabelSize {
    fn default() -> Self {
        Self {
            width_in: Self::DEFAULT_WIDTH_IN,
            height_in: Self::DEFAULT_HEIGHT_IN,
        }
    }
}

impl std::fmt::Display for LabelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\" x {}\"", self.width_in, self.height_in)
    }
}

/// Basic-auth credentials for the device API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Password stays out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Data returned by a device query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceData {
    /// The registration code to print and encode.
    pub registration_code: RegistrationCode,
    /// Raw body of the device's own QR endpoint. Fetched as a liveness and
    /// auth check; the label encodes `registration_code`.
    pub qr_payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classifies_plain_address() {
        assert_eq!(
            classify("192.168.1.100"),
            InputKind::NetworkAddress(Ipv4Addr::new(192, 168, 1, 100))
        );
    }

    #[test]
    fn classifies_example_code() {
        let kind = classify("R57NX98AAFC62AF2A");
        assert_eq!(
            kind,
            InputKind::OpaqueCode(RegistrationCode::new("R57NX98AAFC62AF2A"))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(classify("not-an-address-or-code!"), InputKind::Unrecognized);
        assert!(matches!(
            classify_strict("not-an-address-or-code!"),
            Err(LabelwerkError::InvalidInput(_))
        ));
    }

    #[test]
    fn address_edge_cases() {
        assert!(is_network_address("0.0.0.0"));
        assert!(is_network_address("255.255.255.255"));
        assert!(is_network_address("010.001.000.099"));
        assert!(!is_network_address("256.1.1.1"));
        assert!(!is_network_address("1.2.3"));
        assert!(!is_network_address("1.2.3.4.5"));
        assert!(!is_network_address("1..2.3"));
        assert!(!is_network_address("1.2.3.4 "));
        assert!(!is_network_address("1234.1.1.1"));
        assert!(!is_network_address("+1.2.3.4"));
    }

    #[test]
    fn non_ascii_numerals_are_not_digits() {
        assert!(!is_registration_code("ABCDEFGHI\u{bd}"));
        assert!(!is_registration_code("ABCDEFGHI\u{216b}"));
        assert!(is_registration_code("ABCDEFGHI7"));
    }

    #[test]
    fn code_edge_cases() {
        // Too short.
        assert!(!is_registration_code("ABC123456"));
        assert!(is_registration_code("ABC1234567"));
        // Letters only / digits only.
        assert!(!is_registration_code("ABCDEFGHIJKL"));
        assert!(!is_registration_code("123456789012"));
        // Dots are never codes.
        assert!(!is_registration_code("ABC.1234567"));
        // Punctuation is tolerated as long as both classes are present.
        assert!(is_registration_code("ABCD-1234-EFGH"));
    }

    #[test]
    fn dotted_code_lookalike_is_unrecognized() {
        // Has dots, so not a code; not a valid quad either.
        assert_eq!(classify("ABC1.234.567.890"), InputKind::Unrecognized);
    }

    #[test]
    fn label_size_validation() {
        assert!(LabelSize::new(2.625, 1.0).is_ok());
        assert!(matches!(
            LabelSize::new(0.0, 1.0),
            Err(LabelwerkError::InvalidDimensions(_))
        ));
        assert!(LabelSize::new(1.0, f32::NAN).is_err());
        assert!(LabelSize::new(-1.0, 1.0).is_err());
    }

    #[test]
    fn label_size_form_clamp() {
        let size = LabelSize::clamped_for_form(20.0, 0.1);
        assert_eq!(size.width_in, 10.0);
        assert_eq!(size.height_in, 0.5);
        let size = LabelSize::clamped_for_form(f32::NAN, 3.0);
        assert_eq!(size.width_in, 1.0);
        assert_eq!(size.height_in, 3.0);
    }

    #[test]
    fn default_size_in_points() {
        let (w, h) = LabelSize::default().dimensions_pt();
        assert!((w - 189.0).abs() < 1e-3);
        assert!((h - 72.0).abs() < 1e-3);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("admin", "123456");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("admin"));
        assert!(!dbg.contains("123456"));
    }

    proptest! {
        #[test]
        fn any_dotted_quad_is_an_address(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let input = format!("{a}.{b}.{c}.{d}");
            prop_assert_eq!(classify(&input), InputKind::NetworkAddress(Ipv4Addr::new(a, b, c, d)));
        }

        #[test]
        fn mixed_alphanumerics_are_codes(
            letter in "[A-Za-z]",
            digit in "[0-9]",
            rest in "[A-Za-z0-9_-]{8,40}",
        ) {
            let input = format!("{letter}{rest}{digit}");
            prop_assert_eq!(
                classify(&input),
                InputKind::OpaqueCode(RegistrationCode::new(input.clone()))
            );
        }

        #[test]
        fn classification_is_exclusive(input in "\\PC{0,32}") {
            let address = is_network_address(&input);
            let code = is_registration_code(&input);
            prop_assert!(!(address && code));
            let kind = classify(&input);
            match kind {
                InputKind::NetworkAddress(_) => prop_assert!(address),
                InputKind::OpaqueCode(_) => prop_assert!(code && !address),
                InputKind::Unrecognized => prop_assert!(!address && !code),
            }
        }
    }
}
