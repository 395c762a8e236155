//! Google credential resolution.
//!
//! `GOOGLE_CREDS_JSON` may hold a base64-encoded service-account document, a
//! path to one on disk, or the JSON itself. The encodings are not tagged, so
//! the value is tried in a fixed order and the first interpretation that works
//! wins:
//!
//! 1. standard (padded) base64, ignoring line breaks and non-zero trailing bits,
//! 2. path of an existing file,
//! 3. the raw text.
//!
//! A path that happens to be valid base64 (`c2NoZWRib3Q=` is both) is decoded,
//! never read from disk. The order is part of the contract.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

// Standard alphabet with padding required, accepting non-zero trailing bits.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no Google credentials provided")]
    Empty,
    #[error("failed to read Google credentials from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Turn the raw credential field into the bytes of a service-account document.
///
/// No check is made that the result is valid JSON; a malformed document fails
/// later, when the calendar session is built from it.
pub fn resolve_credential_bytes(raw: &str) -> Result<Vec<u8>, CredentialError> {
    if raw.is_empty() {
        return Err(CredentialError::Empty);
    }

    // Wrapped output from `base64` or a PEM-style tool.
    let unwrapped: String = raw.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    if let Ok(decoded) = LENIENT_STANDARD.decode(&unwrapped) {
        if !decoded.is_empty() {
            debug!("Google credentials resolved as base64 ({} bytes)", decoded.len());
            return Ok(decoded);
        }
    }

    let path = Path::new(raw);
    if path.exists() {
        debug!("Google credentials resolved as file {}", path.display());
        return fs::read(path).map_err(|source| CredentialError::Read {
            path: raw.to_string(),
            source,
        });
    }

    debug!("Google credentials resolved as inline text");
    Ok(raw.as_bytes().to_vec())
}
