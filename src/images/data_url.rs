//! Embedded `data:` URL handling.
//!
//! Preview tags may embed the image directly as a base64 data URL with an
//! explicit media type. Header parsing is split from payload decoding so the
//! resolver can validate a reference without paying for the decode.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::AcquireErrorKind;

/// Split a data URL into (media type, base64 payload) without decoding.
pub(crate) fn parse(url: &str) -> Result<(&str, &str), String> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| "missing data: scheme".to_string())?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "missing comma in data url".to_string())?;
    let media = header
        .strip_suffix(";base64")
        .ok_or_else(|| "payload is not base64".to_string())?;
    if media.is_empty() || !media.contains('/') {
        return Err("missing media type".to_string());
    }
    if payload.is_empty() {
        return Err("empty payload".to_string());
    }
    Ok((media, payload))
}

/// Decode a data URL into (media type, bytes).
pub(crate) fn decode(url: &str) -> Result<(String, Vec<u8>), AcquireErrorKind> {
    let (media, payload) = parse(url).map_err(AcquireErrorKind::Malformed)?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AcquireErrorKind::Malformed(format!("invalid base64: {e}")))?;
    Ok((media.to_string(), bytes))
}
