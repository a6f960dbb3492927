//! Documentation-tag preview extraction.
//!
//! Two tiers, because documentation blocks do not reliably repeat the symbol
//! name next to every preview tag:
//!
//! 1. A block that explicitly names the symbol (`@name <Symbol>`, optionally
//!    preceded by a component marker tag) followed anywhere later by a
//!    `@preview` whose value is an embedded data url, optionally trailed by a
//!    dash-separated fallback URL.
//! 2. If that fails and the symbol is independently declared in the file
//!    (`export const|function|class <Symbol>`), the first generic `@preview`
//!    URL tag anywhere in the file. Existence-gating keeps the fallback from
//!    attaching some other component's preview to a name that is not even
//!    declared here; it trades precision for recall to tolerate aliasing.

use regex::Regex;
use std::sync::LazyLock;

use super::PreviewReference;
use crate::images::data_url;

static GENERIC_PREVIEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@preview\s*[-\s]*(?:img\s+)?(https?://\S+)").unwrap());

/// Full two-tier extraction for one symbol.
pub fn extract_preview(text: &str, symbol: &str) -> Option<PreviewReference> {
    if let Some(reference) = extract_named_preview(text, symbol) {
        return Some(reference);
    }
    if symbol_declared_in(text, symbol) {
        return extract_first_generic_preview(text);
    }
    None
}

/// Tier 1: a documentation block that names the symbol explicitly.
pub fn extract_named_preview(text: &str, symbol: &str) -> Option<PreviewReference> {
    let pattern = format!(
        r"(?s)@name\s+{}\b.*?@preview\s+(data:image/[\w.+-]+;base64,[A-Za-z0-9+/=]+)(?:\s*-+\s*(https?://\S+))?",
        regex::escape(symbol)
    );
    let named = Regex::new(&pattern).ok()?;
    let caps = named.captures(text)?;

    let embedded = caps.get(1)?.as_str();
    if data_url::parse(embedded).is_ok() {
        return Some(PreviewReference::Embedded(embedded.to_string()));
    }
    // Unusable payload: fall back to the trailing URL when one was given.
    caps.get(2)
        .map(|url| PreviewReference::Remote(url.as_str().to_string()))
}

/// Tier 2 gate: is the symbol declared in this file at all?
pub fn symbol_declared_in(text: &str, symbol: &str) -> bool {
    let pattern = format!(
        r"export\s+(?:const|function|class)\s+{}\b",
        regex::escape(symbol)
    );
    Regex::new(&pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Tier 2: the first generic `@preview [dashes] [img] <url>` tag in the file.
pub fn extract_first_generic_preview(text: &str) -> Option<PreviewReference> {
    GENERIC_PREVIEW_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|url| PreviewReference::Remote(url.as_str().to_string()))
}
