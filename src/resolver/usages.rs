//! Tag-form usage scanning.
//!
//! A usage is `<Name` followed by whitespace, `/` or `>`. The recorded
//! position points just past the `<`; the end column of the name is what
//! markers key on.

use regex::Regex;
use tracing::warn;

use crate::host::offset_to_position;

/// One tag-form occurrence of a component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSite {
    pub line: u32,
    /// Column of the first character of the name (just past the `<`).
    pub name_start: u32,
    /// Column just past the last character of the name.
    pub name_end: u32,
}

pub fn scan_usages(text: &str, name: &str) -> Vec<UsageSite> {
    let pattern = format!(r"<{}[\s/>]", regex::escape(name));
    let tag = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("usage pattern for '{}' did not compile: {}", name, e);
            return Vec::new();
        }
    };

    tag.find_iter(text)
        .map(|m| {
            let start = offset_to_position(text, m.start() + 1);
            UsageSite {
                line: start.line,
                name_start: start.column,
                name_end: start.column + name.chars().count() as u32,
            }
        })
        .collect()
}
