//! Import statement scanning.
//!
//! Matches both default and brace-enclosed named imports, tolerating named
//! lists that span multiple lines. Only names starting with an uppercase
//! letter are component candidates.
//!
//! For `X as Y` entries the exported name `X` is recorded, not the local
//! binding `Y`. Aliased components therefore never match a tag-form usage of
//! their local name; the behavior is kept as-is until a corrected convention
//! is adopted (the extraction fallback tiers exist to absorb gaps like this).

use regex::Regex;
use std::sync::LazyLock;

/// A component candidate pulled from an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSymbol {
    pub name: String,
    pub module: String,
}

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // `[^}]*` crosses newlines, which is what makes multi-line named lists work.
    Regex::new(
        r#"import\s+(?:([A-Za-z_$][\w$]*)\s*,?\s*)?(?:\{([^}]*)\})?\s*from\s*["']([^"']+)["']"#,
    )
    .unwrap()
});

pub fn scan_imports(text: &str) -> Vec<ImportedSymbol> {
    let mut symbols = Vec::new();
    for caps in IMPORT_RE.captures_iter(text) {
        let module = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

        if let Some(default) = caps.get(1) {
            push_candidate(&mut symbols, default.as_str(), module);
        }
        if let Some(named) = caps.get(2) {
            for entry in named.as_str().split(',') {
                if let Some(name) = exported_name(entry) {
                    push_candidate(&mut symbols, name, module);
                }
            }
        }
    }
    symbols
}

/// First token of a named-import entry: for `Bar as Baz` this is `Bar`.
fn exported_name(entry: &str) -> Option<&str> {
    entry.split_whitespace().next()
}

fn push_candidate(symbols: &mut Vec<ImportedSymbol>, name: &str, module: &str) {
    if is_component_candidate(name) {
        symbols.push(ImportedSymbol {
            name: name.to_string(),
            module: module.to_string(),
        });
    }
}

/// Component naming convention: uppercase first letter.
fn is_component_candidate(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}
