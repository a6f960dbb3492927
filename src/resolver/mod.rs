//! Symbol & Preview Resolver
//!
//! Drives the per-document pipeline: import scan, usage scan, definition
//! lookup, declaration fetch, and documentation-tag extraction. Every failure
//! is contained per usage; one dead import or unreadable declaration never
//! aborts the rest of the document.

pub mod doc_tags;
pub mod imports;
pub mod usages;

use std::collections::HashSet;
use tracing::debug;

use crate::host::{DefinitionProvider, Document, DocumentOpener, Position};

pub use imports::{ImportedSymbol, scan_imports};
pub use usages::{UsageSite, scan_usages};

/// A preview reference extracted from a declaration's documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewReference {
    /// http/https URL.
    Remote(String),
    /// Embedded base64 data url with an explicit media type.
    Embedded(String),
}

impl PreviewReference {
    pub fn as_str(&self) -> &str {
        match self {
            PreviewReference::Remote(value) | PreviewReference::Embedded(value) => value,
        }
    }
}

/// One resolved marker: where it attaches and what it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMarker {
    pub symbol: String,
    pub line: u32,
    /// End column of the matched name; markers are keyed on (line, column).
    pub column: u32,
    pub reference: PreviewReference,
}

/// Resolve all preview markers for a document.
///
/// Usages are processed in the order they were discovered. A usage that
/// resolves to a position an earlier marker already occupies is skipped.
pub async fn resolve(
    document: &Document,
    definitions: &dyn DefinitionProvider,
    opener: &dyn DocumentOpener,
) -> Vec<PreviewMarker> {
    let candidates = scan_imports(&document.text);
    debug!(
        "🔍 {} import candidate(s) in {}",
        candidates.len(),
        document.uri
    );

    let mut resolved: HashSet<(u32, u32)> = HashSet::new();
    let mut markers = Vec::new();

    for candidate in &candidates {
        for usage in scan_usages(&document.text, &candidate.name) {
            let key = (usage.line, usage.name_end);
            if resolved.contains(&key) {
                continue;
            }

            let position = Position {
                line: usage.line,
                column: usage.name_start,
            };
            let targets = match definitions.resolve_definition(document, position).await {
                Ok(targets) => targets,
                Err(e) => {
                    debug!("definition lookup failed for '{}': {}", candidate.name, e);
                    continue;
                }
            };
            let Some(target) = targets.into_iter().next() else {
                debug!("no definition for '{}' at {:?}", candidate.name, position);
                continue;
            };

            let declaration = match opener.open_document(&target.uri).await {
                Ok(text) => text,
                Err(e) => {
                    debug!("could not open declaration {}: {}", target.uri, e);
                    continue;
                }
            };

            let Some(reference) = doc_tags::extract_preview(&declaration, &candidate.name) else {
                debug!("no preview tag for '{}' in {}", candidate.name, target.uri);
                continue;
            };

            resolved.insert(key);
            markers.push(PreviewMarker {
                symbol: candidate.name.clone(),
                line: usage.line,
                column: usage.name_end,
                reference,
            });
        }
    }

    debug!("✨ resolved {} preview marker(s)", markers.len());
    markers
}
