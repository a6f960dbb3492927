//! Filesystem-backed capability implementations used by the CLI.
//!
//! An editor host brings its own definition index; the standalone driver gets
//! by with a project walk that looks for exported declarations.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::{DefinitionProvider, Document, DocumentOpener, Location, Position, offset_to_position};

/// Extensions considered part of the component source tree.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Resolves definitions by scanning project sources for
/// `export const|function|class <Name>` declarations. First hit wins.
#[derive(Debug, Clone)]
pub struct ProjectDefinitionProvider {
    root: PathBuf,
}

impl ProjectDefinitionProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DefinitionProvider for ProjectDefinitionProvider {
    async fn resolve_definition(
        &self,
        document: &Document,
        position: Position,
    ) -> Result<Vec<Location>> {
        let Some(symbol) = symbol_at(document, position) else {
            return Ok(Vec::new());
        };
        debug!("🎯 looking up declaration of '{}'", symbol);

        let pattern = format!(
            r"export\s+(?:const|function|class)\s+{}\b",
            regex::escape(&symbol)
        );
        let declaration = Regex::new(&pattern).context("declaration pattern")?;

        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !is_ignored(e))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !SOURCE_EXTENSIONS.contains(&ext) {
                continue;
            }
            let Ok(text) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            if let Some(m) = declaration.find(&text) {
                let location = Location {
                    uri: entry.path().display().to_string(),
                    position: offset_to_position(&text, m.start()),
                };
                debug!("⚡ '{}' declared in {}", symbol, location.uri);
                return Ok(vec![location]);
            }
        }

        Ok(Vec::new())
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| matches!(name, "node_modules" | ".git" | "dist" | "build" | "target"))
        .unwrap_or(false)
}

/// Identifier starting at (or spanning) the given position, if any.
fn symbol_at(document: &Document, position: Position) -> Option<String> {
    let line = document.text.lines().nth(position.line as usize)?;
    let symbol: String = line
        .chars()
        .skip(position.column as usize)
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    (!symbol.is_empty()).then_some(symbol)
}

/// Opens documents straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentOpener;

#[async_trait]
impl DocumentOpener for FileDocumentOpener {
    async fn open_document(&self, uri: &str) -> Result<String> {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to open {}", uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_at_reads_identifier_from_position() {
        let document = Document::new("a.tsx", "const x = 1;\nreturn <Badge size=4/>;");
        let symbol = symbol_at(&document, Position { line: 1, column: 8 });
        assert_eq!(symbol.as_deref(), Some("Badge"));
    }

    #[test]
    fn symbol_at_misses_whitespace() {
        let document = Document::new("a.tsx", "  <Badge/>");
        assert_eq!(symbol_at(&document, Position { line: 0, column: 0 }), None);
    }
}
