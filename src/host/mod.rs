//! Host Capability Contracts
//!
//! Everything Glimpse needs from its host environment is expressed as a trait
//! here: definition lookup, document loading, and the marker rendering sink.
//! An editor integration implements these against its extension API; the CLI
//! ships filesystem-backed implementations in [`project`].
//!
//! Definition lookup results arrive in whatever shape the host produces and
//! are normalized into [`Location`] at this boundary, so the resolver core
//! never sees the variance.

pub mod project;

use anyhow::Result;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// An open text document: a stable identifier plus its full text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub uri: String,
    pub text: String,
}

impl Document {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }
}

/// Zero-based line/column position within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A definition-lookup target, already normalized to a single shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub uri: String,
    pub position: Position,
}

/// Active color theme. High-contrast themes render like dark ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Dark,
    Light,
    HighContrast,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        !matches!(self, Theme::Light)
    }

    /// Suffix used in cache filenames. Only two values exist on disk.
    pub fn cache_suffix(self) -> &'static str {
        if self.is_dark() { "dark" } else { "light" }
    }
}

/// Where a marker is rendered relative to its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPosition {
    /// Marker spans the full line in the gutter.
    Gutter,
    /// Marker anchored at a specific column, rendered at the configured size.
    Inline,
}

/// Identity of an applied marker. Markers are keyed by position and
/// overwritten, so a stale pass finishing late is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerKey {
    pub line: u32,
    pub column: u32,
}

/// Convert a byte offset into a zero-based (line, column) position.
/// Columns count characters, not bytes.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut column = 0u32;
    for (index, ch) in text.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    Position { line, column }
}

/// "Go to definition" as provided by the host. May return no targets at all;
/// the resolver treats that as a silent skip, not an error.
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    async fn resolve_definition(
        &self,
        document: &Document,
        position: Position,
    ) -> Result<Vec<Location>>;
}

/// Loads the text of a document by its uri. May fail if unreadable.
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    async fn open_document(&self, uri: &str) -> Result<String>;
}

/// Rendering sink: attach a preview image at a position, or clear one.
#[async_trait]
pub trait MarkerSink: Send + Sync {
    async fn attach(
        &self,
        key: MarkerKey,
        image: &Path,
        display: DisplayPosition,
        hover: &str,
    ) -> Result<()>;

    async fn clear(&self, key: MarkerKey) -> Result<()>;
}

// Allow Arc<dyn MarkerSink> (and Arc<ConcreteSink>) wherever a sink is needed
#[async_trait]
impl<T: MarkerSink + ?Sized> MarkerSink for Arc<T> {
    async fn attach(
        &self,
        key: MarkerKey,
        image: &Path,
        display: DisplayPosition,
        hover: &str,
    ) -> Result<()> {
        (**self).attach(key, image, display, hover).await
    }

    async fn clear(&self, key: MarkerKey) -> Result<()> {
        (**self).clear(key).await
    }
}
