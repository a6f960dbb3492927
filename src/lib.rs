// Glimpse - Inline Component Preview Engine Library
//!
//! Glimpse annotates JS/TS-family sources with small inline image previews
//! next to components whose declarations carry a `@preview` documentation tag.
//! Two pipelines do the real work: the symbol & preview resolver (import scan,
//! usage-site matching, definition lookup, doc-tag extraction) and the image
//! acquirer (provider URL normalization, redirect-following fetch, SVG
//! recolor/backdrop transforms, content-addressed disk cache).

pub mod cache;
pub mod cli;
pub mod config;
pub mod host;
pub mod images;
pub mod orchestrator;
pub mod resolver;
pub mod watcher;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use cache::CacheStore;
pub use config::GlimpseConfig;
pub use host::{
    DefinitionProvider, DisplayPosition, Document, DocumentOpener, Location, MarkerKey,
    MarkerSink, Position, Theme,
};
pub use images::{AcquireError, ImageAcquirer};
pub use orchestrator::{DecorationEngine, PassScheduler};
pub use resolver::{PreviewMarker, PreviewReference};
