//! CLI output sinks and shared command plumbing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;

use crate::host::{DisplayPosition, MarkerKey, MarkerSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Prints one line per attached marker, 1-based positions for editors.
#[derive(Debug)]
pub struct TextMarkerSink {
    source: String,
}

impl TextMarkerSink {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[async_trait]
impl MarkerSink for TextMarkerSink {
    async fn attach(
        &self,
        key: MarkerKey,
        image: &Path,
        _display: DisplayPosition,
        hover: &str,
    ) -> Result<()> {
        println!(
            "{}:{}:{}  {}  {}",
            self.source,
            key.line + 1,
            key.column + 1,
            hover,
            image.display()
        );
        Ok(())
    }

    async fn clear(&self, _key: MarkerKey) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize, Clone)]
struct MarkerRecord {
    line: u32,
    column: u32,
    component: String,
    image: String,
}

/// Collects markers for a single JSON dump at the end of a pass.
#[derive(Debug, Default)]
pub struct JsonMarkerSink {
    records: Mutex<Vec<MarkerRecord>>,
}

impl JsonMarkerSink {
    pub fn render(&self) -> Result<String> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        serde_json::to_string_pretty(&*records).context("failed to serialize markers")
    }
}

#[async_trait]
impl MarkerSink for JsonMarkerSink {
    async fn attach(
        &self,
        key: MarkerKey,
        image: &Path,
        _display: DisplayPosition,
        hover: &str,
    ) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(MarkerRecord {
            line: key.line,
            column: key.column,
            component: hover.to_string(),
            image: image.display().to_string(),
        });
        Ok(())
    }

    async fn clear(&self, key: MarkerKey) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.retain(|r| r.line != key.line || r.column != key.column);
        Ok(())
    }
}
