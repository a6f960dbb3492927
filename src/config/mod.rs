//! Configuration loading
//!
//! Settings are sourced externally (a TOML file for the CLI, the host's
//! settings store for an editor integration) and re-read at the start of each
//! processing pass. Nothing here mutates after load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::host::DisplayPosition;

/// Process-wide settings for the preview pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimpseConfig {
    /// Globally disables all processing when false.
    pub enabled: bool,
    /// Rendered image size in pixels (inline mode).
    pub image_size: u32,
    /// Substituted for the symbolic `currentColor` token in SVGs.
    pub svg_color: String,
    /// Gutter or inline rendering.
    pub position: DisplayPosition,
    /// Cache entries older than this are swept.
    pub cache_max_age_days: u64,
}

impl Default for GlimpseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            image_size: 16,
            svg_color: "#ffffff".to_string(),
            position: DisplayPosition::Gutter,
            cache_max_age_days: 7,
        }
    }
}

impl GlimpseConfig {
    /// Load configuration, falling back to defaults when the file is missing
    /// or malformed. A bad config never aborts a pass.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("glimpse.toml"));

        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!("loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("failed to parse {}: {} (using defaults)", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {} (using defaults)", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_days * 86_400)
    }
}
