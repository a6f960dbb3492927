//! Decoration Orchestrator
//!
//! Drives the resolver and acquirer per document and feeds the host's marker
//! sink. The applied-marker registry is explicit state owned here - cleared
//! on theme change, torn down via [`DecorationEngine::shutdown`] - never a
//! global.
//!
//! Failure containment: a dead link or malformed documentation block costs
//! exactly one marker. The worst outcome of a fully failed pass is "no
//! markers shown".

mod debounce;

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::GlimpseConfig;
use crate::host::{
    DefinitionProvider, DisplayPosition, Document, DocumentOpener, MarkerKey, MarkerSink, Theme,
};
use crate::images::ImageAcquirer;
use crate::resolver;

pub use debounce::{DEBOUNCE_MS, PassScheduler};

pub struct DecorationEngine<D, O, S> {
    definitions: D,
    opener: O,
    acquirer: ImageAcquirer,
    sink: S,
    theme: Theme,
    applied: HashSet<MarkerKey>,
}

impl<D, O, S> DecorationEngine<D, O, S>
where
    D: DefinitionProvider,
    O: DocumentOpener,
    S: MarkerSink,
{
    pub fn new(definitions: D, opener: O, acquirer: ImageAcquirer, sink: S, theme: Theme) -> Self {
        Self {
            definitions,
            opener,
            acquirer,
            sink,
            theme,
            applied: HashSet::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Run one full pass over a document: resolve markers, clear the ones
    /// that went stale, acquire images for the new ones and attach them.
    pub async fn run_pass(&mut self, document: &Document, config: &GlimpseConfig) {
        if !config.enabled {
            debug!("previews disabled, skipping {}", document.uri);
            return;
        }
        self.acquirer.set_svg_color(&config.svg_color);

        let markers = resolver::resolve(document, &self.definitions, &self.opener).await;
        let fresh: HashSet<MarkerKey> = markers
            .iter()
            .map(|m| MarkerKey {
                line: m.line,
                column: m.column,
            })
            .collect();

        // Clear markers that no longer resolve before reapplying.
        let stale: Vec<MarkerKey> = self
            .applied
            .iter()
            .filter(|key| !fresh.contains(key))
            .copied()
            .collect();
        for key in stale {
            if let Err(e) = self.sink.clear(key).await {
                warn!("failed to clear marker at {}:{}: {}", key.line, key.column, e);
            }
            self.applied.remove(&key);
        }

        let render_size = match config.position {
            DisplayPosition::Inline => Some(config.image_size),
            DisplayPosition::Gutter => None,
        };

        let mut attached = 0usize;
        for marker in markers {
            let key = MarkerKey {
                line: marker.line,
                column: marker.column,
            };
            if self.applied.contains(&key) {
                continue;
            }

            match self
                .acquirer
                .acquire(&marker.reference, self.theme, render_size)
                .await
            {
                Ok(image) => {
                    match self
                        .sink
                        .attach(key, &image, config.position, &marker.symbol)
                        .await
                    {
                        Ok(()) => {
                            self.applied.insert(key);
                            attached += 1;
                        }
                        Err(e) => warn!("failed to attach marker for '{}': {}", marker.symbol, e),
                    }
                }
                // The affected marker is simply omitted; no retry.
                Err(e) => warn!("🖼 preview unavailable: {}", e),
            }
        }

        info!(
            "✨ {} marker(s) attached, {} applied total for {}",
            attached,
            self.applied.len(),
            document.uri
        );
    }

    /// Theme affects the rendered asset, so a theme switch invalidates every
    /// applied marker.
    pub async fn on_theme_changed(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        info!("🎨 theme changed, invalidating {} marker(s)", self.applied.len());
        self.theme = theme;
        self.clear_applied().await;
    }

    /// Forget and clear every applied marker (document switch, teardown).
    pub async fn clear_applied(&mut self) {
        for key in std::mem::take(&mut self.applied) {
            if let Err(e) = self.sink.clear(key).await {
                warn!("failed to clear marker at {}:{}: {}", key.line, key.column, e);
            }
        }
    }

    pub async fn shutdown(&mut self) {
        self.clear_applied().await;
    }
}
