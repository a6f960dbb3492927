//! Single-slot pass scheduling.
//!
//! Rapid edits coalesce: scheduling a new pass supersedes any pass still
//! waiting out the quiet window, and superseded passes are dropped entirely,
//! not deferred. A pass that already started is allowed to finish; markers
//! are keyed by position and overwritten, so last-applied wins.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEBOUNCE_MS: u64 = 300;

pub struct PassScheduler {
    generation: Arc<AtomicU64>,
    quiet: Duration,
}

impl PassScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            quiet,
        }
    }

    /// Schedule a pass after the quiet window. Only the most recent request
    /// within the window actually runs.
    pub fn schedule<F>(&self, pass: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let quiet = self.quiet;

        tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if generation.load(Ordering::SeqCst) == ticket {
                pass.await;
            } else {
                debug!("⏭️ superseded pass {} dropped", ticket);
            }
        });
    }
}

impl Default for PassScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}
