//! File Watching
//!
//! Bridges notify's callback thread into the async world: raw events are
//! pushed onto an unbounded channel, filtered down to content changes, and
//! surfaced as a plain callback the caller typically wires into a
//! [`PassScheduler`](crate::orchestrator::PassScheduler).

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Watch one file and invoke `on_change` for every (content) change event.
/// Runs until the event stream closes.
pub async fn watch_file(path: &Path, mut on_change: impl FnMut() + Send) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<notify::Result<notify::Event>>();

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", path.display()))?;

    info!("👀 watching {} for edits", path.display());

    while let Some(event) = rx.recv().await {
        match event {
            Ok(event) if is_content_change(&event) => {
                debug!("📁 change detected: {:?}", event.kind);
                on_change();
            }
            Ok(_) => {}
            Err(e) => warn!("file watcher error: {}", e),
        }
    }

    Ok(())
}

/// Metadata-only events (mtime/chmod noise) would trigger rebuild loops.
fn is_content_change(event: &notify::Event) -> bool {
    match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(kind) => !matches!(kind, ModifyKind::Metadata(_)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{DataChange, Event, MetadataKind};

    #[test]
    fn content_changes_pass_the_filter() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)));
        assert!(is_content_change(&event));

        let event = Event::new(EventKind::Create(notify::event::CreateKind::File));
        assert!(is_content_change(&event));
    }

    #[test]
    fn metadata_and_access_events_are_ignored() {
        let event = Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)));
        assert!(!is_content_change(&event));

        let event = Event::new(EventKind::Access(notify::event::AccessKind::Any));
        assert!(!is_content_change(&event));
    }
}
