use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the store watcher to the TUI event loop.
#[derive(Debug)]
pub enum StoreEvent {
    /// One or more store entries changed on disk.
    Changed(Vec<PathBuf>),
}

/// Watches `storyboard/store/` so the TUI picks up writes made by the CLI.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StoreEvent>,
}

impl StoreWatcher {
    pub fn start(store_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }

                let relevant: Vec<PathBuf> =
                    event.paths.into_iter().filter(|p| is_store_entry(p)).collect();
                if !relevant.is_empty() {
                    let _ = tx.send(StoreEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(store_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll; returns every queued event.
    pub fn poll(&self) -> Vec<StoreEvent> {
        self.rx.try_iter().collect()
    }
}

/// `<key>.json` entries only; skips atomic-write temp files and backups
fn is_store_entry(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with('.') && name.ends_with(".json") && !name.ends_with(".bak.json")
}
