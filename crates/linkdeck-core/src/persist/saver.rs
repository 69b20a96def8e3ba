//! Debounced remote writes.
//!
//! Every settled collection change schedules a push to the remote store,
//! but rapid successive changes within the debounce window collapse into a
//! single write of the latest state. Trailing-edge: each new change resets
//! the clock, and only the newest pending write survives.
//!
//! A failed push is logged and dropped; the local cache is the durable
//! fallback and the next change will push again anyway.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::collection::Collection;
use crate::config::PersistConfig;
use crate::persist::remote::RemoteStore;

/// Coalesces collection changes into debounced remote writes.
///
/// `schedule` spawns onto the current tokio runtime, so the saver must be
/// used from within one.
pub struct DebouncedSaver {
    remote: Arc<dyn RemoteStore>,
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl DebouncedSaver {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self::with_delay(remote, PersistConfig::REMOTE_SAVE_DEBOUNCE)
    }

    pub fn with_delay(remote: Arc<dyn RemoteStore>, delay: Duration) -> Self {
        DebouncedSaver {
            remote,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue `collection` for the next remote write.
    ///
    /// Any write still waiting out the debounce window is superseded; only
    /// the state passed to the newest call reaches the remote.
    pub fn schedule(&self, collection: Collection) {
        let scheduled = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let remote = Arc::clone(&self.remote);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != scheduled {
                debug!(scheduled, "debounced save superseded by newer change");
                return;
            }
            if let Err(err) = remote.store(&collection).await {
                warn!(%err, "remote save failed; local cache remains authoritative");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{LinkCategory, LinkItem};
    use crate::error::{LinkdeckError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        saves: Mutex<Vec<Collection>>,
        fail: bool,
    }

    #[async_trait]
    impl RemoteStore for RecordingStore {
        async fn fetch(&self) -> Result<Option<Collection>> {
            Ok(None)
        }

        async fn store(&self, collection: &Collection) -> Result<()> {
            if self.fail {
                return Err(LinkdeckError::Remote {
                    message: "injected failure".into(),
                    status: Some(500),
                });
            }
            self.saves.lock().unwrap().push(collection.clone());
            Ok(())
        }
    }

    fn collection_named(title: &str) -> Collection {
        Collection::new(vec![LinkCategory {
            title: title.into(),
            links: vec![LinkItem {
                id: "a".into(),
                name: "GitHub".into(),
                url: "https://github.com".into(),
                favicon_url: String::new(),
                description: String::new(),
            }],
        }])
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_collapse_into_one_save() {
        let store = Arc::new(RecordingStore::default());
        let saver = DebouncedSaver::with_delay(store.clone(), Duration::from_secs(1));

        for title in ["first", "second"] {
            saver.schedule(collection_named(title));
            // Let the spawned task park on its timer before moving the clock.
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_millis(300)).await;
        }
        saver.schedule(collection_named("third"));
        tokio::task::yield_now().await;

        assert!(store.saves.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let saves = store.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0], collection_named("third"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_fires_only_after_full_delay() {
        let store = Arc::new(RecordingStore::default());
        let saver = DebouncedSaver::with_delay(store.clone(), Duration::from_secs(1));

        saver.schedule(collection_named("only"));
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(999)).await;
        tokio::task::yield_now().await;
        assert!(store.saves.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(store.saves.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_is_tolerated() {
        let store = Arc::new(RecordingStore {
            saves: Mutex::new(Vec::new()),
            fail: true,
        });
        let saver = DebouncedSaver::with_delay(store.clone(), Duration::from_secs(1));

        saver.schedule(collection_named("doomed"));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        // The failure is swallowed; nothing recorded, nothing panicked.
        assert!(store.saves.lock().unwrap().is_empty());
    }
}
