//! The service layer: one owned collection, its move-mode session, and the
//! persistence fan-out.
//!
//! All mutations flow through here. Each one produces a new collection
//! value from the store operations, and a settled change is written to the
//! local cache immediately and pushed to the remote store after the
//! debounce window. Reads hand out immutable references; nothing outside
//! this type ever holds a mutable view of the live collection.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collection::{
    resolve, Collection, DragPayload, DropAction, DropContext, DropTarget, LinkItem, MoveSession,
};
use crate::defaults::default_collection;
use crate::error::{LinkdeckError, Result};
use crate::import;
use crate::persist::{DebouncedSaver, LocalCache, RemoteStore};

/// Owns the live collection and coordinates every change to it.
pub struct LinkService {
    collection: Collection,
    session: MoveSession,
    cache: Option<LocalCache>,
    saver: Option<DebouncedSaver>,
}

impl LinkService {
    /// Service over an in-memory collection with no persistence attached.
    pub fn new(collection: Collection) -> Self {
        LinkService {
            collection,
            session: MoveSession::new(),
            cache: None,
            saver: None,
        }
    }

    /// Attach a local cache file; every settled change is written to it.
    pub fn with_cache(mut self, cache: LocalCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach a remote store; settled changes are pushed to it debounced.
    ///
    /// Pushes spawn onto the current tokio runtime.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.saver = Some(DebouncedSaver::new(remote));
        self
    }

    /// Build a service from whatever persisted state is reachable.
    ///
    /// The remote store is consulted first; a collection it returns is
    /// adopted and cached locally, even an empty one. When the remote holds
    /// nothing or is unreachable, the local cache is tried next, and a
    /// readable non-empty cache wins. Everything else falls back to the
    /// built-in defaults.
    /// Loading never schedules a remote push; only later changes do.
    pub async fn load(remote: Option<Arc<dyn RemoteStore>>, cache: Option<LocalCache>) -> Self {
        let collection = initial_collection(remote.as_deref(), cache.as_ref()).await;
        LinkService {
            collection,
            session: MoveSession::new(),
            cache,
            saver: remote.map(DebouncedSaver::new),
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn is_move_mode(&self) -> bool {
        self.session.is_editing()
    }

    /// Collection filtered down to links matching `query`.
    pub fn search(&self, query: &str) -> Collection {
        self.collection.filter(query)
    }

    /// Add a new link or apply an edit, then persist.
    ///
    /// Rejected while move mode is active; drags are the only edits a
    /// session allows.
    pub fn save_link(
        &mut self,
        link: &LinkItem,
        target_category_title: &str,
        original_id: Option<&str>,
    ) -> Result<()> {
        self.guard_not_editing()?;
        let next = self
            .collection
            .add_or_edit(link, target_category_title, original_id)?;
        self.commit(next);
        Ok(())
    }

    /// Delete a link by id, then persist.
    pub fn delete_link(&mut self, link_id: &str) -> Result<()> {
        self.guard_not_editing()?;
        let next = self.collection.delete(link_id);
        self.commit(next);
        Ok(())
    }

    /// Enter move mode, snapshotting the collection for rollback.
    pub fn begin_move(&mut self) {
        self.session.enter(&self.collection);
    }

    /// Leave move mode keeping the rearranged collection.
    ///
    /// The drops already persisted as they landed, so there is nothing
    /// further to write.
    pub fn save_move(&mut self) {
        self.session.save();
    }

    /// Leave move mode restoring the pre-session arrangement.
    pub fn cancel_move(&mut self) {
        if let Some(snapshot) = self.session.cancel() {
            self.commit(snapshot);
        }
    }

    /// Flip move mode; leaving this way discards the session's changes.
    pub fn toggle_move_mode(&mut self) {
        if self.session.is_editing() {
            self.cancel_move();
        } else {
            self.begin_move();
        }
    }

    /// Apply a drag-and-drop gesture against the live collection.
    ///
    /// Returns whether the gesture resolved to an operation. Gestures are
    /// ignored outside move mode. The service always operates the main
    /// editable view; read-only previews never reach it.
    pub fn apply_drop(&mut self, payload: &DragPayload, target: &DropTarget) -> bool {
        let ctx = DropContext {
            editing: self.session.is_editing(),
            surface_editable: true,
        };
        let Some(action) = resolve(payload, target, ctx) else {
            debug!("drop gesture ignored");
            return false;
        };

        let next = match action {
            DropAction::ReorderCategory {
                source_title,
                dest_title,
            } => self.collection.reorder_category(&source_title, &dest_title),
            DropAction::MoveLink {
                dest_category_title,
                source_link_id,
                source_category_title,
                dest_link_id,
            } => self.collection.move_link(
                &dest_category_title,
                &source_link_id,
                &source_category_title,
                dest_link_id.as_deref(),
            ),
        };
        self.commit(next);
        true
    }

    /// Replace the whole collection from a backup document, then persist.
    ///
    /// All-or-nothing: a document that fails validation leaves the current
    /// collection untouched.
    pub fn import_backup(&mut self, text: &str) -> Result<()> {
        self.guard_not_editing()?;
        let imported = import::import_backup(text)?;
        let next = self.collection.replace_all(imported);
        self.commit(next);
        Ok(())
    }

    /// Render the current collection as a backup document.
    pub fn export_backup(&self) -> Result<String> {
        import::export_backup(&self.collection)
    }

    /// Parse a bookmark-export document into a standalone preview.
    ///
    /// The result is never merged into the live collection.
    pub fn parse_bookmarks(&self, html: &str) -> Result<Collection> {
        let parsed = import::parse_bookmarks(html);
        if parsed.is_empty() {
            return Err(LinkdeckError::NoBookmarksFound);
        }
        Ok(parsed)
    }

    fn guard_not_editing(&self) -> Result<()> {
        if self.session.is_editing() {
            return Err(LinkdeckError::MoveModeActive);
        }
        Ok(())
    }

    /// Adopt `next` as the live collection and fan out persistence.
    fn commit(&mut self, next: Collection) {
        if next == self.collection {
            debug!("state unchanged; skipping persistence");
            return;
        }
        self.collection = next;
        self.write_cache();
        if let Some(saver) = &self.saver {
            saver.schedule(self.collection.clone());
        }
    }

    fn write_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.store(&self.collection) {
                warn!(%err, "failed to write local cache");
            }
        }
    }
}

async fn initial_collection(
    remote: Option<&dyn RemoteStore>,
    cache: Option<&LocalCache>,
) -> Collection {
    if let Some(remote) = remote {
        match remote.fetch().await {
            Ok(Some(collection)) => {
                info!(categories = collection.len(), "loaded collection from remote");
                if let Some(cache) = cache {
                    if let Err(err) = cache.store(&collection) {
                        warn!(%err, "failed to cache remote collection");
                    }
                }
                return collection;
            }
            Ok(None) => debug!("remote holds nothing yet; trying local cache"),
            Err(err) => warn!(%err, "remote load failed; trying local cache"),
        }
    }

    if let Some(cache) = cache {
        match cache.load() {
            Ok(Some(collection)) if !collection.is_empty() => {
                info!(
                    categories = collection.len(),
                    "loaded collection from local cache"
                );
                return collection;
            }
            Ok(_) => debug!("local cache holds nothing usable"),
            Err(err) => warn!(%err, "local cache unreadable; using defaults"),
        }
    }

    info!("starting with the built-in default collection");
    default_collection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{LinkCategory, LinkItem};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct StubRemote {
        stored: Mutex<Option<Collection>>,
        fail_fetch: bool,
    }

    #[async_trait]
    impl RemoteStore for StubRemote {
        async fn fetch(&self) -> Result<Option<Collection>> {
            if self.fail_fetch {
                return Err(LinkdeckError::Remote {
                    message: "connection refused".into(),
                    status: None,
                });
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn store(&self, collection: &Collection) -> Result<()> {
            *self.stored.lock().unwrap() = Some(collection.clone());
            Ok(())
        }
    }

    fn link(id: &str, name: &str, url: &str) -> LinkItem {
        LinkItem {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            favicon_url: String::new(),
            description: String::new(),
        }
    }

    fn sample() -> Collection {
        Collection::new(vec![
            LinkCategory {
                title: "Dev".into(),
                links: vec![
                    link("a", "GitHub", "https://github.com"),
                    link("b", "Crates", "https://crates.io"),
                ],
            },
            LinkCategory {
                title: "News".into(),
                links: vec![link("c", "Lobsters", "https://lobste.rs")],
            },
        ])
    }

    #[test]
    fn test_edits_rejected_during_move_mode() {
        let mut service = LinkService::new(sample());
        service.begin_move();

        let err = service
            .save_link(&link("d", "Docs", "https://docs.rs"), "Dev", None)
            .unwrap_err();
        assert!(matches!(err, LinkdeckError::MoveModeActive));
        assert!(matches!(
            service.delete_link("a").unwrap_err(),
            LinkdeckError::MoveModeActive
        ));
        assert!(matches!(
            service.import_backup("[]").unwrap_err(),
            LinkdeckError::MoveModeActive
        ));
    }

    #[test]
    fn test_cancel_move_restores_snapshot() {
        let original = sample();
        let mut service = LinkService::new(original.clone());

        service.begin_move();
        let accepted = service.apply_drop(
            &DragPayload::Category {
                title: "News".into(),
            },
            &DropTarget::Category { title: "Dev".into() },
        );
        assert!(accepted);
        assert_ne!(*service.collection(), original);

        service.cancel_move();
        assert_eq!(*service.collection(), original);
        assert!(!service.is_move_mode());
    }

    #[test]
    fn test_save_move_retains_changes() {
        let mut service = LinkService::new(sample());
        service.begin_move();
        service.apply_drop(
            &DragPayload::Category {
                title: "News".into(),
            },
            &DropTarget::Category { title: "Dev".into() },
        );
        service.save_move();

        assert_eq!(service.collection().categories[0].title, "News");
        assert!(!service.is_move_mode());
    }

    #[test]
    fn test_toggle_off_discards_session_changes() {
        let original = sample();
        let mut service = LinkService::new(original.clone());

        service.toggle_move_mode();
        assert!(service.is_move_mode());
        service.apply_drop(
            &DragPayload::Category {
                title: "News".into(),
            },
            &DropTarget::Category { title: "Dev".into() },
        );
        service.toggle_move_mode();

        assert_eq!(*service.collection(), original);
    }

    #[test]
    fn test_drops_ignored_outside_move_mode() {
        let original = sample();
        let mut service = LinkService::new(original.clone());

        let accepted = service.apply_drop(
            &DragPayload::Category {
                title: "News".into(),
            },
            &DropTarget::Category { title: "Dev".into() },
        );
        assert!(!accepted);
        assert_eq!(*service.collection(), original);
    }

    #[test]
    fn test_import_backup_replaces_collection() {
        let mut service = LinkService::new(sample());
        let text = r#"[{"title":"Fresh","links":[{"id":"z","name":"Z","url":"https://z.example"}]}]"#;
        service.import_backup(text).unwrap();
        assert_eq!(service.collection().len(), 1);
        assert!(service.collection().category("Fresh").is_some());
    }

    #[test]
    fn test_import_backup_failure_leaves_state_untouched() {
        let original = sample();
        let mut service = LinkService::new(original.clone());
        assert!(service.import_backup("not json").is_err());
        assert_eq!(*service.collection(), original);
    }

    #[test]
    fn test_parse_bookmarks_is_preview_only() {
        let original = sample();
        let mut service = LinkService::new(original.clone());
        let html = r#"<DL><p>
            <DT><H3>Work</H3>
            <DL><p>
                <DT><A HREF="https://intranet.example.com/">Intranet</A>
            </DL><p>
        </DL><p>"#;

        let preview = service.parse_bookmarks(html).unwrap();
        assert_eq!(preview.len(), 1);
        assert_eq!(*service.collection(), original);

        // Mutating afterwards still works against the untouched original.
        service.delete_link("c").unwrap();
        assert!(service.collection().category("News").is_none());
    }

    #[test]
    fn test_parse_bookmarks_with_nothing_found_is_error() {
        let service = LinkService::new(sample());
        assert!(matches!(
            service.parse_bookmarks("<p>nope</p>").unwrap_err(),
            LinkdeckError::NoBookmarksFound
        ));
    }

    #[test]
    fn test_search_filters_links() {
        let service = LinkService::new(sample());
        let hits = service.search("lobsters");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.categories[0].title, "News");
    }

    #[tokio::test]
    async fn test_load_prefers_remote() {
        let remote = Arc::new(StubRemote {
            stored: Mutex::new(Some(sample())),
            fail_fetch: false,
        });
        let service = LinkService::load(Some(remote), None).await;
        assert_eq!(*service.collection(), sample());
    }

    #[tokio::test]
    async fn test_load_caches_remote_collection() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().join("link-data.json"));
        let remote = Arc::new(StubRemote {
            stored: Mutex::new(Some(sample())),
            fail_fetch: false,
        });

        LinkService::load(Some(remote), Some(cache.clone())).await;
        assert_eq!(cache.load().unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_load_falls_back_to_cache_when_remote_fails() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().join("link-data.json"));
        cache.store(&sample()).unwrap();

        let remote = Arc::new(StubRemote {
            stored: Mutex::new(None),
            fail_fetch: true,
        });
        let service = LinkService::load(Some(remote), Some(cache)).await;
        assert_eq!(*service.collection(), sample());
    }

    #[tokio::test]
    async fn test_load_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().join("absent.json"));

        let service = LinkService::load(None, Some(cache)).await;
        assert_eq!(*service.collection(), default_collection());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_change_reaches_remote_after_debounce() {
        let remote = Arc::new(StubRemote::default());
        let mut service = LinkService::new(sample()).with_remote(remote.clone());

        service
            .save_link(&link("d", "Docs", "https://docs.rs"), "Dev", None)
            .unwrap();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        let stored = remote.stored.lock().unwrap().clone().unwrap();
        assert!(stored.find_link("d").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_noop_change_schedules_nothing() {
        let remote = Arc::new(StubRemote::default());
        let mut service = LinkService::new(sample()).with_remote(remote.clone());

        // Deleting an unknown id produces an identical collection.
        service.delete_link("zzz").unwrap();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        assert!(remote.stored.lock().unwrap().is_none());
    }

    #[test]
    fn test_changes_land_in_cache_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LocalCache::new(temp_dir.path().join("link-data.json"));
        let mut service = LinkService::new(sample()).with_cache(cache.clone());

        service.delete_link("c").unwrap();

        let cached = cache.load().unwrap().unwrap();
        assert!(cached.category("News").is_none());
    }
}
