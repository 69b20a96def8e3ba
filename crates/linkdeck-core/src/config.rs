//! Centralized configuration for Linkdeck.
//!
//! This module provides configuration constants for link presentation and
//! persistence timing, kept in one place so the service and import layers
//! agree on them.

use std::time::Duration;

/// Link presentation defaults.
pub struct LinkConfig;

impl LinkConfig {
    /// Favicon service prefix; the raw page URL is appended as-is.
    pub const FAVICON_URL_TEMPLATE: &'static str =
        "https://www.google.com/s2/favicons?sz=64&domain_url=";
    pub const UNTITLED_FOLDER: &'static str = "Untitled Folder";
    pub const UNTITLED_LINK: &'static str = "Untitled Link";
    pub const IMPORTED_BOOKMARKS_TITLE: &'static str = "Imported Bookmarks";
}

/// Persistence-related configuration.
pub struct PersistConfig;

impl PersistConfig {
    /// Quiet period before a pending collection change is pushed to the remote.
    pub const REMOTE_SAVE_DEBOUNCE: Duration = Duration::from_secs(1);
    /// Row key under which the whole collection is stored server-side.
    pub const STORAGE_KEY: &'static str = "user_links";
    pub const CACHE_FILE_NAME: &'static str = "link-data.json";
    pub const LINKS_ENDPOINT: &'static str = "/api/links";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
}
