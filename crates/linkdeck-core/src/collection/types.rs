//! Core data model: links, categories, and the collection that holds them.
//!
//! The wire shape mirrors the persisted JSON exactly, so a collection saved
//! by an older deployment loads unchanged. Categories are keyed by title and
//! links by an opaque generated id; both are unique across the collection.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LinkConfig;

/// A single saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    /// Opaque unique id, assigned once at creation and never reused.
    pub id: String,
    pub name: String,
    /// Raw user-entered URL. Duplicate detection normalizes a copy; the
    /// original spelling is preserved for display and opening.
    pub url: String,
    /// Display hint derived from the URL; regenerated on every edit.
    #[serde(default)]
    pub favicon_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl LinkItem {
    /// Create a new link with a freshly generated id and derived favicon.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let url = url.into();
        LinkItem {
            id: generate_link_id("link"),
            name: name.into(),
            favicon_url: favicon_url_for(&url),
            url,
            description: description.into(),
        }
    }
}

/// A titled, ordered group of links.
///
/// The title doubles as the category's identity key. A category with zero
/// links is invalid and is pruned after every mutation that can empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCategory {
    pub title: String,
    pub links: Vec<LinkItem>,
}

/// The full ordered set of categories.
///
/// Serializes as a bare JSON array of categories, matching the format the
/// server stores and backup files carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    pub categories: Vec<LinkCategory>,
}

impl Collection {
    pub fn new(categories: Vec<LinkCategory>) -> Self {
        Collection { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Total number of links across all categories.
    pub fn link_count(&self) -> usize {
        self.categories.iter().map(|c| c.links.len()).sum()
    }

    pub fn category(&self, title: &str) -> Option<&LinkCategory> {
        self.categories.iter().find(|c| c.title == title)
    }

    /// Find a link by id, together with the title of the category holding it.
    pub fn find_link(&self, link_id: &str) -> Option<(&str, &LinkItem)> {
        self.categories.iter().find_map(|category| {
            category
                .links
                .iter()
                .find(|link| link.id == link_id)
                .map(|link| (category.title.as_str(), link))
        })
    }

    /// First category title that appears more than once, if any.
    pub fn duplicate_title(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.categories
            .iter()
            .find(|c| !seen.insert(c.title.as_str()))
            .map(|c| c.title.as_str())
    }

    /// First link id that appears more than once, if any.
    pub fn duplicate_link_id(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.links.iter())
            .find(|link| !seen.insert(link.id.as_str()))
            .map(|link| link.id.as_str())
    }
}

/// Generate a collision-resistant link id with a readable prefix.
///
/// The millisecond timestamp keeps ids roughly sortable by creation time;
/// the UUID tail guarantees uniqueness within the same millisecond.
pub fn generate_link_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &uuid[..12])
}

/// Build the favicon display URL for a page URL.
pub fn favicon_url_for(url: &str) -> String {
    format!("{}{}", LinkConfig::FAVICON_URL_TEMPLATE, url)
}
