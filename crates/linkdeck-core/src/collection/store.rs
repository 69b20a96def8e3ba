//! Collection mutations.
//!
//! Every operation is a pure transformation: it takes `&self` and returns a
//! new [`Collection`] value, leaving the input untouched. Move-mode rollback
//! depends on this; the session snapshot stays valid no matter what happens
//! to the working copy.
//!
//! Two invariants hold after every operation: no category is empty, and no
//! link id appears twice.

use tracing::debug;

use crate::collection::types::{favicon_url_for, Collection, LinkCategory, LinkItem};
use crate::error::{LinkdeckError, Result};
use crate::urlnorm::normalize;

impl Collection {
    /// Add a new link or apply an edit to an existing one.
    ///
    /// Validates the URL, refuses duplicates (comparing normalized URLs
    /// across the whole collection, excluding the link being edited), and
    /// regenerates the favicon. The link lands at the end of the target
    /// category; the category is created at the end of the collection if no
    /// category carries that title yet.
    ///
    /// `original_id` distinguishes an edit from an add: when set, the link
    /// with that id is removed from wherever it lives before the updated
    /// link is placed.
    pub fn add_or_edit(
        &self,
        link: &LinkItem,
        target_category_title: &str,
        original_id: Option<&str>,
    ) -> Result<Collection> {
        let normalized = normalize(&link.url);
        if normalized.is_empty() {
            return Err(LinkdeckError::InvalidUrl {
                url: link.url.clone(),
            });
        }

        for category in &self.categories {
            for existing in &category.links {
                if original_id == Some(existing.id.as_str()) {
                    continue;
                }
                if normalize(&existing.url) == normalized {
                    return Err(LinkdeckError::DuplicateUrl {
                        category_title: category.title.clone(),
                    });
                }
            }
        }

        let saved = LinkItem {
            favicon_url: favicon_url_for(&link.url),
            ..link.clone()
        };

        let mut next = self.clone();
        if let Some(id) = original_id {
            for category in &mut next.categories {
                category.links.retain(|l| l.id != id);
            }
        }

        match next
            .categories
            .iter_mut()
            .find(|c| c.title == target_category_title)
        {
            Some(category) => category.links.push(saved),
            None => next.categories.push(LinkCategory {
                title: target_category_title.to_string(),
                links: vec![saved],
            }),
        }

        next.prune_empty();
        Ok(next)
    }

    /// Remove the link with the given id, wherever it lives.
    ///
    /// Unknown ids leave the collection unchanged.
    pub fn delete(&self, link_id: &str) -> Collection {
        let mut next = self.clone();
        for category in &mut next.categories {
            category.links.retain(|l| l.id != link_id);
        }
        next.prune_empty();
        next
    }

    /// Move the category named `source_title` to the slot `dest_title`
    /// occupies in the starting order.
    ///
    /// Both positions are fixed before the source is lifted out, so dragging
    /// a category onto its immediate successor swaps the pair and dragging
    /// further down lands it just past the destination. Unknown titles and a
    /// source equal to the destination leave the collection unchanged.
    pub fn reorder_category(&self, source_title: &str, dest_title: &str) -> Collection {
        let mut next = self.clone();
        let Some(source_pos) = next.categories.iter().position(|c| c.title == source_title)
        else {
            return next;
        };
        let Some(dest_pos) = next.categories.iter().position(|c| c.title == dest_title) else {
            debug!(dest_title, "reorder destination missing; keeping order");
            return next;
        };
        if source_pos == dest_pos {
            return next;
        }

        let moved = next.categories.remove(source_pos);
        next.categories.insert(dest_pos, moved);
        next
    }

    /// Move a link between (or within) categories.
    ///
    /// The link is inserted immediately before `dest_link_id` when given and
    /// present, otherwise appended to the destination category. A missing
    /// source link or destination category leaves the collection unchanged,
    /// which keeps half-applied drags from losing links.
    pub fn move_link(
        &self,
        dest_category_title: &str,
        source_link_id: &str,
        source_category_title: &str,
        dest_link_id: Option<&str>,
    ) -> Collection {
        if source_category_title == dest_category_title && dest_link_id == Some(source_link_id) {
            return self.clone();
        }

        let mut next = self.clone();
        let Some(cat_pos) = next
            .categories
            .iter()
            .position(|c| c.title == source_category_title)
        else {
            return next;
        };
        let Some(link_pos) = next.categories[cat_pos]
            .links
            .iter()
            .position(|l| l.id == source_link_id)
        else {
            return next;
        };
        let moved = next.categories[cat_pos].links.remove(link_pos);

        let Some(dest) = next
            .categories
            .iter_mut()
            .find(|c| c.title == dest_category_title)
        else {
            debug!(dest_category_title, "move destination missing; keeping link in place");
            return self.clone();
        };
        let insert_at = dest_link_id
            .and_then(|id| dest.links.iter().position(|l| l.id == id))
            .unwrap_or(dest.links.len());
        dest.links.insert(insert_at, moved);

        next.prune_empty();
        next
    }

    /// Replace the whole collection, typically after a backup import.
    ///
    /// The input is passed through as-is; structural validation is the
    /// importer's job.
    pub fn replace_all(&self, new_collection: Collection) -> Collection {
        new_collection
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the persisted JSON form.
    pub fn from_json(text: &str) -> Result<Collection> {
        Ok(serde_json::from_str(text)?)
    }

    /// Categories filtered down to links matching `query`.
    ///
    /// Matching is case-insensitive over name, description, and URL, with
    /// the query taken as typed: surrounding whitespace is part of it.
    /// Categories left without a match are dropped; an empty query returns
    /// the collection unchanged.
    pub fn filter(&self, query: &str) -> Collection {
        if query.is_empty() {
            return self.clone();
        }
        let needle = query.to_lowercase();

        let categories = self
            .categories
            .iter()
            .filter_map(|category| {
                let links: Vec<LinkItem> = category
                    .links
                    .iter()
                    .filter(|link| {
                        link.name.to_lowercase().contains(&needle)
                            || link.description.to_lowercase().contains(&needle)
                            || link.url.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                (!links.is_empty()).then(|| LinkCategory {
                    title: category.title.clone(),
                    links,
                })
            })
            .collect();

        Collection { categories }
    }

    /// Drop categories whose link sequence has emptied.
    pub(crate) fn prune_empty(&mut self) {
        self.categories.retain(|c| !c.links.is_empty());
    }
}
