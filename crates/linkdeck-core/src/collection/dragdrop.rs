//! Drag-and-drop resolution.
//!
//! A drag gesture arrives as a tagged payload (what is being dragged) and a
//! target (what it was dropped on). [`resolve`] maps the pair to at most one
//! store operation. The resolver owns no state and never touches the
//! collection itself, so a front end can feed it gestures straight off the
//! wire and apply whatever comes back.

use serde::{Deserialize, Serialize};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragPayload {
    Category {
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    Link {
        id: String,
        category_title: String,
    },
}

/// What the payload was dropped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DropTarget {
    /// A category's header surface.
    Category {
        title: String,
    },
    /// A specific link tile.
    #[serde(rename_all = "camelCase")]
    Link {
        id: String,
        category_title: String,
    },
    /// The open area of a category's link list.
    #[serde(rename_all = "camelCase")]
    LinkContainer {
        category_title: String,
    },
}

/// The single store call a gesture resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    ReorderCategory {
        source_title: String,
        dest_title: String,
    },
    MoveLink {
        dest_category_title: String,
        source_link_id: String,
        source_category_title: String,
        dest_link_id: Option<String>,
    },
}

/// Session and surface flags the resolver gates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropContext {
    /// Move mode is active.
    pub editing: bool,
    /// The surface under the cursor accepts edits (imported and read-only
    /// views do not).
    pub surface_editable: bool,
}

/// Resolve a gesture to a store operation, or `None` to ignore it.
///
/// Drops are accepted only while move mode is active on an editable
/// surface. Category-onto-category reorders, link-onto-link inserts before
/// the target, link-onto-container appends. A link dropped on itself and
/// any mismatched pairing resolve to nothing.
pub fn resolve(
    payload: &DragPayload,
    target: &DropTarget,
    ctx: DropContext,
) -> Option<DropAction> {
    if !ctx.editing || !ctx.surface_editable {
        return None;
    }

    match (payload, target) {
        (
            DragPayload::Category {
                title: source_title,
            },
            DropTarget::Category { title: dest_title },
        ) => {
            if source_title == dest_title {
                return None;
            }
            Some(DropAction::ReorderCategory {
                source_title: source_title.clone(),
                dest_title: dest_title.clone(),
            })
        }
        (
            DragPayload::Link {
                id: source_id,
                category_title: source_category,
            },
            DropTarget::Link {
                id: dest_id,
                category_title: dest_category,
            },
        ) => {
            if source_id == dest_id {
                return None;
            }
            Some(DropAction::MoveLink {
                dest_category_title: dest_category.clone(),
                source_link_id: source_id.clone(),
                source_category_title: source_category.clone(),
                dest_link_id: Some(dest_id.clone()),
            })
        }
        (
            DragPayload::Link {
                id: source_id,
                category_title: source_category,
            },
            DropTarget::LinkContainer { category_title },
        ) => Some(DropAction::MoveLink {
            dest_category_title: category_title.clone(),
            source_link_id: source_id.clone(),
            source_category_title: source_category.clone(),
            dest_link_id: None,
        }),
        // Category-onto-link, link-onto-category-header, and the rest carry
        // no meaning.
        _ => None,
    }
}
