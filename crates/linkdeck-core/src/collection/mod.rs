//! Collection state: the data model, its mutations, and the interaction
//! layers built on top.
//!
//! This module provides:
//! - The [`Collection`] / [`LinkCategory`] / [`LinkItem`] data model
//! - Pure mutation operations (add, edit, delete, move, reorder, filter)
//! - The move-mode session with snapshot rollback
//! - Drag-and-drop gesture resolution

mod store;
mod types;

pub mod dragdrop;
pub mod session;

pub use dragdrop::{resolve, DragPayload, DropAction, DropContext, DropTarget};
pub use session::{MoveSession, SessionState};
pub use types::{favicon_url_for, generate_link_id, Collection, LinkCategory, LinkItem};
