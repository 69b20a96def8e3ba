//! Linkdeck Core - Headless library for personal link collection management.
//!
//! This crate provides the full link-collection engine: the categorized
//! collection and its mutation operations, move-mode sessions with
//! rollback, drag-and-drop resolution, bookmark and backup import, and
//! cache-plus-remote persistence. It has no UI of its own; any front end
//! drives it through [`LinkService`].
//!
//! For the companion HTTP storage server, see the `linkdeck-server` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use linkdeck_core::{LinkItem, LinkService};
//!
//! #[tokio::main]
//! async fn main() -> linkdeck_core::Result<()> {
//!     // No remote, no cache: an in-memory deck seeded with the defaults.
//!     let mut service = LinkService::load(None, None).await;
//!
//!     let link = LinkItem::new("Rust", "https://www.rust-lang.org/", "The language");
//!     service.save_link(&link, "Development", None)?;
//!
//!     for category in &service.collection().categories {
//!         println!("{}: {} links", category.title, category.links.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod collection;
pub mod config;
pub mod defaults;
pub mod error;
pub mod import;
pub mod persist;
pub mod service;
pub mod urlnorm;

// Re-export commonly used types
pub use collection::{
    Collection, DragPayload, DropAction, DropContext, DropTarget, LinkCategory, LinkItem,
    MoveSession, SessionState,
};
pub use defaults::default_collection;
pub use error::{LinkdeckError, Result};
pub use import::{export_backup, import_backup, parse_bookmarks};
pub use persist::{DebouncedSaver, HttpRemoteStore, LocalCache, RemoteStore};
pub use service::LinkService;
pub use urlnorm::normalize;
