//! Bringing external data into a collection.
//!
//! Two formats are supported: the JSON backup this library itself exports,
//! and the definition-list HTML document browsers produce when exporting
//! bookmarks.

mod backup;
mod bookmarks;

pub use backup::{export_backup, import_backup};
pub use bookmarks::parse_bookmarks;
