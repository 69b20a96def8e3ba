//! Persistence: local cache file, remote links API, and the debounce
//! between them.
//!
//! The cache is written synchronously on every settled change; the remote
//! write is debounced. Both hold the same JSON document.

mod local;
mod remote;
mod saver;

pub use local::LocalCache;
pub use remote::{HttpRemoteStore, RemoteStore};
pub use saver::DebouncedSaver;
