//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Platform profile detection (touch vs pointer devices)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod profile;
pub mod storage;

pub use profile::{PlatformProfile, ProfileKind};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
