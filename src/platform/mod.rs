//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (edge detection for the confirm action)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::KeyState;
pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
