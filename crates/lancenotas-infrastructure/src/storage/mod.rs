//! Storage layer: key-value stores and atomic file writes.

mod atomic_toml;
mod file_store;
mod memory_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
