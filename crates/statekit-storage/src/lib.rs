//! Durable key-value storage for statekit
//!
//! - [`KeyValueStorage`]: injected storage capability
//! - [`MemoryStorage`] / [`FileStorage`]: backends
//! - [`load_or`]: tolerant reader for initial state
//! - [`PersistenceMiddleware`]: writes payloads of actions carrying a `storageKey`

pub mod error;
pub mod file;
pub mod memory;
pub mod persistence;
pub mod storage;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::{Persistable, PersistenceMiddleware};
pub use storage::{load_or, KeyValueStorage};
