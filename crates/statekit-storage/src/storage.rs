//! Key-value storage trait and the tolerant reader

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Durable string storage keyed by name
///
/// Implementations are shared between the persistence middleware and
/// start-up code, so they take `&self` and must be `Send + Sync`.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode a stored value, falling back to `initial`
///
/// Missing keys, unreadable storage and malformed JSON all yield `initial`;
/// the latter two are logged.
pub fn load_or<T, S>(storage: &S, key: &str, initial: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return initial,
        Err(err) => {
            log::warn!("Storage: failed to read `{}`: {}", key, err);
            return initial;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            log::debug!("Storage: restored `{}`", key);
            value
        }
        Err(err) => {
            log::warn!("Storage: ignoring malformed value for `{}`: {}", key, err);
            initial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// Backend whose reads always fail
    struct Broken;

    impl KeyValueStorage for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                path: PathBuf::from("/broken"),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_or_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(load_or(&storage, "photos", vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_load_or_stored_value() {
        let storage = MemoryStorage::new();
        storage.set("photos", "[3, 4]").unwrap();
        assert_eq!(load_or(&storage, "photos", Vec::<u32>::new()), vec![3, 4]);
    }

    #[test]
    fn test_load_or_malformed_value() {
        let storage = MemoryStorage::new();
        storage.set("photos", "{not json").unwrap();
        assert_eq!(load_or(&storage, "photos", Some(7)), Some(7));
    }

    #[test]
    fn test_load_or_wrong_shape() {
        let storage = MemoryStorage::new();
        storage.set("count", r#""seven""#).unwrap();
        assert_eq!(load_or(&storage, "count", 0_i64), 0);
    }

    #[test]
    fn test_load_or_unreadable_storage() {
        assert_eq!(load_or(&Broken, "photos", 5_u8), 5);
    }

    #[test]
    fn test_shared_storage_through_arc() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        storage.set("k", "true").unwrap();
        assert!(load_or(&storage, "k", false));
    }
}
