//! PersistenceMiddleware - mirrors tagged payloads to storage

use crate::error::StorageError;
use crate::storage::KeyValueStorage;
use statekit::{Action, Dispatch, Dispatched, Middleware, Next, Store};
use std::sync::Arc;

/// Actions that can ask for their payload to be stored
pub trait Persistable {
    /// Key to store the payload under, if any
    fn storage_key(&self) -> Option<&str>;

    /// JSON encoding of the payload (`null` when absent)
    fn persisted_value(&self) -> Result<String, serde_json::Error>;
}

impl Persistable for Action {
    fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    fn persisted_value(&self) -> Result<String, serde_json::Error> {
        match &self.payload {
            Some(payload) => serde_json::to_string(payload),
            None => Ok("null".to_string()),
        }
    }
}

/// PersistenceMiddleware - writes payloads of actions carrying a storage key
///
/// The action is forwarded first; the write happens after the reducer ran.
/// Write failures are logged and never reach the dispatcher.
pub struct PersistenceMiddleware {
    storage: Arc<dyn KeyValueStorage>,
}

impl PersistenceMiddleware {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn write(&self, key: &str, encoded: Result<String, serde_json::Error>) {
        let result = encoded
            .map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            })
            .and_then(|value| self.storage.set(key, &value));

        match result {
            Ok(()) => log::debug!("PersistenceMiddleware: stored `{}`", key),
            Err(err) => log::warn!("PersistenceMiddleware: {}", err),
        }
    }
}

impl<S, A> Middleware<S, A> for PersistenceMiddleware
where
    S: Send + Sync + 'static,
    A: Persistable + Send + 'static,
{
    fn handle(
        &self,
        _store: &Store<S, A>,
        action: Dispatch<S, A>,
        next: Next<'_, S, A>,
    ) -> Dispatched<S> {
        let record = action.as_plain().and_then(|plain| {
            plain
                .storage_key()
                .map(|key| (key.to_string(), plain.persisted_value()))
        });

        let result = next.run(action);

        if let Some((key, encoded)) = record {
            self.write(&key, encoded);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use statekit::{Deferred, ThunkMiddleware};

    fn last_kind(_state: &Option<String>, action: &Action) -> Option<String> {
        Some(action.kind.clone())
    }

    fn store_with(storage: Arc<dyn KeyValueStorage>) -> Store<Option<String>, Action> {
        Store::builder(None, last_kind)
            .middleware(ThunkMiddleware::new())
            .middleware(PersistenceMiddleware::new(storage))
            .build()
    }

    #[test]
    fn test_writes_payload_under_storage_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        let dispatched =
            store.dispatch(Action::new("X").with_payload(json!({"a": 1})).persist_as("k"));

        assert_eq!(dispatched.state().and_then(|s| s.as_deref()), Some("X"));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_untagged_action_leaves_storage_untouched() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        store.dispatch(Action::new("X").with_payload(json!({"a": 1})));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_missing_payload_is_stored_as_null() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        store.dispatch(Action::new("logout").persist_as("token"));
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let storage = Arc::new(MemoryStorage::with_quota(4));
        let store = store_with(storage.clone());

        let dispatched = store.dispatch(
            Action::new("X")
                .with_payload(json!("far too large"))
                .persist_as("k"),
        );

        assert!(dispatched.state().is_some());
        assert_eq!(storage.get("k").unwrap(), None);
        assert_eq!(store.get_state().as_deref(), Some("X"));
    }

    #[test]
    fn test_writes_for_actions_dispatched_by_deferred() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        let save = Deferred::new(|store: Store<Option<String>, Action>| {
            store.dispatch(Action::new("saved").with_payload(json!([1, 2])).persist_as("list"))
        });
        store.dispatch(save);

        assert_eq!(storage.get("list").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_consumed_action_is_still_written() {
        struct Swallow;

        impl Middleware<Option<String>, Action> for Swallow {
            fn handle(
                &self,
                _store: &Store<Option<String>, Action>,
                _action: Dispatch<Option<String>, Action>,
                _next: Next<'_, Option<String>, Action>,
            ) -> Dispatched<Option<String>> {
                Dispatched::Consumed
            }
        }

        let storage = Arc::new(MemoryStorage::new());
        let store = Store::<Option<String>, Action>::builder(None, last_kind)
            .middleware(PersistenceMiddleware::new(storage.clone()))
            .middleware(Swallow)
            .build();

        let dispatched = store.dispatch(Action::new("X").with_payload(1).persist_as("k"));
        assert!(matches!(dispatched, Dispatched::Consumed));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("1"));
    }
}
