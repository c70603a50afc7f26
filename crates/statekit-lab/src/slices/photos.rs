//! Photos slice: cached dog photo listing, persisted between runs

use serde::{Deserialize, Deserializer, Serialize};
use statekit::SliceMap;
use statekit_config::AppConfig;
use statekit_fetch::{AsyncSlice, AsyncSliceConfig, CacheDirective, FetchRequest, HttpTransport};
use statekit_storage::{load_or, KeyValueStorage};
use std::sync::Arc;

pub const NAME: &str = "photos";

/// Storage key of the last fetched listing
pub const STORAGE_KEY: &str = "photos";

const KG_TO_POUNDS: f64 = 2.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub src: String,
    /// Weight in kg
    #[serde(default, deserialize_with = "loose_number")]
    pub peso: f64,
    /// Age in years
    #[serde(default, deserialize_with = "loose_number")]
    pub idade: f64,
}

/// The API sends numbers either as JSON numbers or as strings
fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
    }

    match Loose::deserialize(deserializer)? {
        Loose::Number(number) => Ok(number),
        Loose::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub type PhotosSlice = AsyncSlice<Vec<Photo>, ()>;

/// Build the photos slice
///
/// Starts from the listing stored by the previous run, if any.
pub fn slice(
    config: &AppConfig,
    transport: Arc<dyn HttpTransport>,
    storage: &dyn KeyValueStorage,
) -> PhotosSlice {
    let url = config.photos_url.clone();
    let restored: Option<Vec<Photo>> = load_or(storage, STORAGE_KEY, None);
    if let Some(photos) = &restored {
        log::info!("Restored {} photo(s) from storage", photos.len());
    }

    let slice_config = AsyncSliceConfig::new(NAME, move |_: &()| {
        FetchRequest::get(url.clone()).cache(CacheDirective::NoStore)
    })
    .initial_data(restored)
    .cache(config.cache_ttl())
    .persist_as(STORAGE_KEY);

    AsyncSlice::new(slice_config, transport)
}

/// Photos weighing at least 5 kg, with the weight converted to whole pounds
///
/// `None` until a listing is available.
pub fn heavy_photos_in_pounds(photos: &PhotosSlice, state: &SliceMap) -> Option<Vec<Photo>> {
    let data = photos.select(state)?.data.as_ref()?;
    Some(
        data.iter()
            .filter(|photo| photo.peso >= 5.0)
            .map(|photo| Photo {
                peso: (photo.peso * KG_TO_POUNDS).floor(),
                ..photo.clone()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use statekit::{CombineReducers, Store, ThunkMiddleware};
    use statekit_fetch::FetchResponse;
    use statekit_storage::{KeyValueStorage, MemoryStorage};

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn send(&self, _request: &FetchRequest) -> anyhow::Result<FetchResponse> {
            anyhow::bail!("offline")
        }
    }

    fn photo(id: u64, peso: f64) -> Photo {
        Photo {
            id,
            author: "dog".to_string(),
            title: format!("photo {}", id),
            src: String::new(),
            peso,
            idade: 2.0,
        }
    }

    fn store_for(photos: &PhotosSlice) -> Store<SliceMap, statekit::Action> {
        let reducer = CombineReducers::new()
            .slice(photos.slice())
            .build()
            .unwrap();
        Store::builder(reducer.initial_state(), reducer)
            .middleware(ThunkMiddleware::new())
            .build()
    }

    #[test]
    fn test_photo_accepts_string_numbers() {
        let photo: Photo = serde_json::from_str(
            r#"{"id": 3, "author": "rex", "title": "Rex", "src": "x.jpg", "peso": "12", "idade": "3", "acessos": "99"}"#,
        )
        .unwrap();
        assert_eq!(photo.peso, 12.0);
        assert_eq!(photo.idade, 3.0);
    }

    #[test]
    fn test_photo_rejects_garbage_weight() {
        let result: Result<Photo, _> = serde_json::from_str(r#"{"id": 1, "peso": "heavy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_heavy_photos_none_without_data() {
        let storage = MemoryStorage::new();
        let photos = slice(&AppConfig::default(), Arc::new(Unreachable), &storage);
        let store = store_for(&photos);
        assert_eq!(heavy_photos_in_pounds(&photos, &store.get_state()), None);
    }

    #[test]
    fn test_heavy_photos_from_restored_listing() {
        let storage = MemoryStorage::new();
        let stored = vec![photo(1, 4.9), photo(2, 5.0), photo(3, 7.3)];
        storage
            .set(STORAGE_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let photos = slice(&AppConfig::default(), Arc::new(Unreachable), &storage);
        let store = store_for(&photos);

        let heavy = heavy_photos_in_pounds(&photos, &store.get_state()).unwrap();
        assert_eq!(
            heavy.iter().map(|p| (p.id, p.peso)).collect::<Vec<_>>(),
            vec![(2, 11.0), (3, 16.0)]
        );
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "not json").unwrap();

        let photos = slice(&AppConfig::default(), Arc::new(Unreachable), &storage);
        assert_eq!(photos.slice().initial_state().data, None);
    }

    #[tokio::test]
    async fn test_failed_fetch_clears_restored_data() {
        let storage = MemoryStorage::new();
        storage
            .set(STORAGE_KEY, &serde_json::to_string(&vec![photo(1, 9.0)]).unwrap())
            .unwrap();
        let photos = slice(&AppConfig::default(), Arc::new(Unreachable), &storage);
        let store = store_for(&photos);

        store.dispatch(photos.async_action(())).settle().await;

        let state = store.get_state();
        let fetched = photos.select(&state).unwrap();
        assert_eq!(fetched.error.as_deref(), Some("offline"));
        assert_eq!(heavy_photos_in_pounds(&photos, &state), None);
    }
}
