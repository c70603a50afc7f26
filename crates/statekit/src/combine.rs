//! Reducer composition
//!
//! Combines independently defined slice reducers into one root reducer over a
//! [`SliceMap`], the state shape keyed by slice name.
//!
//! ```text
//! CombineReducers::new()
//!     .slice(&counter)            "counter" -> i64
//!     .slice(photos.slice())      "photos"  -> FetchState<Vec<Photo>>
//!     .build()?                   CombinedReducer<Action>
//! ```

use crate::action::Action;
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::slice::Slice;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value stored in a slice
pub trait SliceValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> SliceValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Combined state: slice name -> slice value
///
/// Slices are shared between snapshots, so an untouched slice is the very
/// same allocation in the previous and the next state.
#[derive(Clone, Default)]
pub struct SliceMap {
    slices: BTreeMap<String, Arc<dyn SliceValue>>,
}

impl SliceMap {
    /// Typed access to a slice
    ///
    /// Returns `None` if the slice is unknown or holds another type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.slices
            .get(name)
            .and_then(|value| (**value).as_any().downcast_ref::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slices.contains_key(name)
    }

    /// Slice names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Names of slices replaced since `previous`
    pub fn changed_slices<'a>(&'a self, previous: &SliceMap) -> Vec<&'a str> {
        self.slices
            .iter()
            .filter(|(name, value)| {
                previous
                    .slices
                    .get(name.as_str())
                    .is_none_or(|old| !Arc::ptr_eq(old, value))
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl fmt::Debug for SliceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slices.iter()).finish()
    }
}

type ErasedReducer<A> =
    Box<dyn Fn(&Arc<dyn SliceValue>, &A) -> Option<Arc<dyn SliceValue>> + Send + Sync>;

struct SliceEntry<A> {
    name: String,
    initial: Arc<dyn SliceValue>,
    reduce: ErasedReducer<A>,
}

/// Builder for a [`CombinedReducer`]
pub struct CombineReducers<A> {
    entries: Vec<SliceEntry<A>>,
}

impl<A> Default for CombineReducers<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A: 'static> CombineReducers<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slice reducer
    ///
    /// The reducer returns `None` when the action does not concern the slice;
    /// the slice then keeps its current value.
    pub fn reducer<T, F>(mut self, name: impl Into<String>, initial: T, reducer: F) -> Self
    where
        T: SliceValue,
        F: Fn(&T, &A) -> Option<T> + Send + Sync + 'static,
    {
        let reduce: ErasedReducer<A> = Box::new(move |current, action| {
            let typed = (**current).as_any().downcast_ref::<T>()?;
            reducer(typed, action).map(|next| Arc::new(next) as Arc<dyn SliceValue>)
        });

        self.entries.push(SliceEntry {
            name: name.into(),
            initial: Arc::new(initial),
            reduce,
        });
        self
    }

    /// Build the root reducer
    ///
    /// Fails if a slice name was registered twice.
    pub fn build(self) -> Result<CombinedReducer<A>, StoreError> {
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(StoreError::DuplicateSlice(entry.name.clone()));
            }
        }

        log::debug!(
            "Combined {} slice reducer(s): {:?}",
            self.entries.len(),
            seen
        );

        Ok(CombinedReducer {
            entries: self.entries,
        })
    }
}

impl CombineReducers<Action> {
    /// Register a [`Slice`] under its own name
    pub fn slice<T>(self, slice: &Slice<T>) -> Self
    where
        T: SliceValue + Clone,
    {
        let name = slice.name().to_string();
        let initial = slice.initial_state().clone();
        let slice = slice.clone();
        self.reducer(name, initial, move |state: &T, action: &Action| {
            slice.reduce(state, action)
        })
    }
}

/// Root reducer over a [`SliceMap`]
pub struct CombinedReducer<A> {
    entries: Vec<SliceEntry<A>>,
}

impl<A> CombinedReducer<A> {
    /// State made of every slice's initial value
    pub fn initial_state(&self) -> SliceMap {
        SliceMap {
            slices: self
                .entries
                .iter()
                .map(|entry| (entry.name.clone(), Arc::clone(&entry.initial)))
                .collect(),
        }
    }
}

impl<A> Reducer<SliceMap, A> for CombinedReducer<A> {
    fn reduce(&self, state: &SliceMap, action: &A) -> SliceMap {
        let mut next = state.clone();
        for entry in &self.entries {
            let Some(current) = state.slices.get(&entry.name) else {
                continue;
            };
            if let Some(value) = (entry.reduce)(current, action) {
                next.slices.insert(entry.name.clone(), value);
            }
        }
        next
    }
}
