//! TTL-cached fetch slices
//!
//! [`AsyncSlice`] builds a [`Slice`] that tracks one remote resource, plus a
//! deferred action that fetches it unless the last successful fetch is still
//! inside the cache window.
//!
//! ```text
//! async_action(payload)
//!     │
//!     ├── now - last_update < cache ──► Consumed (nothing dispatched)
//!     │
//!     └── dispatch {name}/fetchStarted
//!             │
//!             ▼ Pending
//!         transport.send(fetch_config(payload))
//!             ├── ok  ──► {name}/updateTime(now), {name}/fetchSuccess(data)
//!             └── err ──► {name}/fetchError(message)
//! ```
//!
//! The freshness check and the in-flight fetch are not synchronized: two
//! calls issued before the first fetch completes both go to the network.

use crate::clock::{Clock, SystemClock};
use crate::error::FetchError;
use crate::request::FetchRequest;
use crate::transport::HttpTransport;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use statekit::{Action, CaseReducer, Deferred, Dispatched, Slice, SliceMap, Store};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default freshness window
pub const DEFAULT_CACHE: Duration = Duration::from_millis(5000);

pub const FETCH_STARTED: &str = "fetchStarted";
pub const FETCH_SUCCESS: &str = "fetchSuccess";
pub const FETCH_ERROR: &str = "fetchError";
pub const UPDATE_TIME: &str = "updateTime";

/// State managed by an [`AsyncSlice`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    /// Epoch millis of the last successful fetch
    pub last_update: Option<i64>,
    pub cache: Duration,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            last_update: None,
            cache: DEFAULT_CACHE,
        }
    }
}

/// What a view should render for a [`FetchState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus<'a, T> {
    Idle,
    Loading,
    Failed(&'a str),
    Ready(&'a T),
}

impl<T> FetchState<T> {
    pub fn status(&self) -> FetchStatus<'_, T> {
        if self.loading {
            FetchStatus::Loading
        } else if let Some(error) = &self.error {
            FetchStatus::Failed(error)
        } else if let Some(data) = &self.data {
            FetchStatus::Ready(data)
        } else {
            FetchStatus::Idle
        }
    }

    /// Whether the last successful fetch is younger than the cache window
    pub fn is_fresh(&self, now_millis: i64) -> bool {
        let window = i64::try_from(self.cache.as_millis()).unwrap_or(i64::MAX);
        self.last_update
            .is_some_and(|last| now_millis.saturating_sub(last) < window)
    }
}

type FetchConfig<P> = Arc<dyn Fn(&P) -> FetchRequest + Send + Sync>;

/// Configuration of an [`AsyncSlice`]
///
/// `P` is the payload accepted by [`AsyncSlice::async_action`].
pub struct AsyncSliceConfig<T, P> {
    name: String,
    initial_state: FetchState<T>,
    fetch_config: FetchConfig<P>,
    reducers: Vec<(String, CaseReducer<FetchState<T>>)>,
    persist_as: Option<String>,
}

impl<T, P> AsyncSliceConfig<T, P> {
    pub fn new<F>(name: impl Into<String>, fetch_config: F) -> Self
    where
        F: Fn(&P) -> FetchRequest + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            initial_state: FetchState::default(),
            fetch_config: Arc::new(fetch_config),
            reducers: Vec::new(),
            persist_as: None,
        }
    }

    /// Replace the whole initial state
    pub fn initial_state(mut self, state: FetchState<T>) -> Self {
        self.initial_state = state;
        self
    }

    /// Start with data already present (e.g. restored from storage)
    pub fn initial_data(mut self, data: Option<T>) -> Self {
        self.initial_state.data = data;
        self
    }

    /// Freshness window
    pub fn cache(mut self, cache: Duration) -> Self {
        self.initial_state.cache = cache;
        self
    }

    /// Extra case reducer; a case named like a built-in one replaces it
    pub fn reducer<F>(mut self, case: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&mut FetchState<T>, &Action) + Send + Sync + 'static,
    {
        self.reducers.push((case.into(), Arc::new(reducer)));
        self
    }

    /// Tag `fetchSuccess` actions with a storage key
    pub fn persist_as(mut self, key: impl Into<String>) -> Self {
        self.persist_as = Some(key.into());
        self
    }
}

/// Fetch slice: case reducers plus the caching deferred action
pub struct AsyncSlice<T, P> {
    slice: Slice<FetchState<T>>,
    fetch_config: FetchConfig<P>,
    persist_as: Option<String>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl<T: Clone, P> Clone for AsyncSlice<T, P> {
    fn clone(&self) -> Self {
        Self {
            slice: self.slice.clone(),
            fetch_config: Arc::clone(&self.fetch_config),
            persist_as: self.persist_as.clone(),
            transport: Arc::clone(&self.transport),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for AsyncSlice<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSlice")
            .field("slice", &self.slice)
            .field("persist_as", &self.persist_as)
            .finish_non_exhaustive()
    }
}

impl<T, P> AsyncSlice<T, P>
where
    T: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static,
    P: Send + 'static,
{
    pub fn new(config: AsyncSliceConfig<T, P>, transport: Arc<dyn HttpTransport>) -> Self {
        let AsyncSliceConfig {
            name,
            initial_state,
            fetch_config,
            reducers,
            persist_as,
        } = config;

        let mut slice = Slice::new(name, initial_state)
            .case(FETCH_STARTED, |state: &mut FetchState<T>, _: &Action| {
                state.loading = true;
            })
            .case(FETCH_SUCCESS, |state: &mut FetchState<T>, action: &Action| {
                state.loading = false;
                match action.payload_as::<T>() {
                    Ok(data) => {
                        state.data = Some(data);
                        state.error = None;
                    }
                    Err(err) => {
                        warn!("{}", err);
                        state.data = None;
                        state.error = Some(err.to_string());
                    }
                }
            })
            .case(FETCH_ERROR, |state: &mut FetchState<T>, action: &Action| {
                state.loading = false;
                state.data = None;
                state.error = Some(
                    action
                        .payload_as::<String>()
                        .unwrap_or_else(|_| "unknown error".to_string()),
                );
            })
            .case(UPDATE_TIME, |state: &mut FetchState<T>, action: &Action| {
                match action.payload_as::<i64>() {
                    Ok(timestamp) => state.last_update = Some(timestamp),
                    Err(err) => warn!("{}", err),
                }
            });

        for (case, reducer) in reducers {
            slice = slice.with_case(case, reducer);
        }

        Self {
            slice,
            fetch_config,
            persist_as,
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use another time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        self.slice.name()
    }

    /// The slice to register with `CombineReducers::slice`
    pub fn slice(&self) -> &Slice<FetchState<T>> {
        &self.slice
    }

    /// This slice's state in a combined state
    pub fn select<'a>(&self, state: &'a SliceMap) -> Option<&'a FetchState<T>> {
        state.get::<FetchState<T>>(self.slice.name())
    }

    pub fn fetch_started(&self) -> Action {
        self.slice.action(FETCH_STARTED)
    }

    pub fn fetch_success(&self, data: Value) -> Action {
        let action = self.slice.action(FETCH_SUCCESS).with_payload(data);
        match &self.persist_as {
            Some(key) => action.persist_as(key.clone()),
            None => action,
        }
    }

    pub fn fetch_error(&self, message: impl Into<String>) -> Action {
        self.slice
            .action(FETCH_ERROR)
            .with_payload(Value::String(message.into()))
    }

    pub fn update_time(&self, timestamp_millis: i64) -> Action {
        self.slice
            .action(UPDATE_TIME)
            .with_payload(Value::from(timestamp_millis))
    }

    /// Deferred action fetching the resource unless the cached copy is fresh
    ///
    /// Returns [`Dispatched::Consumed`] on a cache hit, otherwise
    /// `fetchStarted` has already been dispatched and the returned
    /// [`Dispatched::Pending`] performs the request. Dropping it inside a
    /// tokio runtime runs the request in the background.
    pub fn async_action(&self, payload: P) -> Deferred<SliceMap, Action> {
        let this = self.clone();
        Deferred::named(
            self.slice.action_type("asyncAction"),
            move |store: Store<SliceMap, Action>| {
                let now = this.clock.now_millis();
                if this
                    .select(&store.get_state())
                    .is_some_and(|state| state.is_fresh(now))
                {
                    debug!("{}: cache hit, skipping fetch", this.name());
                    return Dispatched::Consumed;
                }

                store.dispatch(this.fetch_started());
                let request = (this.fetch_config)(&payload);
                Dispatched::pending(async move { this.fetch(&store, &request).await })
            },
        )
    }

    async fn fetch(&self, store: &Store<SliceMap, Action>, request: &FetchRequest) {
        match self.load(request).await {
            Ok(data) => {
                debug!("{}: fetched {}", self.name(), request.url);
                store.dispatch(self.update_time(self.clock.now_millis()));
                store.dispatch(self.fetch_success(data));
            }
            Err(err) => {
                debug!("{}: fetch of {} failed: {}", self.name(), request.url, err);
                store.dispatch(self.fetch_error(err.to_string()));
            }
        }
    }

    /// Request, check the status, and decode the body as `T`
    async fn load(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(FetchError::Transport)?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                message: server_message(&response.body),
            });
        }

        let data: T = serde_json::from_str(&response.body)?;
        Ok(serde_json::to_value(&data)?)
    }
}

/// `message` field of a JSON error body
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
