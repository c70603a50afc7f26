//! Fetch slices for statekit stores
//!
//! - [`AsyncSlice`]: slice + deferred action caching one remote resource
//! - [`HttpTransport`]: the network seam, implemented by [`ReqwestTransport`]
//! - [`Clock`]: time source for cache windows

pub mod async_slice;
pub mod clock;
pub mod error;
pub mod reqwest_transport;
pub mod request;
pub mod transport;

pub use async_slice::{AsyncSlice, AsyncSliceConfig, FetchState, FetchStatus, DEFAULT_CACHE};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::FetchError;
pub use reqwest_transport::ReqwestTransport;
pub use request::{CacheDirective, FetchRequest, Method, RequestOptions};
pub use transport::{FetchResponse, HttpTransport};
