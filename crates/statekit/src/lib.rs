//! Unidirectional state container
//!
//! This crate provides:
//! - [`Store`]: holds one state value, applies the reducer, notifies subscribers
//! - [`Reducer`] and [`CombineReducers`]: pure state transitions, composed by slice name
//! - [`Slice`]: a named slice with `"{slice}/{case}"` case reducers
//! - [`Middleware`]: interceptors wrapping every dispatch
//! - [`ThunkMiddleware`]: resolves [`Deferred`] actions, enabling async flows
//! - [`LoggingMiddleware`]: logs every dispatched value
//!
//! # Architecture
//!
//! ```text
//! dispatch(value)
//!     │
//!     ▼
//! ┌──────────────────────────────────────────────┐
//! │ Middleware chain  m1 → m2 → … → mn            │
//! │   Deferred ─► ThunkMiddleware runs it         │
//! │   Plain    ─► next                            │
//! └──────────────────────────────────────────────┘
//!     │
//!     ▼
//! Reducer (CombinedReducer over SliceMap)
//!     │
//!     ▼
//! new Arc<State> → subscribers
//! ```

pub mod action;
pub mod combine;
pub mod dispatch;
pub mod error;
pub mod middleware;
pub mod reducer;
pub mod slice;
pub mod store;

pub use action::Action;
pub use combine::{CombineReducers, CombinedReducer, SliceMap, SliceValue};
pub use dispatch::{BoxFuture, Deferred, Dispatch, Dispatched, Pending};
pub use error::{ActionError, StoreError};
pub use middleware::{LoggingMiddleware, Middleware, Next, ThunkMiddleware};
pub use reducer::Reducer;
pub use slice::{CaseReducer, Slice};
pub use store::{Store, StoreBuilder, Subscription};
