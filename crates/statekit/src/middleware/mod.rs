//! Middleware system
//!
//! Middleware wraps the dispatch entry point. The chain is a right fold:
//! for `[m1, m2, m3]` around the reducer step `d`, a dispatch runs
//! `m1(m2(m3(d)))`.
//!
//! ```text
//! dispatch → m1 ─→ m2 ─→ m3 ─→ reducer
//!            m1 ←─ m2 ←─ m3 ←─ new state
//! ```
//!
//! Each middleware can:
//! - Inspect the dispatched value and current state
//! - Transform the value before calling `next`
//! - Short-circuit by not calling `next`
//! - Dispatch new values, which re-enter the chain from the top
//! - Run code after `next` returns, when the new state is in place
//!
//! ## Example
//!
//! ```rust,ignore
//! struct CountingMiddleware(AtomicUsize);
//!
//! impl<S, A> Middleware<S, A> for CountingMiddleware {
//!     fn handle(&self, _store: &Store<S, A>, action: Dispatch<S, A>, next: Next<'_, S, A>) -> Dispatched<S> {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         next.run(action)
//!     }
//! }
//! ```

use crate::dispatch::{Dispatch, Dispatched};
use crate::store::Store;
use std::sync::Arc;

mod logging;
mod thunk;

pub use logging::LoggingMiddleware;
pub use thunk::ThunkMiddleware;

/// Middleware trait - wraps every dispatch
///
/// Middleware is shared by every dispatch, including nested ones, so it
/// takes `&self`; stateful middleware keeps its state behind a lock or an
/// atomic.
pub trait Middleware<S, A>: Send + Sync {
    /// Handle a dispatched value
    ///
    /// - `store`: the store handle; dispatching through it starts at the top
    ///   of the chain
    /// - `action`: the dispatched value
    /// - `next`: the rest of the chain, ending in the reducer
    ///
    /// Return what `next` returned unless deliberately replacing it.
    fn handle(&self, store: &Store<S, A>, action: Dispatch<S, A>, next: Next<'_, S, A>)
        -> Dispatched<S>;
}

/// The remaining middleware chain
pub struct Next<'a, S, A> {
    store: &'a Store<S, A>,
    chain: &'a [Arc<dyn Middleware<S, A>>],
}

impl<'a, S, A> Next<'a, S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    pub(crate) fn new(store: &'a Store<S, A>, chain: &'a [Arc<dyn Middleware<S, A>>]) -> Self {
        Self { store, chain }
    }

    /// Pass the value to the next middleware, or to the reducer at the end
    pub fn run(self, action: Dispatch<S, A>) -> Dispatched<S> {
        match self.chain.split_first() {
            Some((middleware, rest)) => {
                middleware.handle(self.store, action, Next::new(self.store, rest))
            }
            None => self.store.apply(action),
        }
    }
}
