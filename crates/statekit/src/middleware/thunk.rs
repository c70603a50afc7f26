//! ThunkMiddleware - resolves deferred actions

use super::{Middleware, Next};
use crate::dispatch::{Dispatch, Dispatched};
use crate::store::Store;

/// ThunkMiddleware - runs deferred actions instead of forwarding them
///
/// A [`Dispatch::Deferred`] is invoked right away with the store handle and
/// its return value becomes the dispatch result; it never reaches later
/// middleware or the reducer. Plain actions pass through unchanged.
///
/// Anything the procedure dispatches goes through the store, so it is seen
/// by the whole chain, including middleware registered before this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for ThunkMiddleware
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    fn handle(
        &self,
        store: &Store<S, A>,
        action: Dispatch<S, A>,
        next: Next<'_, S, A>,
    ) -> Dispatched<S> {
        match action {
            Dispatch::Deferred(deferred) => {
                log::trace!("ThunkMiddleware: running {}", deferred.label());
                deferred.run(store.clone())
            }
            plain => next.run(plain),
        }
    }
}
