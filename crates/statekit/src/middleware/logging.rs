//! LoggingMiddleware - logs all dispatched values for debugging

use super::{Middleware, Next};
use crate::dispatch::{Dispatch, Dispatched};
use crate::store::Store;
use std::fmt;

/// LoggingMiddleware - logs every value passing through the chain
///
/// Logs the dispatched value at debug level, plus the state before and after
/// the rest of the chain ran at trace level. Always forwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: fmt::Debug + Send + Sync + 'static,
    A: fmt::Debug + Send + 'static,
{
    fn handle(
        &self,
        store: &Store<S, A>,
        action: Dispatch<S, A>,
        next: Next<'_, S, A>,
    ) -> Dispatched<S> {
        log::debug!("Action: {:?}", action);
        log::trace!("State before: {:?}", store.get_state());

        let result = next.run(action);

        log::trace!("State after: {:?} ({:?})", store.get_state(), result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn counter(state: &i64, action: &Action) -> i64 {
        if action.is("increment") {
            state + 1
        } else {
            *state
        }
    }

    #[test]
    fn test_logging_middleware_forwards() {
        let store = Store::builder(0, counter)
            .middleware(LoggingMiddleware::new())
            .build();

        let result = store.dispatch(Action::new("increment"));

        assert_eq!(result.state().map(|s| **s), Some(1));
        assert_eq!(*store.get_state(), 1);
    }
}
