//! DecrementAlertMiddleware - warns whenever the counter goes down

use statekit::{Action, Dispatch, Dispatched, Middleware, Next, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Raises an alert for every matching action, then forwards it
///
/// Clones share the alert count, so the caller can keep one handle after
/// registering the middleware.
#[derive(Debug, Clone)]
pub struct DecrementAlertMiddleware {
    action_type: String,
    alerts: Arc<AtomicUsize>,
}

impl DecrementAlertMiddleware {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            alerts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of alerts raised so far
    pub fn alerts(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }
}

impl<S> Middleware<S, Action> for DecrementAlertMiddleware
where
    S: Send + Sync + 'static,
{
    fn handle(
        &self,
        _store: &Store<S, Action>,
        action: Dispatch<S, Action>,
        next: Next<'_, S, Action>,
    ) -> Dispatched<S> {
        if action.as_plain().is_some_and(|plain| plain.is(&self.action_type)) {
            let count = self.alerts.fetch_add(1, Ordering::SeqCst) + 1;
            log::warn!("{} dispatched (alert #{})", self.action_type, count);
        }
        next.run(action)
    }
}
