//! Dispatched values and dispatch results
//!
//! Anything handed to [`Store::dispatch`](crate::Store::dispatch) is a
//! [`Dispatch`]: either a plain action that ends up in the reducer, or a
//! [`Deferred`] procedure resolved by the
//! [`ThunkMiddleware`](crate::ThunkMiddleware).

use crate::action::Action;
use crate::store::Store;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// BoxFuture type alias for deferred work
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type Procedure<S, A> = Box<dyn FnOnce(Store<S, A>) -> Dispatched<S> + Send>;

/// A value accepted by `dispatch`
pub enum Dispatch<S, A> {
    /// Change descriptor forwarded to the reducer
    Plain(A),
    /// Procedure run by the thunk middleware
    Deferred(Deferred<S, A>),
}

impl<S, A> Dispatch<S, A> {
    /// The plain action, if this is one
    pub fn as_plain(&self) -> Option<&A> {
        match self {
            Dispatch::Plain(action) => Some(action),
            Dispatch::Deferred(_) => None,
        }
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatch<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Dispatch::Deferred(deferred) => fmt::Debug::fmt(deferred, f),
        }
    }
}

impl<S> From<Action> for Dispatch<S, Action> {
    fn from(action: Action) -> Self {
        Dispatch::Plain(action)
    }
}

impl<S, A> From<Deferred<S, A>> for Dispatch<S, A> {
    fn from(deferred: Deferred<S, A>) -> Self {
        Dispatch::Deferred(deferred)
    }
}

/// Executable action
///
/// The procedure receives the store handle, so it can read state and
/// dispatch through the whole middleware chain. Asynchronous work is handed
/// back as [`Dispatched::Pending`].
///
/// ```rust,ignore
/// let load = Deferred::named("photos/load", |store: Store<SliceMap, Action>| {
///     store.dispatch(Action::new("photos/fetchStarted"));
///     Dispatched::pending(async move {
///         let data = fetch().await;
///         store.dispatch(Action::new("photos/fetchSuccess").with_payload(data));
///     })
/// });
/// store.dispatch(load).settle().await;
/// ```
pub struct Deferred<S, A> {
    label: Cow<'static, str>,
    procedure: Procedure<S, A>,
}

impl<S, A> Deferred<S, A> {
    pub fn new<F>(procedure: F) -> Self
    where
        F: FnOnce(Store<S, A>) -> Dispatched<S> + Send + 'static,
    {
        Self::named("deferred", procedure)
    }

    /// Create a deferred action with a label used in logs
    pub fn named<F>(label: impl Into<Cow<'static, str>>, procedure: F) -> Self
    where
        F: FnOnce(Store<S, A>) -> Dispatched<S> + Send + 'static,
    {
        Self {
            label: label.into(),
            procedure: Box::new(procedure),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn run(self, store: Store<S, A>) -> Dispatched<S> {
        (self.procedure)(store)
    }
}

impl<S, A> fmt::Debug for Deferred<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Deferred").field(&self.label).finish()
    }
}

/// Result of a dispatch
pub enum Dispatched<S> {
    /// The reducer ran and produced this state
    Reduced(Arc<S>),
    /// A deferred action is still running
    Pending(Pending),
    /// A middleware stopped the value before the reducer
    Consumed,
    /// The store was disposed; nothing happened
    Disposed,
}

impl<S> Dispatched<S> {
    /// Wrap asynchronous follow-up work
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Dispatched::Pending(Pending(Some(Box::pin(future))))
    }

    /// New state, when the reducer ran
    pub fn state(&self) -> Option<&Arc<S>> {
        match self {
            Dispatched::Reduced(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatched::Pending(_))
    }

    /// Wait for pending work, if any
    pub async fn settle(self) {
        if let Dispatched::Pending(pending) = self {
            pending.await;
        }
    }
}

impl<S> fmt::Debug for Dispatched<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Reduced(_) => f.write_str("Reduced"),
            Dispatched::Pending(_) => f.write_str("Pending"),
            Dispatched::Consumed => f.write_str("Consumed"),
            Dispatched::Disposed => f.write_str("Disposed"),
        }
    }
}

/// Handle to an in-flight deferred action
///
/// Futures are lazy: the work progresses while this is awaited or after
/// [`Pending::spawn`]. A handle dropped before completion hands the rest of
/// the work to the current tokio runtime, so discarding a dispatch result
/// never loses follow-up dispatches. Outside a runtime the work is discarded
/// with a warning.
#[must_use = "pending work only starts once awaited, spawned, or dropped inside a tokio runtime"]
pub struct Pending(Option<BoxFuture<'static, ()>>);

impl Pending {
    /// Drive the work on the current tokio runtime
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        let work = self.0.take();
        tokio::spawn(async move {
            if let Some(work) = work {
                work.await;
            }
        })
    }
}

impl Future for Pending {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let Some(work) = this.0.as_mut() else {
            return Poll::Ready(());
        };

        let poll = work.as_mut().poll(cx);
        if poll.is_ready() {
            this.0 = None;
        }
        poll
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        let Some(work) = self.0.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                log::trace!("Pending: dropped before completion, spawning remaining work");
                drop(handle.spawn(work));
            }
            Err(_) => log::warn!("Pending: dropped outside a tokio runtime, deferred work discarded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_converts_to_plain() {
        let dispatch: Dispatch<(), Action> = Action::new("counter/increment").into();
        assert_eq!(
            dispatch.as_plain().map(|a| a.kind.as_str()),
            Some("counter/increment")
        );
    }

    #[test]
    fn test_deferred_debug_uses_label() {
        let deferred: Deferred<(), Action> =
            Deferred::named("photos/asyncAction", |_| Dispatched::Consumed);
        assert_eq!(format!("{:?}", deferred), r#"Deferred("photos/asyncAction")"#);
    }

    #[tokio::test]
    async fn test_settle_drives_pending_work() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let dispatched: Dispatched<()> = Dispatched::pending(async move {
            let _ = tx.send(42);
        });

        assert!(dispatched.is_pending());
        dispatched.settle().await;
        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_spawn_runs_to_completion() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let Dispatched::<()>::Pending(pending) = Dispatched::pending(async move {
            let _ = tx.send("done");
        }) else {
            panic!("expected pending");
        };

        pending.spawn().await.unwrap();
        assert_eq!(rx.await.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_dropped_pending_still_runs() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let dispatched: Dispatched<()> = Dispatched::pending(async move {
            let _ = tx.send("ran");
        });

        drop(dispatched);
        assert_eq!(rx.await.unwrap(), "ran");
    }

    #[test]
    fn test_dropped_pending_without_runtime_is_discarded() {
        let (tx, mut rx) = tokio::sync::oneshot::channel::<()>();
        let dispatched: Dispatched<()> = Dispatched::pending(async move {
            let _ = tx.send(());
        });

        drop(dispatched);
        assert!(rx.try_recv().is_err());
    }
}
