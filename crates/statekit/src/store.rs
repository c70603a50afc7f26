use crate::dispatch::{Dispatch, Dispatched};
use crate::middleware::{Middleware, Next};
use crate::reducer::Reducer;
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Inner<S, A> {
    state: RwLock<Arc<S>>,
    reducer: Box<dyn Reducer<S, A>>,
    middleware: Vec<Arc<dyn Middleware<S, A>>>,
    listeners: Mutex<Vec<(u64, Listener<S>)>>,
    /// Held from state replacement until every listener has returned
    notify: ReentrantMutex<()>,
    next_listener_id: AtomicU64,
    disposed: AtomicBool,
}

/// Store - holds application state and manages the Redux loop
///
/// - Centralized state, replaced (never mutated) on every reduced action
/// - Every dispatch runs through the middleware chain before the reducer
/// - Subscribers are notified synchronously after each replacement
///
/// The store is a cheap handle: clones share the same state, middleware and
/// subscribers. Pass it explicitly to whoever needs to read or dispatch.
///
/// ```rust,ignore
/// let store = Store::builder(reducer.initial_state(), reducer)
///     .middleware(LoggingMiddleware)
///     .middleware(ThunkMiddleware)
///     .build();
///
/// store.dispatch(Action::new("counter/increment"));
/// ```
pub struct Store<S, A> {
    inner: Arc<Inner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store without middleware
    pub fn new(initial_state: S, reducer: impl Reducer<S, A> + 'static) -> Self {
        Self::builder(initial_state, reducer).build()
    }

    /// Start configuring a store
    pub fn builder(initial_state: S, reducer: impl Reducer<S, A> + 'static) -> StoreBuilder<S, A> {
        StoreBuilder {
            initial_state,
            reducer: Box::new(reducer),
            middleware: Vec::new(),
        }
    }

    /// Get the current state
    ///
    /// The snapshot stays valid after later dispatches.
    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&*self.inner.state.read())
    }

    /// Process a value through the middleware chain and reducer
    ///
    /// Dispatching into a disposed store does nothing and returns
    /// [`Dispatched::Disposed`]. Reducer panics propagate to the caller.
    pub fn dispatch(&self, action: impl Into<Dispatch<S, A>>) -> Dispatched<S> {
        if self.is_disposed() {
            log::warn!("Store: dispatch after dispose ignored");
            return Dispatched::Disposed;
        }

        Next::new(self, &self.inner.middleware).run(action.into())
    }

    /// Register a listener called after every state replacement
    ///
    /// Listeners run synchronously, in registration order. Listeners see
    /// states in the order they were produced, even when several threads
    /// dispatch at once; a listener may dispatch again on its own thread but
    /// must not wait for a dispatch running on another one.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        log::debug!("Store: listener {} subscribed", id);

        let inner: Weak<Inner<S, A>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.listeners.lock().retain(|(other, _)| *other != id);
                    log::debug!("Store: listener {} unsubscribed", id);
                }
            })),
        }
    }

    /// Tear the store down
    ///
    /// Drops all listeners. Later dispatches, including those issued by
    /// in-flight deferred actions, are ignored.
    pub fn dispose(&self) {
        if !self.inner.disposed.swap(true, Ordering::SeqCst) {
            self.inner.listeners.lock().clear();
            log::debug!("Store: disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Terminal step of the chain
    pub(crate) fn apply(&self, action: Dispatch<S, A>) -> Dispatched<S> {
        match action {
            Dispatch::Plain(action) => self.reduce(&action),
            Dispatch::Deferred(deferred) => {
                log::error!(
                    "Store: deferred action `{}` reached the reducer; is ThunkMiddleware installed?",
                    deferred.label()
                );
                Dispatched::Consumed
            }
        }
    }

    fn reduce(&self, action: &A) -> Dispatched<S> {
        let _notifying = self.inner.notify.lock();
        let next_state = {
            let mut state = self.inner.state.write();
            let next = Arc::new(self.inner.reducer.reduce(&state, action));
            *state = Arc::clone(&next);
            next
        };

        let listeners: Vec<Listener<S>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next_state);
        }

        Dispatched::Reduced(next_state)
    }
}

/// Builder returned by [`Store::builder`]
pub struct StoreBuilder<S, A> {
    initial_state: S,
    reducer: Box<dyn Reducer<S, A>>,
    middleware: Vec<Arc<dyn Middleware<S, A>>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Add middleware to the store
    ///
    /// Middleware added first wraps everything added after it.
    pub fn middleware(mut self, middleware: impl Middleware<S, A> + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub fn build(self) -> Store<S, A> {
        log::debug!("Store: created with {} middleware", self.middleware.len());
        Store {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(self.initial_state)),
                reducer: self.reducer,
                middleware: self.middleware,
                listeners: Mutex::new(Vec::new()),
                notify: ReentrantMutex::new(()),
                next_listener_id: AtomicU64::new(0),
                disposed: AtomicBool::new(false),
            }),
        }
    }
}

/// Disposer returned by [`Store::subscribe`]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove exactly the listener this subscription was created for
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
