/// Reducer - pure function that produces new state from current state + action
///
/// Reducers must be total: actions they do not recognise return the state
/// unchanged. They must not perform I/O, read the clock or dispatch.
pub trait Reducer<S, A>: Send + Sync {
    fn reduce(&self, state: &S, action: &A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&S, &A) -> S + Send + Sync,
{
    fn reduce(&self, state: &S, action: &A) -> S {
        self(state, action)
    }
}
