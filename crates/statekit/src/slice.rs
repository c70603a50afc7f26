//! Named slices with case reducers
//!
//! A slice owns one partition of the combined state. Its actions are typed
//! `"{slice}/{case}"`, and each case reducer edits a cloned draft of the
//! slice state:
//!
//! ```rust,ignore
//! let counter = Slice::new("counter", 0_i64)
//!     .case("increment", |count, _| *count += 1)
//!     .case("decrement", |count, _| *count -= 1);
//!
//! store.dispatch(counter.action("increment"));
//! ```

use crate::action::Action;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Case reducer editing a draft of the slice state
pub type CaseReducer<T> = Arc<dyn Fn(&mut T, &Action) + Send + Sync>;

/// A named partition of the state tree with its case reducers
pub struct Slice<T> {
    name: String,
    initial_state: T,
    cases: BTreeMap<String, CaseReducer<T>>,
}

impl<T: Clone> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            initial_state: self.initial_state.clone(),
            cases: self.cases.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("name", &self.name)
            .field("initial_state", &self.initial_state)
            .field("cases", &self.cases.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Clone> Slice<T> {
    pub fn new(name: impl Into<String>, initial_state: T) -> Self {
        Self {
            name: name.into(),
            initial_state,
            cases: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &T {
        &self.initial_state
    }

    /// Add a case reducer
    ///
    /// Registering a case name twice replaces the earlier reducer.
    pub fn case<F>(self, case: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&mut T, &Action) + Send + Sync + 'static,
    {
        self.with_case(case, Arc::new(reducer))
    }

    /// Add an already shared case reducer (same override rule as [`Slice::case`])
    pub fn with_case(mut self, case: impl Into<String>, reducer: CaseReducer<T>) -> Self {
        let case = case.into();
        if self.cases.insert(case.clone(), reducer).is_some() {
            log::debug!("Slice {}: case `{}` overridden", self.name, case);
        }
        self
    }

    pub fn has_case(&self, case: &str) -> bool {
        self.cases.contains_key(case)
    }

    /// Full action type for a case
    pub fn action_type(&self, case: &str) -> String {
        format!("{}/{}", self.name, case)
    }

    /// Create a payload-less action for a case
    pub fn action(&self, case: &str) -> Action {
        Action::new(self.action_type(case))
    }

    /// Apply an action to a slice state
    ///
    /// Returns `None` if the action belongs to another slice or names an
    /// unknown case.
    pub fn reduce(&self, state: &T, action: &Action) -> Option<T> {
        let case = action
            .kind
            .strip_prefix(self.name.as_str())?
            .strip_prefix('/')?;
        let reducer = self.cases.get(case)?;

        let mut draft = state.clone();
        reducer(&mut draft, action);
        Some(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> Slice<i64> {
        Slice::new("counter", 0)
            .case("increment", |count, _| *count += 1)
            .case("decrement", |count, _| *count -= 1)
    }

    #[test]
    fn test_action_types_are_prefixed() {
        let slice = counter();
        assert_eq!(slice.action("increment").kind, "counter/increment");
        assert_eq!(slice.action_type("decrement"), "counter/decrement");
    }

    #[test]
    fn test_reduce_known_case() {
        let slice = counter();
        assert_eq!(slice.reduce(&1, &slice.action("increment")), Some(2));
        assert_eq!(slice.reduce(&1, &slice.action("decrement")), Some(0));
    }

    #[test]
    fn test_reduce_ignores_foreign_actions() {
        let slice = counter();
        assert_eq!(slice.reduce(&1, &Action::new("other/increment")), None);
        assert_eq!(slice.reduce(&1, &Action::new("counter/unknown")), None);
        assert_eq!(slice.reduce(&1, &Action::new("counterincrement")), None);
        assert_eq!(slice.reduce(&1, &Action::new("counters/increment")), None);
    }

    #[test]
    fn test_later_case_overrides_earlier() {
        let slice = counter().case("increment", |count, _| *count += 10);
        assert_eq!(slice.reduce(&0, &slice.action("increment")), Some(10));
        assert!(slice.has_case("decrement"));
    }

    #[test]
    fn test_case_reads_payload() {
        let slice = Slice::new("student", String::new()).case("changeEmail", |email, action| {
            if let Ok(next) = action.payload_as::<String>() {
                *email = next;
            }
        });

        let action = slice.action("changeEmail").with_payload("new@mail.com");
        assert_eq!(slice.reduce(&String::new(), &action).as_deref(), Some("new@mail.com"));
    }
}
