//! Selection store with middleware support

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::reducer::reduce;
use crate::selection::Selection;

/// A reducer function over the selection.
pub type SelectionReducer = fn(&mut Selection, Action) -> DispatchResult<Effect>;

/// Holds the [`Selection`] and routes every action through the reducer.
///
/// # Example
/// ```
/// use skycast_core::{Action, Effect, Selection, SelectionStore};
///
/// let mut store = SelectionStore::new(Selection::default());
/// let result = store.dispatch(Action::InputChanged("Lon".into()));
/// assert!(result.changed);
/// assert_eq!(result.effects, vec![Effect::SearchCities { prefix: "Lon".into() }]);
/// assert!(store.state().is_cleared());
/// ```
pub struct SelectionStore {
    state: Selection,
    reducer: SelectionReducer,
}

impl SelectionStore {
    /// Create a store driven by [`reduce`].
    pub fn new(state: Selection) -> Self {
        Self::with_reducer(state, reduce)
    }

    /// Create a store with a custom reducer (tests, instrumentation).
    pub fn with_reducer(state: Selection, reducer: SelectionReducer) -> Self {
        Self { state, reducer }
    }

    /// Dispatch an action to the store.
    #[inline]
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        (self.reducer)(&mut self.state, action)
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &Selection {
        &self.state
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns.
pub trait Middleware {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &Action, state: &Selection);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &Action, state: &Selection, result: &DispatchResult<Effect>);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &Action, _state: &Selection) {}
    fn after(&mut self, _action: &Action, _state: &Selection, _result: &DispatchResult<Effect>) {}
}

/// Middleware that logs every action through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }
}

impl Middleware for LoggingMiddleware {
    fn before(&mut self, action: &Action, state: &Selection) {
        if self.log_before {
            tracing::debug!(
                action = %action.name(),
                phase = state.phase().label(),
                "Dispatching action"
            );
        }
    }

    fn after(&mut self, action: &Action, state: &Selection, result: &DispatchResult<Effect>) {
        if self.log_after {
            tracing::debug!(
                action = %action.summary(),
                phase = state.phase().label(),
                changed = result.changed,
                effects = result.effects.len(),
                "Action processed"
            );
        }
    }
}

/// Store wrapped with middleware.
pub struct SelectionStoreWithMiddleware<M: Middleware> {
    store: SelectionStore,
    middleware: M,
}

impl<M: Middleware> SelectionStoreWithMiddleware<M> {
    pub fn new(state: Selection, middleware: M) -> Self {
        Self {
            store: SelectionStore::new(state),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        self.middleware.before(&action, self.store.state());
        let logged = action.clone();
        let result = self.store.dispatch(action);
        self.middleware.after(&logged, self.store.state(), &result);
        result
    }

    #[inline]
    pub fn state(&self) -> &Selection {
        self.store.state()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
