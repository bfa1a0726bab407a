//! Action capability: the state mutation itself.
//!
//! The action is the only phase allowed to change the object's state. The
//! default action writes the desired token through the store; custom actions
//! may do more, but `call` cannot fail — state assignment always succeeds.

use super::UndoError;
use crate::core::{StateStore, StateToken, Stateful};

/// State-mutation capability.
pub trait Action<O: Stateful>: Send + Sync {
    /// Apply the state change. Always succeeds.
    fn call(&self, store: &StateStore, object: &mut O, desired: &StateToken);

    /// Restore the state held immediately before the last `call`.
    ///
    /// Must be idempotent; invoked at most once per forward call, during
    /// rollback only.
    fn undo(
        &self,
        store: &StateStore,
        object: &mut O,
        prior: &StateToken,
    ) -> Result<(), UndoError> {
        store.write(object, prior);
        Ok(())
    }

    /// Label used by the read-only rule query surface.
    fn label(&self) -> &str {
        "action"
    }
}

/// Default rule action: write the desired state through the store.
pub struct StateSetAction;

impl<O: Stateful> Action<O> for StateSetAction {
    fn call(&self, store: &StateStore, object: &mut O, desired: &StateToken) {
        store.write(object, desired);
    }

    fn label(&self) -> &str {
        "state-set"
    }
}
