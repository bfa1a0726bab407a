//! Builder for transition rules.

use crate::builder::error::BuildError;
use crate::capability::{Action, Concluder, Guard, StateSetAction};
use crate::core::{SourceSet, StateToken, Stateful, TransitionRule};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Fluent builder for one [`TransitionRule`].
///
/// A rule needs at least one source (or the wildcard) and a destination;
/// everything else is optional. The default action writes the destination
/// state through the store.
pub struct RuleBuilder<O: Stateful> {
    sources: BTreeSet<StateToken>,
    any_source: bool,
    destination: Option<StateToken>,
    guards: Vec<Arc<dyn Guard<O>>>,
    concluders: Vec<Arc<dyn Concluder<O>>>,
    action: Option<Arc<dyn Action<O>>>,
    event: Option<String>,
    allowed_params: Vec<String>,
    required_params: Vec<String>,
}

impl<O: Stateful> RuleBuilder<O> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        RuleBuilder {
            sources: BTreeSet::new(),
            any_source: false,
            destination: None,
            guards: Vec::new(),
            concluders: Vec::new(),
            action: None,
            event: None,
            allowed_params: Vec::new(),
            required_params: Vec::new(),
        }
    }

    /// Add one source state. Repeatable.
    pub fn from(mut self, state: impl Into<StateToken>) -> Self {
        self.sources.insert(state.into());
        self
    }

    /// Match any current state. Overrides concrete sources.
    pub fn from_any(mut self) -> Self {
        self.any_source = true;
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<StateToken>) -> Self {
        self.destination = Some(state.into());
        self
    }

    /// Name an event this rule answers to (optional).
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.event = Some(name.into());
        self
    }

    /// Append a guard to the chain. Order of calls is evaluation order.
    pub fn guard(mut self, guard: impl Guard<O> + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    /// Append a concluder to the chain. Order of calls is execution order.
    pub fn concluder(mut self, concluder: impl Concluder<O> + 'static) -> Self {
        self.concluders.push(Arc::new(concluder));
        self
    }

    /// Replace the default state-set action (optional).
    pub fn action(mut self, action: impl Action<O> + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Declare params the rule accepts beyond the required ones.
    pub fn allow_params<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        extend_unique(&mut self.allowed_params, keys);
        self
    }

    /// Declare params the rule insists on. Declaration order shapes the
    /// missing-params message.
    pub fn require_params<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        extend_unique(&mut self.required_params, keys);
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule<O>, BuildError> {
        let sources = if self.any_source {
            SourceSet::Any
        } else if self.sources.is_empty() {
            return Err(BuildError::MissingSource);
        } else {
            SourceSet::States(self.sources)
        };
        let destination = self.destination.ok_or(BuildError::MissingDestination)?;

        Ok(TransitionRule {
            sources,
            destination,
            guards: self.guards,
            concluders: self.concluders,
            action: self.action.unwrap_or_else(|| Arc::new(StateSetAction)),
            event: self.event,
            allowed_params: self.allowed_params,
            required_params: self.required_params,
        })
    }
}

impl<O: Stateful> Default for RuleBuilder<O> {
    fn default() -> Self {
        RuleBuilder::new()
    }
}

fn extend_unique<I, K>(list: &mut Vec<String>, keys: I)
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    for key in keys {
        let key = key.into();
        if !list.contains(&key) {
            list.push(key);
        }
    }
}
