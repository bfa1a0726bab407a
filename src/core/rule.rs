//! Declarative transition rules.
//!
//! One rule records one legal transition: which source states it covers
//! (possibly the ANY wildcard), its destination, the guard and concluder
//! chains, the action, an optional event name and the param contract.

use crate::capability::{Action, Concluder, Guard};
use crate::core::{StateToken, Stateful};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The source side of a rule: a concrete set of tokens or the ANY wildcard.
///
/// The wildcard is structural, not a magic token name, so a state actually
/// called "any" stays an ordinary state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSet {
    /// Matches any current state.
    Any,
    /// Matches exactly these states.
    States(BTreeSet<StateToken>),
}

impl SourceSet {
    /// Build a concrete source set.
    pub fn states<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StateToken>,
    {
        SourceSet::States(tokens.into_iter().map(Into::into).collect())
    }

    /// Whether this set covers the given current state.
    pub fn matches(&self, current: &StateToken) -> bool {
        match self {
            SourceSet::Any => true,
            SourceSet::States(tokens) => tokens.contains(current),
        }
    }

    /// Whether this is the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, SourceSet::Any)
    }

    /// Concrete tokens of the set; empty for the wildcard.
    pub fn tokens(&self) -> impl Iterator<Item = &StateToken> {
        match self {
            SourceSet::Any => None,
            SourceSet::States(tokens) => Some(tokens.iter()),
        }
        .into_iter()
        .flatten()
    }

    /// Whether two source sets share at least one concrete state, or either
    /// is the wildcard of the same namespace.
    pub(crate) fn collides_with(&self, other: &SourceSet) -> bool {
        match (self, other) {
            (SourceSet::Any, SourceSet::Any) => true,
            (SourceSet::Any, _) | (_, SourceSet::Any) => false,
            (SourceSet::States(a), SourceSet::States(b)) => !a.is_disjoint(b),
        }
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSet::Any => f.write_str("any"),
            SourceSet::States(tokens) => {
                let names: Vec<&str> = tokens.iter().map(StateToken::name).collect();
                f.write_str(&names.join("|"))
            }
        }
    }
}

/// Declarative record of one legal transition.
///
/// Rules are built through the builder surface and owned by a
/// [`RuleRegistry`](crate::core::RuleRegistry); the accessors here are the
/// read-only query surface used by diagramming and assertion helpers.
pub struct TransitionRule<O: Stateful> {
    pub(crate) sources: SourceSet,
    pub(crate) destination: StateToken,
    pub(crate) guards: Vec<Arc<dyn Guard<O>>>,
    pub(crate) concluders: Vec<Arc<dyn Concluder<O>>>,
    pub(crate) action: Arc<dyn Action<O>>,
    pub(crate) event: Option<String>,
    pub(crate) allowed_params: Vec<String>,
    pub(crate) required_params: Vec<String>,
}

impl<O: Stateful> TransitionRule<O> {
    /// The source side of the rule.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// The destination state. Never the wildcard.
    pub fn destination(&self) -> &StateToken {
        &self.destination
    }

    /// Event name this rule answers to, if any.
    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    /// Labels of the guard chain, in declared order.
    pub fn guard_labels(&self) -> Vec<&str> {
        self.guards.iter().map(|g| g.label()).collect()
    }

    /// Labels of the concluder chain, in declared order.
    pub fn concluder_labels(&self) -> Vec<&str> {
        self.concluders.iter().map(|c| c.label()).collect()
    }

    /// Whether a guard with the given label is attached.
    pub fn has_guard(&self, label: &str) -> bool {
        self.guards.iter().any(|g| g.label() == label)
    }

    /// Whether a concluder with the given label is attached.
    pub fn has_concluder(&self, label: &str) -> bool {
        self.concluders.iter().any(|c| c.label() == label)
    }

    /// Params the rule accepts beyond the required ones.
    pub fn allowed_params(&self) -> &[String] {
        &self.allowed_params
    }

    /// Params the rule insists on, in declaration order.
    pub fn required_params(&self) -> &[String] {
        &self.required_params
    }

    /// Whether the rule declares any param contract at all.
    pub(crate) fn has_param_contract(&self) -> bool {
        !self.allowed_params.is_empty() || !self.required_params.is_empty()
    }
}

impl<O: Stateful> Clone for TransitionRule<O> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            destination: self.destination.clone(),
            guards: self.guards.clone(),
            concluders: self.concluders.clone(),
            action: Arc::clone(&self.action),
            event: self.event.clone(),
            allowed_params: self.allowed_params.clone(),
            required_params: self.required_params.clone(),
        }
    }
}

impl<O: Stateful> fmt::Debug for TransitionRule<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("sources", &self.sources)
            .field("destination", &self.destination)
            .field("event", &self.event)
            .field("guards", &self.guard_labels())
            .field("concluders", &self.concluder_labels())
            .finish()
    }
}
