//! Rule ownership and resolution for one machine type.
//!
//! The registry owns the ordered rule set, rejects conflicting declarations
//! up front, resolves `(current, requested)` pairs to rules with
//! concrete-over-wildcard priority, and keeps the event dispatch table that
//! backs the per-event façade methods.

use crate::capability::GuardContext;
use crate::core::{Params, SourceSet, StateToken, Stateful, TransitionRule};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Declaration-time registration failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeclarationError {
    /// A `(source, destination)` pair is already covered by an earlier rule.
    /// Wildcard and concrete sources are independent namespaces; the source
    /// field says which one collided.
    #[error("duplicate rule: {sources} -> {destination} is already declared")]
    DuplicateRule {
        sources: String,
        destination: StateToken,
    },
}

/// Ordered rule set of a machine type.
pub struct RuleRegistry<O: Stateful> {
    rules: Vec<TransitionRule<O>>,
    tokens: BTreeSet<StateToken>,
    events: HashMap<String, Vec<usize>>,
}

impl<O: Stateful> Default for RuleRegistry<O> {
    fn default() -> Self {
        RuleRegistry::new()
    }
}

impl<O: Stateful> RuleRegistry<O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        RuleRegistry {
            rules: Vec::new(),
            tokens: BTreeSet::new(),
            events: HashMap::new(),
        }
    }

    /// Append a rule, failing on a duplicate `(source, destination)` pair.
    ///
    /// A concrete pair may be covered by at most one rule; likewise at most
    /// one wildcard rule per destination. A wildcard rule and a concrete
    /// rule for the same destination coexist.
    pub fn register(&mut self, rule: TransitionRule<O>) -> Result<(), DeclarationError> {
        for existing in self.rules.iter().filter(|r| r.destination == rule.destination) {
            if existing.sources.collides_with(&rule.sources) {
                return Err(DeclarationError::DuplicateRule {
                    sources: rule.sources.to_string(),
                    destination: rule.destination.clone(),
                });
            }
        }

        self.tokens.extend(rule.sources.tokens().cloned());
        self.tokens.insert(rule.destination.clone());
        if let Some(event) = &rule.event {
            self.events
                .entry(event.clone())
                .or_default()
                .push(self.rules.len());
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Resolve `(current, requested)` to a rule.
    ///
    /// A rule matches when its destination equals `requested` and its source
    /// set contains `current` or is the wildcard; a concrete-source match
    /// takes priority over a wildcard match. `None` is a normal negative
    /// result, not an error.
    pub fn resolve(
        &self,
        current: &StateToken,
        requested: &StateToken,
    ) -> Option<&TransitionRule<O>> {
        let mut wildcard = None;
        for rule in self.rules.iter().filter(|r| r.destination == *requested) {
            match &rule.sources {
                SourceSet::States(tokens) if tokens.contains(current) => return Some(rule),
                SourceSet::Any if wildcard.is_none() => wildcard = Some(rule),
                _ => {}
            }
        }
        wildcard
    }

    /// Whether a transition is currently possible, with zero side effects.
    ///
    /// True iff a rule resolves and every guard evaluates true in quiet
    /// check mode: no `passed`/`failed` hooks, no message logging.
    pub fn can_transition(
        &self,
        object: &O,
        current: &StateToken,
        requested: &StateToken,
    ) -> bool {
        let Some(rule) = self.resolve(current, requested) else {
            return false;
        };
        let params = Params::new();
        rule.guards.iter().all(|guard| {
            let mut ctx = GuardContext::quiet(object, requested, &params);
            guard.check(&mut ctx)
        })
    }

    /// Whether a token appears anywhere in the declared rule set.
    pub fn is_declared(&self, token: &StateToken) -> bool {
        self.tokens.contains(token)
    }

    /// All declared tokens, ordered by name.
    pub fn states(&self) -> impl Iterator<Item = &StateToken> {
        self.tokens.iter()
    }

    /// Read-only traversal of the registered rules, in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &TransitionRule<O>> {
        self.rules.iter()
    }

    /// Look up the rule covering a concrete `(from, to)` pair, wildcard
    /// fallback included.
    pub fn rule(&self, from: &StateToken, to: &StateToken) -> Option<&TransitionRule<O>> {
        self.resolve(from, to)
    }

    /// Declared event names.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    /// Whether an event name is declared on any rule.
    pub fn has_event(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Rules answering to an event, in declaration order.
    pub fn rules_for_event(&self, event: &str) -> impl Iterator<Item = &TransitionRule<O>> {
        self.events
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&index| &self.rules[index])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
