//! Builder for machine-type definitions.

use crate::builder::error::BuildError;
use crate::builder::rule::RuleBuilder;
use crate::core::{RuleRegistry, StateRepr, StateToken, Stateful, TransitionRule};
use crate::machine::{MachineConfig, MachineDef};

/// Fluent builder for a [`MachineDef`].
///
/// Declares the machine-type configuration and registers rules; duplicate
/// `(source, destination)` declarations fail at the `rule` call, not at
/// transition time.
pub struct MachineDefBuilder<O: Stateful> {
    config: MachineConfig,
    registry: RuleRegistry<O>,
}

impl<O: Stateful> MachineDefBuilder<O> {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        MachineDefBuilder {
            config: MachineConfig::default(),
            registry: RuleRegistry::new(),
        }
    }

    /// Name of the object field holding the state (default `"state"`).
    pub fn state_field(mut self, field: impl Into<String>) -> Self {
        self.config.state_field = field.into();
        self
    }

    /// Storage representation used on write (default bare text).
    pub fn store_as(mut self, repr: StateRepr) -> Self {
        self.config.repr = repr;
        self
    }

    /// Token reported while the object's raw state is unset (default the
    /// reserved "no prior state" token).
    pub fn initial_state(mut self, state: impl Into<StateToken>) -> Self {
        self.config.initial = state.into();
        self
    }

    /// Escalate every soft failure to an error, machine-wide.
    pub fn hard_failures(mut self, hard: bool) -> Self {
        self.config.hard = hard;
        self
    }

    /// Build and register a rule.
    pub fn rule(self, builder: RuleBuilder<O>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.add_rule(rule)
    }

    /// Register a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<O>) -> Result<Self, BuildError> {
        self.registry.register(rule)?;
        Ok(self)
    }

    /// Build the machine-type definition.
    pub fn build(self) -> Result<MachineDef<O>, BuildError> {
        if self.registry.is_empty() {
            return Err(BuildError::NoRules);
        }
        Ok(MachineDef::from_parts(self.config, self.registry))
    }
}

impl<O: Stateful> Default for MachineDefBuilder<O> {
    fn default() -> Self {
        MachineDefBuilder::new()
    }
}
