//! Machine-type definitions.

use super::config::MachineConfig;
use super::StateMachine;
use crate::builder::MachineDefBuilder;
use crate::core::{RuleRegistry, StateStore, Stateful};
use std::sync::Arc;

/// Everything one machine type knows: configuration, store and rule set.
///
/// A definition is built once through [`MachineDef::builder`] and shared via
/// `Arc` across every object instance it drives. Definitions are immutable
/// after construction; the event dispatch table inside the registry is
/// likewise frozen at build time.
pub struct MachineDef<O: Stateful> {
    config: MachineConfig,
    store: StateStore,
    registry: RuleRegistry<O>,
}

impl<O: Stateful> MachineDef<O> {
    /// Start declaring a machine type.
    pub fn builder() -> MachineDefBuilder<O> {
        MachineDefBuilder::new()
    }

    pub(crate) fn from_parts(config: MachineConfig, registry: RuleRegistry<O>) -> Self {
        let store = StateStore::new(
            config.state_field.clone(),
            config.repr,
            config.initial.clone(),
        );
        MachineDef {
            config,
            store,
            registry,
        }
    }

    /// The machine type's configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The state store derived from the configuration.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// The rule set, including its read-only query surface.
    pub fn registry(&self) -> &RuleRegistry<O> {
        &self.registry
    }

    /// Bind an object instance to this machine type.
    pub fn bind(self: &Arc<Self>, object: O) -> StateMachine<O> {
        StateMachine::new(Arc::clone(self), object)
    }
}
