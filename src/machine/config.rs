//! Per-machine-type configuration.

use crate::core::{StateRepr, StateToken};

/// Immutable configuration of a machine type.
///
/// Built once by the declaration surface and carried by the
/// [`MachineDef`](super::MachineDef); individual machines never mutate it.
#[derive(Clone, Debug)]
pub struct MachineConfig {
    /// Name of the object field holding the state.
    pub state_field: String,
    /// Storage representation used on write.
    pub repr: StateRepr,
    /// Whether soft failures escalate to errors machine-wide.
    pub hard: bool,
    /// Token reported when the object's raw state is unset.
    pub initial: StateToken,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            state_field: "state".to_string(),
            repr: StateRepr::default(),
            hard: false,
            initial: StateToken::unset(),
        }
    }
}
