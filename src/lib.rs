//! Statecraft: a pluggable state machine engine for arbitrary stateful objects.
//!
//! Statecraft attaches a finite-state-machine to an object that knows
//! nothing about the machine. The object implements the small [`Stateful`]
//! contract; rules, guards, concluders and actions are declared per machine
//! type and shared across every instance.
//!
//! # Core Concepts
//!
//! - **Rules**: declarative transitions with source sets (or the ANY
//!   wildcard), a destination and an optional event name
//! - **Guards**: pre-transition predicates, evaluated in declared order
//! - **Concluders**: post-transition side effects with reverse-order
//!   rollback when one of them fails
//! - **Soft/hard failure**: failed attempts return `false` by default and
//!   escalate to errors per call or machine-wide
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::RuleBuilder;
//! use statecraft::core::Stateful;
//! use statecraft::machine::MachineDef;
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Vehicle {
//!     state: Option<String>,
//!     failures: Vec<String>,
//!     successes: Vec<String>,
//! }
//!
//! impl Stateful for Vehicle {
//!     fn read_field(&self, field: &str) -> Option<String> {
//!         match field {
//!             "state" => self.state.clone(),
//!             _ => None,
//!         }
//!     }
//!
//!     fn write_field(&mut self, field: &str, value: String) {
//!         if field == "state" {
//!             self.state = Some(value);
//!         }
//!     }
//!
//!     fn failure_messages(&self) -> &[String] {
//!         &self.failures
//!     }
//!
//!     fn failure_messages_mut(&mut self) -> &mut Vec<String> {
//!         &mut self.failures
//!     }
//!
//!     fn success_messages(&self) -> &[String] {
//!         &self.successes
//!     }
//!
//!     fn success_messages_mut(&mut self) -> &mut Vec<String> {
//!         &mut self.successes
//!     }
//! }
//!
//! let def = MachineDef::builder()
//!     .initial_state("parked")
//!     .rule(RuleBuilder::new().from("parked").to("idling").event("ignite"))
//!     .unwrap()
//!     .rule(RuleBuilder::new().from_any().to("crashed").event("crash"))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let def = Arc::new(def);
//!
//! let mut machine = def.bind(Vehicle::default());
//! assert!(machine.is("parked"));
//! assert_eq!(machine.fire("ignite"), Ok(true));
//! assert_eq!(machine.transition("crashed"), Ok(true));
//! assert_eq!(machine.transition("idling"), Ok(false));
//! ```

pub mod builder;
pub mod capability;
pub mod core;
pub mod machine;
pub mod pipeline;

// Re-export commonly used types
pub use self::builder::{BuildError, MachineDefBuilder, RuleBuilder};
pub use self::capability::{Action, Concluder, Guard, SaveConcluder, StateSetAction, UndoError};
pub use self::core::{Params, StateRepr, StateToken, Stateful, TransitionRule};
pub use self::machine::{MachineConfig, MachineDef, StateMachine};
pub use self::pipeline::{Outcome, Rejection, TransitionError};
