//! Pluggable transition capabilities.
//!
//! A rule is assembled from three capability roles: guards vet an attempt
//! before anything changes, the action applies the state change, and
//! concluders run side effects afterwards. Each role is one small trait;
//! rules hold capabilities by reference and the pipeline hands each call a
//! fresh per-attempt context, so implementations stay stateless.

pub mod action;
pub mod concluder;
pub mod guard;

pub use action::{Action, StateSetAction};
pub use concluder::{Concluder, ConcluderContext, Orientation, SaveConcluder};
pub use guard::{Guard, GuardContext, NamedGuard};

use thiserror::Error;

/// Failure raised by an undo operation during rollback.
///
/// Undo failures are recorded into the wrapped object's failure log and
/// never escape the rollback walk.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct UndoError {
    message: String,
}

impl UndoError {
    /// Create an undo failure with a message for the failure log.
    pub fn new(message: impl Into<String>) -> Self {
        UndoError {
            message: message.into(),
        }
    }
}
