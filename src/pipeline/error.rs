//! Errors surfaced by transition execution.

use crate::core::StateToken;
use thiserror::Error;

/// Errors that can escape a transition or event call.
///
/// `UnknownState` and `UnknownEvent` are programming errors and raised in
/// both soft and hard mode. `InvalidTransition` is the hard-mode rendering
/// of an attempt that soft mode would report as `false`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// The requested token was never declared for this machine type.
    /// Fatal in both modes; nothing has been mutated when this is raised.
    #[error("state '{token}' has never been declared")]
    UnknownState { token: StateToken },

    /// Hard-mode failure of an attempt, carrying the state pair and the
    /// failure messages logged during the attempt.
    #[error("invalid transition from '{from}' to '{to}'{}", render_messages(.messages))]
    InvalidTransition {
        from: StateToken,
        to: StateToken,
        messages: Vec<String>,
    },

    /// The fired event name was never declared on any rule.
    #[error("event '{event}' has never been declared")]
    UnknownEvent { event: String },
}

fn render_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}
