//! Outcome of one transition attempt.

use crate::core::StateToken;
use uuid::Uuid;

/// Phases an attempt moves through while the pipeline executes it.
///
/// `Committed` and `Failed` are the terminals of a normal attempt; an
/// undeclared requested token aborts before anything is mutated and never
/// reaches `Acting`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptPhase {
    Idle,
    Resolving,
    ParamCheck,
    Guarding,
    Acting,
    Concluding,
    Committed,
    RollingBack,
    Failed,
}

/// Soft result of one attempt.
///
/// The façade converts `Rejected` to `false` in soft mode and to
/// [`TransitionError::InvalidTransition`](super::TransitionError) in hard
/// mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The attempt committed; state changed from `from` to `to`.
    Complete {
        attempt: Uuid,
        from: StateToken,
        to: StateToken,
    },
    /// The attempt failed; any partial effects have been rolled back.
    Rejected { attempt: Uuid, rejection: Rejection },
}

impl Outcome {
    /// Whether the attempt committed.
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete { .. })
    }

    /// The rejection, when the attempt failed.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Complete { .. } => None,
            Outcome::Rejected { rejection, .. } => Some(rejection),
        }
    }
}

/// Why an attempt was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    /// No rule covers the `(current, requested)` pair.
    NoMatchingRule { from: StateToken, to: StateToken },
    /// Required params absent, in declaration order.
    MissingParams { keys: Vec<String> },
    /// Params outside the rule's declared contract.
    UnexpectedParams { keys: Vec<String> },
    /// A guard predicate returned false.
    GuardRefused { guard: String },
    /// A concluder returned false; rollback has completed.
    ConcluderRefused { concluder: String },
}
