//! Committed-transition history.
//!
//! Every committed attempt leaves one record: the state pair, a UTC
//! timestamp and the attempt id. The log lives in memory on the machine
//! façade and is append-only in the functional sense — `record` returns a
//! new log and leaves the old one untouched. Nothing here is ever persisted
//! by the engine.

use crate::core::StateToken;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one committed transition.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateToken, TransitionRecord};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let record = TransitionRecord {
///     from: StateToken::new("parked"),
///     to: StateToken::new("idling"),
///     timestamp: Utc::now(),
///     attempt: Uuid::new_v4(),
/// };
/// assert_eq!(record.from.name(), "parked");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from.
    pub from: StateToken,
    /// The state being transitioned to.
    pub to: StateToken,
    /// When the attempt committed.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the attempt that produced this record.
    pub attempt: Uuid,
}

/// Ordered log of committed transitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        TransitionLog::default()
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        TransitionLog { records }
    }

    /// The records in commit order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// The path of states traversed: the first `from`, then each `to`.
    pub fn path(&self) -> Vec<&StateToken> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
