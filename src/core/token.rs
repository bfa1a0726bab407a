//! Canonical state identifiers.
//!
//! Every state a machine type knows about is named by a [`StateToken`].
//! Tokens are plain symbolic values; how they are rendered onto the wrapped
//! object is the store's concern, and all internal comparisons happen on the
//! canonical token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the reserved token standing in for "no prior state".
const UNSET: &str = "__unset__";

/// Canonical identifier for one machine state.
///
/// Tokens compare, hash and order by name. A reserved token,
/// [`StateToken::unset`], represents "no prior state" and is what a machine
/// reports when the wrapped object's raw state field is empty; the raw field
/// itself is never mutated to make that substitution.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateToken;
///
/// let parked = StateToken::new("parked");
/// assert_eq!(parked.name(), "parked");
/// assert_eq!(parked, StateToken::from("parked"));
/// assert!(!parked.is_unset());
/// assert!(StateToken::unset().is_unset());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateToken(String);

impl StateToken {
    /// Create a token from a state name.
    pub fn new(name: impl Into<String>) -> Self {
        StateToken(name.into())
    }

    /// The reserved "no prior state" token.
    ///
    /// Substituted on read when the wrapped object's state field is unset or
    /// empty. Machine types may configure a different initial token.
    pub fn unset() -> Self {
        StateToken(UNSET.to_string())
    }

    /// Whether this is the reserved "no prior state" token.
    pub fn is_unset(&self) -> bool {
        self.0 == UNSET
    }

    /// The token's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateToken {
    fn from(name: &str) -> Self {
        StateToken::new(name)
    }
}

impl From<String> for StateToken {
    fn from(name: String) -> Self {
        StateToken(name)
    }
}

impl From<&StateToken> for StateToken {
    fn from(token: &StateToken) -> Self {
        token.clone()
    }
}
