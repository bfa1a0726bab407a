//! Reading and writing canonical state on a wrapped object.
//!
//! The store is the only component that touches the object's state field. It
//! normalizes on read (unset/empty raw text becomes the configured initial
//! token, either storage representation becomes the canonical token) and
//! renders on write, so everything above it compares canonical tokens only.

use super::object::Stateful;
use super::token::StateToken;
use serde_json::Value;

/// How the state is rendered into the object's field on write.
///
/// Reads accept either form, so two machine types configured differently can
/// still read each other's writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StateRepr {
    /// The bare token name, e.g. `idling`.
    #[default]
    Text,
    /// The canonical JSON-encoded token, e.g. `"idling"`.
    Token,
}

/// Reads and writes the canonical state value on a wrapped object.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{StateStore, StateToken, Stateful};
///
/// #[derive(Default)]
/// struct Doc {
///     state: Option<String>,
///     failures: Vec<String>,
///     successes: Vec<String>,
/// }
/// # impl Stateful for Doc {
/// #     fn read_field(&self, field: &str) -> Option<String> {
/// #         (field == "state").then(|| self.state.clone()).flatten()
/// #     }
/// #     fn write_field(&mut self, field: &str, value: String) {
/// #         if field == "state" { self.state = Some(value); }
/// #     }
/// #     fn failure_messages(&self) -> &[String] { &self.failures }
/// #     fn failure_messages_mut(&mut self) -> &mut Vec<String> { &mut self.failures }
/// #     fn success_messages(&self) -> &[String] { &self.successes }
/// #     fn success_messages_mut(&mut self) -> &mut Vec<String> { &mut self.successes }
/// # }
///
/// let store = StateStore::default();
/// let mut doc = Doc::default();
///
/// // Unset raw state reads as the reserved initial token, without mutation.
/// assert!(store.read(&doc).is_unset());
/// assert_eq!(doc.state, None);
///
/// store.write(&mut doc, &StateToken::new("draft"));
/// assert_eq!(store.read(&doc), StateToken::new("draft"));
/// ```
#[derive(Clone, Debug)]
pub struct StateStore {
    field: String,
    repr: StateRepr,
    initial: StateToken,
}

impl Default for StateStore {
    fn default() -> Self {
        StateStore::new("state", StateRepr::default(), StateToken::unset())
    }
}

impl StateStore {
    /// Create a store for a configured field name, representation and
    /// initial token.
    pub fn new(field: impl Into<String>, repr: StateRepr, initial: StateToken) -> Self {
        StateStore {
            field: field.into(),
            repr,
            initial,
        }
    }

    /// The configured state field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The configured storage representation.
    pub fn repr(&self) -> StateRepr {
        self.repr
    }

    /// The token reported when the raw state is unset.
    pub fn initial(&self) -> &StateToken {
        &self.initial
    }

    /// Read the canonical state of an object.
    ///
    /// An unset or empty raw field yields the configured initial token; the
    /// object itself is never mutated by a read.
    pub fn read<O: Stateful>(&self, object: &O) -> StateToken {
        match object.read_field(&self.field) {
            None => self.initial.clone(),
            Some(raw) if raw.is_empty() => self.initial.clone(),
            Some(raw) => normalize(raw),
        }
    }

    /// Write a state token in the configured representation.
    pub fn write<O: Stateful>(&self, object: &mut O, token: &StateToken) {
        let value = match self.repr {
            StateRepr::Text => token.name().to_string(),
            StateRepr::Token => Value::String(token.name().to_string()).to_string(),
        };
        object.write_field(&self.field, value);
    }
}

/// Map raw field text, in either representation, to the canonical token.
fn normalize(raw: String) -> StateToken {
    if raw.starts_with('"') {
        if let Ok(name) = serde_json::from_str::<String>(&raw) {
            return StateToken::from(name);
        }
    }
    StateToken::from(raw)
}
