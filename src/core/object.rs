//! The wrapped-object contract.
//!
//! The engine drives objects it does not own and that know nothing about it.
//! [`Stateful`] is the whole contract: named text fields (of which the
//! machine only ever touches the configured state field), two append-only
//! message logs, and an optional save hook for the built-in persistence
//! concluder.

/// Contract an object must satisfy to be driven by a state machine.
///
/// Implementors expose their attributes as named text fields; the machine
/// reads and writes exactly one of them (default `"state"`, configurable per
/// machine type). The two message logs are append-only and ordered — guards
/// and concluders push onto them, and the engine never clears them.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Stateful;
///
/// #[derive(Default)]
/// struct Vehicle {
///     state: Option<String>,
///     failures: Vec<String>,
///     successes: Vec<String>,
/// }
///
/// impl Stateful for Vehicle {
///     fn read_field(&self, field: &str) -> Option<String> {
///         match field {
///             "state" => self.state.clone(),
///             _ => None,
///         }
///     }
///
///     fn write_field(&mut self, field: &str, value: String) {
///         if field == "state" {
///             self.state = Some(value);
///         }
///     }
///
///     fn failure_messages(&self) -> &[String] {
///         &self.failures
///     }
///
///     fn failure_messages_mut(&mut self) -> &mut Vec<String> {
///         &mut self.failures
///     }
///
///     fn success_messages(&self) -> &[String] {
///         &self.successes
///     }
///
///     fn success_messages_mut(&mut self) -> &mut Vec<String> {
///         &mut self.successes
///     }
/// }
/// ```
pub trait Stateful {
    /// Read a named field as raw text. `None` means the field is unset.
    fn read_field(&self, field: &str) -> Option<String>;

    /// Write a named field.
    fn write_field(&mut self, field: &str, value: String);

    /// Ordered log of failure messages recorded against this object.
    fn failure_messages(&self) -> &[String];

    /// Mutable access to the failure log. Append-only by contract.
    fn failure_messages_mut(&mut self) -> &mut Vec<String>;

    /// Ordered log of success messages recorded against this object.
    fn success_messages(&self) -> &[String];

    /// Mutable access to the success log. Append-only by contract.
    fn success_messages_mut(&mut self) -> &mut Vec<String>;

    /// Optional zero-argument save operation.
    ///
    /// `None` means the object has no save operation, which the built-in
    /// persistence concluder treats as trivial success. `Some(result)`
    /// reports whether the save worked.
    fn save(&mut self) -> Option<bool> {
        None
    }
}
