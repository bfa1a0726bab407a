//! Declaration surface for machine types.
//!
//! This module is where rules get registered: fluent builders for machine
//! definitions and rules, plus shorthand constructors for the common cases.

pub mod error;
pub mod machine;
pub mod macros;
pub mod rule;

pub use error::BuildError;
pub use machine::MachineDefBuilder;
pub use rule::RuleBuilder;

use crate::core::{StateToken, Stateful, TransitionRule};

/// Create a plain rule: one source, one destination, default action.
///
/// # Example
///
/// ```
/// use statecraft::builder::simple_rule;
/// # use statecraft::core::Stateful;
/// # #[derive(Default)]
/// # struct Doc { state: Option<String>, f: Vec<String>, s: Vec<String> }
/// # impl Stateful for Doc {
/// #     fn read_field(&self, field: &str) -> Option<String> {
/// #         (field == "state").then(|| self.state.clone()).flatten()
/// #     }
/// #     fn write_field(&mut self, field: &str, value: String) {
/// #         if field == "state" { self.state = Some(value); }
/// #     }
/// #     fn failure_messages(&self) -> &[String] { &self.f }
/// #     fn failure_messages_mut(&mut self) -> &mut Vec<String> { &mut self.f }
/// #     fn success_messages(&self) -> &[String] { &self.s }
/// #     fn success_messages_mut(&mut self) -> &mut Vec<String> { &mut self.s }
/// # }
///
/// let rule = simple_rule::<Doc>("draft", "published");
/// assert_eq!(rule.destination().name(), "published");
/// ```
pub fn simple_rule<O: Stateful>(
    from: impl Into<StateToken>,
    to: impl Into<StateToken>,
) -> TransitionRule<O> {
    RuleBuilder::new()
        .from(from)
        .to(to)
        .build()
        .expect("rule with source and destination always builds")
}

/// Create a wildcard rule: any current state to one destination.
pub fn wildcard_rule<O: Stateful>(to: impl Into<StateToken>) -> TransitionRule<O> {
    RuleBuilder::new()
        .from_any()
        .to(to)
        .build()
        .expect("wildcard rule with destination always builds")
}
