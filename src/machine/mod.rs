//! The state machine façade.
//!
//! A [`StateMachine`] binds one wrapped object to a shared machine-type
//! definition and exposes the call surface: state queries, soft and hard
//! transitions, event firing, and the committed-transition log. All
//! transition logic lives in the registry and the pipeline; the façade only
//! delegates and converts soft outcomes to hard errors where configured.

pub mod config;
pub mod def;

pub use config::MachineConfig;
pub use def::MachineDef;

use crate::core::{Params, StateToken, Stateful, TransitionLog, TransitionRecord};
use crate::pipeline::{Outcome, TransitionError, TransitionPipeline};
use chrono::Utc;
use std::sync::Arc;

/// One wrapped object bound to a machine-type definition.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::RuleBuilder;
/// use statecraft::machine::MachineDef;
/// use std::sync::Arc;
/// # use statecraft::core::Stateful;
/// # #[derive(Default)]
/// # struct Vehicle { state: Option<String>, f: Vec<String>, s: Vec<String> }
/// # impl Stateful for Vehicle {
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
/// let def = MachineDef::builder()
///     .initial_state("parked")
///     .rule(RuleBuilder::new().from("parked").to("idling").event("ignite"))
///     .unwrap()
///     .build()
///     .unwrap();
/// let def = Arc::new(def);
///
/// let mut machine = def.bind(Vehicle::default());
/// assert!(machine.is("parked"));
/// assert!(machine.can_transition("idling"));
/// assert_eq!(machine.transition("idling"), Ok(true));
/// assert!(machine.is("idling"));
/// ```
pub struct StateMachine<O: Stateful> {
    def: Arc<MachineDef<O>>,
    object: O,
    log: TransitionLog,
}

impl<O: Stateful> StateMachine<O> {
    /// Bind an object to a machine-type definition.
    pub fn new(def: Arc<MachineDef<O>>, object: O) -> Self {
        StateMachine {
            def,
            object,
            log: TransitionLog::new(),
        }
    }

    /// The current canonical state.
    ///
    /// An object with an unset raw state reports the configured initial
    /// token; the raw field stays untouched.
    pub fn current(&self) -> StateToken {
        self.def.store().read(&self.object)
    }

    /// Per-state predicate: whether the current state equals the token.
    pub fn is(&self, state: impl Into<StateToken>) -> bool {
        self.current() == state.into()
    }

    /// All states declared for this machine type.
    pub fn states(&self) -> impl Iterator<Item = &StateToken> {
        self.def.registry().states()
    }

    /// Whether a transition to `to` is currently possible, side-effect free.
    pub fn can_transition(&self, to: impl Into<StateToken>) -> bool {
        let requested = to.into();
        let current = self.current();
        self.def
            .registry()
            .can_transition(&self.object, &current, &requested)
    }

    /// Attempt a transition with no params.
    pub fn transition(&mut self, to: impl Into<StateToken>) -> Result<bool, TransitionError> {
        self.transition_with(to, Params::new())
    }

    /// Attempt a transition.
    ///
    /// Soft by default: a failed attempt is `Ok(false)` with the reasons on
    /// the object's failure log. With the machine-wide hard flag set,
    /// failures escalate exactly like [`transition_hard_with`]. An
    /// undeclared token is an error in either mode.
    ///
    /// [`transition_hard_with`]: StateMachine::transition_hard_with
    pub fn transition_with(
        &mut self,
        to: impl Into<StateToken>,
        params: Params,
    ) -> Result<bool, TransitionError> {
        let requested = to.into();
        if self.def.config().hard {
            self.run_hard(&requested, &params)?;
            return Ok(true);
        }
        let outcome = self.run(&requested, &params)?;
        Ok(outcome.is_complete())
    }

    /// Attempt a transition with no params, raising on failure.
    pub fn transition_hard(&mut self, to: impl Into<StateToken>) -> Result<(), TransitionError> {
        self.transition_hard_with(to, Params::new())
    }

    /// Attempt a transition, raising on failure.
    ///
    /// A failed attempt becomes [`TransitionError::InvalidTransition`],
    /// carrying the state pair and the failure messages logged during the
    /// attempt.
    pub fn transition_hard_with(
        &mut self,
        to: impl Into<StateToken>,
        params: Params,
    ) -> Result<(), TransitionError> {
        let requested = to.into();
        self.run_hard(&requested, &params)
    }

    /// Fire a declared event with no params.
    pub fn fire(&mut self, event: &str) -> Result<bool, TransitionError> {
        self.fire_with(event, Params::new())
    }

    /// Fire a declared event: resolve it to a destination for the current
    /// state and delegate to [`transition_with`](StateMachine::transition_with).
    ///
    /// An event name never declared is [`TransitionError::UnknownEvent`]; a
    /// declared event with no rule matching the current state behaves like
    /// an unmatched transition.
    pub fn fire_with(&mut self, event: &str, params: Params) -> Result<bool, TransitionError> {
        let destination = self.event_destination(event)?;
        self.transition_with(destination, params)
    }

    /// Fire a declared event with no params, raising on failure.
    pub fn fire_hard(&mut self, event: &str) -> Result<(), TransitionError> {
        self.fire_hard_with(event, Params::new())
    }

    /// Fire a declared event, raising on failure.
    pub fn fire_hard_with(&mut self, event: &str, params: Params) -> Result<(), TransitionError> {
        let destination = self.event_destination(event)?;
        self.transition_hard_with(destination, params)
    }

    /// The wrapped object.
    pub fn object(&self) -> &O {
        &self.object
    }

    /// Mutable access to the wrapped object.
    pub fn object_mut(&mut self) -> &mut O {
        &mut self.object
    }

    /// Unbind and return the wrapped object.
    pub fn into_object(self) -> O {
        self.object
    }

    /// The machine-type definition this instance is bound to.
    pub fn def(&self) -> &MachineDef<O> {
        &self.def
    }

    /// Log of committed transitions on this instance.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    fn run(&mut self, requested: &StateToken, params: &Params) -> Result<Outcome, TransitionError> {
        let pipeline = TransitionPipeline::new(self.def.store(), self.def.registry());
        let outcome = pipeline.run(&mut self.object, requested, params)?;
        if let Outcome::Complete { attempt, from, to } = &outcome {
            self.log = self.log.record(TransitionRecord {
                from: from.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
                attempt: *attempt,
            });
        }
        Ok(outcome)
    }

    fn run_hard(&mut self, requested: &StateToken, params: &Params) -> Result<(), TransitionError> {
        let from = self.current();
        let logged = self.object.failure_messages().len();
        let outcome = self.run(requested, params)?;
        if outcome.is_complete() {
            return Ok(());
        }
        let messages = self.object.failure_messages()[logged..].to_vec();
        Err(TransitionError::InvalidTransition {
            from,
            to: requested.clone(),
            messages,
        })
    }

    /// Resolve an event name to the destination to request from the current
    /// state. Falls back to the event's first declared destination so an
    /// unmatched fire reports the proper state pair downstream.
    fn event_destination(&self, event: &str) -> Result<StateToken, TransitionError> {
        let registry = self.def.registry();
        let current = self.current();
        let mut first = None;
        for rule in registry.rules_for_event(event) {
            if rule.sources().matches(&current) {
                return Ok(rule.destination().clone());
            }
            if first.is_none() {
                first = Some(rule.destination().clone());
            }
        }
        first.ok_or_else(|| TransitionError::UnknownEvent {
            event: event.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RuleBuilder;
    use crate::capability::GuardContext;
    use crate::params;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Vehicle {
        fields: HashMap<String, String>,
        failures: Vec<String>,
        successes: Vec<String>,
    }

    impl Stateful for Vehicle {
        fn read_field(&self, field: &str) -> Option<String> {
            self.fields.get(field).cloned()
        }

        fn write_field(&mut self, field: &str, value: String) {
            self.fields.insert(field.to_string(), value);
        }

        fn failure_messages(&self) -> &[String] {
            &self.failures
        }

        fn failure_messages_mut(&mut self) -> &mut Vec<String> {
            &mut self.failures
        }

        fn success_messages(&self) -> &[String] {
            &self.successes
        }

        fn success_messages_mut(&mut self) -> &mut Vec<String> {
            &mut self.successes
        }
    }

    fn vehicle_def() -> Arc<MachineDef<Vehicle>> {
        let def = MachineDef::builder()
            .initial_state("parked")
            .rule(RuleBuilder::new().from("parked").to("idling").event("ignite"))
            .unwrap()
            .rule(RuleBuilder::new().from("idling").to("first_gear"))
            .unwrap()
            .rule(RuleBuilder::new().from_any().to("crashed").event("crash"))
            .unwrap()
            .build()
            .unwrap();
        Arc::new(def)
    }

    #[test]
    fn empty_state_reads_as_the_configured_initial_token() {
        let machine = vehicle_def().bind(Vehicle::default());
        assert_eq!(machine.current(), StateToken::new("parked"));
        assert!(machine.is("parked"));
        // The raw field was never written.
        assert_eq!(machine.object().read_field("state"), None);
    }

    #[test]
    fn wildcard_crash_then_no_way_back() {
        let mut machine = vehicle_def().bind(Vehicle::default());

        assert_eq!(machine.transition("crashed"), Ok(true));
        assert!(machine.is("crashed"));

        assert_eq!(machine.transition("idling"), Ok(false));
        assert!(!machine.can_transition("idling"));
        assert!(machine.is("crashed"));
    }

    #[test]
    fn per_state_predicates_track_the_current_state() {
        let mut machine = vehicle_def().bind(Vehicle::default());
        assert!(machine.is("parked"));
        assert!(!machine.is("idling"));

        machine.transition("idling").unwrap();
        assert!(machine.is("idling"));
        assert!(!machine.is("parked"));
    }

    #[test]
    fn undeclared_token_raises_in_soft_mode() {
        let mut machine = vehicle_def().bind(Vehicle::default());
        assert_eq!(
            machine.transition("flying"),
            Err(TransitionError::UnknownState {
                token: StateToken::new("flying")
            })
        );
    }

    #[test]
    fn required_params_gate_the_transition() {
        let def = MachineDef::builder()
            .initial_state("a")
            .rule(RuleBuilder::new().from("a").to("b").require_params(["foo"]))
            .unwrap()
            .build()
            .unwrap();
        let mut machine = Arc::new(def).bind(Vehicle::default());

        assert_eq!(machine.transition("b"), Ok(false));
        assert_eq!(
            machine.object().failure_messages(),
            ["Missing params: foo"]
        );

        assert_eq!(machine.transition_with("b", params! { "foo" => 1 }), Ok(true));
        assert!(machine.is("b"));
    }

    #[test]
    fn machine_wide_hard_flag_escalates_failures() {
        let def = MachineDef::builder()
            .initial_state("parked")
            .hard_failures(true)
            .rule(RuleBuilder::new().from("parked").to("idling").guard(
                |ctx: &mut GuardContext<'_, Vehicle>| {
                    ctx.log_failure("no keys");
                    false
                },
            ))
            .unwrap()
            .build()
            .unwrap();
        let mut machine = Arc::new(def).bind(Vehicle::default());

        assert_eq!(
            machine.transition("idling"),
            Err(TransitionError::InvalidTransition {
                from: StateToken::new("parked"),
                to: StateToken::new("idling"),
                messages: vec!["no keys".to_string()],
            })
        );
        assert!(machine.is("parked"));
    }

    #[test]
    fn explicit_hard_call_works_on_a_soft_machine() {
        let mut machine = vehicle_def().bind(Vehicle::default());

        assert_eq!(machine.transition_hard("idling"), Ok(()));
        let error = machine.transition_hard("idling").unwrap_err();
        assert!(matches!(
            error,
            TransitionError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn events_alias_their_rules() {
        let mut machine = vehicle_def().bind(Vehicle::default());

        assert_eq!(machine.fire("ignite"), Ok(true));
        assert!(machine.is("idling"));

        assert_eq!(machine.fire("crash"), Ok(true));
        assert!(machine.is("crashed"));
    }

    #[test]
    fn unknown_event_is_an_error() {
        let mut machine = vehicle_def().bind(Vehicle::default());
        assert_eq!(
            machine.fire("explode"),
            Err(TransitionError::UnknownEvent {
                event: "explode".to_string()
            })
        );
    }

    #[test]
    fn declared_event_without_a_matching_source_fails_softly() {
        let mut machine = vehicle_def().bind(Vehicle::default());
        machine.transition("crashed").unwrap();
        // "ignite" only leads out of "parked".
        assert_eq!(machine.fire("ignite"), Ok(false));
        assert!(machine.is("crashed"));
    }

    #[test]
    fn log_records_committed_transitions_only() {
        let mut machine = vehicle_def().bind(Vehicle::default());

        machine.transition("idling").unwrap();
        machine.transition("idling").ok();
        machine.transition("first_gear").unwrap();

        let path: Vec<&str> = machine.log().path().iter().map(|t| t.name()).collect();
        assert_eq!(path, ["parked", "idling", "first_gear"]);
        assert_eq!(machine.log().len(), 2);
    }

    #[test]
    fn into_object_returns_the_wrapped_object() {
        let mut machine = vehicle_def().bind(Vehicle::default());
        machine.transition("idling").unwrap();
        let vehicle = machine.into_object();
        assert_eq!(vehicle.read_field("state"), Some("idling".to_string()));
    }
}
