//! Concluder capability: post-transition side effects with undo.
//!
//! Concluders run after the action has already changed the state. A failing
//! concluder fails the attempt and triggers rollback of everything that
//! succeeded before it, in reverse order.

use super::UndoError;
use crate::core::{Params, StateToken, Stateful};

/// Post-transition side-effect capability.
///
/// In forward orientation the context carries the state held *before* the
/// transition; in undo orientation it carries the state that must be undone.
/// `undo` defaults to a no-op success.
pub trait Concluder<O: Stateful>: Send + Sync {
    /// Run the side effect. `false` fails the attempt and starts rollback.
    fn call(&self, ctx: &mut ConcluderContext<'_, O>) -> bool;

    /// Undo a previously successful `call` during rollback.
    ///
    /// Failures are recorded into the object's failure log by the pipeline;
    /// they never change the outcome of the attempt.
    fn undo(&self, _ctx: &mut ConcluderContext<'_, O>) -> Result<(), UndoError> {
        Ok(())
    }

    /// Label used by the read-only rule query surface.
    fn label(&self) -> &str {
        "concluder"
    }
}

impl<O, F> Concluder<O> for F
where
    O: Stateful,
    F: Fn(&mut ConcluderContext<'_, O>) -> bool + Send + Sync,
{
    fn call(&self, ctx: &mut ConcluderContext<'_, O>) -> bool {
        self(ctx)
    }
}

/// Which way a concluder context is oriented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Running the side effect; `state()` is the pre-transition state.
    Forward,
    /// Rolling the side effect back; `state()` is the state being undone.
    Undo,
}

/// Per-attempt context handed to a concluder.
pub struct ConcluderContext<'a, O: Stateful> {
    object: &'a mut O,
    state: &'a StateToken,
    params: &'a Params,
    orientation: Orientation,
}

impl<'a, O: Stateful> ConcluderContext<'a, O> {
    pub(crate) fn forward(object: &'a mut O, prior: &'a StateToken, params: &'a Params) -> Self {
        ConcluderContext {
            object,
            state: prior,
            params,
            orientation: Orientation::Forward,
        }
    }

    pub(crate) fn undo(object: &'a mut O, undone: &'a StateToken, params: &'a Params) -> Self {
        ConcluderContext {
            object,
            state: undone,
            params,
            orientation: Orientation::Undo,
        }
    }

    /// The wrapped object.
    pub fn object(&self) -> &O {
        self.object
    }

    /// Mutable access to the wrapped object. Side effects are the point here.
    pub fn object_mut(&mut self) -> &mut O {
        self.object
    }

    /// Forward: the state held before the transition. Undo: the state that
    /// must be undone.
    pub fn state(&self) -> &StateToken {
        self.state
    }

    /// Params of the attempt.
    pub fn params(&self) -> &Params {
        self.params
    }

    /// Which way this context is oriented.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Append to the object's failure log.
    pub fn log_failure(&mut self, message: impl Into<String>) {
        self.object.failure_messages_mut().push(message.into());
    }

    /// Append to the object's success log.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.object.success_messages_mut().push(message.into());
    }
}

/// Built-in persistence concluder.
///
/// Invokes the wrapped object's own save operation and reports its boolean
/// result. An object without a save operation succeeds trivially.
pub struct SaveConcluder;

impl<O: Stateful> Concluder<O> for SaveConcluder {
    fn call(&self, ctx: &mut ConcluderContext<'_, O>) -> bool {
        match ctx.object_mut().save() {
            None | Some(true) => true,
            Some(false) => {
                ctx.log_failure("save failed");
                false
            }
        }
    }

    fn label(&self) -> &str {
        "save"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Record {
        fields: HashMap<String, String>,
        failures: Vec<String>,
        successes: Vec<String>,
        save_result: Option<bool>,
        saves: usize,
    }

    impl Stateful for Record {
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

        fn save(&mut self) -> Option<bool> {
            self.saves += 1;
            self.save_result
        }
    }

    #[test]
    fn save_concluder_trivially_succeeds_without_save() {
        let mut record = Record::default();
        let prior = StateToken::new("parked");
        let params = Params::new();
        let mut ctx = ConcluderContext::forward(&mut record, &prior, &params);
        assert!(SaveConcluder.call(&mut ctx));
        assert!(record.failures.is_empty());
    }

    #[test]
    fn save_concluder_reports_save_result() {
        let mut record = Record {
            save_result: Some(true),
            ..Record::default()
        };
        let prior = StateToken::new("parked");
        let params = Params::new();
        let mut ctx = ConcluderContext::forward(&mut record, &prior, &params);
        assert!(SaveConcluder.call(&mut ctx));
        assert_eq!(record.saves, 1);

        record.save_result = Some(false);
        let mut ctx = ConcluderContext::forward(&mut record, &prior, &params);
        assert!(!SaveConcluder.call(&mut ctx));
        assert_eq!(record.failures, ["save failed"]);
    }

    #[test]
    fn closures_are_concluders() {
        let concluder = |ctx: &mut ConcluderContext<'_, Record>| {
            ctx.log_success("notified");
            true
        };

        let mut record = Record::default();
        let prior = StateToken::new("parked");
        let params = Params::new();
        let mut ctx = ConcluderContext::forward(&mut record, &prior, &params);
        assert!(Concluder::call(&concluder, &mut ctx));
        assert_eq!(record.successes, ["notified"]);
    }

    #[test]
    fn default_undo_is_a_no_op_success() {
        struct Noop;
        impl Concluder<Record> for Noop {
            fn call(&self, _ctx: &mut ConcluderContext<'_, Record>) -> bool {
                true
            }
        }

        let mut record = Record::default();
        let undone = StateToken::new("idling");
        let params = Params::new();
        let mut ctx = ConcluderContext::undo(&mut record, &undone, &params);
        assert_eq!(ctx.orientation(), Orientation::Undo);
        assert_eq!(Noop.undo(&mut ctx), Ok(()));
    }
}
