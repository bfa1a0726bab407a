//! Guard capability: pre-transition predicates.
//!
//! Guards decide whether an attempt may proceed. They see the wrapped object
//! read-only — mutating state from a guard is impossible by construction —
//! and may append to the object's message logs through the context helpers.

use crate::core::{Params, StateToken, Stateful};

/// Pre-transition boolean predicate capability.
///
/// `check` is required; the `passed`/`failed` hooks fire only during a live
/// attempt, never during a bare [`can_transition`] check.
///
/// [`can_transition`]: crate::core::RuleRegistry::can_transition
///
/// Plain closures over a context are guards too:
///
/// ```rust
/// use statecraft::capability::{Guard, GuardContext};
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
/// fn requires_driver(ctx: &mut GuardContext<'_, Doc>) -> bool {
///     ctx.params().contains("driver")
/// }
///
/// let guard: &dyn Guard<Doc> = &requires_driver;
/// ```
pub trait Guard<O: Stateful>: Send + Sync {
    /// Evaluate the predicate. Must not mutate state.
    fn check(&self, ctx: &mut GuardContext<'_, O>) -> bool;

    /// Hook fired after `check` returned true during a live attempt.
    fn passed(&self, _ctx: &mut GuardContext<'_, O>) {}

    /// Hook fired after `check` returned false during a live attempt.
    fn failed(&self, _ctx: &mut GuardContext<'_, O>) {}

    /// Label used by the read-only rule query surface.
    fn label(&self) -> &str {
        "guard"
    }
}

impl<O, F> Guard<O> for F
where
    O: Stateful,
    F: Fn(&mut GuardContext<'_, O>) -> bool + Send + Sync,
{
    fn check(&self, ctx: &mut GuardContext<'_, O>) -> bool {
        self(ctx)
    }
}

/// Per-attempt context handed to a guard.
///
/// Constructed fresh for every guard call with the wrapped object, the
/// desired state and the attempt params. Messages logged through the helpers
/// are buffered and flushed onto the object's logs after the call returns;
/// in quiet check mode the buffers are discarded, which is what keeps
/// capability checks side-effect free.
pub struct GuardContext<'a, O: Stateful> {
    object: &'a O,
    desired: &'a StateToken,
    params: &'a Params,
    recording: bool,
    failures: Vec<String>,
    successes: Vec<String>,
}

impl<'a, O: Stateful> GuardContext<'a, O> {
    pub(crate) fn live(object: &'a O, desired: &'a StateToken, params: &'a Params) -> Self {
        GuardContext {
            object,
            desired,
            params,
            recording: true,
            failures: Vec::new(),
            successes: Vec::new(),
        }
    }

    pub(crate) fn quiet(object: &'a O, desired: &'a StateToken, params: &'a Params) -> Self {
        GuardContext {
            recording: false,
            ..GuardContext::live(object, desired, params)
        }
    }

    /// The wrapped object, read-only.
    pub fn object(&self) -> &O {
        self.object
    }

    /// The state the attempt wants to reach.
    pub fn desired(&self) -> &StateToken {
        self.desired
    }

    /// Params of the attempt.
    pub fn params(&self) -> &Params {
        self.params
    }

    /// Append to the object's failure log. Silently dropped in check mode.
    pub fn log_failure(&mut self, message: impl Into<String>) {
        if self.recording {
            self.failures.push(message.into());
        }
    }

    /// Append to the object's success log. Silently dropped in check mode.
    pub fn log_success(&mut self, message: impl Into<String>) {
        if self.recording {
            self.successes.push(message.into());
        }
    }

    pub(crate) fn into_messages(self) -> (Vec<String>, Vec<String>) {
        (self.failures, self.successes)
    }
}

/// Adapter giving a closure guard an explicit label.
pub struct NamedGuard<O: Stateful> {
    label: String,
    predicate: Box<dyn Fn(&mut GuardContext<'_, O>) -> bool + Send + Sync>,
}

impl<O: Stateful> NamedGuard<O> {
    /// Wrap a predicate closure under a label for the query surface.
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&mut GuardContext<'_, O>) -> bool + Send + Sync + 'static,
    {
        NamedGuard {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl<O: Stateful> Guard<O> for NamedGuard<O> {
    fn check(&self, ctx: &mut GuardContext<'_, O>) -> bool {
        (self.predicate)(ctx)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
