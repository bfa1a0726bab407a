//! Transition execution.
//!
//! One pipeline run is one attempt: resolve the requested token, look up the
//! rule, check the param contract, walk the guard chain, apply the action,
//! walk the concluder chain, and on a concluder failure undo everything that
//! already succeeded, in strict reverse order. The pipeline reports soft
//! outcomes; converting them to hard errors is the façade's job.

pub mod error;
pub mod outcome;

pub use error::TransitionError;
pub use outcome::{AttemptPhase, Outcome, Rejection};

use crate::capability::{ConcluderContext, GuardContext};
use crate::core::{Params, RuleRegistry, StateStore, StateToken, Stateful, TransitionRule};
use tracing::{debug, trace};
use uuid::Uuid;

/// Executes transition attempts against a store and a rule set.
pub struct TransitionPipeline<'a, O: Stateful> {
    store: &'a StateStore,
    registry: &'a RuleRegistry<O>,
}

/// Ephemeral per-call record; discarded when the attempt ends.
struct Attempt {
    id: Uuid,
    phase: AttemptPhase,
}

impl Attempt {
    fn start() -> Self {
        Attempt {
            id: Uuid::new_v4(),
            phase: AttemptPhase::Idle,
        }
    }

    fn advance(&mut self, phase: AttemptPhase) {
        self.phase = phase;
        trace!(attempt = %self.id, phase = ?self.phase, "attempt phase");
    }
}

/// One completed step of the attempt chain, as the rollback walker sees it.
///
/// Today each top-level call produces exactly one step; the walker is still
/// written over a list so reverse-order undo covers chained steps unchanged.
struct StepRecord<'r, O: Stateful> {
    rule: &'r TransitionRule<O>,
    prior: StateToken,
    desired: StateToken,
    completed_concluders: Vec<usize>,
}

impl<'a, O: Stateful> TransitionPipeline<'a, O> {
    pub fn new(store: &'a StateStore, registry: &'a RuleRegistry<O>) -> Self {
        TransitionPipeline { store, registry }
    }

    /// Execute one transition attempt.
    ///
    /// Returns `Err` only for fatal programming errors (an undeclared
    /// token); every other failure is a soft [`Outcome::Rejected`].
    pub fn run(
        &self,
        object: &mut O,
        requested: &StateToken,
        params: &Params,
    ) -> Result<Outcome, TransitionError> {
        let mut attempt = Attempt::start();
        attempt.advance(AttemptPhase::Resolving);

        if !self.registry.is_declared(requested) {
            return Err(TransitionError::UnknownState {
                token: requested.clone(),
            });
        }

        let current = self.store.read(object);
        let Some(rule) = self.registry.resolve(&current, requested) else {
            debug!(from = %current, to = %requested, "no matching rule");
            return Ok(Outcome::Rejected {
                attempt: attempt.id,
                rejection: Rejection::NoMatchingRule {
                    from: current,
                    to: requested.clone(),
                },
            });
        };

        attempt.advance(AttemptPhase::ParamCheck);
        if let Some(rejection) = check_params(rule, params, object) {
            attempt.advance(AttemptPhase::Failed);
            return Ok(Outcome::Rejected {
                attempt: attempt.id,
                rejection,
            });
        }

        attempt.advance(AttemptPhase::Guarding);
        for guard in &rule.guards {
            let mut ctx = GuardContext::live(&*object, requested, params);
            let ok = guard.check(&mut ctx);
            if ok {
                guard.passed(&mut ctx);
            } else {
                guard.failed(&mut ctx);
            }
            let (failures, successes) = ctx.into_messages();
            object.failure_messages_mut().extend(failures);
            object.success_messages_mut().extend(successes);

            if !ok {
                debug!(guard = guard.label(), from = %current, to = %requested, "guard refused");
                attempt.advance(AttemptPhase::Failed);
                return Ok(Outcome::Rejected {
                    attempt: attempt.id,
                    rejection: Rejection::GuardRefused {
                        guard: guard.label().to_string(),
                    },
                });
            }
        }

        attempt.advance(AttemptPhase::Acting);
        let mut step = StepRecord {
            rule,
            prior: current.clone(),
            desired: requested.clone(),
            completed_concluders: Vec::new(),
        };
        rule.action.call(self.store, object, requested);
        trace!(from = %current, to = %requested, "state applied");

        attempt.advance(AttemptPhase::Concluding);
        for (index, concluder) in rule.concluders.iter().enumerate() {
            let ok = {
                let mut ctx = ConcluderContext::forward(object, &step.prior, params);
                concluder.call(&mut ctx)
            };
            if ok {
                step.completed_concluders.push(index);
                continue;
            }

            debug!(concluder = concluder.label(), "concluder refused, rolling back");
            attempt.advance(AttemptPhase::RollingBack);
            let refused = concluder.label().to_string();
            self.rollback(object, &[step], params);
            attempt.advance(AttemptPhase::Failed);
            return Ok(Outcome::Rejected {
                attempt: attempt.id,
                rejection: Rejection::ConcluderRefused { concluder: refused },
            });
        }

        attempt.advance(AttemptPhase::Committed);
        Ok(Outcome::Complete {
            attempt: attempt.id,
            from: current,
            to: requested.clone(),
        })
    }

    /// Undo every successfully completed step, last step first.
    ///
    /// Within a step: already-succeeded concluders undo in reverse of their
    /// forward order (a failed concluder never undoes itself), then the
    /// step's action undoes. Undo failures go to the failure log and nothing
    /// else; the attempt stays failed.
    fn rollback(&self, object: &mut O, steps: &[StepRecord<'_, O>], params: &Params) {
        for step in steps.iter().rev() {
            for &index in step.completed_concluders.iter().rev() {
                let concluder = &step.rule.concluders[index];
                let result = {
                    let mut ctx = ConcluderContext::undo(object, &step.desired, params);
                    concluder.undo(&mut ctx)
                };
                if let Err(error) = result {
                    debug!(concluder = concluder.label(), %error, "undo failed");
                    object
                        .failure_messages_mut()
                        .push(format!("rollback of {} failed: {}", concluder.label(), error));
                }
            }
            if let Err(error) = step.rule.action.undo(self.store, object, &step.prior) {
                debug!(action = step.rule.action.label(), %error, "action undo failed");
                object.failure_messages_mut().push(format!(
                    "rollback of {} failed: {}",
                    step.rule.action.label(),
                    error
                ));
            }
        }
    }
}

/// Enforce the rule's param contract, logging the rejection message.
fn check_params<O: Stateful>(
    rule: &TransitionRule<O>,
    params: &Params,
    object: &mut O,
) -> Option<Rejection> {
    let missing: Vec<String> = rule
        .required_params
        .iter()
        .filter(|key| !params.contains(key))
        .cloned()
        .collect();
    if !missing.is_empty() {
        object
            .failure_messages_mut()
            .push(format!("Missing params: {}", missing.join(", ")));
        return Some(Rejection::MissingParams { keys: missing });
    }

    if rule.has_param_contract() {
        let unexpected: Vec<String> = params
            .keys()
            .filter(|key| {
                !rule.allowed_params.iter().any(|allowed| allowed == key)
                    && !rule.required_params.iter().any(|required| required == key)
            })
            .map(str::to_string)
            .collect();
        if !unexpected.is_empty() {
            object
                .failure_messages_mut()
                .push(format!("Params not allowed: {}", unexpected.join(", ")));
            return Some(Rejection::UnexpectedParams { keys: unexpected });
        }
    }

    None
}
