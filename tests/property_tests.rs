//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use statecraft::builder::RuleBuilder;
use statecraft::capability::{Concluder, ConcluderContext, GuardContext, UndoError};
use statecraft::core::{
    Params, RuleRegistry, StateRepr, StateStore, StateToken, Stateful, TransitionLog,
    TransitionRecord,
};
use statecraft::pipeline::TransitionPipeline;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Record {
    fields: HashMap<String, String>,
    failures: Vec<String>,
    successes: Vec<String>,
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
}

struct CountingConcluder {
    name: String,
    ok: bool,
    undos: Arc<Mutex<Vec<String>>>,
}

impl Concluder<Record> for CountingConcluder {
    fn call(&self, _ctx: &mut ConcluderContext<'_, Record>) -> bool {
        self.ok
    }

    fn undo(&self, _ctx: &mut ConcluderContext<'_, Record>) -> Result<(), UndoError> {
        self.undos.lock().unwrap().push(self.name.clone());
        Ok(())
    }

    fn label(&self) -> &str {
        &self.name
    }
}

prop_compose! {
    fn token_name()(name in "[a-z]{1,12}") -> String {
        name
    }
}

prop_compose! {
    fn repr()(token in any::<bool>()) -> StateRepr {
        if token {
            StateRepr::Token
        } else {
            StateRepr::Text
        }
    }
}

proptest! {
    #[test]
    fn store_roundtrips_any_token(name in token_name(), repr in repr()) {
        let store = StateStore::new("state", repr, StateToken::unset());
        let mut record = Record::default();
        let token = StateToken::new(name);

        store.write(&mut record, &token);
        prop_assert_eq!(store.read(&record), token);
    }

    #[test]
    fn reads_normalize_across_representations(name in token_name()) {
        let text_store = StateStore::new("state", StateRepr::Text, StateToken::unset());
        let token_store = StateStore::new("state", StateRepr::Token, StateToken::unset());
        let token = StateToken::new(name);

        let mut record = Record::default();
        token_store.write(&mut record, &token);
        prop_assert_eq!(text_store.read(&record), token.clone());

        let mut record = Record::default();
        text_store.write(&mut record, &token);
        prop_assert_eq!(token_store.read(&record), token);
    }

    #[test]
    fn unset_state_always_reads_as_the_initial_token(initial in token_name()) {
        let initial = StateToken::new(initial);
        let store = StateStore::new("state", StateRepr::Text, initial.clone());
        let record = Record::default();
        prop_assert_eq!(store.read(&record), initial);
        prop_assert!(record.fields.is_empty());
    }

    #[test]
    fn resolve_is_deterministic(current in token_name(), requested in token_name()) {
        let mut registry: RuleRegistry<Record> = RuleRegistry::new();
        registry.register(
            RuleBuilder::new().from("parked").to("idling").build().unwrap()
        ).unwrap();
        registry.register(
            RuleBuilder::new().from_any().to("crashed").build().unwrap()
        ).unwrap();

        let current = StateToken::new(current);
        let requested = StateToken::new(requested);
        let first = registry.resolve(&current, &requested).map(|r| r.destination().clone());
        let second = registry.resolve(&current, &requested).map(|r| r.destination().clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn concrete_source_always_beats_the_wildcard(current in token_name()) {
        let mut registry: RuleRegistry<Record> = RuleRegistry::new();
        registry.register(
            RuleBuilder::new().from_any().to("done").build().unwrap()
        ).unwrap();
        registry.register(
            RuleBuilder::new().from(current.as_str()).to("done").build().unwrap()
        ).unwrap();

        let resolved = registry
            .resolve(&StateToken::new(current), &StateToken::new("done"))
            .expect("wildcard guarantees a match");
        prop_assert!(!resolved.sources().is_any());
    }

    #[test]
    fn capability_checks_never_touch_the_logs(pass in any::<bool>()) {
        let mut registry: RuleRegistry<Record> = RuleRegistry::new();
        registry.register(
            RuleBuilder::new()
                .from("a")
                .to("b")
                .guard(move |ctx: &mut GuardContext<'_, Record>| {
                    ctx.log_failure("noisy");
                    ctx.log_success("noisy");
                    pass
                })
                .build()
                .unwrap()
        ).unwrap();

        let record = Record::default();
        let allowed = registry.can_transition(&record, &StateToken::new("a"), &StateToken::new("b"));
        prop_assert_eq!(allowed, pass);
        prop_assert!(record.failure_messages().is_empty());
        prop_assert!(record.success_messages().is_empty());
    }

    #[test]
    fn params_preserve_insertion_order(keys in prop::collection::vec("[a-z]{1,6}", 1..8)) {
        let mut params = Params::new();
        let mut expected: Vec<String> = Vec::new();
        for key in &keys {
            params.insert(key.clone(), 1);
            if !expected.contains(key) {
                expected.push(key.clone());
            }
        }
        let seen: Vec<String> = params.keys().map(str::to_string).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn log_path_length_tracks_the_records(count in 0usize..6) {
        let mut log = TransitionLog::new();
        for i in 0..count {
            log = log.record(TransitionRecord {
                from: StateToken::new(format!("s{i}")),
                to: StateToken::new(format!("s{}", i + 1)),
                timestamp: chrono::Utc::now(),
                attempt: uuid::Uuid::new_v4(),
            });
        }
        let expected = if count == 0 { 0 } else { count + 1 };
        prop_assert_eq!(log.path().len(), expected);
    }

    #[test]
    fn rollback_restores_the_prior_state(succeeding in 0usize..5) {
        let undos: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let mut builder: RuleBuilder<Record> = RuleBuilder::new().from("parked").to("idling");
        for i in 0..succeeding {
            builder = builder.concluder(CountingConcluder {
                name: format!("c{i}"),
                ok: true,
                undos: Arc::clone(&undos),
            });
        }
        builder = builder.concluder(CountingConcluder {
            name: "failing".to_string(),
            ok: false,
            undos: Arc::clone(&undos),
        });

        let mut registry: RuleRegistry<Record> = RuleRegistry::new();
        registry.register(builder.build().unwrap()).unwrap();

        let store = StateStore::new("state", StateRepr::Text, StateToken::unset());
        let mut record = Record::default();
        store.write(&mut record, &StateToken::new("parked"));

        let pipeline = TransitionPipeline::new(&store, &registry);
        let outcome = pipeline
            .run(&mut record, &StateToken::new("idling"), &Params::new())
            .unwrap();

        prop_assert!(!outcome.is_complete());
        prop_assert_eq!(store.read(&record), StateToken::new("parked"));

        // Succeeded concluders undo in reverse order; the failed one never
        // undoes itself.
        let expected: Vec<String> = (0..succeeding).rev().map(|i| format!("c{i}")).collect();
        prop_assert_eq!(&*undos.lock().unwrap(), &expected);
    }
}
