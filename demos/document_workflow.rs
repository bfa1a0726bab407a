//! Document Workflow State Machine
//!
//! This example demonstrates concluders, rollback on partial failure,
//! required params and hard failures on a document review workflow.
//!
//! Key concepts:
//! - Required params gating a transition
//! - Concluder chains with reverse-order rollback
//! - The built-in persistence concluder
//! - Hard mode errors carrying the failure log
//!
//! Run with: cargo run --example document_workflow

use statecraft::builder::RuleBuilder;
use statecraft::capability::{Concluder, ConcluderContext, SaveConcluder, UndoError};
use statecraft::core::Stateful;
use statecraft::machine::MachineDef;
use statecraft::params;
use std::sync::Arc;

#[derive(Default)]
struct Document {
    state: Option<String>,
    notified: Vec<String>,
    saved: usize,
    failures: Vec<String>,
    successes: Vec<String>,
}

impl Stateful for Document {
    fn read_field(&self, field: &str) -> Option<String> {
        match field {
            "state" => self.state.clone(),
            _ => None,
        }
    }

    fn write_field(&mut self, field: &str, value: String) {
        if field == "state" {
            self.state = Some(value);
        }
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
        self.saved += 1;
        Some(true)
    }
}

/// Notifies the reviewer on publish; withdraws the notification on undo.
struct NotifyReviewer;

impl Concluder<Document> for NotifyReviewer {
    fn call(&self, ctx: &mut ConcluderContext<'_, Document>) -> bool {
        let reviewer = ctx
            .params()
            .get("reviewer")
            .and_then(|v| v.as_str())
            .unwrap_or("nobody")
            .to_string();
        ctx.object_mut().notified.push(reviewer);
        ctx.log_success("reviewer notified");
        true
    }

    fn undo(&self, ctx: &mut ConcluderContext<'_, Document>) -> Result<(), UndoError> {
        ctx.object_mut().notified.pop();
        Ok(())
    }

    fn label(&self) -> &str {
        "notify-reviewer"
    }
}

/// Stands in for an archival push that is down today.
struct ArchiveCopy;

impl Concluder<Document> for ArchiveCopy {
    fn call(&self, ctx: &mut ConcluderContext<'_, Document>) -> bool {
        ctx.log_failure("archive service unavailable");
        false
    }

    fn label(&self) -> &str {
        "archive-copy"
    }
}

fn main() {
    println!("=== Document Workflow ===\n");

    let def = MachineDef::builder()
        .initial_state("draft")
        .hard_failures(true)
        .rule(
            RuleBuilder::new()
                .from("draft")
                .to("review")
                .require_params(["reviewer"])
                .concluder(NotifyReviewer)
                .concluder(SaveConcluder),
        )
        .unwrap()
        .rule(
            RuleBuilder::new()
                .from("review")
                .to("published")
                .concluder(NotifyReviewer)
                .concluder(ArchiveCopy),
        )
        .unwrap()
        .rule(RuleBuilder::new().from("review").to("draft"))
        .unwrap()
        .build()
        .unwrap();
    let def = Arc::new(def);

    let mut machine = def.bind(Document::default());
    println!("Initial state: {}", machine.current());

    // Required params are enforced before anything runs.
    match machine.transition("review") {
        Err(error) => println!("review without params -> {error}"),
        Ok(_) => unreachable!("missing params cannot pass"),
    }

    machine
        .transition_with("review", params! { "reviewer" => "sam" })
        .unwrap();
    println!(
        "review with reviewer -> state: {}, notified: {:?}, saves: {}",
        machine.current(),
        machine.object().notified,
        machine.object().saved
    );

    // The archive concluder fails, so the notification it follows is undone
    // and the state rolls back.
    match machine.transition("published") {
        Err(error) => println!("publish -> {error}"),
        Ok(_) => unreachable!("archive concluder always fails"),
    }
    println!(
        "after rollback -> state: {}, notified: {:?}",
        machine.current(),
        machine.object().notified
    );

    println!("\n=== Example Complete ===");
}
