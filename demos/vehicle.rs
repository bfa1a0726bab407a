//! Vehicle State Machine
//!
//! This example demonstrates the core transition surface on a vehicle that
//! knows nothing about the machine driving it.
//!
//! Key concepts:
//! - Wildcard rules (any state can crash)
//! - Guards with failure messages
//! - Event aliases
//! - Soft failures and the failure log
//!
//! Run with: cargo run --example vehicle

use statecraft::builder::RuleBuilder;
use statecraft::capability::GuardContext;
use statecraft::core::Stateful;
use statecraft::machine::MachineDef;
use std::sync::Arc;

#[derive(Default)]
struct Vehicle {
    state: Option<String>,
    seatbelted: bool,
    failures: Vec<String>,
    successes: Vec<String>,
}

impl Stateful for Vehicle {
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
}

fn seatbelt_fastened(ctx: &mut GuardContext<'_, Vehicle>) -> bool {
    if ctx.object().seatbelted {
        true
    } else {
        ctx.log_failure("fasten the seatbelt first");
        false
    }
}

fn main() {
    println!("=== Vehicle State Machine ===\n");

    let def = MachineDef::builder()
        .initial_state("parked")
        .rule(
            RuleBuilder::new()
                .from("parked")
                .to("idling")
                .event("ignite")
                .guard(seatbelt_fastened),
        )
        .unwrap()
        .rule(RuleBuilder::new().from("idling").to("first_gear").event("shift_up"))
        .unwrap()
        .rule(RuleBuilder::new().from("first_gear").to("idling").event("shift_down"))
        .unwrap()
        .rule(RuleBuilder::new().from_any().to("crashed").event("crash"))
        .unwrap()
        .build()
        .unwrap();
    let def = Arc::new(def);

    let mut machine = def.bind(Vehicle::default());
    println!("Initial state: {}", machine.current());

    // Guard refuses until the seatbelt is on.
    let moved = machine.transition("idling").unwrap();
    println!("ignite without seatbelt -> {moved}");
    println!("failure log: {:?}", machine.object().failure_messages());

    machine.object_mut().seatbelted = true;
    let moved = machine.fire("ignite").unwrap();
    println!("ignite with seatbelt -> {moved}, state: {}", machine.current());

    machine.fire("shift_up").unwrap();
    println!("shift_up -> state: {}", machine.current());

    // Any state can crash.
    machine.fire("crash").unwrap();
    println!("crash -> state: {}", machine.current());

    // And nothing leads back out.
    let recovered = machine.transition("idling").unwrap();
    println!("idling after crash -> {recovered}");

    let path: Vec<&str> = machine.log().path().iter().map(|t| t.name()).collect();
    println!("\ncommitted path: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
}
