//! Checkpoint and Resume
//!
//! This example saves a half-completed wizard and resumes it in a fresh
//! controller, as a page reload would.
//!
//! Key concepts:
//! - Checkpoints carry the step, values, both error maps and the history
//! - Serialization formats (JSON for readability, bincode for compactness)
//! - Restoring into a controller built with the same step graph
//!
//! Run with: cargo run --example checkpoint_resume

use serde::{Deserialize, Serialize};
use stepwise::builder::StepGraph;
use stepwise::controller::{FormState, WizardController};
use stepwise::core::FieldErrors;
use stepwise::linear_wizard;
use stepwise::validation::Validator;
use stepwise::WizardCheckpoint;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Cargo {
    trade_id: String,
    grade: String,
    quantity: u32,
}

fn new_wizard() -> WizardController<Cargo, StepGraph<Cargo>> {
    let machine = linear_wizard! {
        SUMMARY_OF_TRADE => [tradeId],
        CARGO_MOVEMENTS => [grade, quantity],
        PARTICIPANTS => [applicantId],
        REVIEW => [],
    }
    .build()
    .unwrap();

    WizardController::builder()
        .initial_values(Cargo::default())
        .state_machine(machine)
        .validator(Validator::function(|values: &Cargo| {
            let mut errors = FieldErrors::new();
            if values.grade.is_empty() {
                errors.insert("grade", "'grade' should not be empty");
            }
            errors
        }))
        .on_submit(|_, _| {})
        .build()
        .unwrap()
}

fn main() {
    println!("=== Checkpoint and Resume ===\n");

    let mut wizard = new_wizard();
    let mut form = FormState::new();
    let mut values = Cargo {
        trade_id: "TRADE-2024-001".to_string(),
        ..Cargo::default()
    };

    wizard.next(&values, &mut form);
    values.grade = "BRENT".to_string();
    values.quantity = 600_000;
    let _ = wizard.validate_now(&values);
    wizard.next(&values, &mut form);
    println!("Working session is on {}", wizard.current_step());

    let checkpoint = wizard.checkpoint();
    let json = checkpoint.to_json().unwrap();
    let bytes = checkpoint.to_bytes().unwrap();
    println!("  [Checkpoint] {} ({} bytes JSON, {} bytes bincode)", checkpoint.id, json.len(), bytes.len());

    println!("\nResuming from JSON:");
    let mut resumed = new_wizard();
    match WizardCheckpoint::from_json(&json).and_then(|cp| resumed.restore(cp)) {
        Ok(()) => println!("  Restored at {} with grade {}", resumed.current_step(), resumed.values().grade),
        Err(e) => println!("  Restore failed: {}", e),
    }

    println!("\nResuming from bincode:");
    let mut resumed = new_wizard();
    match WizardCheckpoint::from_bytes(&bytes).and_then(|cp| resumed.restore(cp)) {
        Ok(()) => println!("  Restored at {} after {} step changes", resumed.current_step(), resumed.history().len()),
        Err(e) => println!("  Restore failed: {}", e),
    }

    println!("\nRestoring a step this wizard does not have:");
    let mut stale = wizard.checkpoint();
    stale.step = "LC_DOCUMENTS".to_string();
    let mut resumed = new_wizard();
    if let Err(e) = resumed.restore(stale) {
        println!("  Rejected: {}", e);
    }
    println!("  Still on {}", resumed.current_step());
}
