//! Letter of Credit Application
//!
//! This example walks a letter-of-credit application through its wizard steps.
//!
//! Key concepts:
//! - Schema validation scoped to the fields of the active step
//! - An on-next hook that derives fields and blocks on missing data
//! - Value-dependent routing with `next_when`
//! - The view model a renderer reads on every frame
//!
//! Run with: cargo run --example letter_of_credit

use serde::Serialize;
use serde_json::Value;
use stepwise::builder::StepGraph;
use stepwise::controller::{FormActions, FormState, WizardController};
use stepwise::core::FieldErrors;
use stepwise::validation::{FieldRule, ObjectSchema, SchemaRegistry, Validator};

const LC_SCHEMA: &str = "http://komgo.io/schema/lc/1";

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Application {
    trade_id: String,
    applicant_id: String,
    fees_payable_by: String,
    direct: bool,
    beneficiary_bank_id: Option<String>,
    currency: String,
    amount: f64,
}

fn steps() -> StepGraph<Application> {
    StepGraph::builder()
        .step("SUMMARY_OF_TRADE", |s| s.fields(["tradeId"]).next("PARTICIPANTS"))
        .step("PARTICIPANTS", |s| {
            s.fields(["applicantId", "feesPayableBy", "direct"])
                .previous("SUMMARY_OF_TRADE")
                .next_when(|v: &Application| v.direct, "LC_DETAILS")
                .next("ADVISING_BANK")
        })
        .step("ADVISING_BANK", |s| {
            s.fields(["beneficiaryBankId"])
                .previous("PARTICIPANTS")
                .next("LC_DETAILS")
        })
        .step("LC_DETAILS", |s| {
            s.fields(["currency", "amount"])
                .previous("PARTICIPANTS")
                .next("REVIEW")
        })
        .step("REVIEW", |s| s.previous("LC_DETAILS"))
        .initial("SUMMARY_OF_TRADE")
        .build()
        .unwrap()
}

fn schema() -> SchemaRegistry {
    SchemaRegistry::new().with_schema(
        LC_SCHEMA,
        ObjectSchema::new()
            .field("tradeId", [FieldRule::Required])
            .field("applicantId", [FieldRule::Required])
            .field(
                "feesPayableBy",
                [FieldRule::OneOf(vec![
                    "APPLICANT".into(),
                    "BENEFICIARY".into(),
                    "SPLIT".into(),
                ])],
            )
            .field("currency", [FieldRule::Required, FieldRule::MaxLength(3)])
            .field("amount", [FieldRule::Minimum(1.0)]),
    )
}

fn press_next(
    wizard: &mut WizardController<Application, StepGraph<Application>>,
    values: &Application,
    form: &mut FormState,
) {
    if let Err(errors) = wizard.validate_now(values) {
        form.errors = errors;
    }
    let from = wizard.current_step();
    let navigation = wizard.next(values, form);
    println!("  {} -> {} ({:?})", from, wizard.current_step(), navigation);

    for error in wizard.view(form).errors {
        println!("    ! {}", error.message);
    }
}

fn main() {
    println!("=== Letter of Credit Application ===\n");

    let mut wizard = WizardController::builder()
        .initial_values(Application::default())
        .state_machine(steps())
        .validator(Validator::schema(schema(), LC_SCHEMA))
        .on_next(
            |values: &Application, step: &str, set_field_value: &mut dyn FnMut(&str, Value)| {
                if step == "PARTICIPANTS" && values.direct {
                    set_field_value("beneficiaryBankId", Value::Null);
                }
                if step == "ADVISING_BANK" && values.beneficiary_bank_id.is_none() {
                    return FieldErrors::from_iter([(
                        "beneficiaryBankId",
                        "'beneficiaryBankId' should not be empty",
                    )]);
                }
                FieldErrors::new()
            },
        )
        .on_submit(|values: &Application, _form: &mut dyn FormActions| {
            println!("  Submitted {} for {} {}", values.trade_id, values.amount, values.currency);
        })
        .field_to_label(|_: &str, field: &str| match field {
            "tradeId" => "Trade".to_string(),
            "feesPayableBy" => "Fees payable by".to_string(),
            _ => String::new(),
        })
        .build()
        .unwrap();

    let mut form = FormState::new();
    let mut values = Application::default();

    println!("Step list:");
    for item in wizard.view(&form).steps {
        println!("  - {}", item.label);
    }
    println!();

    println!("Next without a trade:");
    press_next(&mut wizard, &values, &mut form);

    println!("\nNext with a trade:");
    values.trade_id = "TRADE-2024-001".to_string();
    press_next(&mut wizard, &values, &mut form);

    println!("\nNext with an unknown fee payer:");
    values.applicant_id = "applicant-1".to_string();
    values.fees_payable_by = "NOBODY".to_string();
    press_next(&mut wizard, &values, &mut form);

    println!("\nNext as a direct LC (skips the advising bank):");
    values.fees_payable_by = "SPLIT".to_string();
    values.direct = true;
    press_next(&mut wizard, &values, &mut form);

    println!("\nNext with terms:");
    values.currency = "USD".to_string();
    values.amount = 1_250_000.0;
    press_next(&mut wizard, &values, &mut form);

    let view = wizard.view(&form);
    if let Some(submit) = view.submit {
        println!("\nLast step reached, showing '{}'", submit.label);
        wizard.handle_submit(&values, &mut form);
    }

    println!("\nVisited: {}", wizard.history().path().join(" -> "));
}
