use chrono::NaiveDate;
use mealsub_catalog::Customer;
use mealsub_shared::UploadedFile;
use mealsub_wizard::{Step, StepStatus, WizardAction, WizardController, WizardDraft, reduce};

fn today() -> NaiveDate {
    "2026-08-07".parse().unwrap()
}

fn draft_with_customer() -> WizardDraft {
    let mut draft = WizardDraft::default();
    reduce(
        &mut draft,
        WizardAction::SelectCustomer(Customer {
            id: 11,
            name: "Sara".to_string(),
            phone: "01001234567".to_string(),
            email: String::new(),
            address: String::new(),
        }),
    );
    draft
}

#[test]
fn next_on_empty_customer_step_records_error_and_stays() {
    let mut controller = WizardController::new();
    let draft = WizardDraft::default();

    assert!(!controller.next(&draft, today()));

    assert_eq!(controller.current(), Step::Customer);
    let errors = controller.errors_for(Step::Customer).expect("errors recorded");
    assert!(errors.contains_key("customer"));
    assert_eq!(controller.status(Step::Customer), StepStatus::Error);
}

#[test]
fn next_advances_past_a_valid_customer_step_and_clears_errors() {
    let mut controller = WizardController::new();

    assert!(!controller.next(&WizardDraft::default(), today()));
    assert!(controller.next(&draft_with_customer(), today()));

    assert_eq!(controller.current(), Step::Plan);
    assert!(controller.errors_for(Step::Customer).is_none());
    assert_eq!(controller.status(Step::Customer), StepStatus::Completed);
    assert_eq!(controller.status(Step::Preview), StepStatus::Upcoming);
}

#[test]
fn plan_step_is_self_gated_and_never_validated_by_the_controller() {
    let mut controller = WizardController::new();
    controller.next(&draft_with_customer(), today());
    assert_eq!(controller.current(), Step::Plan);

    // The draft has no plan data at all; the plan step validated itself
    // before signalling advance, so the controller lets it through.
    assert!(controller.next(&WizardDraft::default(), today()));
    assert_eq!(controller.current(), Step::Preview);
}

#[test]
fn preview_step_has_no_rules() {
    let mut controller = WizardController::new();
    controller.next(&draft_with_customer(), today());
    controller.next(&WizardDraft::default(), today());
    assert_eq!(controller.current(), Step::Preview);

    assert!(controller.next(&WizardDraft::default(), today()));
    assert_eq!(controller.current(), Step::Billing);
}

#[test]
fn billing_step_requires_payment_method_and_invoice_unless_sponsor() {
    let mut controller = WizardController::new();
    controller.next(&draft_with_customer(), today());
    controller.next(&WizardDraft::default(), today());
    controller.next(&WizardDraft::default(), today());
    assert_eq!(controller.current(), Step::Billing);

    let mut draft = draft_with_customer();
    assert!(!controller.next(&draft, today()));
    let errors = controller.errors_for(Step::Billing).expect("billing errors");
    assert!(errors.contains_key("paymentMethodId"));
    assert!(errors.contains_key("invoiceFile"));

    reduce(&mut draft, WizardAction::SetSponsor(true));
    assert!(controller.next(&draft, today()));
    assert_eq!(controller.current(), Step::Review);
}

#[test]
fn review_step_re_runs_customer_and_billing_rules_plus_terms() {
    let mut controller = WizardController::starting_at(Some(5));
    let mut draft = draft_with_customer();
    reduce(&mut draft, WizardAction::SetPaymentMethod(Some(1)));
    reduce(
        &mut draft,
        WizardAction::AttachInvoiceFile(Some(UploadedFile {
            file_name: "invoice.pdf".to_string(),
            content: vec![1, 2],
        })),
    );

    assert!(!controller.next(&draft, today()));
    let errors = controller.errors_for(Step::Review).expect("review errors");
    assert!(errors.contains_key("termsAccepted"));

    reduce(&mut draft, WizardAction::SetTermsAccepted(true));
    assert!(controller.next(&draft, today()), "final gate passes");
    assert_eq!(controller.current(), Step::Review, "review is the last step");
}

#[test]
fn backward_motion_is_always_allowed_and_never_validates() {
    let mut controller = WizardController::starting_at(Some(4));

    controller.previous(None);
    assert_eq!(controller.current(), Step::Preview);

    // A target that is not an earlier step falls back to single-step back.
    controller.previous(Some(Step::Review));
    assert_eq!(controller.current(), Step::Plan);

    controller.previous(Some(Step::Customer));
    assert_eq!(controller.current(), Step::Customer);

    // Nothing before the first step.
    controller.previous(None);
    assert_eq!(controller.current(), Step::Customer);
}

#[test]
fn jump_only_reaches_current_earlier_or_completed_steps() {
    let mut controller = WizardController::new();
    controller.next(&draft_with_customer(), today());
    assert_eq!(controller.current(), Step::Plan);

    controller.jump(Step::Billing);
    assert_eq!(controller.current(), Step::Plan, "forward jump ignored");

    controller.jump(Step::Customer);
    assert_eq!(controller.current(), Step::Customer, "completed step reachable");

    // The plan step was reached but never passed, so a forward jump back to
    // it is ignored; the customer step must be re-advanced through.
    controller.jump(Step::Plan);
    assert_eq!(controller.current(), Step::Customer);

    controller.next(&draft_with_customer(), today());
    assert_eq!(controller.current(), Step::Plan);
}

#[test]
fn finish_is_terminal() {
    let mut controller = WizardController::starting_at(Some(5));
    controller.finish();

    assert!(controller.is_finished());

    controller.jump(Step::Customer);
    controller.previous(None);
    assert!(!controller.next(&draft_with_customer(), today()));
    assert_eq!(controller.current(), Step::Review);
}

#[test]
fn fatal_submission_failure_returns_to_billing() {
    let mut controller = WizardController::starting_at(Some(5));
    controller.return_to_billing();
    assert_eq!(controller.current(), Step::Billing);
}

#[test]
fn resumed_controller_treats_passed_steps_as_completed() {
    let controller = WizardController::starting_at(Some(3));

    assert_eq!(controller.current(), Step::Preview);
    assert_eq!(controller.status(Step::Customer), StepStatus::Completed);
    assert_eq!(controller.status(Step::Plan), StepStatus::Completed);
    assert_eq!(controller.status(Step::Preview), StepStatus::Current);
    assert_eq!(controller.status(Step::Billing), StepStatus::Upcoming);
}
