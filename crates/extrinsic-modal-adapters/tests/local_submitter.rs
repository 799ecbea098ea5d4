mod common;

use serde_json::json;

use extrinsic_modal_adapters::{RecordingObserver, StaticTranslator};
use extrinsic_modal_core::{
    LabelSlot, ModalConfig, ModalEvent, ModalPhase, PortError, Signer, SubmissionOutcome,
    SubmissionRequest, SubmissionTicket, TransactionModalController, Translate, TxCall,
};

use common::{account, keyring, submitter, transfer, ALICE, BOB, CHARLIE};

fn request(signer: Signer, call: TxCall) -> SubmissionRequest {
    SubmissionRequest {
        ticket: SubmissionTicket(1),
        signer,
        call,
    }
}

#[test]
fn signed_transfer_is_recorded_with_signature_and_hash() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "alice");

    let extrinsic = submitter
        .sign_and_record(&request(Signer::Account(account(ALICE)), transfer()))
        .expect("sign transfer");

    assert_eq!(extrinsic.call, "balances.transfer");
    let signature = extrinsic.signature.as_deref().expect("signed");
    assert!(signature.starts_with("0x"));
    assert_eq!(signature.len(), 2 + 64);
    assert_eq!(extrinsic.hash.len(), 2 + 64);
    assert_eq!(
        ledger.last().expect("ledger").expect("one entry"),
        extrinsic
    );
}

#[test]
fn ledger_finds_entries_by_ticket() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "alice");
    let alice = || Signer::Account(account(ALICE));

    let first = submitter
        .sign_and_record(&SubmissionRequest {
            ticket: SubmissionTicket(1),
            signer: alice(),
            call: transfer(),
        })
        .expect("first");
    let second = submitter
        .sign_and_record(&SubmissionRequest {
            ticket: SubmissionTicket(2),
            signer: alice(),
            call: TxCall::named("system", "remark", json!(["0x01"])),
        })
        .expect("second");

    assert_eq!(ledger.find(SubmissionTicket(1)).expect("ledger"), Some(first));
    assert_eq!(ledger.find(SubmissionTicket(2)).expect("ledger"), Some(second));
    assert_eq!(ledger.find(SubmissionTicket(3)).expect("ledger"), None);
}

#[test]
fn signing_is_deterministic_per_account() {
    let keyring = keyring();
    let (alice, _) = submitter(&keyring, "alice");
    let (bob, _) = submitter(&keyring, "bob");

    let first = alice
        .sign_and_record(&request(Signer::Account(account(ALICE)), transfer()))
        .expect("first");
    let again = alice
        .sign_and_record(&request(Signer::Account(account(ALICE)), transfer()))
        .expect("again");
    let other = bob
        .sign_and_record(&request(Signer::Account(account(BOB)), transfer()))
        .expect("bob");

    assert_eq!(first.hash, again.hash);
    assert_ne!(first.hash, other.hash);
}

#[test]
fn wrong_password_becomes_failed_outcome() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "not-alice");

    let outcome = submitter.execute(&request(Signer::Account(account(ALICE)), transfer()));

    assert_eq!(outcome, SubmissionOutcome::Failure("WrongPassword".to_owned()));
    assert!(ledger.entries().expect("ledger").is_empty());
}

#[test]
fn unknown_signer_is_not_found() {
    let keyring = keyring();
    let (submitter, _) = submitter(&keyring, "charlie");
    let err = submitter
        .sign_and_record(&request(Signer::Account(account(CHARLIE)), transfer()))
        .expect_err("charlie is not in the keyring");
    assert!(matches!(err, PortError::NotFound(_)));
}

#[test]
fn unsigned_call_skips_the_keyring() {
    let keyring = keyring();
    let (submitter, _) = submitter(&keyring, "");
    let call = TxCall::named("timestamp", "set", json!([1_700_000_000_000u64]));

    let extrinsic = submitter
        .sign_and_record(&request(Signer::Unsigned, call))
        .expect("unsigned");

    assert_eq!(extrinsic.signer, Signer::Unsigned);
    assert!(extrinsic.signature.is_none());
}

#[test]
fn malformed_calls_are_rejected_before_signing() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "alice");
    let alice = Signer::Account(account(ALICE));

    let scalar_params = TxCall::named("balances", "transfer", json!("oops"));
    assert!(matches!(
        submitter.sign_and_record(&request(alice.clone(), scalar_params)),
        Err(PortError::Validation(_))
    ));

    let not_hex = TxCall::prebuilt(json!("0xzz"));
    assert!(matches!(
        submitter.sign_and_record(&request(alice.clone(), not_hex)),
        Err(PortError::Validation(_))
    ));

    let prebuilt = TxCall::prebuilt(json!("0x0400ff"));
    let extrinsic = submitter
        .sign_and_record(&request(alice, prebuilt))
        .expect("prebuilt");
    assert_eq!(extrinsic.call, "prebuilt");
    assert_eq!(ledger.entries().expect("ledger").len(), 1);
}

#[test]
fn modal_round_trip_through_local_submitter() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "alice");
    let observer = RecordingObserver::default();
    let mut modal = TransactionModalController::new(
        ModalConfig::new(transfer()).with_account(Some(account(ALICE))),
    )
    .with_observer(observer.clone());

    modal.open();
    modal.submit(&submitter).expect("submit");

    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert_eq!(
        observer.names(),
        vec!["opened", "submit-requested", "succeeded"]
    );
    assert_eq!(ledger.entries().expect("ledger").len(), 1);
}

#[test]
fn modal_reports_wrong_password_and_stays_open() {
    let keyring = keyring();
    let (submitter, ledger) = submitter(&keyring, "guess");
    let observer = RecordingObserver::default();
    let mut modal = TransactionModalController::new(ModalConfig::new(transfer()))
        .with_observer(observer.clone());

    modal.open();
    modal
        .select_account(Some(account(BOB)))
        .expect("select bob");
    observer.clear();
    modal.submit(&submitter).expect("submit");

    assert_eq!(modal.phase(), ModalPhase::OpenIdle);
    assert_eq!(
        observer.events(),
        vec![
            ModalEvent::SubmitRequested,
            ModalEvent::Failed("WrongPassword".to_owned())
        ]
    );
    assert!(ledger.entries().expect("ledger").is_empty());
}

#[test]
fn translator_table_falls_back_to_key() {
    let table = r#"{"Submit": "Einreichen", "Cancel": "Abbrechen"}"#;
    let translator = StaticTranslator::from_json(table).expect("parse table");
    assert_eq!(translator.len(), 2);
    assert_eq!(translator.translate("Submit"), "Einreichen");
    assert_eq!(
        translator.translate(LabelSlot::Header.default_key()),
        "Submit signed extrinsic"
    );
    assert!(StaticTranslator::from_json("[1, 2]").is_err());
}
