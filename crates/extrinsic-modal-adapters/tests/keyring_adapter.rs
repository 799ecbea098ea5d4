mod common;

use extrinsic_modal_adapters::{KeyringAdapter, ModalAdapterConfig};
use extrinsic_modal_core::{AccountResolutionPort, PortError};

use common::{account, keyring, ALICE, BOB, CHARLIE, FAST_KDF};

#[test]
fn dev_accounts_are_listed_in_address_order() {
    let keyring = keyring();
    let names: Vec<String> = keyring
        .accounts()
        .expect("list accounts")
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    // BOB's address sorts before ALICE's.
    assert_eq!(names, vec!["Bob".to_owned(), "Alice".to_owned()]);
}

#[test]
fn unlock_returns_secret_for_correct_password() {
    let keyring = keyring();
    let unlocked = keyring.unlock(&account(ALICE), "alice").expect("unlock alice");
    assert_eq!(unlocked.entry.name, "Alice");
    assert_eq!(unlocked.secret, b"//Alice".to_vec());
}

#[test]
fn unlock_with_wrong_password_is_rejected() {
    let keyring = keyring();
    let err = keyring
        .unlock(&account(ALICE), "bob")
        .expect_err("wrong password must fail");
    assert_eq!(err, PortError::WrongPassword);
    assert_eq!(err.to_string(), "WrongPassword");
}

#[test]
fn unknown_account_is_not_found() {
    let keyring = keyring();
    assert!(keyring
        .resolve(&account(CHARLIE))
        .expect("resolve charlie")
        .is_none());
    let err = keyring
        .unlock(&account(CHARLIE), "charlie")
        .expect_err("unknown account must fail");
    assert!(matches!(err, PortError::NotFound(_)));
}

#[test]
fn change_password_reseals_under_new_password() {
    let keyring = keyring();
    let bob = account(BOB);
    keyring
        .change_password(&bob, "bob", "hunter2")
        .expect("change password");

    assert_eq!(
        keyring.unlock(&bob, "bob").expect_err("old password"),
        PortError::WrongPassword
    );
    let unlocked = keyring.unlock(&bob, "hunter2").expect("new password");
    assert_eq!(unlocked.secret, b"//Bob".to_vec());
}

#[test]
fn change_password_requires_old_password_and_non_empty_new() {
    let keyring = keyring();
    let alice = account(ALICE);
    assert_eq!(
        keyring
            .change_password(&alice, "wrong", "next")
            .expect_err("old password checked"),
        PortError::WrongPassword
    );
    assert!(matches!(
        keyring.change_password(&alice, "alice", ""),
        Err(PortError::Validation(_))
    ));
    keyring.unlock(&alice, "alice").expect("unchanged");
}

#[test]
fn clones_share_one_store() {
    let keyring = KeyringAdapter::new(FAST_KDF);
    let other = keyring.clone();
    other
        .add_account(account(CHARLIE), "Charlie", b"//Charlie", "charlie")
        .expect("add charlie");
    let entry = keyring
        .resolve(&account(CHARLIE))
        .expect("resolve")
        .expect("charlie present");
    assert_eq!(entry.name, "Charlie");
}

#[test]
fn adapter_config_fills_missing_fields_with_defaults() {
    let cfg = ModalAdapterConfig::from_json(r#"{"submissionLatencyMs": 0, "kdfIterations": 1}"#)
        .expect("parse config");
    assert_eq!(cfg.submission_latency_ms, 0);
    assert_eq!(cfg.kdf_params().iterations, 1);
    assert_eq!(cfg.kdf_params().memory_kib, 19 * 1024);
    assert_eq!(cfg.dev_accounts.len(), 2);
    assert!(cfg.translations_path.is_none());

    assert!(matches!(
        ModalAdapterConfig::from_json("{\"kdfIterations\": \"two\"}"),
        Err(PortError::Validation(_))
    ));
}
