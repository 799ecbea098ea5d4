#![allow(dead_code)]

use serde_json::json;

use extrinsic_modal_adapters::{
    DevAccount, KdfParams, KeyringAdapter, LocalSubmitter, ModalAdapterConfig, SubmissionLedger,
};
use extrinsic_modal_core::{AccountId, TxCall};

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
pub const CHARLIE: &str = "5FLSigC9HGRKVhB9FiEo4Y3koPsNmBmLJbpXg2mp1hXcS59Y";

pub const FAST_KDF: KdfParams = KdfParams {
    memory_kib: 8,
    iterations: 1,
};

pub fn dev_accounts() -> Vec<DevAccount> {
    ModalAdapterConfig::default().dev_accounts
}

pub fn keyring() -> KeyringAdapter {
    KeyringAdapter::with_dev_accounts(FAST_KDF, &dev_accounts()).expect("seed dev keyring")
}

pub fn submitter(keyring: &KeyringAdapter, password: &str) -> (LocalSubmitter, SubmissionLedger) {
    let ledger = SubmissionLedger::default();
    let submitter = LocalSubmitter::new(keyring.clone(), ledger.clone(), password);
    (submitter, ledger)
}

pub fn account(raw: &str) -> AccountId {
    AccountId::from(raw)
}

pub fn transfer() -> TxCall {
    TxCall::named("balances", "transfer", json!([BOB, 1_000_000_000_000u64]))
}
