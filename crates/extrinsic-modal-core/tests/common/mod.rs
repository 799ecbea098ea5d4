#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use extrinsic_modal_core::{
    AccountId, ModalConfig, ModalEvent, OutcomeReply, SubmissionPort, SubmissionRequest,
    TransactionModalController, TxCall,
};
use serde_json::json;

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

pub type EventLog = Rc<RefCell<Vec<ModalEvent>>>;

/// Holds replies until the test decides how each submission ends.
#[derive(Default)]
pub struct ManualPort {
    pending: RefCell<Vec<(SubmissionRequest, OutcomeReply)>>,
}

impl ManualPort {
    pub fn take_one(&self) -> (SubmissionRequest, OutcomeReply) {
        self.pending
            .borrow_mut()
            .pop()
            .expect("a dispatched submission")
    }

    pub fn dispatched(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl SubmissionPort for ManualPort {
    fn dispatch(&self, request: SubmissionRequest, reply: OutcomeReply) {
        self.pending.borrow_mut().push((request, reply));
    }
}

pub fn transfer() -> TxCall {
    TxCall::named("balances", "transfer", json!([BOB, 1_000_000_000_000u64]))
}

pub fn alice_transfer() -> ModalConfig {
    ModalConfig::new(transfer()).with_account(Some(account(ALICE)))
}

pub fn account(id: &str) -> AccountId {
    AccountId::from(id)
}

pub fn observed(config: ModalConfig) -> (TransactionModalController, EventLog) {
    let events: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let modal = TransactionModalController::new(config)
        .with_observer(move |event: &ModalEvent| sink.borrow_mut().push(event.clone()));
    (modal, events)
}
