pub mod account;
pub mod controller;
pub mod domain;
pub mod error;
pub mod labels;
pub mod outcome;
pub mod ports;
pub mod state_machine;
pub mod submission;
pub mod visibility;

pub use account::AccountSelector;
pub use controller::{
    AccountFieldView, ModalConfig, ModalView, SubmitButtonView, TransactionModalController,
};
pub use domain::{
    AccountId, ModalEvent, Ownership, Prop, Signer, SubmissionOutcome, SubmissionRequest,
    SubmissionTicket, TxCall,
};
pub use error::ModalError;
pub use labels::{LabelOverrides, LabelSlot, Translate, Untranslated};
pub use outcome::{Completion, OutcomeMailbox, OutcomeReply, ABANDONED_REASON};
pub use ports::{AccountResolutionPort, ModalObserver, Notifier, PortError, SubmissionPort};
pub use state_machine::{
    derive_initial_phase, modal_transition, ModalAction, ModalPhase, StateTransition,
};
pub use submission::{BusySubmissionGuard, SubmitGate};
pub use visibility::VisibilityController;
