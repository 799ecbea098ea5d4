use thiserror::Error;

use crate::domain::SubmissionTicket;

/// Caller misuse of the modal. None of these change modal state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("submission already in flight")]
    SubmissionInFlight,
    #[error("modal is not open")]
    NotOpen,
    #[error("submit is disabled")]
    SubmitDisabled,
    #[error("account selector is disabled")]
    SelectorDisabled,
    #[error("no submission in flight")]
    NothingInFlight,
    #[error("stale outcome for {got}, in flight: {expected}")]
    StaleOutcome {
        expected: SubmissionTicket,
        got: SubmissionTicket,
    },
}
