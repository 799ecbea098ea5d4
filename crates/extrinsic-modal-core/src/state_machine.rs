use serde::{Deserialize, Serialize};

use crate::domain::Ownership;
use crate::error::ModalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalPhase {
    Closed,
    OpenIdle,
    OpenBusy,
    /// Closed by the user or host while a submission is still outstanding.
    ClosedBusy,
}

impl ModalPhase {
    pub fn from_flags(is_open: bool, is_busy: bool) -> Self {
        match (is_open, is_busy) {
            (false, false) => ModalPhase::Closed,
            (true, false) => ModalPhase::OpenIdle,
            (true, true) => ModalPhase::OpenBusy,
            (false, true) => ModalPhase::ClosedBusy,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, ModalPhase::OpenIdle | ModalPhase::OpenBusy)
    }

    pub fn is_busy(self) -> bool {
        matches!(self, ModalPhase::OpenBusy | ModalPhase::ClosedBusy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalAction {
    Open,
    Close,
    SyncExternal(bool),
    BeginSubmission,
    SubmissionSucceeded,
    SubmissionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: ModalPhase,
    pub to: ModalPhase,
    pub reason: &'static str,
}

pub fn derive_initial_phase(external_open: Option<bool>) -> ModalPhase {
    match external_open {
        Some(true) => ModalPhase::OpenIdle,
        Some(false) | None => ModalPhase::Closed,
    }
}

pub fn modal_transition(
    from: ModalPhase,
    action: ModalAction,
    ownership: Ownership,
) -> Result<(ModalPhase, StateTransition), ModalError> {
    let busy = from.is_busy();
    let (to, reason) = match (action, ownership) {
        (ModalAction::Open, Ownership::Uncontrolled) => {
            (ModalPhase::from_flags(true, busy), "opened")
        }
        (ModalAction::Close, Ownership::Uncontrolled) => {
            (ModalPhase::from_flags(false, busy), "closed")
        }
        (ModalAction::Open | ModalAction::Close, Ownership::Controlled) => {
            (from, "host owns visibility")
        }
        (ModalAction::SyncExternal(open), Ownership::Controlled) => {
            (ModalPhase::from_flags(open, busy), "external sync")
        }
        (ModalAction::SyncExternal(_), Ownership::Uncontrolled) => {
            (from, "external sync ignored")
        }
        (ModalAction::BeginSubmission, _) => match from {
            ModalPhase::OpenIdle => (ModalPhase::OpenBusy, "submit requested"),
            ModalPhase::Closed => return Err(ModalError::NotOpen),
            ModalPhase::OpenBusy | ModalPhase::ClosedBusy => {
                return Err(ModalError::SubmissionInFlight)
            }
        },
        (ModalAction::SubmissionSucceeded, _) => match (from, ownership) {
            (ModalPhase::OpenBusy, Ownership::Uncontrolled) => {
                (ModalPhase::Closed, "succeeded, auto-close")
            }
            (ModalPhase::OpenBusy, Ownership::Controlled) => (ModalPhase::OpenIdle, "succeeded"),
            (ModalPhase::ClosedBusy, _) => (ModalPhase::Closed, "late success"),
            (ModalPhase::Closed | ModalPhase::OpenIdle, _) => {
                return Err(ModalError::NothingInFlight)
            }
        },
        (ModalAction::SubmissionFailed, _) => match from {
            ModalPhase::OpenBusy => (ModalPhase::OpenIdle, "failed"),
            ModalPhase::ClosedBusy => (ModalPhase::Closed, "late failure"),
            ModalPhase::Closed | ModalPhase::OpenIdle => return Err(ModalError::NothingInFlight),
        },
    };
    Ok((to, StateTransition { from, to, reason }))
}
