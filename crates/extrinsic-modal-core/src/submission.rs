use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, ModalEvent, SubmissionTicket};
use crate::error::ModalError;
use crate::ports::Notifier;
use crate::visibility::VisibilityController;

/// Host-supplied switches that take part in deriving the submit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitGate {
    pub is_disabled: bool,
    pub is_submittable: bool,
    pub is_unsigned: bool,
}

impl Default for SubmitGate {
    fn default() -> Self {
        Self {
            is_disabled: false,
            is_submittable: true,
            is_unsigned: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySubmissionGuard {
    in_flight: Option<SubmissionTicket>,
    issued: u64,
}

impl BusySubmissionGuard {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<SubmissionTicket> {
        self.in_flight
    }

    pub fn begin_submission(
        &mut self,
        notifier: &Notifier,
    ) -> Result<SubmissionTicket, ModalError> {
        if self.is_busy() {
            return Err(ModalError::SubmissionInFlight);
        }
        self.issued += 1;
        let ticket = SubmissionTicket(self.issued);
        self.in_flight = Some(ticket);
        notifier.emit(ModalEvent::SubmitRequested);
        Ok(ticket)
    }

    pub fn complete_success(
        &mut self,
        ticket: SubmissionTicket,
        visibility: &mut VisibilityController,
        notifier: &Notifier,
    ) -> Result<(), ModalError> {
        self.settle(ticket)?;
        visibility.close_after_success();
        notifier.emit(ModalEvent::Succeeded);
        Ok(())
    }

    pub fn complete_failure(
        &mut self,
        ticket: SubmissionTicket,
        reason: String,
        notifier: &Notifier,
    ) -> Result<(), ModalError> {
        self.settle(ticket)?;
        notifier.emit(ModalEvent::Failed(reason));
        Ok(())
    }

    pub fn is_submit_disabled(&self, account: Option<&AccountId>, gate: &SubmitGate) -> bool {
        self.is_busy()
            || gate.is_disabled
            || !gate.is_submittable
            || (!gate.is_unsigned && account.is_none())
    }

    pub fn is_selector_disabled(&self, gate: &SubmitGate) -> bool {
        self.is_busy() || gate.is_disabled
    }

    fn settle(&mut self, ticket: SubmissionTicket) -> Result<(), ModalError> {
        match self.in_flight {
            None => Err(ModalError::NothingInFlight),
            Some(expected) if expected != ticket => Err(ModalError::StaleOutcome {
                expected,
                got: ticket,
            }),
            Some(_) => {
                self.in_flight = None;
                Ok(())
            }
        }
    }
}
