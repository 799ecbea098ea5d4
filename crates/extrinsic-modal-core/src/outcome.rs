use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{SubmissionOutcome, SubmissionTicket};

pub const ABANDONED_REASON: &str = "submission abandoned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: SubmissionTicket,
    pub outcome: SubmissionOutcome,
}

/// Completions posted by collaborators, drained on the interaction thread.
#[derive(Debug, Clone, Default)]
pub struct OutcomeMailbox {
    inner: Arc<Mutex<VecDeque<Completion>>>,
}

impl OutcomeMailbox {
    pub fn reply_for(&self, ticket: SubmissionTicket) -> OutcomeReply {
        OutcomeReply {
            ticket,
            mailbox: Some(self.clone()),
        }
    }

    pub fn drain(&self) -> Vec<Completion> {
        self.guard().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.guard().len()
    }

    fn push(&self, completion: Completion) {
        self.guard().push_back(completion);
    }

    // A panic while holding the lock cannot leave the queue half-written.
    fn guard(&self) -> MutexGuard<'_, VecDeque<Completion>> {
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// One-shot handle a collaborator uses to report how a submission ended.
#[derive(Debug)]
pub struct OutcomeReply {
    ticket: SubmissionTicket,
    mailbox: Option<OutcomeMailbox>,
}

impl OutcomeReply {
    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    pub fn resolve(mut self, outcome: SubmissionOutcome) {
        self.post(outcome);
    }

    pub fn succeed(self) {
        self.resolve(SubmissionOutcome::Success);
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.resolve(SubmissionOutcome::Failure(reason.into()));
    }

    fn post(&mut self, outcome: SubmissionOutcome) {
        if let Some(mailbox) = self.mailbox.take() {
            mailbox.push(Completion {
                ticket: self.ticket,
                outcome,
            });
        }
    }
}

impl Drop for OutcomeReply {
    fn drop(&mut self) {
        self.post(SubmissionOutcome::Failure(ABANDONED_REASON.to_owned()));
    }
}
