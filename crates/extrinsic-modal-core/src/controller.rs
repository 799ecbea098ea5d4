use serde::Serialize;
use tracing::{debug, warn};

use crate::account::AccountSelector;
use crate::domain::{
    AccountId, Ownership, Prop, Signer, SubmissionOutcome, SubmissionRequest, SubmissionTicket,
    TxCall,
};
use crate::error::ModalError;
use crate::labels::{LabelOverrides, LabelSlot, Translate};
use crate::outcome::OutcomeMailbox;
use crate::ports::{ModalObserver, Notifier, SubmissionPort};
use crate::state_machine::{modal_transition, ModalAction, ModalPhase, StateTransition};
use crate::submission::{BusySubmissionGuard, SubmitGate};
use crate::visibility::VisibilityController;

/// Everything a host can hand to a modal when creating it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalConfig {
    pub is_open: Prop<bool>,
    pub account_id: Prop<Option<AccountId>>,
    pub gate: SubmitGate,
    pub call: TxCall,
    pub labels: LabelOverrides,
}

impl ModalConfig {
    pub fn new(call: TxCall) -> Self {
        Self {
            is_open: Prop::Absent,
            account_id: Prop::Absent,
            gate: SubmitGate::default(),
            call,
            labels: LabelOverrides::default(),
        }
    }

    pub fn controlled(mut self, is_open: bool) -> Self {
        self.is_open = Prop::Supplied(is_open);
        self
    }

    pub fn with_account(mut self, account: Option<AccountId>) -> Self {
        self.account_id = Prop::Supplied(account);
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.gate.is_unsigned = true;
        self
    }

    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.gate.is_disabled = is_disabled;
        self
    }

    pub fn submittable(mut self, is_submittable: bool) -> Self {
        self.gate.is_submittable = is_submittable;
        self
    }

    pub fn with_labels(mut self, labels: LabelOverrides) -> Self {
        self.labels = labels;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountFieldView {
    pub value: Option<AccountId>,
    pub label: String,
    pub help: String,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButtonView {
    pub label: String,
    pub is_disabled: bool,
    pub signer: Option<Signer>,
}

/// Resolved labels and control states for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub phase: ModalPhase,
    pub header: String,
    pub account: AccountFieldView,
    pub cancel_label: String,
    pub submit: SubmitButtonView,
}

impl ModalView {
    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }
}

/// The transaction modal: visibility, account choice and the submission
/// cycle of one instance. Never terminates; a closed modal can be reopened
/// and submitted again.
#[derive(Debug)]
pub struct TransactionModalController {
    visibility: VisibilityController,
    account: AccountSelector,
    guard: BusySubmissionGuard,
    gate: SubmitGate,
    call: TxCall,
    labels: LabelOverrides,
    notifier: Notifier,
    mailbox: OutcomeMailbox,
}

impl TransactionModalController {
    pub fn new(config: ModalConfig) -> Self {
        let ModalConfig {
            is_open,
            account_id,
            gate,
            call,
            labels,
        } = config;
        Self {
            visibility: VisibilityController::new(&is_open),
            account: AccountSelector::new(&account_id),
            guard: BusySubmissionGuard::default(),
            gate,
            call,
            labels,
            notifier: Notifier::default(),
            mailbox: OutcomeMailbox::default(),
        }
    }

    pub fn with_observer(mut self, observer: impl ModalObserver + 'static) -> Self {
        self.notifier = Notifier::new(observer);
        self
    }

    pub fn phase(&self) -> ModalPhase {
        ModalPhase::from_flags(self.visibility.is_open(), self.guard.is_busy())
    }

    pub fn ownership(&self) -> Ownership {
        self.visibility.ownership()
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.account.current()
    }

    pub fn is_fixed_account(&self) -> bool {
        self.account.is_fixed()
    }

    pub fn gate(&self) -> SubmitGate {
        self.gate
    }

    pub fn call(&self) -> &TxCall {
        &self.call
    }

    pub fn mailbox(&self) -> &OutcomeMailbox {
        &self.mailbox
    }

    pub fn open(&mut self) {
        let step = self.step(ModalAction::Open);
        self.visibility.open(&self.notifier);
        self.record_step(step);
    }

    pub fn close(&mut self) {
        let step = self.step(ModalAction::Close);
        self.visibility.close(&self.notifier);
        self.record_step(step);
    }

    pub fn sync_open(&mut self, is_open: bool) {
        let step = self.step(ModalAction::SyncExternal(is_open));
        if self.visibility.sync_external(is_open) {
            self.record_step(step);
        }
    }

    pub fn select_account(&mut self, account: Option<AccountId>) -> Result<(), ModalError> {
        if self.is_account_selector_disabled() {
            warn!(?account, "account change while selector disabled");
            return Err(ModalError::SelectorDisabled);
        }
        self.account.select(account, &self.notifier);
        Ok(())
    }

    pub fn sync_account(&mut self, account: Option<AccountId>) {
        if self.account.sync_external(account) {
            debug!(account = ?self.account.current(), "account synced from host");
        }
    }

    pub fn set_disabled(&mut self, is_disabled: bool) {
        self.gate.is_disabled = is_disabled;
    }

    pub fn set_submittable(&mut self, is_submittable: bool) {
        self.gate.is_submittable = is_submittable;
    }

    pub fn set_unsigned(&mut self, is_unsigned: bool) {
        self.gate.is_unsigned = is_unsigned;
    }

    pub fn set_call(&mut self, call: TxCall) {
        self.call = call;
    }

    pub fn set_labels(&mut self, labels: LabelOverrides) {
        self.labels = labels;
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.guard.is_submit_disabled(self.account.current(), &self.gate)
    }

    pub fn is_account_selector_disabled(&self) -> bool {
        self.guard.is_selector_disabled(&self.gate)
    }

    /// Signer handed to the collaborator. An unsigned call drops any fixed
    /// account; it stays selected for display only.
    pub fn signer(&self) -> Option<Signer> {
        if self.gate.is_unsigned {
            return Some(Signer::Unsigned);
        }
        self.account.current().cloned().map(Signer::Account)
    }

    pub fn submit<P>(&mut self, port: &P) -> Result<SubmissionTicket, ModalError>
    where
        P: SubmissionPort + ?Sized,
    {
        let (next, transition) = modal_transition(
            self.phase(),
            ModalAction::BeginSubmission,
            self.ownership(),
        )
        .inspect_err(|err| warn!(%err, "submit rejected"))?;
        if self.is_submit_disabled() {
            return Err(ModalError::SubmitDisabled);
        }
        let signer = self.signer().ok_or(ModalError::SubmitDisabled)?;

        let ticket = self.guard.begin_submission(&self.notifier)?;
        self.record(next, &transition);

        let request = SubmissionRequest {
            ticket,
            signer,
            call: self.call.clone(),
        };
        debug!(%ticket, call = %request.call.label(), "dispatching extrinsic");
        port.dispatch(request, self.mailbox.reply_for(ticket));

        // Synchronous collaborators have already answered.
        self.poll_outcomes();
        Ok(ticket)
    }

    /// Applies every outcome collaborators have posted since the last poll.
    pub fn poll_outcomes(&mut self) -> usize {
        let mut applied = 0;
        for completion in self.mailbox.drain() {
            match self.apply_outcome(completion.ticket, completion.outcome) {
                Ok(_) => applied += 1,
                Err(err) => warn!(ticket = %completion.ticket, %err, "discarding outcome"),
            }
        }
        applied
    }

    /// Routes an outcome to success or failure handling. Outcomes arriving
    /// after the user closed the modal still settle the busy state.
    pub fn apply_outcome(
        &mut self,
        ticket: SubmissionTicket,
        outcome: SubmissionOutcome,
    ) -> Result<ModalPhase, ModalError> {
        let action = match outcome {
            SubmissionOutcome::Success => ModalAction::SubmissionSucceeded,
            SubmissionOutcome::Failure(_) => ModalAction::SubmissionFailed,
        };
        let (next, transition) = modal_transition(self.phase(), action, self.ownership())?;
        match outcome {
            SubmissionOutcome::Success => {
                self.guard
                    .complete_success(ticket, &mut self.visibility, &self.notifier)?
            }
            SubmissionOutcome::Failure(reason) => {
                self.guard.complete_failure(ticket, reason, &self.notifier)?
            }
        }
        self.record(next, &transition);
        Ok(next)
    }

    pub fn view(&self, translator: &dyn Translate) -> ModalView {
        ModalView {
            phase: self.phase(),
            header: self.labels.resolve(LabelSlot::Header, translator),
            account: AccountFieldView {
                value: self.account.current().cloned(),
                label: self.labels.resolve(LabelSlot::AccountLabel, translator),
                help: self.labels.resolve(LabelSlot::AccountHelp, translator),
                is_disabled: self.is_account_selector_disabled(),
            },
            cancel_label: self.labels.resolve(LabelSlot::Cancel, translator),
            submit: SubmitButtonView {
                label: self.labels.resolve(LabelSlot::Submit, translator),
                is_disabled: self.is_submit_disabled(),
                signer: self.signer(),
            },
        }
    }

    // Open, close and sync are legal from every phase.
    fn step(&self, action: ModalAction) -> Option<(ModalPhase, StateTransition)> {
        modal_transition(self.phase(), action, self.ownership()).ok()
    }

    fn record_step(&self, step: Option<(ModalPhase, StateTransition)>) {
        if let Some((next, transition)) = step {
            self.record(next, &transition);
        }
    }

    fn record(&self, next: ModalPhase, transition: &StateTransition) {
        debug_assert_eq!(self.phase(), next, "components diverged from transition table");
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            reason = transition.reason,
            "modal transition"
        );
    }
}
