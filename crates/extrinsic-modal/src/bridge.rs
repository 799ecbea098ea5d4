//! Bridge between the egui shell and the submission adapters.
//! Submissions leave the UI thread here and come back through the modal's
//! outcome mailbox.

use std::time::Duration;

use eframe::egui;
use tokio::runtime::Handle;

use extrinsic_modal_adapters::{KeyringAdapter, LocalSubmitter, SubmissionLedger};
use extrinsic_modal_core::{OutcomeReply, SubmissionOutcome, SubmissionPort, SubmissionRequest};

/// Runs [`LocalSubmitter`] on the host's runtime after a simulated network delay.
#[derive(Clone)]
pub struct AsyncSubmitter {
    runtime: Handle,
    keyring: KeyringAdapter,
    ledger: SubmissionLedger,
    password: String,
    latency: Duration,
    repaint: Option<egui::Context>,
}

impl AsyncSubmitter {
    pub fn new(
        runtime: Handle,
        keyring: KeyringAdapter,
        ledger: SubmissionLedger,
        password: impl Into<String>,
        latency: Duration,
    ) -> Self {
        Self {
            runtime,
            keyring,
            ledger,
            password: password.into(),
            latency,
            repaint: None,
        }
    }

    /// Wake the UI when the outcome lands.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }
}

impl SubmissionPort for AsyncSubmitter {
    fn dispatch(&self, request: SubmissionRequest, reply: OutcomeReply) {
        let submitter = LocalSubmitter::new(
            self.keyring.clone(),
            self.ledger.clone(),
            self.password.clone(),
        );
        let latency = self.latency;
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            // Key derivation is CPU bound; keep it off the async workers.
            let signing = tokio::task::spawn_blocking(move || submitter.execute(&request));
            let outcome = match signing.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(%e, "submission task failed");
                    SubmissionOutcome::Failure(format!("submission task failed: {e}"))
                }
            };
            reply.resolve(outcome);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::json;

    use extrinsic_modal_adapters::{KdfParams, KeyringAdapter, ModalAdapterConfig, SubmissionLedger};
    use extrinsic_modal_core::{
        AccountId, ModalConfig, ModalPhase, TransactionModalController, TxCall,
    };

    use super::AsyncSubmitter;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .expect("runtime")
    }

    const FAST_KDF: KdfParams = KdfParams {
        memory_kib: 8,
        iterations: 1,
    };

    fn alice() -> AccountId {
        ModalAdapterConfig::default().dev_accounts[0].address.clone()
    }

    fn wait_for_outcome(modal: &mut TransactionModalController) -> usize {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let applied = modal.poll_outcomes();
            if applied > 0 || Instant::now() > deadline {
                return applied;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn modal() -> TransactionModalController {
        let call = TxCall::named("system", "remark", json!(["0x68656c6c6f"]));
        let mut modal = TransactionModalController::new(
            ModalConfig::new(call).with_account(Some(alice())),
        );
        modal.open();
        modal
    }

    #[test]
    fn outcome_arrives_through_mailbox() {
        let keyring = KeyringAdapter::with_dev_accounts(
            FAST_KDF,
            &ModalAdapterConfig::default().dev_accounts,
        )
        .expect("keyring");
        let rt = runtime();
        let ledger = SubmissionLedger::default();
        let submitter = AsyncSubmitter::new(
            rt.handle().clone(),
            keyring,
            ledger.clone(),
            "alice",
            Duration::from_millis(20),
        );
        let mut modal = modal();

        modal.submit(&submitter).expect("submit");
        assert_eq!(modal.phase(), ModalPhase::OpenBusy);

        assert_eq!(wait_for_outcome(&mut modal), 1);
        assert_eq!(modal.phase(), ModalPhase::Closed);
        assert_eq!(ledger.entries().expect("ledger").len(), 1);
    }

    #[test]
    fn wrong_password_keeps_modal_open() {
        let keyring = KeyringAdapter::with_dev_accounts(
            FAST_KDF,
            &ModalAdapterConfig::default().dev_accounts,
        )
        .expect("keyring");
        let rt = runtime();
        let submitter = AsyncSubmitter::new(
            rt.handle().clone(),
            keyring,
            SubmissionLedger::default(),
            "bob",
            Duration::ZERO,
        );
        let mut modal = modal();

        modal.submit(&submitter).expect("submit");
        assert_eq!(wait_for_outcome(&mut modal), 1);
        assert_eq!(modal.phase(), ModalPhase::OpenIdle);
    }

    #[test]
    fn one_runtime_serves_every_submission() {
        let keyring = KeyringAdapter::with_dev_accounts(
            FAST_KDF,
            &ModalAdapterConfig::default().dev_accounts,
        )
        .expect("keyring");
        let rt = runtime();
        let ledger = SubmissionLedger::default();
        let submitter = AsyncSubmitter::new(
            rt.handle().clone(),
            keyring,
            ledger.clone(),
            "alice",
            Duration::from_millis(5),
        );
        let mut first = modal();
        let mut second = modal();

        first.submit(&submitter).expect("submit first");
        second.submit(&submitter).expect("submit second");

        assert_eq!(wait_for_outcome(&mut first), 1);
        assert_eq!(wait_for_outcome(&mut second), 1);
        assert_eq!(first.phase(), ModalPhase::Closed);
        assert_eq!(second.phase(), ModalPhase::Closed);
        assert_eq!(ledger.entries().expect("ledger").len(), 2);
    }
}
