//! Main application state and update loop

use std::time::Duration;

use eframe::egui;
use serde_json::json;

use extrinsic_modal_adapters::{
    KeyringAdapter, KeyringEntry, ModalAdapterConfig, RecordingObserver, StaticTranslator,
    SubmissionLedger,
};
use extrinsic_modal_core::{
    LabelOverrides, ModalConfig, ModalEvent, PortError, SubmissionPort, SubmissionTicket,
    TransactionModalController, TxCall,
};

use crate::bridge::AsyncSubmitter;
use crate::modal_ui::{self, ModalIntent, ModalSlots};
use crate::state::{HostState, ModalSlot};
use crate::ui;

/// One hosted modal with its own password, ledger and in-flight ticket.
struct HostedModal {
    slot: ModalSlot,
    controller: TransactionModalController,
    recorder: RecordingObserver,
    password: String,
    ledger: SubmissionLedger,
    ticket: Option<SubmissionTicket>,
}

impl HostedModal {
    fn new(slot: ModalSlot, config: ModalConfig) -> Self {
        let recorder = RecordingObserver::default();
        let controller = TransactionModalController::new(config).with_observer(recorder.clone());
        Self {
            slot,
            controller,
            recorder,
            password: String::new(),
            ledger: SubmissionLedger::default(),
            ticket: None,
        }
    }

    fn submit<P: SubmissionPort>(&mut self, port: &P, state: &mut HostState) {
        match self.controller.submit(port) {
            Ok(ticket) => self.ticket = Some(ticket),
            Err(err) => state.set_error(err.to_string()),
        }
    }

    /// Logs new notifications and reacts to the ones that settle a submission.
    fn settle_events(&mut self, state: &mut HostState) {
        let events = self.recorder.events();
        self.recorder.clear();
        for event in events {
            state.log(self.slot, describe(&event));
            match event {
                ModalEvent::Succeeded => {
                    self.password.clear();
                    let Some(ticket) = self.ticket.take() else {
                        state.set_info("submitted");
                        continue;
                    };
                    match self.ledger.find(ticket) {
                        Ok(Some(extrinsic)) => {
                            state.set_info(format!("{} submitted", extrinsic.call));
                            state.last_hash = Some(extrinsic.hash);
                        }
                        Ok(None) => state.set_info("submitted"),
                        Err(err) => state.set_error(err.to_string()),
                    }
                }
                ModalEvent::Failed(reason) => {
                    self.ticket = None;
                    state.set_error(reason);
                }
                ModalEvent::Opened | ModalEvent::SubmitRequested => state.clear_notice(),
                _ => {}
            }
        }
    }
}

/// The main application state
pub struct App {
    state: HostState,
    keyring: KeyringAdapter,
    /// Shared by every submission for the life of the app.
    runtime: tokio::runtime::Runtime,
    accounts: Vec<KeyringEntry>,
    translator: StaticTranslator,
    latency: Duration,
    /// Owns its visibility; opened through the trigger button.
    uncontrolled: HostedModal,
    /// Visibility follows `state.parent_open`.
    controlled: HostedModal,
}

impl App {
    pub fn new(
        config: ModalAdapterConfig,
        translator: StaticTranslator,
    ) -> Result<Self, PortError> {
        let keyring =
            KeyringAdapter::with_dev_accounts(config.kdf_params(), &config.dev_accounts)?;
        let accounts = keyring.accounts()?;
        let state = HostState::default();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("submission")
            .enable_time()
            .build()
            .map_err(|e| PortError::Transport(format!("submission runtime: {e}")))?;

        let dest = config
            .dev_accounts
            .get(1)
            .map(|bob| bob.address.as_str())
            .unwrap_or_default();
        let transfer = TxCall::named("balances", "transfer", json!([dest, 1_000_000_000_000u64]));
        let uncontrolled = HostedModal::new(ModalSlot::Uncontrolled, ModalConfig::new(transfer));

        let fixed = config.dev_accounts.first().map(|alice| alice.address.clone());
        let remark = TxCall::named("system", "remark", json!([state.remark_hex()]));
        let controlled = HostedModal::new(
            ModalSlot::Controlled,
            ModalConfig::new(remark)
                .controlled(state.parent_open)
                .with_account(fixed)
                .with_labels(LabelOverrides {
                    header: Some("Post a remark".to_owned()),
                    submit: Some("Remark".to_owned()),
                    ..LabelOverrides::default()
                }),
        );

        tracing::info!(accounts = accounts.len(), "keyring ready");
        Ok(Self {
            state,
            keyring,
            runtime,
            accounts,
            translator,
            latency: Duration::from_millis(config.submission_latency_ms),
            uncontrolled,
            controlled,
        })
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Outcomes posted by worker threads since the last frame
        self.uncontrolled.controller.poll_outcomes();
        self.controlled.controller.poll_outcomes();
        self.uncontrolled.settle_events(&mut self.state);
        self.controlled.settle_events(&mut self.state);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(
                egui::RichText::new("Extrinsic Modal")
                    .size(22.0)
                    .color(egui::Color32::from_rgb(0, 212, 170)),
            );
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(format!(
                    "build {} · {}",
                    env!("GIT_HASH"),
                    env!("BUILD_TIME")
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_hosts(ui);
                self.render_notices(ui);
                self.render_event_log(ui);
            });
        });

        self.render_uncontrolled(ctx);
        self.render_controlled(ctx);

        if self.uncontrolled.controller.is_busy() || self.controlled.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl App {
    fn render_hosts(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Hosted modals");
        ui.add_space(8.0);

        ui::card(ui, |ui| {
            ui.label("Uncontrolled: the modal opens and closes itself.");
            if modal_ui::trigger(ui, "Transfer…") {
                self.uncontrolled.controller.open();
            }
        });
        ui.add_space(8.0);

        ui::card(ui, |ui| {
            ui.label("Controlled: visibility belongs to this checkbox.");
            let toggled = ui
                .checkbox(&mut self.state.parent_open, "parent says open")
                .changed();
            if toggled {
                self.controlled.controller.sync_open(self.state.parent_open);
            }
            let mut unsigned = self.controlled.controller.gate().is_unsigned;
            if ui
                .add_enabled(
                    !self.controlled.controller.is_busy(),
                    egui::Checkbox::new(&mut unsigned, "unsigned"),
                )
                .changed()
            {
                self.controlled.controller.set_unsigned(unsigned);
            }
        });
    }

    fn render_notices(&self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        if let Some(err) = &self.state.last_error {
            ui::error_message(ui, err);
        }
        if let Some(info) = &self.state.last_info {
            ui::success_message(ui, info);
        }
        if let Some(hash) = &self.state.last_hash {
            ui.label("Last extrinsic hash:");
            ui::copyable_hash(ui, hash);
        }
    }

    fn render_event_log(&self, ui: &mut egui::Ui) {
        ui::section_header(ui, "Events");
        if self.state.event_log.is_empty() {
            ui.weak("nothing yet");
        }
        for line in self.state.event_log.iter().rev() {
            ui.label(
                egui::RichText::new(format!("[{}] {}", line.slot.label(), line.text)).monospace(),
            );
        }
    }

    fn render_uncontrolled(&mut self, ctx: &egui::Context) {
        let view = self.uncontrolled.controller.view(&self.translator);
        let password = &mut self.uncontrolled.password;
        let slots = ModalSlots::default()
            .with_pre_content(|ui| {
                ui.label("Send 1 unit to Bob.");
            })
            .with_content(|ui| password_field(ui, password));
        let intent = modal_ui::show(ctx, "uncontrolled", &view, &self.accounts, slots);

        match intent {
            Some(ModalIntent::Cancel) => self.uncontrolled.controller.close(),
            Some(ModalIntent::SelectAccount(account)) => {
                if let Err(err) = self.uncontrolled.controller.select_account(account) {
                    self.state.set_error(err.to_string());
                }
            }
            Some(ModalIntent::Submit) => {
                let submitter = self.submitter(ctx, &self.uncontrolled);
                self.uncontrolled.submit(&submitter, &mut self.state);
            }
            None => {}
        }
    }

    fn render_controlled(&mut self, ctx: &egui::Context) {
        let view = self.controlled.controller.view(&self.translator);
        let password = &mut self.controlled.password;
        let remark = &mut self.state.remark;
        let slots = ModalSlots::default().with_content(|ui| {
            ui.horizontal(|ui| {
                ui.label("Remark:");
                ui.text_edit_singleline(remark);
            });
            password_field(ui, password);
        });
        let intent = modal_ui::show(ctx, "controlled", &view, &self.accounts, slots);

        match intent {
            Some(ModalIntent::Cancel) => {
                // Notify, then act as the parent and hide it.
                self.controlled.controller.close();
                self.state.parent_open = false;
                self.controlled.controller.sync_open(false);
            }
            Some(ModalIntent::SelectAccount(account)) => {
                if let Err(err) = self.controlled.controller.select_account(account) {
                    self.state.set_error(err.to_string());
                }
            }
            Some(ModalIntent::Submit) => {
                let remark = TxCall::named("system", "remark", json!([self.state.remark_hex()]));
                self.controlled.controller.set_call(remark);
                let submitter = self.submitter(ctx, &self.controlled);
                self.controlled.submit(&submitter, &mut self.state);
            }
            None => {}
        }
    }

    fn submitter(&self, ctx: &egui::Context, modal: &HostedModal) -> AsyncSubmitter {
        AsyncSubmitter::new(
            self.runtime.handle().clone(),
            self.keyring.clone(),
            modal.ledger.clone(),
            modal.password.clone(),
            self.latency,
        )
        .with_repaint(ctx.clone())
    }
}

fn password_field(ui: &mut egui::Ui, password: &mut String) {
    ui.horizontal(|ui| {
        ui.label("Password:");
        ui.add(
            egui::TextEdit::singleline(password)
                .password(true)
                .desired_width(220.0),
        );
    });
}

fn describe(event: &ModalEvent) -> String {
    match event {
        ModalEvent::AccountChanged(Some(account)) => format!("account-changed {}", account.short()),
        ModalEvent::AccountChanged(None) => "account-changed <none>".to_owned(),
        ModalEvent::Failed(reason) => format!("failed: {reason}"),
        other => other.name().to_owned(),
    }
}
