//! egui rendering of a [`ModalView`]. Everything here is stateless; the
//! caller applies the returned [`ModalIntent`] to its controller.

use eframe::egui;

use extrinsic_modal_adapters::KeyringEntry;
use extrinsic_modal_core::{AccountId, ModalView, Signer};

use crate::ui;

/// What the user asked for during one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalIntent {
    Cancel,
    Submit,
    SelectAccount(Option<AccountId>),
}

type Slot<'a> = Box<dyn FnOnce(&mut egui::Ui) + 'a>;

/// Optional blocks around the account selector.
#[derive(Default)]
pub struct ModalSlots<'a> {
    pub pre_content: Option<Slot<'a>>,
    pub content: Option<Slot<'a>>,
}

impl<'a> ModalSlots<'a> {
    pub fn with_pre_content(mut self, slot: impl FnOnce(&mut egui::Ui) + 'a) -> Self {
        self.pre_content = Some(Box::new(slot));
        self
    }

    pub fn with_content(mut self, slot: impl FnOnce(&mut egui::Ui) + 'a) -> Self {
        self.content = Some(Box::new(slot));
        self
    }
}

/// Button that calls the modal's `open()` when clicked.
pub fn trigger(ui: &mut egui::Ui, label: &str) -> bool {
    ui::primary_button_enabled(ui, label, true).clicked()
}

pub fn show(
    ctx: &egui::Context,
    id_salt: &str,
    view: &ModalView,
    accounts: &[KeyringEntry],
    slots: ModalSlots<'_>,
) -> Option<ModalIntent> {
    if !view.is_open() {
        return None;
    }

    let mut intent = None;
    let shown = egui::Window::new(view.header.as_str())
        .id(egui::Id::new(("tx_modal", id_salt)))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_min_width(420.0);

            if let Some(pre_content) = slots.pre_content {
                pre_content(ui);
                ui.add_space(6.0);
            }

            if let Some(choice) = account_selector(ui, id_salt, view, accounts) {
                intent = Some(ModalIntent::SelectAccount(choice));
            }

            if let Some(content) = slots.content {
                ui.add_space(6.0);
                content(ui);
            }

            if view.phase.is_busy() {
                ui.add_space(6.0);
                ui::busy_spinner(ui, "Submitting…");
            }

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui::negative_button(ui, &view.cancel_label).clicked() {
                    intent = Some(ModalIntent::Cancel);
                }
                ui.label("or");
                let submit = ui::primary_button_enabled(
                    ui,
                    &view.submit.label,
                    !view.submit.is_disabled,
                );
                if submit.clicked() {
                    intent = Some(ModalIntent::Submit);
                }
                if let Some(Signer::Unsigned) = view.submit.signer {
                    ui.weak("unsigned");
                }
            });
        });

    let layer = shown?.response.layer_id;
    intent.or_else(|| keyboard_intent(ctx, layer, view))
}

fn account_selector(
    ui: &mut egui::Ui,
    id_salt: &str,
    view: &ModalView,
    accounts: &[KeyringEntry],
) -> Option<Option<AccountId>> {
    let field = &view.account;
    let selected_text = field
        .value
        .as_ref()
        .map(|id| display_name(id, accounts))
        .unwrap_or_else(|| "<none>".to_owned());

    let mut choice = None;
    ui.label(egui::RichText::new(&field.label).strong())
        .on_hover_text(&field.help);
    ui.add_enabled_ui(!field.is_disabled, |ui| {
        egui::ComboBox::from_id_salt(("account_select", id_salt))
            .selected_text(selected_text)
            .width(360.0)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(field.value.is_none(), "<none>")
                    .clicked()
                {
                    choice = Some(None);
                }
                for entry in accounts {
                    let is_selected = field.value.as_ref() == Some(&entry.address);
                    let text = format!("{} ({})", entry.name, entry.address.short());
                    if ui.selectable_label(is_selected, text).clicked() {
                        choice = Some(Some(entry.address.clone()));
                    }
                }
            });
    });
    choice.filter(|next| next.as_ref() != field.value.as_ref())
}

fn display_name(id: &AccountId, accounts: &[KeyringEntry]) -> String {
    accounts
        .iter()
        .find(|entry| &entry.address == id)
        .map(|entry| format!("{} ({})", entry.name, id.short()))
        .unwrap_or_else(|| id.short())
}

/// Enter submits, Escape cancels. Only the topmost modal window reacts, and
/// it consumes the key so a second open modal never sees the same press.
fn keyboard_intent(
    ctx: &egui::Context,
    layer: egui::LayerId,
    view: &ModalView,
) -> Option<ModalIntent> {
    if ctx.top_layer_id().is_some_and(|top| top != layer) {
        return None;
    }
    ctx.input_mut(|i| {
        if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
            Some(ModalIntent::Cancel)
        } else if !view.submit.is_disabled && i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
        {
            Some(ModalIntent::Submit)
        } else {
            None
        }
    })
}
