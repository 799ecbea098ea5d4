use serde::{Deserialize, Serialize};

/// Maps a default label key to display text. The modal never looks at the
/// returned text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

/// Returns keys unchanged; keys are the English defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, key: &str) -> String {
        key.to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelSlot {
    Header,
    AccountLabel,
    AccountHelp,
    Cancel,
    Submit,
}

impl LabelSlot {
    pub const ALL: [LabelSlot; 5] = [
        LabelSlot::Header,
        LabelSlot::AccountLabel,
        LabelSlot::AccountHelp,
        LabelSlot::Cancel,
        LabelSlot::Submit,
    ];

    pub fn default_key(self) -> &'static str {
        match self {
            LabelSlot::Header => "Submit signed extrinsic",
            LabelSlot::AccountLabel => "using my account",
            LabelSlot::AccountHelp => "Select the account to use for this action.",
            LabelSlot::Cancel => "Cancel",
            LabelSlot::Submit => "Submit",
        }
    }
}

/// Per-modal text overrides. An override is shown verbatim; a missing one
/// falls back to the translated default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelOverrides {
    pub header: Option<String>,
    pub account_label: Option<String>,
    pub account_help: Option<String>,
    pub cancel: Option<String>,
    pub submit: Option<String>,
}

impl LabelOverrides {
    pub fn get(&self, slot: LabelSlot) -> Option<&str> {
        match slot {
            LabelSlot::Header => self.header.as_deref(),
            LabelSlot::AccountLabel => self.account_label.as_deref(),
            LabelSlot::AccountHelp => self.account_help.as_deref(),
            LabelSlot::Cancel => self.cancel.as_deref(),
            LabelSlot::Submit => self.submit.as_deref(),
        }
    }

    pub fn resolve(&self, slot: LabelSlot, translator: &dyn Translate) -> String {
        match self.get(slot) {
            Some(text) => text.to_owned(),
            None => translator.translate(slot.default_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shouting;

    impl Translate for Shouting {
        fn translate(&self, key: &str) -> String {
            key.to_uppercase()
        }
    }

    #[test]
    fn override_wins_over_translated_default() {
        let labels = LabelOverrides {
            submit: Some("Bond".to_owned()),
            ..LabelOverrides::default()
        };
        assert_eq!(labels.resolve(LabelSlot::Submit, &Shouting), "Bond");
        assert_eq!(labels.resolve(LabelSlot::Cancel, &Shouting), "CANCEL");
    }

    #[test]
    fn defaults_pass_through_translator() {
        let labels = LabelOverrides::default();
        for slot in LabelSlot::ALL {
            assert_eq!(labels.resolve(slot, &Untranslated), slot.default_key());
        }
    }
}
