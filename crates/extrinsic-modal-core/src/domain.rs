use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// SS58-encoded account identifier. The format is never checked by the modal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for compact rows, e.g. `5Grwva…utQY`.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A value the host may or may not hand to the modal.
///
/// Presence decides who owns the value for the lifetime of the modal; the
/// content only seeds it. `Supplied(None)` for an account is a supplied
/// "no account", which is different from `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prop<T> {
    #[default]
    Absent,
    Supplied(T),
}

impl<T> Prop<T> {
    pub fn is_supplied(&self) -> bool {
        matches!(self, Prop::Supplied(_))
    }

    pub fn as_supplied(&self) -> Option<&T> {
        match self {
            Prop::Absent => None,
            Prop::Supplied(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    /// The host drives the value; the modal mirrors it.
    Controlled,
    /// The modal owns the value.
    Uncontrolled,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signer {
    Account(AccountId),
    Unsigned,
}

impl Signer {
    pub fn account(&self) -> Option<&AccountId> {
        match self {
            Signer::Account(id) => Some(id),
            Signer::Unsigned => None,
        }
    }
}

/// What the submission collaborator should send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TxCall {
    /// A runtime call such as `balances.transfer`, built by the collaborator.
    Named {
        section: String,
        method: String,
        params: Value,
    },
    /// An extrinsic the host already built; passed through untouched.
    Prebuilt { payload: Value },
}

impl TxCall {
    pub fn named(section: impl Into<String>, method: impl Into<String>, params: Value) -> Self {
        TxCall::Named {
            section: section.into(),
            method: method.into(),
            params,
        }
    }

    pub fn prebuilt(payload: Value) -> Self {
        TxCall::Prebuilt { payload }
    }

    pub fn label(&self) -> String {
        match self {
            TxCall::Named {
                section, method, ..
            } => format!("{section}.{method}"),
            TxCall::Prebuilt { .. } => "prebuilt".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionTicket(pub u64);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub ticket: SubmissionTicket,
    pub signer: Signer,
    pub call: TxCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    Success,
    /// Opaque reason produced by the collaborator.
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum ModalEvent {
    Opened,
    Closed,
    AccountChanged(Option<AccountId>),
    SubmitRequested,
    Succeeded,
    Failed(String),
}

impl ModalEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ModalEvent::Opened => "opened",
            ModalEvent::Closed => "closed",
            ModalEvent::AccountChanged(_) => "account-changed",
            ModalEvent::SubmitRequested => "submit-requested",
            ModalEvent::Succeeded => "succeeded",
            ModalEvent::Failed(_) => "failed",
        }
    }
}
