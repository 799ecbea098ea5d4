use crate::domain::{AccountId, ModalEvent, Prop};
use crate::ports::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSelector {
    current: Option<AccountId>,
    is_fixed: bool,
    last_external: Prop<Option<AccountId>>,
}

impl AccountSelector {
    pub fn new(external: &Prop<Option<AccountId>>) -> Self {
        Self {
            current: external.as_supplied().cloned().flatten(),
            is_fixed: external.is_supplied(),
            last_external: external.clone(),
        }
    }

    pub fn current(&self) -> Option<&AccountId> {
        self.current.as_ref()
    }

    pub fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    pub fn select(&mut self, account: Option<AccountId>, notifier: &Notifier) {
        self.current = account.clone();
        notifier.emit(ModalEvent::AccountChanged(account));
    }

    /// Applies an external value when it differs from the last one seen.
    /// Local selections made in between are overwritten only on change.
    pub fn sync_external(&mut self, account: Option<AccountId>) -> bool {
        if self.last_external.as_supplied() == Some(&account) {
            return false;
        }
        self.last_external = Prop::Supplied(account.clone());
        self.current = account;
        true
    }
}
