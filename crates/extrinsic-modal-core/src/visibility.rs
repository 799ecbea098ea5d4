use crate::domain::{ModalEvent, Ownership, Prop};
use crate::ports::Notifier;
use crate::state_machine::derive_initial_phase;

/// Open/closed state of one modal instance.
///
/// Ownership is fixed at construction: a supplied external flag makes the
/// modal controlled for its whole lifetime, regardless of the flag's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityController {
    ownership: Ownership,
    is_open: bool,
}

impl VisibilityController {
    pub fn new(external: &Prop<bool>) -> Self {
        let ownership = if external.is_supplied() {
            Ownership::Controlled
        } else {
            Ownership::Uncontrolled
        };
        Self {
            ownership,
            is_open: derive_initial_phase(external.as_supplied().copied()).is_open(),
        }
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn is_controlled(&self) -> bool {
        self.ownership == Ownership::Controlled
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self, notifier: &Notifier) {
        if !self.is_controlled() {
            self.is_open = true;
        }
        notifier.emit(ModalEvent::Opened);
    }

    pub fn close(&mut self, notifier: &Notifier) {
        if !self.is_controlled() {
            self.is_open = false;
        }
        notifier.emit(ModalEvent::Closed);
    }

    /// Mirrors a new external value. Returns whether `is_open` changed.
    pub fn sync_external(&mut self, open: bool) -> bool {
        if !self.is_controlled() || self.is_open == open {
            return false;
        }
        self.is_open = open;
        true
    }

    /// Success closes an owned modal without a "closed" notification.
    pub(crate) fn close_after_success(&mut self) {
        if !self.is_controlled() {
            self.is_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording() -> (Notifier, Rc<RefCell<Vec<ModalEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let notifier =
            Notifier::new(move |event: &ModalEvent| sink.borrow_mut().push(event.clone()));
        (notifier, events)
    }

    #[test]
    fn presence_not_truthiness_decides_ownership() {
        assert_eq!(
            VisibilityController::new(&Prop::Supplied(false)).ownership(),
            Ownership::Controlled
        );
        assert_eq!(
            VisibilityController::new(&Prop::Absent).ownership(),
            Ownership::Uncontrolled
        );
    }

    #[test]
    fn uncontrolled_open_then_close_notifies_both() {
        let (notifier, events) = recording();
        let mut vis = VisibilityController::new(&Prop::Absent);
        vis.open(&notifier);
        assert!(vis.is_open());
        vis.close(&notifier);
        assert!(!vis.is_open());
        assert_eq!(*events.borrow(), vec![ModalEvent::Opened, ModalEvent::Closed]);
    }

    #[test]
    fn controlled_open_only_notifies() {
        let (notifier, events) = recording();
        let mut vis = VisibilityController::new(&Prop::Supplied(false));
        vis.open(&notifier);
        assert!(!vis.is_open());
        assert_eq!(*events.borrow(), vec![ModalEvent::Opened]);
    }

    #[test]
    fn sync_is_ignored_when_uncontrolled() {
        let mut vis = VisibilityController::new(&Prop::Absent);
        assert!(!vis.sync_external(true));
        assert!(!vis.is_open());
    }

    #[test]
    fn controlled_mirrors_every_external_value() {
        let mut vis = VisibilityController::new(&Prop::Supplied(true));
        for value in [false, false, true, false, true, true] {
            vis.sync_external(value);
            assert_eq!(vis.is_open(), value);
        }
    }
}
