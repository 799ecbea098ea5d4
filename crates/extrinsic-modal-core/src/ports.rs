use thiserror::Error;

use crate::domain::{AccountId, ModalEvent, SubmissionRequest};
use crate::outcome::OutcomeReply;

/// Failures raised by collaborators. The modal never inspects these; they
/// reach it as the text of a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("WrongPassword")]
    WrongPassword,
    #[error("account locked: {0}")]
    Locked(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Sends an extrinsic on behalf of the modal.
///
/// Implementations must eventually resolve `reply` exactly once, from any
/// thread. Dropping it unresolved counts as a failure.
pub trait SubmissionPort {
    fn dispatch(&self, request: SubmissionRequest, reply: OutcomeReply);
}

/// Resolves an identifier to something able to sign. Used by submission
/// collaborators, never by the modal itself.
pub trait AccountResolutionPort {
    type Handle;

    fn resolve(&self, account: &AccountId) -> Result<Option<Self::Handle>, PortError>;
}

/// Receives modal notifications synchronously, in the same step as the
/// transition that caused them.
pub trait ModalObserver {
    fn notify(&self, event: &ModalEvent);
}

impl<F> ModalObserver for F
where
    F: Fn(&ModalEvent),
{
    fn notify(&self, event: &ModalEvent) {
        self(event)
    }
}

/// Optional observer slot shared by the modal components.
#[derive(Default)]
pub struct Notifier {
    observer: Option<Box<dyn ModalObserver>>,
}

impl Notifier {
    pub fn new(observer: impl ModalObserver + 'static) -> Self {
        Self {
            observer: Some(Box::new(observer)),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.observer.is_some()
    }

    pub fn emit(&self, event: ModalEvent) {
        if let Some(observer) = self.observer.as_ref() {
            observer.notify(&event);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("registered", &self.is_registered())
            .finish()
    }
}
