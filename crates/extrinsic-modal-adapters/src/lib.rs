pub mod config;
pub mod crypto;
pub mod keyring;
pub mod recorder;
pub mod submitter;
pub mod translate;

pub use config::{DevAccount, ModalAdapterConfig};
pub use crypto::KdfParams;
pub use keyring::{KeyringAdapter, KeyringEntry, UnlockedAccount};
pub use recorder::RecordingObserver;
pub use submitter::{LocalSubmitter, SignedExtrinsic, SubmissionLedger};
pub use translate::StaticTranslator;
