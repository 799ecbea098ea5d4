use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use extrinsic_modal_core::{
    AccountResolutionPort, OutcomeReply, PortError, Signer, SubmissionOutcome, SubmissionPort,
    SubmissionRequest, SubmissionTicket, TxCall,
};

use crate::crypto::{canonical_json_bytes, hmac_sha256, sha256};
use crate::keyring::KeyringAdapter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedExtrinsic {
    pub ticket: SubmissionTicket,
    pub call: String,
    pub signer: Signer,
    pub signature: Option<String>,
    pub hash: String,
}

/// Extrinsics accepted by [`LocalSubmitter`], newest last.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLedger {
    inner: Arc<Mutex<Vec<SignedExtrinsic>>>,
}

impl SubmissionLedger {
    pub fn entries(&self) -> Result<Vec<SignedExtrinsic>, PortError> {
        self.inner
            .lock()
            .map(|g| g.clone())
            .map_err(|e| PortError::Transport(format!("ledger lock poisoned: {e}")))
    }

    pub fn last(&self) -> Result<Option<SignedExtrinsic>, PortError> {
        Ok(self.entries()?.pop())
    }

    pub fn find(&self, ticket: SubmissionTicket) -> Result<Option<SignedExtrinsic>, PortError> {
        Ok(self
            .entries()?
            .into_iter()
            .rev()
            .find(|extrinsic| extrinsic.ticket == ticket))
    }

    fn push(&self, extrinsic: SignedExtrinsic) -> Result<(), PortError> {
        self.inner
            .lock()
            .map(|mut g| g.push(extrinsic))
            .map_err(|e| PortError::Transport(format!("ledger lock poisoned: {e}")))
    }
}

/// Signs against the in-memory keyring and records the result instead of
/// broadcasting it. One instance carries the password for one attempt.
#[derive(Debug, Clone)]
pub struct LocalSubmitter {
    keyring: KeyringAdapter,
    ledger: SubmissionLedger,
    password: String,
}

impl LocalSubmitter {
    pub fn new(
        keyring: KeyringAdapter,
        ledger: SubmissionLedger,
        password: impl Into<String>,
    ) -> Self {
        Self {
            keyring,
            ledger,
            password: password.into(),
        }
    }

    /// Runs the whole signing path and reports it as a single outcome.
    pub fn execute(&self, request: &SubmissionRequest) -> SubmissionOutcome {
        match self.sign_and_record(request) {
            Ok(extrinsic) => {
                info!(
                    ticket = %request.ticket,
                    call = %extrinsic.call,
                    hash = %extrinsic.hash,
                    "extrinsic accepted"
                );
                SubmissionOutcome::Success
            }
            Err(err) => {
                warn!(ticket = %request.ticket, %err, "extrinsic rejected");
                SubmissionOutcome::Failure(err.to_string())
            }
        }
    }

    pub fn sign_and_record(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SignedExtrinsic, PortError> {
        let payload = encode_call(&request.call)?;
        let signature = match &request.signer {
            Signer::Unsigned => None,
            Signer::Account(address) => {
                if self.keyring.resolve(address)?.is_none() {
                    return Err(PortError::NotFound(format!("no keypair for {address}")));
                }
                let unlocked = self.keyring.unlock(address, &self.password)?;
                let signing_key = sha256(&unlocked.secret);
                Some(hmac_sha256(&signing_key, &payload)?)
            }
        };

        let mut preimage = payload;
        if let Some(sig) = signature.as_ref() {
            preimage.extend_from_slice(sig);
        }
        let extrinsic = SignedExtrinsic {
            ticket: request.ticket,
            call: request.call.label(),
            signer: request.signer.clone(),
            signature: signature.map(|sig| format!("0x{}", hex::encode(sig))),
            hash: format!("0x{}", hex::encode(sha256(&preimage))),
        };
        self.ledger.push(extrinsic.clone())?;
        Ok(extrinsic)
    }
}

impl SubmissionPort for LocalSubmitter {
    fn dispatch(&self, request: SubmissionRequest, reply: OutcomeReply) {
        reply.resolve(self.execute(&request));
    }
}

fn encode_call(call: &TxCall) -> Result<Vec<u8>, PortError> {
    match call {
        TxCall::Named {
            section,
            method,
            params,
        } => {
            if section.is_empty() || method.is_empty() {
                return Err(PortError::Validation("call name is empty".to_owned()));
            }
            if !matches!(params, Value::Array(_) | Value::Object(_)) {
                return Err(PortError::Validation(format!(
                    "params for {section}.{method} must be an array or object"
                )));
            }
            canonical_json_bytes(&json!({
                "section": section,
                "method": method,
                "params": params,
            }))
        }
        TxCall::Prebuilt { payload } => {
            let text = payload.as_str().ok_or_else(|| {
                PortError::Validation("prebuilt extrinsic must be a hex string".to_owned())
            })?;
            let digits = text.strip_prefix("0x").unwrap_or(text);
            hex::decode(digits)
                .map_err(|e| PortError::Validation(format!("invalid prebuilt extrinsic: {e}")))
        }
    }
}
