use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use extrinsic_modal_core::{AccountId, AccountResolutionPort, PortError};

use crate::config::DevAccount;
use crate::crypto::{
    decrypt_aes_gcm, derive_keys, encrypt_aes_gcm, generate_nonce, generate_salt, KdfParams,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyringEntry {
    pub address: AccountId,
    pub name: String,
}

/// Secret material available only after a successful unlock.
#[derive(Debug, Clone)]
pub struct UnlockedAccount {
    pub entry: KeyringEntry,
    pub secret: Vec<u8>,
}

#[derive(Debug, Clone)]
struct SealedAccount {
    name: String,
    salt: [u8; 16],
    nonce: [u8; 12],
    ciphertext: Vec<u8>,
}

/// In-memory keyring. Secrets are sealed under a password-derived key and
/// never held in clear between unlocks.
#[derive(Debug, Clone)]
pub struct KeyringAdapter {
    inner: Arc<Mutex<BTreeMap<AccountId, SealedAccount>>>,
    kdf: KdfParams,
}

impl KeyringAdapter {
    pub fn new(kdf: KdfParams) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BTreeMap::new())),
            kdf,
        }
    }

    pub fn with_dev_accounts(kdf: KdfParams, accounts: &[DevAccount]) -> Result<Self, PortError> {
        let keyring = Self::new(kdf);
        for account in accounts {
            keyring.add_account(
                account.address.clone(),
                &account.name,
                account.seed.as_bytes(),
                &account.password,
            )?;
        }
        Ok(keyring)
    }

    pub fn add_account(
        &self,
        address: AccountId,
        name: &str,
        secret: &[u8],
        password: &str,
    ) -> Result<(), PortError> {
        let sealed = self.seal(name, secret, password)?;
        self.guard()?.insert(address, sealed);
        Ok(())
    }

    pub fn accounts(&self) -> Result<Vec<KeyringEntry>, PortError> {
        Ok(self
            .guard()?
            .iter()
            .map(|(address, sealed)| KeyringEntry {
                address: address.clone(),
                name: sealed.name.clone(),
            })
            .collect())
    }

    pub fn unlock(
        &self,
        address: &AccountId,
        password: &str,
    ) -> Result<UnlockedAccount, PortError> {
        let sealed = self
            .guard()?
            .get(address)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("no keypair for {address}")))?;
        let keys = derive_keys(password.as_bytes(), &sealed.salt, self.kdf)?;
        let secret = decrypt_aes_gcm(&keys.enc_key, sealed.nonce, &sealed.ciphertext)?;
        Ok(UnlockedAccount {
            entry: KeyringEntry {
                address: address.clone(),
                name: sealed.name,
            },
            secret,
        })
    }

    /// Re-seals an account under a new password after proving the old one.
    pub fn change_password(
        &self,
        address: &AccountId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), PortError> {
        if new_password.is_empty() {
            return Err(PortError::Validation("new password is empty".to_owned()));
        }
        let unlocked = self.unlock(address, old_password)?;
        let resealed = self.seal(&unlocked.entry.name, &unlocked.secret, new_password)?;
        self.guard()?.insert(address.clone(), resealed);
        Ok(())
    }

    fn seal(&self, name: &str, secret: &[u8], password: &str) -> Result<SealedAccount, PortError> {
        let salt = generate_salt()?;
        let nonce = generate_nonce()?;
        let keys = derive_keys(password.as_bytes(), &salt, self.kdf)?;
        let ciphertext = encrypt_aes_gcm(&keys.enc_key, nonce, secret)?;
        Ok(SealedAccount {
            name: name.to_owned(),
            salt,
            nonce,
            ciphertext,
        })
    }

    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<AccountId, SealedAccount>>, PortError> {
        self.inner
            .lock()
            .map_err(|e| PortError::Transport(format!("keyring lock poisoned: {e}")))
    }
}

impl AccountResolutionPort for KeyringAdapter {
    type Handle = KeyringEntry;

    fn resolve(&self, account: &AccountId) -> Result<Option<KeyringEntry>, PortError> {
        Ok(self.guard()?.get(account).map(|sealed| KeyringEntry {
            address: account.clone(),
            name: sealed.name.clone(),
        }))
    }
}
