use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use extrinsic_modal_core::PortError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
}

#[derive(Debug, Clone)]
pub struct DerivedKeys {
    pub enc_key: [u8; 32],
}

pub fn generate_salt() -> Result<[u8; 16], PortError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt)
        .map_err(|e| PortError::Transport(format!("salt generation failed: {e}")))?;
    Ok(salt)
}

pub fn generate_nonce() -> Result<[u8; 12], PortError> {
    let mut nonce = [0u8; 12];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| PortError::Transport(format!("nonce generation failed: {e}")))?;
    Ok(nonce)
}

pub fn derive_keys(
    password: &[u8],
    salt: &[u8; 16],
    params: KdfParams,
) -> Result<DerivedKeys, PortError> {
    let argon_params = Params::new(params.memory_kib, params.iterations, 1, Some(32))
        .map_err(|e| PortError::Validation(format!("argon2 params rejected: {e}")))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);
    let mut root = [0u8; 32];
    argon
        .hash_password_into(password, salt, &mut root)
        .map_err(|e| PortError::Validation(format!("argon2 derivation failed: {e}")))?;

    let hk = Hkdf::<Sha256>::new(None, &root);
    let mut enc_key = [0u8; 32];
    hk.expand(b"keyring_enc_v1", &mut enc_key)
        .map_err(|_| PortError::Validation("hkdf expand for keyring_enc_v1 failed".to_owned()))?;
    Ok(DerivedKeys { enc_key })
}

pub fn encrypt_aes_gcm(
    enc_key: &[u8; 32],
    nonce: [u8; 12],
    plaintext: &[u8],
) -> Result<Vec<u8>, PortError> {
    let cipher = Aes256Gcm::new_from_slice(enc_key)
        .map_err(|e| PortError::Validation(format!("aes-gcm init failed: {e}")))?;
    let nonce = Nonce::<aes_gcm::aead::consts::U12>::from(nonce);
    cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PortError::Transport(format!("aes-gcm encrypt failed: {e}")))
}

/// Authentication failure is the only way a wrong password shows up here.
pub fn decrypt_aes_gcm(
    enc_key: &[u8; 32],
    nonce: [u8; 12],
    ciphertext: &[u8],
) -> Result<Vec<u8>, PortError> {
    let cipher = Aes256Gcm::new_from_slice(enc_key)
        .map_err(|e| PortError::Validation(format!("aes-gcm init failed: {e}")))?;
    let nonce = Nonce::<aes_gcm::aead::consts::U12>::from(nonce);
    cipher
        .decrypt(&nonce, ciphertext)
        .map_err(|_| PortError::WrongPassword)
}

pub fn hmac_sha256(key: &[u8], payload: &[u8]) -> Result<[u8; 32], PortError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| PortError::Validation(format!("hmac init failed: {e}")))?;
    mac.update(payload);
    Ok(mac.finalize().into_bytes().into())
}

pub fn sha256(payload: &[u8]) -> [u8; 32] {
    Sha256::digest(payload).into()
}

pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, PortError> {
    let normalized = normalize_json(value);
    serde_json::to_vec(&normalized)
        .map_err(|e| PortError::Validation(format!("canonical json serialization failed: {e}")))
}

fn normalize_json(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::{Map, Value};
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            let mut out = Map::with_capacity(keys.len());
            for key in keys {
                if let Some(v) = map.get(key) {
                    out.insert(key.clone(), normalize_json(v));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}
