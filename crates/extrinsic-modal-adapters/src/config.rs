use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use extrinsic_modal_core::{AccountId, PortError};

use crate::crypto::KdfParams;

/// Development account seeded into the in-memory keyring at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevAccount {
    pub name: String,
    pub address: AccountId,
    pub seed: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModalAdapterConfig {
    pub submission_latency_ms: u64,
    pub kdf_memory_kib: u32,
    pub kdf_iterations: u32,
    pub translations_path: Option<PathBuf>,
    pub dev_accounts: Vec<DevAccount>,
}

impl Default for ModalAdapterConfig {
    fn default() -> Self {
        Self {
            submission_latency_ms: 1_200,
            kdf_memory_kib: 19 * 1024,
            kdf_iterations: 2,
            translations_path: None,
            dev_accounts: vec![
                DevAccount {
                    name: "Alice".to_owned(),
                    address: AccountId::from("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
                    seed: "//Alice".to_owned(),
                    password: "alice".to_owned(),
                },
                DevAccount {
                    name: "Bob".to_owned(),
                    address: AccountId::from("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty"),
                    seed: "//Bob".to_owned(),
                    password: "bob".to_owned(),
                },
            ],
        }
    }
}

impl ModalAdapterConfig {
    pub fn from_json(text: &str) -> Result<Self, PortError> {
        serde_json::from_str(text)
            .map_err(|e| PortError::Validation(format!("invalid adapter config: {e}")))
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.kdf_memory_kib,
            iterations: self.kdf_iterations,
        }
    }
}
