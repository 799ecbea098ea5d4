use std::collections::HashMap;

use extrinsic_modal_core::{PortError, Translate};

/// Key → text table. Unknown keys render as the key itself.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    table: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn from_json(text: &str) -> Result<Self, PortError> {
        let table: HashMap<String, String> = serde_json::from_str(text)
            .map_err(|e| PortError::Validation(format!("invalid translation table: {e}")))?;
        Ok(Self { table })
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.table.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Translate for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}
