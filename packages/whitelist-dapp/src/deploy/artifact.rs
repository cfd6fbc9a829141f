use std::{fs, path::Path};

use serde::Deserialize;

use crate::types::errors::{DappError, Result};

/// Compiled contract as written by Hardhat under `artifacts/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| DappError::Artifact(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| DappError::Artifact(e.to_string()))
    }

    /// Creation bytecode. Interfaces and abstract contracts compile to `0x`
    /// and cannot be deployed.
    pub fn bytecode_bytes(&self) -> Result<Vec<u8>> {
        let hex_str = self.bytecode.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let code = hex::decode(hex_str).map_err(|e| {
            DappError::Artifact(format!("{} bytecode is not hex: {e}", self.contract_name))
        })?;
        if code.is_empty() {
            return Err(DappError::Artifact(format!(
                "{} has no creation bytecode",
                self.contract_name
            )));
        }
        Ok(code)
    }
}
