use std::{fmt, path::PathBuf};

use alloy_primitives::Address;

use crate::types::{
    errors::{DappError, Result},
    EXPECTED_CHAIN_ID, MAX_WHITELISTED_ADDRESSES, NETWORK_NAME, WHITELIST_CONTRACT_ADDRESS,
};

pub const RPC_URL_ENV: &str = "WHITELIST_RPC_URL";
pub const PRIVATE_KEY_ENV: &str = "WHITELIST_PRIVATE_KEY";
pub const CONTRACT_ADDRESS_ENV: &str = "WHITELIST_CONTRACT_ADDRESS";
pub const CHAIN_ID_ENV: &str = "WHITELIST_CHAIN_ID";
pub const ARTIFACT_ENV: &str = "WHITELIST_ARTIFACT";

pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/Whitelist.sol/Whitelist.json";

/// Client-side constants: where the contract lives and which network it is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DappConfig {
    pub contract_address: Address,
    pub expected_chain_id: u64,
    pub network_name: String,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            contract_address: WHITELIST_CONTRACT_ADDRESS,
            expected_chain_id: EXPECTED_CHAIN_ID,
            network_name: NETWORK_NAME.to_string(),
        }
    }
}

impl DappConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides found through `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(CONTRACT_ADDRESS_ENV) {
            config.contract_address = raw.trim().parse::<Address>().map_err(|e| {
                DappError::Config(format!("{CONTRACT_ADDRESS_ENV}={raw} is not an address: {e}"))
            })?;
        }
        if let Some(raw) = lookup(CHAIN_ID_ENV) {
            config.expected_chain_id = raw.trim().parse::<u64>().map_err(|e| {
                DappError::Config(format!("{CHAIN_ID_ENV}={raw} is not a chain id: {e}"))
            })?;
        }

        Ok(config)
    }
}

/// Node endpoint and the account key used to sign.
#[derive(Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub rpc_url: String,
    pub private_key: String,
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl RpcConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            rpc_url: required(&lookup, RPC_URL_ENV)?,
            private_key: required(&lookup, PRIVATE_KEY_ENV)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub rpc: RpcConfig,
    pub artifact_path: PathBuf,
    pub max_whitelisted_addresses: u8,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let artifact_path = lookup(ARTIFACT_ENV)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_PATH.to_string());

        Ok(Self {
            rpc: RpcConfig::from_lookup(&lookup)?,
            artifact_path: PathBuf::from(artifact_path),
            max_whitelisted_addresses: MAX_WHITELISTED_ADDRESSES,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| DappError::Config(format!("{key} is not set")))
}
