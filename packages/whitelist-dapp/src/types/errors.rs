use alloy_primitives::Address;
use thiserror::Error;

use super::TxReceipt;

#[derive(Error, Debug)]
pub enum DappError {
    #[error("wrong network: expected chain id {expected}, wallet is connected to {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("chain request failed: {0}")]
    Chain(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("abi error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("deployment failed: {0}")]
    Deployment(String),
}

impl DappError {
    pub fn chain(err: impl std::fmt::Display) -> Self {
        DappError::Chain(err.to_string())
    }

    pub fn is_wrong_network(&self) -> bool {
        matches!(self, DappError::WrongNetwork { .. })
    }
}

pub type Result<T> = core::result::Result<T, DappError>;

pub fn require_network(actual: u64, expected: u64) -> Result<()> {
    if actual != expected {
        Err(DappError::WrongNetwork { expected, actual })
    } else {
        Ok(())
    }
}

pub fn require_success(receipt: &TxReceipt) -> Result<()> {
    if !receipt.success {
        Err(DappError::Reverted(format!(
            "transaction {} failed in block {}",
            receipt.tx_hash, receipt.block_number
        )))
    } else {
        Ok(())
    }
}

pub fn require_deployed(receipt: &TxReceipt) -> Result<Address> {
    match receipt.contract_address {
        Some(address) if !address.is_zero() => Ok(address),
        _ => Err(DappError::Deployment(format!(
            "receipt for {} carries no contract address",
            receipt.tx_hash
        ))),
    }
}
