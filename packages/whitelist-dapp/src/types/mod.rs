use alloy_primitives::{address, Address, TxHash};
use alloy_sol_types::sol;

pub mod errors;
pub mod interfaces;

sol! {
    /// ABI of the deployed `Whitelist` contract. Only the getters and the
    /// join entry point are reachable from the client.
    interface IWhitelist {
        function maxWhitelistedAddresses() external view returns (uint8 max);
        function numAddressesWhitelisted() external view returns (uint8 count);
        function whitelistedAddresses(address account) external view returns (bool joined);
        function addAddressToWhitelist() external;
    }
}

/// Confirmation record for a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub success: bool,
    pub contract_address: Option<Address>,
}

impl TxReceipt {
    pub fn mined(tx_hash: TxHash, block_number: u64) -> Self {
        Self {
            tx_hash,
            block_number,
            success: true,
            contract_address: None,
        }
    }

    pub fn reverted(tx_hash: TxHash, block_number: u64) -> Self {
        Self {
            success: false,
            ..Self::mined(tx_hash, block_number)
        }
    }
}

pub const MAX_WHITELISTED_ADDRESSES: u8 = 10; // constructor argument used by the deploy step
pub const EXPECTED_CHAIN_ID: u64 = 5; // Goerli
pub const NETWORK_NAME: &str = "Goerli";

pub const WHITELIST_CONTRACT_ADDRESS: Address =
    address!("4f2b7a6e3c7d19d0b2a1f6c5e8d3a90b7c5e1f24");

pub const ALREADY_WHITELISTED: &str = "Sender has already been whitelisted";
pub const WHITELIST_FULL: &str = "More addresses cant be added, limit reached";
