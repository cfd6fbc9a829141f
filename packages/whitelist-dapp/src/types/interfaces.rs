//! Seams between the dApp flow and the chain. Everything that talks to a node
//! or a wallet sits behind one of these traits.

use alloy_primitives::{Address, Bytes, TxHash};

use super::{errors::Result, TxReceipt};

/// Read-only access to chain state.
#[allow(async_fn_in_trait)]
pub trait ChainProvider {
    async fn chain_id(&self) -> Result<u64>;
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}

/// A provider that can also sign and submit transactions for one account.
#[allow(async_fn_in_trait)]
pub trait ChainSigner: ChainProvider {
    async fn address(&self) -> Result<Address>;
    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxHash>;
    /// Resolves once the transaction is mined. There is no timeout.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<TxReceipt>;
}

/// Opens a wallet connection, prompting the user the first time if needed.
#[allow(async_fn_in_trait)]
pub trait WalletConnector {
    type Wallet: ChainSigner;

    async fn connect(&self) -> Result<Self::Wallet>;
}

/// Blocking, user-facing notification.
pub trait Alerter {
    fn alert(&self, message: &str);
}

/// Contract-construction capability for the whitelist contract.
#[allow(async_fn_in_trait)]
pub trait ContractFactory {
    async fn deploy(&self, max_whitelisted_addresses: u8) -> Result<TxHash>;
    async fn deployed(&self, tx_hash: TxHash) -> Result<Address>;
}
