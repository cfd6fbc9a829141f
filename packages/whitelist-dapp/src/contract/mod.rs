use alloy_primitives::{Address, Bytes, TxHash};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::types::{
    errors::{require_success, Result},
    interfaces::{ChainProvider, ChainSigner},
    IWhitelist, TxReceipt,
};

/// Whitelist contract bound to an address and to the capability it was
/// resolved with. Read methods need a provider, the join method a signer.
#[derive(Debug, Clone)]
pub struct WhitelistContract<P> {
    address: Address,
    client: P,
}

impl<P> WhitelistContract<P> {
    pub fn new(address: Address, client: P) -> Self {
        Self { address, client }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn client(&self) -> &P {
        &self.client
    }
}

impl<P: ChainProvider> WhitelistContract<P> {
    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let data = self
            .client
            .call(self.address, Bytes::from(call.abi_encode()))
            .await?;
        Ok(C::abi_decode_returns(&data, true)?)
    }

    pub async fn max_whitelisted_addresses(&self) -> Result<u8> {
        let ret = self.read(IWhitelist::maxWhitelistedAddressesCall {}).await?;
        Ok(ret.max)
    }

    pub async fn num_addresses_whitelisted(&self) -> Result<u8> {
        let ret = self.read(IWhitelist::numAddressesWhitelistedCall {}).await?;
        Ok(ret.count)
    }

    pub async fn whitelisted_addresses(&self, account: Address) -> Result<bool> {
        let ret = self
            .read(IWhitelist::whitelistedAddressesCall { account })
            .await?;
        Ok(ret.joined)
    }
}

impl<S: ChainSigner> WhitelistContract<S> {
    /// Submits `addAddressToWhitelist()` for the signer's account. The
    /// returned handle resolves once the transaction is mined.
    pub async fn add_address_to_whitelist(&self) -> Result<PendingTransaction<'_, S>> {
        let data = IWhitelist::addAddressToWhitelistCall {}.abi_encode();
        let tx_hash = self
            .client
            .send_transaction(self.address, Bytes::from(data))
            .await?;
        debug!(%tx_hash, contract = %self.address, "submitted addAddressToWhitelist");
        Ok(PendingTransaction::new(tx_hash, &self.client))
    }
}

/// A submitted transaction that has not been confirmed yet.
#[derive(Debug)]
pub struct PendingTransaction<'a, S> {
    tx_hash: TxHash,
    signer: &'a S,
}

impl<'a, S: ChainSigner> PendingTransaction<'a, S> {
    pub fn new(tx_hash: TxHash, signer: &'a S) -> Self {
        Self { tx_hash, signer }
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Waits for the receipt. A mined-but-reverted transaction is an error.
    pub async fn wait(self) -> Result<TxReceipt> {
        let receipt = self.signer.wait_for_confirmation(self.tx_hash).await?;
        require_success(&receipt)?;
        debug!(tx_hash = %self.tx_hash, block = receipt.block_number, "transaction confirmed");
        Ok(receipt)
    }
}
