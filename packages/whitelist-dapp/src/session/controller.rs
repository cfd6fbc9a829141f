use alloy_primitives::Address;
use tokio::sync::watch;
use tracing::{error, info};

use super::{render_button, resolver::ConnectionResolver, ButtonView, SessionState};
use crate::{
    config::DappConfig,
    contract::WhitelistContract,
    types::{
        errors::Result,
        interfaces::{Alerter, ChainSigner, WalletConnector},
        TxReceipt,
    },
};

/// Drives the whitelist page: connect, query membership and count, join.
///
/// Every operation resolves a fresh connection, so a wallet that switched
/// networks mid-session is caught on the next call. Failures are logged and
/// recorded in [`SessionState::last_error`]; the rest of the state is left as
/// it was. The error is still returned so callers can decide to surface it.
///
/// State changes are published on a watch channel, so a renderer holding a
/// [`subscribe`](Self::subscribe) receiver sees `loading` while a join is
/// being confirmed.
pub struct WhitelistSession<C, A> {
    resolver: ConnectionResolver<C, A>,
    contract_address: Address,
    state: watch::Sender<SessionState>,
}

impl<C, A> WhitelistSession<C, A>
where
    C: WalletConnector,
    A: Alerter,
{
    pub fn new(connector: C, alerter: A, config: &DappConfig) -> Self {
        Self {
            resolver: ConnectionResolver::new(connector, alerter, config),
            contract_address: config.contract_address,
            state: watch::Sender::new(SessionState::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn resolver(&self) -> &ConnectionResolver<C, A> {
        &self.resolver
    }

    pub fn render_button(&self) -> ButtonView {
        render_button(&self.state.borrow())
    }

    pub async fn connect_wallet(&mut self) -> Result<()> {
        let connected = self.resolver.provider().await.map(|_| ());
        self.settle("connect_wallet", connected)?;
        self.state.send_modify(|s| s.wallet_connected = true);
        info!("wallet connected");

        // Both queries run even if the first one fails.
        let membership = self.check_if_address_in_whitelist().await.map(|_| ());
        let count = self.get_number_of_whitelisted().await.map(|_| ());
        membership.and(count)
    }

    pub async fn check_if_address_in_whitelist(&mut self) -> Result<bool> {
        let joined = self.query_membership().await;
        let joined = self.settle("check_if_address_in_whitelist", joined)?;
        self.state.send_modify(|s| s.joined_whitelist = joined);
        Ok(joined)
    }

    pub async fn get_number_of_whitelisted(&mut self) -> Result<u8> {
        let count = self.query_count().await;
        let count = self.settle("get_number_of_whitelisted", count)?;
        self.state.send_modify(|s| s.whitelisted_count = count);
        Ok(count)
    }

    /// Submits the join transaction and holds `loading` until it is mined,
    /// then refreshes the whitelisted count.
    pub async fn add_address_to_whitelist(&mut self) -> Result<TxReceipt> {
        let receipt = self.submit_join().await;
        let receipt = self.settle("add_address_to_whitelist", receipt)?;
        self.state.send_modify(|s| s.joined_whitelist = true);
        info!(tx_hash = %receipt.tx_hash, block = receipt.block_number, "joined whitelist");

        // The join is mined either way; a failed refresh only shows up in
        // `last_error`.
        let _ = self.get_number_of_whitelisted().await;
        Ok(receipt)
    }

    async fn query_membership(&self) -> Result<bool> {
        let signer = self.resolver.signer().await?;
        let account = signer.address().await?;
        let contract = WhitelistContract::new(self.contract_address, signer);
        contract.whitelisted_addresses(account).await
    }

    async fn query_count(&self) -> Result<u8> {
        let provider = self.resolver.provider().await?;
        let contract = WhitelistContract::new(self.contract_address, provider);
        contract.num_addresses_whitelisted().await
    }

    async fn submit_join(&mut self) -> Result<TxReceipt> {
        let signer = self.resolver.signer().await?;
        let contract = WhitelistContract::new(self.contract_address, signer);
        let pending = contract.add_address_to_whitelist().await?;
        info!(tx_hash = %pending.tx_hash(), "waiting for join transaction");

        self.state.send_modify(|s| s.loading = true);
        let receipt = pending.wait().await;
        self.state.send_modify(|s| s.loading = false);
        receipt
    }

    fn settle<T>(&mut self, operation: &'static str, outcome: Result<T>) -> Result<T> {
        if let Err(err) = &outcome {
            error!(operation, error = %err, "whitelist operation failed");
            let message = err.to_string();
            self.state.send_modify(|s| s.last_error = Some(message));
        }
        outcome
    }
}
