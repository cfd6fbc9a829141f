use std::io::{self, Write};

use alloy_primitives::{Address, Bytes};
use tracing::debug;

use crate::{
    config::DappConfig,
    types::{
        errors::{require_network, Result},
        interfaces::{Alerter, ChainProvider, WalletConnector},
    },
};

/// Hides the signing half of a wallet.
#[derive(Debug, Clone)]
pub struct ReadOnly<W>(W);

impl<W> ReadOnly<W> {
    pub fn new(wallet: W) -> Self {
        Self(wallet)
    }
}

impl<W: ChainProvider> ChainProvider for ReadOnly<W> {
    async fn chain_id(&self) -> Result<u64> {
        self.0.chain_id().await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.0.call(to, data).await
    }
}

#[derive(Debug)]
pub enum ProviderOrSigner<W> {
    Provider(ReadOnly<W>),
    Signer(W),
}

impl<W> ProviderOrSigner<W> {
    pub fn is_signer(&self) -> bool {
        matches!(self, ProviderOrSigner::Signer(_))
    }
}

/// Alerts by writing to stderr, for terminal front-ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlerter;

impl ConsoleAlerter {
    fn write_alert<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{message}")
    }
}

impl Alerter for ConsoleAlerter {
    fn alert(&self, message: &str) {
        // Nowhere left to report a broken stderr.
        let _ = Self::write_alert(&mut io::stderr().lock(), message);
    }
}

/// Opens wallet connections and checks the network before handing them out.
/// This is the only place the chain id is validated.
pub struct ConnectionResolver<C, A> {
    connector: C,
    alerter: A,
    expected_chain_id: u64,
    network_name: String,
}

impl<C, A> ConnectionResolver<C, A>
where
    C: WalletConnector,
    A: Alerter,
{
    pub fn new(connector: C, alerter: A, config: &DappConfig) -> Self {
        Self {
            connector,
            alerter,
            expected_chain_id: config.expected_chain_id,
            network_name: config.network_name.clone(),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn alerter(&self) -> &A {
        &self.alerter
    }

    pub async fn get_provider_or_signer(
        &self,
        need_signer: bool,
    ) -> Result<ProviderOrSigner<C::Wallet>> {
        let wallet = self.connector.connect().await?;
        let chain_id = wallet.chain_id().await?;

        if let Err(err) = require_network(chain_id, self.expected_chain_id) {
            self.alerter
                .alert(&format!("Change the network to {}", self.network_name));
            return Err(err);
        }
        debug!(chain_id, need_signer, "wallet connected");

        Ok(if need_signer {
            ProviderOrSigner::Signer(wallet)
        } else {
            ProviderOrSigner::Provider(ReadOnly::new(wallet))
        })
    }

    pub async fn provider(&self) -> Result<ReadOnly<C::Wallet>> {
        match self.get_provider_or_signer(false).await? {
            ProviderOrSigner::Provider(provider) => Ok(provider),
            ProviderOrSigner::Signer(wallet) => Ok(ReadOnly::new(wallet)),
        }
    }

    pub async fn signer(&self) -> Result<C::Wallet> {
        match self.get_provider_or_signer(true).await? {
            ProviderOrSigner::Signer(wallet) => Ok(wallet),
            ProviderOrSigner::Provider(ReadOnly(wallet)) => Ok(wallet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_alert_is_written_once() {
        let mut out = Vec::new();
        ConsoleAlerter::write_alert(&mut out, "Change the network to Goerli").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Change the network to Goerli\n"
        );
    }
}
