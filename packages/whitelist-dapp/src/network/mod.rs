//! ethers-rs backed implementations of the chain seams, for talking to a
//! real node over HTTP JSON-RPC.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash};
use ethers::{
    abi::{Abi, Token},
    contract::ContractFactory as EthersContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip2718::TypedTransaction, TransactionReceipt, TransactionRequest, H160,
        H256, U256, U64,
    },
};
use tracing::debug;

use crate::{
    config::{DeployConfig, RpcConfig},
    deploy::Artifact,
    types::{
        errors::{require_deployed, DappError, Result},
        interfaces::{ChainProvider, ChainSigner, ContractFactory, WalletConnector},
        TxReceipt,
    },
};

type Client = SignerMiddleware<Provider<Http>, LocalWallet>;

fn to_h160(address: Address) -> H160 {
    H160::from(address.into_array())
}

fn from_h160(address: H160) -> Address {
    Address::from(address.0)
}

fn from_receipt(receipt: TransactionReceipt) -> TxReceipt {
    TxReceipt {
        tx_hash: TxHash::from(receipt.transaction_hash.0),
        block_number: receipt.block_number.map(|n| n.as_u64()).unwrap_or_default(),
        // Pre-byzantium receipts carry no status; treat them as mined.
        success: receipt.status != Some(U64::zero()),
        contract_address: receipt.contract_address.map(from_h160),
    }
}

/// A local private-key account attached to an HTTP provider.
#[derive(Debug, Clone)]
pub struct EthersWallet {
    client: Arc<Client>,
}

impl EthersWallet {
    pub async fn connect(rpc: &RpcConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc.rpc_url.as_str())
            .map_err(|e| DappError::Config(format!("invalid rpc url {}: {e}", rpc.rpc_url)))?;
        let chain_id = provider.get_chainid().await.map_err(DappError::chain)?;
        let signer = rpc
            .private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| DappError::Config(format!("invalid private key: {e}")))?
            .with_chain_id(chain_id.as_u64());

        debug!(rpc_url = %rpc.rpc_url, account = %signer.address(), "opened rpc connection");
        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, signer)),
        })
    }
}

impl ChainProvider for EthersWallet {
    async fn chain_id(&self) -> Result<u64> {
        let id = self.client.get_chainid().await.map_err(DappError::chain)?;
        Ok(id.as_u64())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new()
            .from(self.client.address())
            .to(to_h160(to))
            .data(data.to_vec())
            .into();
        let out = self.client.call(&tx, None).await.map_err(DappError::chain)?;
        Ok(Bytes::from(out.to_vec()))
    }
}

impl ChainSigner for EthersWallet {
    async fn address(&self) -> Result<Address> {
        Ok(from_h160(self.client.address()))
    }

    async fn send_transaction(&self, to: Address, data: Bytes) -> Result<TxHash> {
        let tx = TransactionRequest::new().to(to_h160(to)).data(data.to_vec());
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(DappError::chain)?;
        Ok(TxHash::from(pending.tx_hash().0))
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<TxReceipt> {
        let pending = PendingTransaction::new(H256::from(tx_hash.0), self.client.provider());
        let receipt = pending
            .await
            .map_err(DappError::chain)?
            .ok_or_else(|| DappError::Chain(format!("{tx_hash} was dropped from the mempool")))?;
        Ok(from_receipt(receipt))
    }
}

/// Connects with the account configured in the environment. Each call opens
/// a new connection, as a browser wallet would.
#[derive(Debug, Clone)]
pub struct EthersConnector {
    rpc: RpcConfig,
}

impl EthersConnector {
    pub fn new(rpc: RpcConfig) -> Self {
        Self { rpc }
    }
}

impl WalletConnector for EthersConnector {
    type Wallet = EthersWallet;

    async fn connect(&self) -> Result<EthersWallet> {
        EthersWallet::connect(&self.rpc).await
    }
}

/// Deploys the compiled `Whitelist` artifact.
#[derive(Debug, Clone)]
pub struct EthersFactory {
    wallet: EthersWallet,
    abi: Abi,
    bytecode: ethers::types::Bytes,
}

impl EthersFactory {
    pub async fn from_config(config: &DeployConfig) -> Result<Self> {
        let artifact = Artifact::load(&config.artifact_path)?;
        let wallet = EthersWallet::connect(&config.rpc).await?;
        Self::new(wallet, &artifact)
    }

    pub fn new(wallet: EthersWallet, artifact: &Artifact) -> Result<Self> {
        let abi: Abi = serde_json::from_value(artifact.abi.clone())
            .map_err(|e| DappError::Artifact(format!("{} abi: {e}", artifact.contract_name)))?;
        let bytecode = artifact.bytecode_bytes()?;
        Ok(Self {
            wallet,
            abi,
            bytecode: bytecode.into(),
        })
    }
}

impl ContractFactory for EthersFactory {
    async fn deploy(&self, max_whitelisted_addresses: u8) -> Result<TxHash> {
        let factory = EthersContractFactory::new(
            self.abi.clone(),
            self.bytecode.clone(),
            self.wallet.client.clone(),
        );
        let deployer = factory
            .deploy_tokens(vec![Token::Uint(U256::from(max_whitelisted_addresses))])
            .map_err(|e| DappError::Deployment(e.to_string()))?;

        let pending = self
            .wallet
            .client
            .send_transaction(deployer.tx, None)
            .await
            .map_err(DappError::chain)?;
        Ok(TxHash::from(pending.tx_hash().0))
    }

    async fn deployed(&self, tx_hash: TxHash) -> Result<Address> {
        let receipt = self.wallet.wait_for_confirmation(tx_hash).await?;
        if !receipt.success {
            return Err(DappError::Deployment(format!("{tx_hash} reverted")));
        }
        require_deployed(&receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_conversions_round_trip() {
        let address = Address::repeat_byte(0x42);
        assert_eq!(from_h160(to_h160(address)), address);
    }

    #[test]
    fn test_receipt_status_mapping() {
        let mut receipt = TransactionReceipt {
            transaction_hash: H256::repeat_byte(0x01),
            block_number: Some(U64::from(12)),
            status: Some(U64::one()),
            contract_address: Some(H160::repeat_byte(0x22)),
            ..Default::default()
        };

        let mapped = from_receipt(receipt.clone());
        assert!(mapped.success);
        assert_eq!(mapped.block_number, 12);
        assert_eq!(mapped.tx_hash, TxHash::repeat_byte(0x01));
        assert_eq!(mapped.contract_address, Some(Address::repeat_byte(0x22)));

        receipt.status = Some(U64::zero());
        assert!(!from_receipt(receipt).success);
    }
}
