pub mod config;
pub mod contract;
pub mod deploy;
pub mod logging;
pub mod network;
pub mod session;
pub mod types;

// Re-export the pieces front-ends are built from
pub use config::{DappConfig, DeployConfig, RpcConfig};
pub use contract::{PendingTransaction, WhitelistContract};
pub use session::{render_button, ButtonView, SessionState, WhitelistSession};
pub use types::{
    errors::{DappError, Result},
    interfaces::{Alerter, ChainProvider, ChainSigner, ContractFactory, WalletConnector},
    IWhitelist, TxReceipt,
};
