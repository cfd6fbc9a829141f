use std::io::Write;

use alloy_primitives::Address;
use tracing::{error, info};

use crate::types::{
    errors::{DappError, Result},
    interfaces::ContractFactory,
};

pub mod artifact;

pub use artifact::Artifact;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Deploys the whitelist contract and waits until it is mined.
pub async fn deploy_whitelist<F: ContractFactory>(
    factory: &F,
    max_whitelisted_addresses: u8,
) -> Result<Address> {
    let tx_hash = factory.deploy(max_whitelisted_addresses).await?;
    info!(%tx_hash, max_whitelisted_addresses, "deployment submitted");

    let address = factory.deployed(tx_hash).await?;
    if address.is_zero() {
        return Err(DappError::Deployment(format!(
            "{tx_hash} reported the zero address"
        )));
    }
    Ok(address)
}

/// One-shot deployment. Prints the address to `out` and returns the process
/// exit status; any failure goes to `err` and yields [`EXIT_FAILURE`].
pub async fn run<F, O, E>(
    factory: &F,
    max_whitelisted_addresses: u8,
    out: &mut O,
    err: &mut E,
) -> u8
where
    F: ContractFactory,
    O: Write,
    E: Write,
{
    let outcome = match deploy_whitelist(factory, max_whitelisted_addresses).await {
        Ok(address) => writeln!(out, "Whitelist Contract Address: {address}")
            .map_err(|e| DappError::Deployment(format!("cannot report address: {e}"))),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!(error = %e, "deployment failed");
            let _ = writeln!(err, "{e}");
            EXIT_FAILURE
        }
    }
}
