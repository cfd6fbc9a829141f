use std::process::ExitCode;

use whitelist_dapp::{deploy, logging, network::EthersFactory, DeployConfig};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let setup = match DeployConfig::from_env() {
        Ok(config) => EthersFactory::from_config(&config)
            .await
            .map(|factory| (factory, config.max_whitelisted_addresses)),
        Err(e) => Err(e),
    };
    let (factory, max_whitelisted_addresses) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(deploy::EXIT_FAILURE);
        }
    };

    let code = deploy::run(
        &factory,
        max_whitelisted_addresses,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;
    ExitCode::from(code)
}
