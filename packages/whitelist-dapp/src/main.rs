use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing::warn;
use whitelist_dapp::{
    logging,
    network::EthersConnector,
    session::{ConsoleAlerter, WhitelistSession},
    render_button, ButtonView, DappConfig, RpcConfig, WhitelistContract,
};

#[derive(Parser, Debug)]
#[command(name = "whitelist-dapp", about = "Join the Crypto Devs whitelist from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Connect, then show membership and the whitelisted count
    Status,
    /// Connect, then submit the join transaction
    Join,
}

fn render<C, A>(session: &WhitelistSession<C, A>)
where
    C: whitelist_dapp::WalletConnector,
    A: whitelist_dapp::Alerter,
{
    let state = session.state();
    println!("Welcome to Crypto Devs!");
    println!("Its an NFT collection for developers in Crypto.");
    println!("{}", state.summary());
    println!("[ {} ]", session.render_button().label());
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = DappConfig::from_env().wrap_err("loading dapp configuration")?;
    let rpc = RpcConfig::from_env().wrap_err("loading wallet configuration")?;
    let mut session = WhitelistSession::new(EthersConnector::new(rpc), ConsoleAlerter, &config);

    // Errors are already logged by the session; only the wrong-network case
    // stops the page from rendering.
    if let Err(e) = session.connect_wallet().await {
        if e.is_wrong_network() {
            return Err(e).wrap_err("wallet is on the wrong network");
        }
    }

    if let Ok(provider) = session.resolver().provider().await {
        let contract = WhitelistContract::new(config.contract_address, provider);
        match contract.max_whitelisted_addresses().await {
            Ok(max) => println!("Whitelist capacity: {max}"),
            Err(e) => warn!(error = %e, "could not read whitelist capacity"),
        }
    }

    if cli.command == Some(Command::Join) {
        match session.render_button() {
            ButtonView::JoinWhitelist => {
                let mut updates = session.subscribe();
                let join = session.add_address_to_whitelist();
                tokio::pin!(join);
                loop {
                    tokio::select! {
                        _ = &mut join => break,
                        Ok(()) = updates.changed() => {
                            if render_button(&updates.borrow_and_update()) == ButtonView::Loading {
                                println!("[ {} ]", ButtonView::Loading.label());
                            }
                        }
                    }
                }
            }
            view => println!("Nothing to do: {}", view.label()),
        }
    }

    render(&session);
    Ok(())
}
