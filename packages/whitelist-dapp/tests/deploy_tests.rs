
use alloy_primitives::Address;
use test_utils::*;
use whitelist_dapp::{
    deploy::{self, EXIT_FAILURE, EXIT_SUCCESS},
    session::ReadOnly,
    types::MAX_WHITELISTED_ADDRESSES,
    ButtonView, DappConfig, DappError, WhitelistContract, WhitelistSession,
};

const ADDRESS_PREFIX: &str = "Whitelist Contract Address: ";

fn printed_address(out: &[u8]) -> Address {
    let text = String::from_utf8(out.to_vec()).expect("stdout is not utf-8");
    let line = text.lines().next().expect("nothing printed");
    let raw = line
        .strip_prefix(ADDRESS_PREFIX)
        .unwrap_or_else(|| panic!("unexpected output line: {line}"));
    assert!(raw.starts_with("0x"));
    assert_eq!(raw.len(), 42);
    assert!(raw[2..].chars().all(|c| c.is_ascii_hexdigit()));
    raw.parse::<Address>().expect("printed address does not parse")
}

#[cfg(test)]
mod deploy_tests {
    use super::*;

    #[tokio::test]
    async fn test_deploy_prints_address_and_succeeds() {
        let context = TestContext::new();
        let factory = context.chain.factory(context.deployer());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let code = deploy::run(&factory, MAX_WHITELISTED_ADDRESSES, &mut out, &mut err).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert!(err.is_empty());
        let address = printed_address(&out);
        assert!(!address.is_zero());

        let storage = context.chain.storage(address).expect("contract not on chain");
        assert_eq!(storage.max_whitelisted_addresses, 10);
        assert_eq!(storage.num_addresses_whitelisted, 0);
    }

    #[tokio::test]
    async fn test_deployed_contract_reports_its_capacity() {
        let context = TestContext::new();
        let factory = context.chain.factory(context.deployer());

        let address = deploy::deploy_whitelist(&factory, MAX_WHITELISTED_ADDRESSES)
            .await
            .expect("Deployment failed");

        let reader = ReadOnly::new(context.chain.wallet(context.user()));
        let contract = WhitelistContract::new(address, reader);
        assert_eq!(contract.max_whitelisted_addresses().await.unwrap(), 10);
        assert_eq!(contract.num_addresses_whitelisted().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_confirmation_exits_with_one() {
        let context = TestContext::new();
        context.chain.fail_confirmations(true);
        let factory = context.chain.factory(context.deployer());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let code = deploy::run(&factory, MAX_WHITELISTED_ADDRESSES, &mut out, &mut err).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty(), "no address should be printed");
        let message = String::from_utf8(err).unwrap();
        assert!(message.contains("timed out waiting"), "stderr was: {message}");
    }

    #[tokio::test]
    async fn test_unreachable_node_exits_with_one() {
        let context = TestContext::new();
        context.chain.fail_rpc(true);
        let factory = context.chain.factory(context.deployer());
        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());

        let code = deploy::run(&factory, MAX_WHITELISTED_ADDRESSES, &mut out, &mut err).await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(String::from_utf8(err).unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_run_deploys_with_the_configured_capacity() {
        let context = TestContext::new();
        let factory = context.chain.factory(context.deployer());
        let mut out = Vec::<u8>::new();

        let code = deploy::run(&factory, 3, &mut out, &mut Vec::<u8>::new()).await;

        assert_eq!(code, EXIT_SUCCESS);
        let storage = context
            .chain
            .storage(printed_address(&out))
            .expect("contract not on chain");
        assert_eq!(storage.max_whitelisted_addresses, 3);
    }

    #[tokio::test]
    async fn test_each_deployment_gets_a_new_address() {
        let context = TestContext::new();
        let factory = context.chain.factory(context.deployer());

        let first = deploy::deploy_whitelist(&factory, 10).await.unwrap();
        let second = deploy::deploy_whitelist(&factory, 3).await.unwrap();

        assert_ne!(first, second);
        assert_ne!(first, context.whitelist);
        assert_eq!(context.chain.storage(second).unwrap().max_whitelisted_addresses, 3);
    }

    #[tokio::test]
    async fn test_deploy_then_join_end_to_end() {
        let context = TestContext::new();
        let factory = context.chain.factory(context.deployer());
        let mut out = Vec::<u8>::new();
        let code =
            deploy::run(&factory, MAX_WHITELISTED_ADDRESSES, &mut out, &mut Vec::<u8>::new()).await;
        assert_eq!(code, EXIT_SUCCESS);

        let config = DappConfig {
            contract_address: printed_address(&out),
            ..Default::default()
        };
        let mut session = WhitelistSession::new(
            context.chain.connector(context.user()),
            RecordingAlerter::default(),
            &config,
        );

        session.connect_wallet().await.expect("Wallet connection failed");
        assert_eq!(session.render_button(), ButtonView::JoinWhitelist);

        session.add_address_to_whitelist().await.expect("Join failed");
        assert_eq!(session.state().whitelisted_count, 1);
        assert_eq!(session.render_button(), ButtonView::Joined);
    }

    #[tokio::test]
    async fn test_session_against_missing_contract_fails_quietly() {
        let context = TestContext::new();
        let config = DappConfig {
            contract_address: Address::repeat_byte(0x99),
            ..Default::default()
        };
        let mut session = WhitelistSession::new(
            context.chain.connector(context.user()),
            RecordingAlerter::default(),
            &config,
        );

        let result = session.get_number_of_whitelisted().await;

        assert!(matches!(result, Err(DappError::Chain(_))));
        assert_eq!(session.state().whitelisted_count, 0);
        assert!(session.state().last_error.is_some());
    }
}
