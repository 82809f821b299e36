//! # Network Switch Tests

use super::*;
use crate::error::SessionError;
use crate::switch::SwitchOutcome;

#[tokio::test]
async fn test_switch_to_known_chain_reconciles() {
    // Arrange
    let wallet = MockWallet::authorized(ALICE);
    wallet.set_balance(ALICE, ONE_AND_A_HALF);
    let controller = setup_controller(&wallet);
    controller.initialize().await;
    let mut notices = controller.notices();

    // Act
    let outcome = controller.switch_network(SEPOLIA).await.expect("switch should succeed");

    // Assert
    assert!(matches!(outcome, SwitchOutcome::Switched(_)));
    let session = outcome.session();
    assert_eq!(session.chain_id, Some(SEPOLIA));
    assert_eq!(session.network.as_ref().map(|n| n.name.as_str()), Some("Sepolia"));
    assert_eq!(session.account, Some(address(ALICE)));
    assert_eq!(session.balance.as_deref(), Some("1.5"));
    assert_eq!(controller.session(), *session);
    assert_eq!(wallet.calls("wallet_addEthereumChain"), 0);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::NetworkSwitched { name: "Sepolia".to_string() }]
    );
}

#[tokio::test]
async fn test_switch_unknown_chain_without_config_fails() {
    // Arrange
    let wallet = MockWallet::authorized(ALICE);
    let controller = setup_controller(&wallet);
    controller.initialize().await;
    let before = controller.session();

    // Act
    let result = controller.switch_network(POLYGON).await;

    // Assert
    assert_eq!(result, Err(SessionError::UnknownNetworkConfig(POLYGON)));
    assert_eq!(controller.session(), before);
    assert_eq!(controller.session().chain_id, Some(MAINNET));
    assert_eq!(wallet.calls("wallet_addEthereumChain"), 0);
}

#[tokio::test]
async fn test_switch_adds_registered_chain_the_wallet_lacks() {
    // Arrange
    let wallet = MockWallet::authorized(ALICE);
    *wallet.known_chains.borrow_mut() = vec![MAINNET];
    let controller = setup_controller(&wallet);
    controller.initialize().await;
    let mut notices = controller.notices();

    // Act
    let outcome = controller.switch_network(SEPOLIA).await.expect("switch should succeed");

    // Assert
    assert!(outcome.was_added());
    assert_eq!(outcome.session().chain_id, Some(SEPOLIA));

    let added = wallet.added.borrow();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].chain_id, "0xaa36a7");
    assert_eq!(added[0].chain_name, "Sepolia");
    assert_eq!(added[0].native_currency.decimals, 18);
    assert_eq!(added[0].rpc_urls, vec!["https://sepolia.infura.io/v3/".to_string()]);

    assert_eq!(
        drain(&mut notices),
        vec![Notice::NetworkAdded { name: "Sepolia".to_string() }]
    );
}

#[tokio::test]
async fn test_switch_recognizes_nested_unrecognized_chain_code() {
    let wallet = MockWallet::authorized(ALICE);
    *wallet.switch_error.borrow_mut() = Some(
        ProviderError::new(ProviderError::INTERNAL, "Unrecognized chain ID")
            .with_original_code(ProviderError::UNRECOGNIZED_CHAIN),
    );
    let controller = setup_controller(&wallet);
    controller.initialize().await;

    let outcome = controller.switch_network(SEPOLIA).await.expect("switch should succeed");

    assert!(outcome.was_added());
    assert_eq!(wallet.chain.get(), SEPOLIA);
}

#[tokio::test]
async fn test_add_chain_rejection_leaves_session_unchanged() {
    // Arrange
    let wallet = MockWallet::authorized(ALICE);
    *wallet.known_chains.borrow_mut() = vec![MAINNET];
    *wallet.add_error.borrow_mut() =
        Some(ProviderError::new(ProviderError::USER_REJECTED, "User rejected the request."));
    let controller = setup_controller(&wallet);
    controller.initialize().await;
    let before = controller.session();

    // Act
    let err = controller.switch_network(SEPOLIA).await.unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::AddChainRejected { chain_id, .. } if chain_id == SEPOLIA));
    assert!(err.is_user_rejection());
    assert_eq!(controller.session(), before);
}

#[tokio::test]
async fn test_switch_rejection_is_reported() {
    let wallet = MockWallet::authorized(ALICE);
    *wallet.switch_error.borrow_mut() =
        Some(ProviderError::new(ProviderError::USER_REJECTED, "User rejected the request."));
    let controller = setup_controller(&wallet);
    controller.initialize().await;
    let before = controller.session();

    let err = controller.switch_network(SEPOLIA).await.unwrap_err();

    assert!(matches!(err, SessionError::SwitchRejected { chain_id, .. } if chain_id == SEPOLIA));
    assert_eq!(err.user_message(), "Network switch was rejected in your wallet");
    assert_eq!(controller.session(), before);
    assert_eq!(wallet.calls("wallet_addEthereumChain"), 0);
}

#[tokio::test]
async fn test_switch_without_account_updates_chain_only() {
    let wallet = MockWallet::new();
    let controller = setup_controller(&wallet);

    let outcome = controller.switch_network(SEPOLIA).await.expect("switch should succeed");

    let session = outcome.into_session();
    assert!(!session.is_connected());
    assert_eq!(session.chain_id, Some(SEPOLIA));
    assert_eq!(session.network.map(|n| n.name), Some("Sepolia".to_string()));
    assert_eq!(wallet.calls("eth_getBalance"), 0);
}

#[tokio::test]
async fn test_switch_without_provider_fails() {
    let wallet = MockWallet::absent();
    let controller = setup_controller(&wallet);

    let result = controller.switch_network(SEPOLIA).await;

    assert_eq!(result, Err(SessionError::ProviderUnavailable));
    assert_eq!(wallet.calls("wallet_switchEthereumChain"), 0);
}
