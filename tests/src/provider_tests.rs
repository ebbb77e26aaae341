use crate::utils::{mock_provider, mock_provider_without_accounts, test_config, TEST_ACCOUNT};
use anyhow::Result;
use httpmock::prelude::*;
use minter::provider::ProviderClient;
use minter::{AppState, Error};
use serde_json::json;

#[tokio::test]
async fn test_connect_returns_chain_and_accounts() -> Result<()> {
    let server = MockServer::start_async().await;
    mock_provider(&server).await;

    let client = ProviderClient::new(reqwest::Client::new(), &server.base_url());
    let handle = client.connect().await?;

    assert_eq!(handle.chain_id, 1);
    assert_eq!(handle.active_account(), Some(TEST_ACCOUNT));

    Ok(())
}

#[tokio::test]
async fn test_connect_rpc_error_is_typed() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_chainId");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "method not found"}
            }));
        })
        .await;

    let client = ProviderClient::new(reqwest::Client::new(), &server.base_url());
    let err = client
        .connect()
        .await
        .expect_err("an RPC error object should fail the connection");

    assert!(matches!(err, Error::Provider(_)));
    assert!(err.to_string().contains("method not found"));

    Ok(())
}

#[tokio::test]
async fn test_missing_provider_fails_startup() -> Result<()> {
    let image_api = MockServer::start_async().await;
    let storage_api = MockServer::start_async().await;

    // Nothing is listening where the provider is expected.
    let dead = MockServer::start_async().await;
    let mut config = test_config(&dead, &image_api, &storage_api);
    config.provider_url = "http://127.0.0.1:1".into();

    let err = AppState::new(config)
        .await
        .expect_err("startup should fail without a reachable provider");
    assert!(matches!(err, Error::Provider(_)));

    Ok(())
}

#[tokio::test]
async fn test_provider_without_accounts_still_connects() -> Result<()> {
    let provider = MockServer::start_async().await;
    let image_api = MockServer::start_async().await;
    let storage_api = MockServer::start_async().await;

    mock_provider_without_accounts(&provider).await;
    let state = AppState::new(test_config(&provider, &image_api, &storage_api)).await?;

    assert_eq!(state.connection.active_account(), None);

    Ok(())
}
