use anyhow::Result;
use httpmock::prelude::*;
use minter::{AppState, Config};
use serde_json::json;

/// Payload returned by the mock generation backend. Content only has to be
/// bytes; nothing in the workflow inspects the image itself.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

pub const TEST_ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Mount `eth_chainId` / `eth_accounts` mocks for a wallet provider.
pub async fn mock_provider(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_chainId");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_accounts");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": [TEST_ACCOUNT]}));
        })
        .await;
}

/// Provider that connects but exposes no account.
pub async fn mock_provider_without_accounts(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_chainId");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_accounts");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": []}));
        })
        .await;
}

pub fn test_config(provider: &MockServer, image: &MockServer, storage: &MockServer) -> Config {
    Config {
        bind_address: "127.0.0.1:0".into(),
        provider_url: provider.base_url(),
        image_api_url: format!("{}/models/test-model", image.base_url()),
        image_api_key: "image-test-key".into(),
        storage_api_url: storage.base_url(),
        storage_api_key: "storage-test-key".into(),
        ipfs_gateway: "https://ipfs.io/ipfs".into(),
        connect_timeout_secs: 5,
        request_timeout_secs: 30,
    }
}

/// App state wired to the three mock backends, with a connected provider.
pub async fn test_state(
    provider: &MockServer,
    image: &MockServer,
    storage: &MockServer,
) -> Result<AppState> {
    mock_provider(provider).await;
    Ok(AppState::new(test_config(provider, image, storage)).await?)
}
