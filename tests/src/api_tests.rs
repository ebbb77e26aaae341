use crate::utils::{
    mock_provider_without_accounts, test_config, test_state, PNG_BYTES, TEST_ACCOUNT,
};
use anyhow::Result;
use httpmock::prelude::*;
use minter::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Serve the router on an ephemeral port, returning its base URL.
async fn spawn_app(state: Arc<AppState>) -> Result<String> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn test_mint_endpoint_round_trip() -> Result<()> {
    let provider = MockServer::start_async().await;
    let image_api = MockServer::start_async().await;
    let storage_api = MockServer::start_async().await;

    image_api
        .mock_async(|when, then| {
            when.method(POST).path("/models/test-model");
            then.status(200)
                .header("content-type", "image/png")
                .body(PNG_BYTES);
        })
        .await;
    storage_api
        .mock_async(|when, then| {
            when.method(POST).path("/store");
            then.status(200)
                .json_body(json!({"ok": true, "value": {"ipnft": "bafyapi"}}));
        })
        .await;

    let state = Arc::new(test_state(&provider, &image_api, &storage_api).await?);
    let base = spawn_app(state).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/mint"))
        .json(&json!({"name": "Api Mint", "description": "over the wire"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["cid"], "bafyapi");
    assert_eq!(
        body["metadata_url"],
        "https://ipfs.io/ipfs/bafyapi/metadata.json"
    );
    assert!(body["image"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    // Session is visible through the status endpoint afterwards.
    let status: Value = client
        .get(format!("{base}/status"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(status["name"], "Api Mint");
    assert_eq!(status["minting"], false);
    assert_eq!(
        status["url"],
        "https://ipfs.io/ipfs/bafyapi/metadata.json"
    );

    let health: Value = client
        .get(format!("{base}/health"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["account"], TEST_ACCOUNT);
    assert_eq!(health["chain_id"], 1);

    let metrics = client
        .get(format!("{base}/metrics"))
        .send()
        .await?
        .text()
        .await?;
    assert!(metrics.contains("minter_mint_total"));

    Ok(())
}

#[tokio::test]
async fn test_mint_refused_without_wallet_account() -> Result<()> {
    let provider = MockServer::start_async().await;
    let image_api = MockServer::start_async().await;
    let storage_api = MockServer::start_async().await;

    mock_provider_without_accounts(&provider).await;
    let state = Arc::new(AppState::new(test_config(&provider, &image_api, &storage_api)).await?);
    let base = spawn_app(state).await?;

    let response = reqwest::Client::new()
        .post(format!("{base}/mint"))
        .json(&json!({"name": "n", "description": "d"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 503);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no wallet account connected"));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_mint_gets_conflict() -> Result<()> {
    let provider = MockServer::start_async().await;
    let image_api = MockServer::start_async().await;
    let storage_api = MockServer::start_async().await;

    // Slow generation keeps the first mint in flight while the second lands.
    image_api
        .mock_async(|when, then| {
            when.method(POST).path("/models/test-model");
            then.status(200)
                .header("content-type", "image/png")
                .body(PNG_BYTES)
                .delay(Duration::from_millis(1_500));
        })
        .await;
    storage_api
        .mock_async(|when, then| {
            when.method(POST).path("/store");
            then.status(200)
                .json_body(json!({"ok": true, "value": {"ipnft": "bafyrace"}}));
        })
        .await;

    let state = Arc::new(test_state(&provider, &image_api, &storage_api).await?);
    let base = spawn_app(Arc::clone(&state)).await?;
    let client = reqwest::Client::new();

    let body = json!({"name": "Race", "description": "two at once"});
    let (first, second) = tokio::join!(
        client.post(format!("{base}/mint")).json(&body).send(),
        client.post(format!("{base}/mint")).json(&body).send(),
    );

    let mut statuses = vec![first?.status().as_u16(), second?.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, vec![200, 409]);

    // The rejected request never touched the session: the winner's results
    // are intact.
    let session = state.session();
    assert_eq!(session.name, "Race");
    assert_eq!(
        session.url.as_deref(),
        Some("https://ipfs.io/ipfs/bafyrace/metadata.json")
    );

    Ok(())
}
