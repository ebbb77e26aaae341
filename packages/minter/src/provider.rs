//! Wallet provider client.
//!
//! Connects to an Ethereum-style JSON-RPC provider once at startup and keeps
//! the resulting handle (chain id + account list) for the process lifetime.
//! Minting is refused while no account is available.

use crate::Error;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// JSON-RPC client for the wallet provider.
pub struct ProviderClient {
    http: reqwest::Client,
    url: String,
}

/// An active provider session.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub chain_id: u64,
    pub accounts: Vec<String>,
}

impl ConnectionHandle {
    /// The account submissions are minted under, if any.
    pub fn active_account(&self) -> Option<&str> {
        self.accounts.first().map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl ProviderClient {
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request a session handle: chain id plus the provider's account list.
    pub async fn connect(&self) -> Result<ConnectionHandle, Error> {
        let chain_hex = self
            .call("eth_chainId")
            .await?
            .as_str()
            .ok_or_else(|| Error::Provider("eth_chainId returned a non-string result".into()))?
            .to_string();
        let chain_id = parse_quantity(&chain_hex)?;

        let accounts: Vec<String> = serde_json::from_value(self.call("eth_accounts").await?)
            .map_err(|e| Error::Provider(format!("eth_accounts result malformed: {e}")))?;

        info!(chain_id, accounts = accounts.len(), url = %self.url, "Wallet provider connected");

        Ok(ConnectionHandle { chain_id, accounts })
    }

    async fn call(&self, method: &str) -> Result<Value, Error> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": []
            }))
            .send()
            .await
            .map_err(|e| Error::Provider(format!("{method} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!("{method} returned {status}")));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("{method} response malformed: {e}")))?;

        if let Some(err) = body.error {
            return Err(Error::Provider(format!(
                "{method} failed: {} (code {})",
                err.message, err.code
            )));
        }

        body.result
            .ok_or_else(|| Error::Provider(format!("{method} returned no result")))
    }
}

/// Parse a JSON-RPC hex quantity (`0x1`, `0xaa36a7`, ...) into a u64.
fn parse_quantity(hex: &str) -> Result<u64, Error> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::Provider(format!("invalid hex quantity {hex:?}: {e}")))
}
