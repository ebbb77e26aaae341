//! Response types for the minter API.

use crate::session::MintSession;
use crate::workflow::MintOutcome;
use serde::Serialize;

/// Response from the mint endpoint.
#[derive(Serialize)]
pub struct MintResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MintResponse {
    pub fn ok(outcome: MintOutcome) -> Self {
        Self {
            success: true,
            image: Some(outcome.image),
            cid: Some(outcome.cid),
            metadata_url: Some(outcome.metadata_url),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            image: None,
            cid: None,
            metadata_url: None,
            error: Some(error.into()),
        }
    }
}

/// Response from the status endpoint: the session record plus in-flight flag.
#[derive(Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub session: MintSession,
    pub minting: bool,
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub chain_id: u64,
    pub provider: String,
    pub uptime_secs: u64,
    pub mints: u64,
}
