//! Minter configuration.

use serde::Deserialize;

/// Configuration for the minter service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Wallet provider JSON-RPC endpoint.
    #[serde(default = "defaults::provider_url")]
    pub provider_url: String,

    /// Text-to-image model endpoint.
    #[serde(default = "defaults::image_api_url")]
    pub image_api_url: String,

    #[serde(default = "defaults::image_api_key")]
    pub image_api_key: String,

    /// Content-addressed storage API base URL.
    #[serde(default = "defaults::storage_api_url")]
    pub storage_api_url: String,

    #[serde(default = "defaults::storage_api_key")]
    pub storage_api_key: String,

    /// Gateway prefix metadata URLs are templated onto.
    #[serde(default = "defaults::ipfs_gateway")]
    pub ipfs_gateway: String,

    #[serde(default = "defaults::connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall per-request timeout. Generous: model warm-up is slow.
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            provider_url: defaults::provider_url(),
            image_api_url: defaults::image_api_url(),
            image_api_key: defaults::image_api_key(),
            storage_api_url: defaults::storage_api_url(),
            storage_api_key: defaults::storage_api_key(),
            ipfs_gateway: defaults::ipfs_gateway(),
            connect_timeout_secs: defaults::connect_timeout_secs(),
            request_timeout_secs: defaults::request_timeout_secs(),
        }
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn provider_url() -> String {
        // Priority: MINTER_PROVIDER_URL (config layer) > ETH_RPC_URL > local node
        std::env::var("ETH_RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".into())
    }

    pub fn image_api_url() -> String {
        "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-2".into()
    }

    pub fn image_api_key() -> String {
        std::env::var("HUGGING_FACE_API_KEY").unwrap_or_default()
    }

    pub fn storage_api_url() -> String {
        "https://api.nft.storage".into()
    }

    pub fn storage_api_key() -> String {
        std::env::var("NFT_STORAGE_API_KEY").unwrap_or_default()
    }

    pub fn ipfs_gateway() -> String {
        "https://ipfs.io/ipfs".into()
    }

    pub fn connect_timeout_secs() -> u64 {
        10
    }

    pub fn request_timeout_secs() -> u64 {
        180
    }
}
