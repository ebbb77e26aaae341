//! Application state shared across handlers.

use crate::config::Config;
use crate::image::ImageClient;
use crate::provider::{ConnectionHandle, ProviderClient};
use crate::session::MintSession;
use crate::storage::StorageClient;
use crate::Error;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub provider: ProviderClient,
    pub connection: ConnectionHandle,
    pub images: ImageClient,
    pub storage: StorageClient,
    session: RwLock<MintSession>,
    minting: AtomicBool,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state from configuration. Connects to the wallet
    /// provider; a provider that cannot be reached fails startup with a typed
    /// error instead of surfacing later mid-mint.
    pub async fn new(config: Config) -> Result<Self, Error> {
        if config.image_api_key.is_empty() {
            return Err(Error::Config("MINTER_IMAGE_API_KEY is not set".into()));
        }
        if config.storage_api_key.is_empty() {
            return Err(Error::Config("MINTER_STORAGE_API_KEY is not set".into()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("building HTTP client: {e}")))?;

        let provider = ProviderClient::new(http.clone(), &config.provider_url);
        let connection = provider.connect().await?;
        match connection.active_account() {
            Some(account) => info!(account = %account, "Active wallet account"),
            None => warn!("Provider has no wallet account; minting will be refused"),
        }

        Ok(Self {
            images: ImageClient::new(http.clone(), &config.image_api_url, &config.image_api_key),
            storage: StorageClient::new(http, &config.storage_api_url, &config.storage_api_key),
            provider,
            connection,
            config,
            session: RwLock::new(MintSession::default()),
            minting: AtomicBool::new(false),
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }

    /// Snapshot of the current mint session.
    pub fn session(&self) -> MintSession {
        self.session.read().unwrap().clone()
    }

    /// Apply a transition to the mint session.
    pub fn update_session(&self, apply: impl FnOnce(&mut MintSession)) {
        let mut session = self.session.write().unwrap();
        apply(&mut session);
    }

    /// Claim the mint slot. Returns `None` while another mint is in flight;
    /// the slot is released when the guard drops.
    pub fn try_begin_mint(&self) -> Option<MintGuard<'_>> {
        if self
            .minting
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(MintGuard { state: self })
        } else {
            None
        }
    }

    pub fn is_minting(&self) -> bool {
        self.minting.load(Ordering::Relaxed)
    }
}

/// Exclusive hold on the mint slot.
pub struct MintGuard<'a> {
    state: &'a AppState,
}

impl Drop for MintGuard<'_> {
    fn drop(&mut self) {
        self.state.minting.store(false, Ordering::Release);
    }
}
