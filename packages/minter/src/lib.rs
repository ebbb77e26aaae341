//! # AI NFT Minter
//!
//! A minimal service that turns a name/description submission into a minted
//! NFT asset: it generates an image from the description with a remote
//! text-to-image model, uploads the image plus metadata to a content-addressed
//! storage service, and exposes the resulting metadata URL.
//!
//! ## Quick Start
//! ```bash
//! MINTER_IMAGE_API_KEY=... MINTER_STORAGE_API_KEY=... cargo run --bin minter
//! ```
//!
//! ## Endpoints
//! - `GET /health` - Health check with wallet account and counters
//! - `GET /status` - Current mint session (name, description, image, url)
//! - `POST /mint` - Run the generate -> upload -> derive-URL workflow
//! - `GET /metrics` - Prometheus metrics

pub mod config;
mod error;
mod handlers;
pub mod image;
mod metrics;
mod middleware;
pub mod provider;
mod response;
mod router;
pub mod session;
mod state;
pub mod storage;
pub mod workflow;

pub use config::Config;
pub use error::Error;
pub use router::create as create_router;
pub use state::{AppState, MintGuard};
