//! HTTP request handlers.

use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::{HealthResponse, MintResponse, StatusResponse};
use crate::session::Submission;
use crate::state::AppState;
use crate::workflow::{self, MintOutcome};
use crate::Error;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Mint request body. Both fields optional; empty strings are accepted.
#[derive(Debug, Deserialize)]
pub struct MintRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Health check with connection info and basic metrics.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let account = state.connection.active_account().map(str::to_string);
    Json(HealthResponse {
        status: if account.is_some() { "ok" } else { "degraded" },
        account,
        chain_id: state.connection.chain_id,
        provider: state.provider.url().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        mints: state.request_count.load(Ordering::Relaxed),
    })
}

/// Current mint session plus in-flight flag.
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusResponse {
        session: state.session(),
        minting: state.is_minting(),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(state.is_minting()),
    )
}

/// Run the mint workflow for a submission.
pub async fn mint(
    State(state): State<Arc<AppState>>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<MintRequest>,
) -> (StatusCode, Json<MintResponse>) {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    METRICS.mint_total.fetch_add(1, Ordering::Relaxed);

    let started = Instant::now();
    let result = mint_inner(&state, request).await;
    METRICS.record_mint_duration(started);

    match result {
        Ok(outcome) => {
            METRICS.mint_success.fetch_add(1, Ordering::Relaxed);
            info!(req_id = %req_id.0, cid = %outcome.cid, "Mint succeeded");
            (StatusCode::OK, Json(MintResponse::ok(outcome)))
        }
        Err(e) => {
            METRICS.mint_error.fetch_add(1, Ordering::Relaxed);
            error!(req_id = %req_id.0, error = %e, "Mint failed");
            (e.status(), Json(MintResponse::err(e.to_string())))
        }
    }
}

async fn mint_inner(state: &AppState, request: MintRequest) -> Result<MintOutcome, Error> {
    if state.connection.active_account().is_none() {
        return Err(Error::Provider("no wallet account connected".into()));
    }

    // One mint at a time; concurrent submissions would race on the session.
    let _guard = state.try_begin_mint().ok_or(Error::Busy)?;

    workflow::run(
        state,
        Submission {
            name: request.name,
            description: request.description,
        },
    )
    .await
}
