//! Submission workflow.
//!
//! Strictly sequential: generate an image from the description, encode it for
//! display, upload it with the metadata fields, derive the metadata URL. Each
//! step is an explicit `Result` branch; a metadata URL can only exist after a
//! generated image was produced and stored.

use crate::metrics::METRICS;
use crate::session::Submission;
use crate::state::AppState;
use crate::storage;
use crate::Error;
use std::time::Instant;
use tracing::info;

/// Result of one successful mint workflow run.
#[derive(Debug, Clone)]
pub struct MintOutcome {
    /// Base64 data URL of the generated image.
    pub image: String,
    /// Content identifier returned by the storage backend.
    pub cid: String,
    pub metadata_url: String,
}

/// Run the mint workflow for one submission.
pub async fn run(state: &AppState, submission: Submission) -> Result<MintOutcome, Error> {
    // Fresh session: record the submission, drop results of earlier attempts.
    state.update_session(|s| {
        s.set_name(submission.name.clone());
        s.set_description(submission.description.clone());
        s.set_image(None);
        s.set_url(None);
    });

    info!(
        name = %submission.name,
        description_len = submission.description.len(),
        "Mint submission received"
    );

    let started = Instant::now();
    let image = state.images.generate(&submission.description).await?;
    METRICS.record_generate_duration(started);

    let data_url = image.data_url();
    state.update_session(|s| s.set_image(Some(data_url.clone())));

    let started = Instant::now();
    let record = state
        .storage
        .upload(&image, &submission.name, &submission.description)
        .await?;
    METRICS.record_upload_duration(started);

    let url = storage::metadata_url(&state.config.ipfs_gateway, &record.ipnft);
    state.update_session(|s| s.set_url(Some(url.clone())));

    info!(cid = %record.ipnft, url = %url, "Mint complete");

    Ok(MintOutcome {
        image: data_url,
        cid: record.ipnft,
        metadata_url: url,
    })
}
