//! Content-addressed storage client.
//!
//! Uploads the generated image together with the submission's name and
//! description to the storage service's `/store` endpoint and returns the
//! content identifier the metadata URL is derived from.

use crate::image::GeneratedImage;
use crate::Error;
use serde::Deserialize;
use tracing::{info, warn};

/// Filename and media type the upload is pinned to. The backend's reported
/// content type is intentionally not used here; see [`StorageClient::upload`].
const UPLOAD_FILENAME: &str = "image.jpeg";
const UPLOAD_MEDIA_TYPE: &str = "image/jpeg";

/// Client for the storage backend.
pub struct StorageClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

/// Identifier of a stored asset, as returned by the storage backend.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageRecord {
    pub ipnft: String,
}

#[derive(Debug, Deserialize)]
struct StoreResponse {
    ok: bool,
    value: Option<StorageRecord>,
    error: Option<StoreError>,
}

#[derive(Debug, Deserialize)]
struct StoreError {
    message: String,
}

impl StorageClient {
    pub fn new(http: reqwest::Client, endpoint: &str, token: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    /// Upload the image plus metadata fields, returning the content identifier.
    ///
    /// The file part is always named `image.jpeg` with media type `image/jpeg`
    /// even when the generation backend reported something else. A mismatch is
    /// logged so it can be spotted rather than silently shipped.
    pub async fn upload(
        &self,
        image: &GeneratedImage,
        name: &str,
        description: &str,
    ) -> Result<StorageRecord, Error> {
        if image.content_type != UPLOAD_MEDIA_TYPE {
            warn!(
                reported = %image.content_type,
                pinned = UPLOAD_MEDIA_TYPE,
                "Upload media type differs from the reported content type"
            );
        }

        let part = reqwest::multipart::Part::bytes(image.bytes.to_vec())
            .file_name(UPLOAD_FILENAME)
            .mime_str(UPLOAD_MEDIA_TYPE)
            .map_err(|e| Error::Storage(format!("building image part: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("name", name.to_string())
            .text("description", description.to_string());

        let response = self
            .http
            .post(format!("{}/store", self.endpoint))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "storage endpoint returned {status}: {body}"
            )));
        }

        let body: StoreResponse = response
            .json()
            .await
            .map_err(|e| Error::Storage(format!("response malformed: {e}")))?;

        if !body.ok {
            let message = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "storage service reported failure".into());
            return Err(Error::Storage(message));
        }

        let record = body
            .value
            .ok_or_else(|| Error::Storage("response missing content identifier".into()))?;

        info!(cid = %record.ipnft, "Image stored");

        Ok(record)
    }
}

/// Template a content identifier into the gateway's metadata path convention.
pub fn metadata_url(gateway: &str, cid: &str) -> String {
    format!("{gateway}/{cid}/metadata.json")
}
