//! Mint session state.
//!
//! Holds the four fields a mint submission flows through: the user-supplied
//! name and description, the encoded image produced by the generation step,
//! and the metadata URL produced by the storage step. Each transition replaces
//! exactly one field; no validation is applied (empty strings are accepted).

use serde::Serialize;

/// Current mint session record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MintSession {
    pub name: String,
    pub description: String,
    /// Base64 data URL of the generated image, once produced.
    pub image: Option<String>,
    /// Metadata URL, once the image has been stored.
    pub url: Option<String>,
}

impl MintSession {
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }
}

/// A submission captured from the client at mint time. Immutable once taken.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub description: String,
}
