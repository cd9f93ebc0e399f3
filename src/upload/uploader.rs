use crate::foundation::error::{CoverError, CoverResult};
use crate::render::raster::RasterArtifact;
use base64::{Engine as _, engine::general_purpose::STANDARD as base64_engine};

const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// OAuth scope required for playlist image uploads.
pub const UPLOAD_SCOPE: &str = "ugc-image-upload";

/// Capability for delivering a finished cover to a playlist.
///
/// Injected into [`crate::Generator::create_and_upload`] so the engine stays
/// free of network dependencies. Implementations must not retry; retry
/// policy belongs to the caller.
pub trait Uploader {
    /// Upload one artifact to the identified playlist.
    fn upload(&mut self, playlist_id: &str, artifact: &RasterArtifact) -> CoverResult<()>;
}

/// Uploader backed by the Spotify Web API playlist-image endpoint.
///
/// PUTs the base64-encoded bytes with `Content-Type: image/jpeg` regardless
/// of the artifact's actual encoding — the endpoint expects that header for
/// either format.
pub struct SpotifyUploader {
    client: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyUploader {
    /// Build an uploader against the public API with a bearer access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(API_BASE_URL, access_token)
    }

    /// Build an uploader against an alternate API root.
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }
}

impl Uploader for SpotifyUploader {
    fn upload(&mut self, playlist_id: &str, artifact: &RasterArtifact) -> CoverResult<()> {
        let url = format!("{}/playlists/{}/images", self.base_url, playlist_id);
        let body = base64_engine.encode(&artifact.bytes);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(body)
            .send()
            .map_err(|e| CoverError::Other(e.into()))?;

        let status = response.status().as_u16();
        match status {
            202 => {
                tracing::info!(playlist_id, len = artifact.byte_len(), "cover uploaded");
                Ok(())
            }
            401 => Err(CoverError::upload_authorization(format!(
                "playlist image upload rejected with 401: the access token is missing the \
                 '{UPLOAD_SCOPE}' scope; re-run the OAuth flow requesting that scope and retry \
                 with the new token"
            ))),
            _ => {
                let body = response.text().unwrap_or_default();
                Err(CoverError::Upload { status, body })
            }
        }
    }
}

/// In-memory uploader for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryUploader {
    uploads: Vec<(String, Vec<u8>)>,
}

impl InMemoryUploader {
    /// Create a new in-memory uploader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured `(playlist_id, bytes)` uploads, in call order.
    pub fn uploads(&self) -> &[(String, Vec<u8>)] {
        &self.uploads
    }
}

impl Uploader for InMemoryUploader {
    fn upload(&mut self, playlist_id: &str, artifact: &RasterArtifact) -> CoverResult<()> {
        self.uploads
            .push((playlist_id.to_string(), artifact.bytes.clone()));
        Ok(())
    }
}
