/// Crate-wide result alias.
pub type CoverResult<T> = Result<T, CoverError>;

/// Errors surfaced by the cover generation pipeline and its uploader boundary.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// No color-resolution path succeeded, or the request itself is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// SVG parsing or vector-to-raster conversion failed. Fatal, never retried.
    #[error("render error: {0}")]
    Render(String),

    /// Image encode or decode failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The upload endpoint rejected the request with 401. The message carries
    /// remediation guidance; the generated artifact is preserved locally.
    #[error("upload authorization error: {0}")]
    UploadAuthorization(String),

    /// Any other non-success upload response, with the raw status and body.
    #[error("upload failed with status {status}: {body}")]
    Upload {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Raw response body, for diagnosis.
        body: String,
    },

    /// Wrapped I/O or transport error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub(crate) fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub(crate) fn upload_authorization(msg: impl Into<String>) -> Self {
        Self::UploadAuthorization(msg.into())
    }
}
