/// Reasons a preview request produced no preview.
///
/// These never leave a pass; they are recorded on the [`PreviewOutcome`](super::PreviewOutcome)
/// and the output field is cleared instead.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The derived endpoint path does not form a valid URL.
    #[error("invalid preview endpoint {path}: {reason}")]
    InvalidUrl { path: String, reason: String },

    /// The response body is not JSON.
    #[error("malformed preview response: {0}")]
    Decode(#[from] serde_json::Error),
}
