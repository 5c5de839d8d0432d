use serde_json::Value;

use super::error::PreviewError;
use crate::model::Snapshot;

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Response body of an in-flight preview request.
#[cfg(not(target_arch = "wasm32"))]
pub type TransportFuture = futures::future::BoxFuture<'static, Result<String, PreviewError>>;

/// Response body of an in-flight preview request.
#[cfg(target_arch = "wasm32")]
pub type TransportFuture = futures::future::LocalBoxFuture<'static, Result<String, PreviewError>>;

/// One preview request: `POST path` with the snapshot as form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// Endpoint path, resolved against the page origin.
    pub path: String,
    /// Sent verbatim in the [`CSRF_HEADER`] header.
    pub csrf_token: String,
    pub body: Snapshot,
}

/// Sends preview requests to the rendering endpoint.
///
/// Implementations send with same-origin credentials and do not interpret the
/// HTTP status; the body is returned as-is for [`parse_preview`].
pub trait PreviewTransport {
    fn send(&self, request: PreviewRequest) -> TransportFuture;
}

/// Extracts the `preview` string from a response body.
///
/// Any JSON without a string `preview` member yields an empty preview; a body
/// that is not JSON at all is an error.
pub fn parse_preview(body: &str) -> Result<String, PreviewError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(value
        .get("preview")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}
