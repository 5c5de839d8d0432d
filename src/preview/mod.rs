//! Keeps the preview field in step with the form.

mod binding;
mod endpoint;
mod error;
mod http;
mod sync;
mod transport;

pub use binding::locate_form;
pub use endpoint::preview_path;
pub use error::PreviewError;
pub use http::HttpTransport;
pub use sync::{PendingPreview, PreviewOutcome, PreviewSynchronizer};
pub use transport::{CSRF_HEADER, PreviewRequest, PreviewTransport, TransportFuture, parse_preview};

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use sync::tests::FakeTransport;
