use reqwest::{Client, Request, Url, multipart::Form};

use super::error::PreviewError;
use super::transport::{CSRF_HEADER, PreviewRequest, PreviewTransport, TransportFuture};
use crate::model::Snapshot;

/// [`PreviewTransport`] over HTTP.
///
/// Paths are resolved against the page origin. In the browser the fetch runs
/// with same-origin credentials; natively the configured session cookie is
/// attached only to requests that stay on the origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    origin: Url,
    #[cfg(not(target_arch = "wasm32"))]
    session_cookie: Option<String>,
}

impl HttpTransport {
    pub fn new(origin: Url) -> Self {
        Self {
            client: Client::new(),
            origin,
            #[cfg(not(target_arch = "wasm32"))]
            session_cookie: None,
        }
    }

    /// Sends `cookie` as the `Cookie` header on same-origin requests.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into()).filter(|c| !c.is_empty());
        self
    }

    /// Resolves an endpoint path against the origin.
    pub fn endpoint(&self, path: &str) -> Result<Url, PreviewError> {
        self.origin
            .join(path)
            .map_err(|e| PreviewError::InvalidUrl {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn build(&self, request: &PreviewRequest) -> Result<Request, PreviewError> {
        let url = self.endpoint(&request.path)?;
        let same_origin = url.origin() == self.origin.origin();
        let builder = self
            .client
            .post(url)
            .header(CSRF_HEADER, request.csrf_token.as_str())
            .multipart(form(&request.body));

        #[cfg(not(target_arch = "wasm32"))]
        let builder = match &self.session_cookie {
            Some(cookie) if same_origin => builder.header(reqwest::header::COOKIE, cookie.as_str()),
            _ => builder,
        };
        #[cfg(target_arch = "wasm32")]
        let builder = if same_origin {
            builder.fetch_credentials_same_origin()
        } else {
            builder
        };

        builder
            .build()
            .map_err(|e| PreviewError::Network(e.to_string()))
    }
}

impl PreviewTransport for HttpTransport {
    fn send(&self, request: PreviewRequest) -> TransportFuture {
        let client = self.client.clone();
        let built = self.build(&request);
        Box::pin(async move {
            let request = built?;
            tracing::debug!(url = %request.url(), "sending preview request");
            let response = client
                .execute(request)
                .await
                .map_err(|e| PreviewError::Network(e.to_string()))?;
            tracing::trace!(status = %response.status(), "preview response");
            response
                .text()
                .await
                .map_err(|e| PreviewError::Network(e.to_string()))
        })
    }
}

fn form(body: &Snapshot) -> Form {
    body.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_string(), value.to_string())
    })
}
