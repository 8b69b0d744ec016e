//! HTTP transport implementation using `reqwest`.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::{Reply, RequestId, Transport, TransportError};

/// Counter for generating unique request IDs.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A [`Transport`] that POSTs to a single HTTP(S) endpoint.
///
/// Cloning is cheap: `reqwest::Client` is reference-counted internally,
/// so clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint URL.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidEndpoint`] if `endpoint` does not
    /// parse as an absolute `http`/`https` URL, or
    /// [`TransportError::ClientBuild`] if the HTTP client cannot start.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(TransportError::ClientBuild)?;
        Self::with_client(client, endpoint)
    }

    /// Creates a transport that reuses an existing `reqwest::Client`.
    pub fn with_client(
        client: Client,
        endpoint: &str,
    ) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme {:?}",
                url.scheme()
            )));
        }
        Ok(Self {
            client,
            endpoint: url,
        })
    }

    /// The endpoint every request is sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Reply, TransportError> {
        let id = RequestId::new(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, endpoint = %self.endpoint, bytes = body.len(), "sending request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(%id, error = %e, "request failed");
                TransportError::RequestFailed(e)
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::ReadFailed)?;

        tracing::debug!(%id, status, bytes = body.len(), "received reply");
        Ok(Reply::new(status, body.to_vec()))
    }
}
