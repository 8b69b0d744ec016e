//! Transport abstraction layer for the Rently identity client.
//!
//! Provides the [`Transport`] trait: one request/response exchange with
//! the identity endpoint. The session layer only ever sees bytes in and
//! a [`Reply`] out, which lets tests script the remote service without a
//! network.
//!
//! # Feature Flags
//!
//! - `http` (default): [`HttpTransport`] over `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::fmt;
use std::future::Future;

/// Opaque identifier for one request, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a new `RequestId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// What came back from the remote endpoint.
///
/// A non-success status is NOT a transport error: the identity service
/// reports rejected credentials as `401` with a JSON body, and the session
/// layer needs that body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Reply {
    /// Creates a reply from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request body to the identity endpoint and returns its reply.
///
/// Exactly one attempt per call: no retry, no client-side timeout, no
/// de-duplication of identical requests.
pub trait Transport: Send + Sync + 'static {
    /// Posts `body` with the given `Content-Type` and waits for the reply.
    ///
    /// # Errors
    /// Returns a [`TransportError`] only when no reply was obtained at all
    /// (connection refused, DNS failure, body read interrupted).
    fn post(
        &self,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Reply, TransportError>> + Send;
}
