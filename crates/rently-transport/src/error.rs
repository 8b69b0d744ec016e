/// Errors that can occur in the transport layer.
///
/// Every variant means "no usable reply from the identity service".
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The HTTP client could not be built, e.g. the TLS backend failed to
    /// initialise.
    #[cfg(feature = "http")]
    #[error("building http client failed: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or no response arrived.
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// The response started but its body could not be read.
    #[cfg(feature = "http")]
    #[error("reading response failed: {0}")]
    ReadFailed(#[source] reqwest::Error),

    /// Transport failure from a non-HTTP implementation.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}
