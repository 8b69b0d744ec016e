//! Error types for the protocol layer.
//!
//! Each Rently crate defines its own error enum. A `ProtocolError` always
//! means the problem is in turning bodies into bytes or back, never in
//! networking or session bookkeeping.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a request into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a response body into a type).
    ///
    /// Common causes: the body is not JSON, a required field such as
    /// `user` is missing, or a field has the wrong type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The body decoded but is not a valid reply for the request, e.g. a
    /// login reply without a `token`.
    #[error("invalid reply: {0}")]
    InvalidReply(String),
}
