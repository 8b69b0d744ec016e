//! Codec trait and implementations for request/response bodies.
//!
//! The session layer never calls `serde_json` directly. It hands values
//! to something that implements [`Codec`], so the body format can change
//! (or be faked in tests) without touching the session code.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust values to body bytes and decodes body bytes back.
///
/// `Send + Sync + 'static` because the codec lives inside the
/// identity client for the whole lifetime of the session manager, which
/// may be moved onto any Tokio worker thread.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected shape.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// The `Content-Type` header value for bodies produced by this codec.
    fn content_type(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`). The identity service
/// only speaks JSON, so this is the codec used in production.
///
/// ## Example
///
/// ```rust
/// use rently_protocol::{AuthRequest, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let request = AuthRequest::Verify { token: "T".into() };
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: AuthRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
