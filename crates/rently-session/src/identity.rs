//! The seam between the session manager and the remote identity service.
//!
//! The manager doesn't know about HTTP or JSON. It hands an
//! [`AuthRequest`] to something implementing [`IdentityService`] and gets
//! back either the service's [`AuthReply`] or an [`AuthenticationError`].
//! [`IdentityClient`] is the production implementation; tests can plug in
//! a scripted one.

use std::future::Future;

use rently_protocol::{AuthReply, AuthRequest, Codec, ErrorReply, JsonCodec};
use rently_transport::Transport;

use crate::AuthenticationError;

/// Performs one identity action against the remote service.
///
/// `Send + Sync + 'static` so the manager holding it can live in any
/// Tokio task.
pub trait IdentityService: Send + Sync + 'static {
    /// Sends `request` and returns the decoded success reply.
    ///
    /// # Errors
    /// - [`AuthErrorKind::Rejected`](crate::AuthErrorKind::Rejected): the
    ///   service answered with a non-success status
    /// - [`AuthErrorKind::Network`](crate::AuthErrorKind::Network): no
    ///   reply, or a success body that isn't a valid [`AuthReply`]
    fn exchange(
        &self,
        request: AuthRequest,
    ) -> impl Future<Output = Result<AuthReply, AuthenticationError>> + Send;
}

/// [`IdentityService`] over any [`Transport`] and [`Codec`].
#[derive(Debug, Clone)]
pub struct IdentityClient<T: Transport, C: Codec = JsonCodec> {
    transport: T,
    codec: C,
}

impl<T: Transport> IdentityClient<T> {
    /// A JSON client over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            codec: JsonCodec,
        }
    }
}

impl<T: Transport, C: Codec> IdentityClient<T, C> {
    /// A client that encodes bodies with `codec` instead of plain JSON.
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self { transport, codec }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport, C: Codec> IdentityService for IdentityClient<T, C> {
    async fn exchange(
        &self,
        request: AuthRequest,
    ) -> Result<AuthReply, AuthenticationError> {
        let action = request.action();
        tracing::debug!(%action, "calling identity service");

        let body = self
            .codec
            .encode(&request)
            .map_err(|e| AuthenticationError::network(action, e))?;

        let reply = self
            .transport
            .post(self.codec.content_type(), body)
            .await
            .map_err(|e| AuthenticationError::network(action, e))?;

        if !reply.is_success() {
            // A failure body that isn't `{error}` JSON (proxy error page,
            // empty body) still counts as a rejection, with the default text.
            let message = self
                .codec
                .decode::<ErrorReply>(&reply.body)
                .ok()
                .and_then(|r| r.error)
                .filter(|m| !m.trim().is_empty());
            tracing::debug!(%action, status = reply.status, "identity service rejected request");
            return Err(AuthenticationError::rejected(
                action,
                reply.status,
                message,
            ));
        }

        self.codec
            .decode::<AuthReply>(&reply.body)
            .map_err(|e| AuthenticationError::network(action, e))
    }
}
