//! Request and response bodies exchanged with the identity service.
//!
//! Every type here is serialized to JSON and sent over HTTP, so the serde
//! attributes ARE the wire format. Changing a rename or a tag breaks the
//! contract with the remote service.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A user's identifier as assigned by the identity service.
///
/// Newtype over `u64` so a user id can never be mixed up with a listing or
/// chat id. `#[serde(transparent)]` keeps it a plain number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// What a user is allowed to do.
///
/// The identity service does not send a role today; a missing `role`
/// field deserializes as [`Role::User`]. Moderation screens require
/// [`Role::Moderator`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Moderator => write!(f, "moderator"),
        }
    }
}

/// The identity record returned by every successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Display name.
    pub name: String,
    /// Profile picture. Only social logins usually carry one; the service
    /// sends `null` for password accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Returns `true` if the user may use the moderation desk.
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// The four operations the identity service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthAction {
    Verify,
    Login,
    Register,
    Google,
}

impl AuthAction {
    /// The value of the `action` field on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Login => "login",
            Self::Register => "register",
            Self::Google => "google",
        }
    }

    /// Whether a successful reply must carry a fresh `token`.
    ///
    /// `verify` only echoes the user; the caller already holds the token.
    pub fn issues_token(self) -> bool {
        !matches!(self, Self::Verify)
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body for the identity endpoint.
///
/// `#[serde(tag = "action")]` produces internally tagged JSON, which is the
/// shape the service dispatches on:
///
/// ```text
/// AuthRequest::Login { email, password }
///   → { "action": "login", "email": "...", "password": "..." }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthRequest {
    /// Check that a previously issued token is still valid.
    Verify { token: String },

    /// Email + password sign-in.
    Login { email: String, password: String },

    /// Create an account and sign in.
    Register {
        email: String,
        password: String,
        name: String,
    },

    /// Federated sign-in. `google_id` is the provider's stable user id.
    Google {
        google_id: String,
        email: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
    },
}

impl AuthRequest {
    /// Which action this request performs.
    pub fn action(&self) -> AuthAction {
        match self {
            Self::Verify { .. } => AuthAction::Verify,
            Self::Login { .. } => AuthAction::Login,
            Self::Register { .. } => AuthAction::Register,
            Self::Google { .. } => AuthAction::Google,
        }
    }
}

/// Passwords and tokens never reach a log line through `{:?}`.
impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verify { .. } => f
                .debug_struct("Verify")
                .field("token", &"<redacted>")
                .finish(),
            Self::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Self::Register { email, name, .. } => f
                .debug_struct("Register")
                .field("email", email)
                .field("password", &"<redacted>")
                .field("name", name)
                .finish(),
            Self::Google {
                google_id,
                email,
                name,
                avatar_url,
            } => f
                .debug_struct("Google")
                .field("google_id", google_id)
                .field("email", email)
                .field("name", name)
                .field("avatar_url", avatar_url)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body of a successful reply.
///
/// `token` is absent for `verify`, present for every other action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Body of a failed reply: `{ "error": "Invalid credentials" }`.
///
/// `error` is optional so a failure body like `{}` still decodes; the
/// caller then falls back to its own default message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ErrorReply {
    #[serde(default)]
    pub error: Option<String>,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The identity service dispatches on exact JSON shapes, so these tests
    //! pin the output of the serde attributes above.

    use super::*;

    fn user_json(extra: &str) -> String {
        format!(r#"{{"id":7,"email":"a@b.com","name":"Anna"{extra}}}"#)
    }

    // =====================================================================
    // UserId / Role / User
    // =====================================================================

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId(7).to_string(), "U-7");
    }

    #[test]
    fn test_user_without_role_defaults_to_user() {
        let user: User = serde_json::from_str(&user_json("")).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_moderator());
        assert_eq!(user.avatar_url, None);
    }

    #[test]
    fn test_user_null_avatar_is_none() {
        let user: User =
            serde_json::from_str(&user_json(r#","avatar_url":null"#)).unwrap();
        assert_eq!(user.avatar_url, None);
    }

    #[test]
    fn test_user_moderator_role_parses() {
        let user: User =
            serde_json::from_str(&user_json(r#","role":"moderator""#)).unwrap();
        assert!(user.is_moderator());
    }

    // =====================================================================
    // AuthRequest: one test per action to pin the JSON shape
    // =====================================================================

    #[test]
    fn test_verify_request_json_format() {
        let req = AuthRequest::Verify { token: "T".into() };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"action": "verify", "token": "T"}));
    }

    #[test]
    fn test_login_request_json_format() {
        let req = AuthRequest::Login {
            email: "a@b.com".into(),
            password: "x".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "login", "email": "a@b.com", "password": "x"})
        );
    }

    #[test]
    fn test_register_request_json_format() {
        let req = AuthRequest::Register {
            email: "a@b.com".into(),
            password: "secret".into(),
            name: "Anna".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["action"], "register");
        assert_eq!(json["name"], "Anna");
    }

    #[test]
    fn test_google_request_omits_missing_avatar() {
        let req = AuthRequest::Google {
            google_id: "g-1".into(),
            email: "a@b.com".into(),
            name: "Anna".into(),
            avatar_url: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["action"], "google");
        assert_eq!(json["google_id"], "g-1");
        assert!(json.get("avatar_url").is_none());
    }

    #[test]
    fn test_request_action_matches_tag() {
        let req = AuthRequest::Google {
            google_id: "g".into(),
            email: "e".into(),
            name: "n".into(),
            avatar_url: Some("http://img".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["action"], req.action().as_str());
    }

    #[test]
    fn test_request_debug_redacts_secrets() {
        let req = AuthRequest::Login {
            email: "a@b.com".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{req:?}");
        assert!(printed.contains("a@b.com"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_only_verify_does_not_issue_token() {
        assert!(!AuthAction::Verify.issues_token());
        assert!(AuthAction::Login.issues_token());
        assert!(AuthAction::Register.issues_token());
        assert!(AuthAction::Google.issues_token());
    }

    // =====================================================================
    // Replies
    // =====================================================================

    #[test]
    fn test_verify_reply_has_no_token() {
        let body = format!(r#"{{"user":{}}}"#, user_json(""));
        let reply: AuthReply = serde_json::from_str(&body).unwrap();
        assert_eq!(reply.token, None);
        assert_eq!(reply.user.id, UserId(7));
    }

    #[test]
    fn test_error_reply_without_message_decodes() {
        let reply: ErrorReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.error, None);
    }

    #[test]
    fn test_error_reply_with_message() {
        let reply: ErrorReply =
            serde_json::from_str(r#"{"error":"bad credentials"}"#).unwrap();
        assert_eq!(reply.error.as_deref(), Some("bad credentials"));
    }
}
