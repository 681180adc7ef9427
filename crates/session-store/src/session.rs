//! The session credential handed to backend requests.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A session is treated as expired this many seconds before its real expiry,
/// so a token never goes stale mid-request.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// An authenticated session: bearer token plus identity metadata.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub access_token: String,
    /// Identity provider user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// User email, when the provider shares it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the access token expires. `None` means the provider did not say.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session with only a bearer token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: None,
            email: None,
            expires_at: None,
        }
    }

    /// Set the token expiry.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the user identity.
    pub fn with_user(mut self, user_id: impl Into<String>, email: Option<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.email = email;
        self
    }

    /// The token to put in `Authorization: Bearer <token>`.
    pub fn bearer_token(&self) -> &str {
        &self.access_token
    }

    /// Whether the session can authorize a request right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether the session can authorize a request at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.trim().is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at - now > Duration::seconds(EXPIRY_SKEW_SECS),
            None => true,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
