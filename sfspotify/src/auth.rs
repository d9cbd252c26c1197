//! Refresh-token flow for the Spotify accounts service
//!
//! Spotiframe never runs the interactive authorization step. A refresh
//! token obtained once (for the `user-read-currently-playing` scope) is
//! exchanged for short-lived access tokens, cached until shortly before
//! they expire.

use std::fmt;
use std::time::{Duration, Instant};

/// Access tokens are renewed this long before Spotify expires them
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Application credentials plus the user's refresh token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Les secrets ne doivent pas finir dans les logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub(crate) struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    pub fn new(value: String, expires_in: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        }
    }

    /// Usable for at least [`EXPIRY_MARGIN`]
    pub fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

/// Mutable token state, guarded by the client's mutex
pub(crate) struct TokenState {
    pub refresh_token: String,
    pub access: Option<AccessToken>,
}

impl TokenState {
    pub fn new(refresh_token: String) -> Self {
        Self {
            refresh_token,
            access: None,
        }
    }

    pub fn fresh_token(&self) -> Option<&str> {
        self.access
            .as_ref()
            .filter(|token| token.is_fresh())
            .map(|token| token.value.as_str())
    }
}
