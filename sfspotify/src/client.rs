//! HTTP client for the Spotify Web API
//!
//! # Example
//!
//! ```no_run
//! use sfspotify::{Credentials, SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotifyClient::builder()
//!         .credentials(Credentials::new("id", "secret", "refresh-token"))
//!         .build()?;
//!
//!     match client.currently_playing().await? {
//!         Some(track) => println!("{} - {}", track.artists.join(", "), track.title),
//!         None => println!("Nothing playing"),
//!     }
//!     Ok(())
//! }
//! ```

use crate::auth::{AccessToken, Credentials, TokenState};
use crate::error::{Error, Result};
use crate::models::{CurrentlyPlaying, TokenResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use sfnowplaying::{PlaybackSnapshot, PlaybackSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Default Web API base URL
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Default accounts service base URL
pub const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

/// Default timeout for HTTP requests (10 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "Spotiframe/0.1.0 (sfspotify)";

/// Appelé avec le nouveau refresh token quand Spotify le fait tourner
pub type RotationHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Spotify HTTP client
///
/// Cloning is cheap and clones share the same access token.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    api_base: String,
    accounts_base: String,
    client_id: String,
    client_secret: String,
    tokens: Arc<Mutex<TokenState>>,
    on_rotation: Option<RotationHook>,
}

impl SpotifyClient {
    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn accounts_base(&self) -> &str {
        &self.accounts_base
    }

    /// Returns a valid access token, refreshing it if needed
    ///
    /// The lock is held during the refresh: concurrent callers wait for a
    /// single token request instead of issuing their own.
    pub async fn ensure_token(&self) -> Result<String> {
        let mut state = self.tokens.lock().await;
        if let Some(token) = state.fresh_token() {
            return Ok(token.to_string());
        }

        let response = self.request_token(&state.refresh_token).await?;
        if let Some(rotated) = response.refresh_token {
            if rotated != state.refresh_token {
                info!("Spotify rotated the refresh token");
                if let Some(hook) = &self.on_rotation {
                    hook(&rotated);
                }
                state.refresh_token = rotated;
            }
        }

        let token = AccessToken::new(response.access_token, response.expires_in);
        let value = token.value.clone();
        state.access = Some(token);
        info!(expires_in = response.expires_in, "Spotify access token refreshed");
        Ok(value)
    }

    /// Forget the cached access token, the next call refreshes it
    pub async fn invalidate_token(&self) {
        self.tokens.lock().await.access = None;
    }

    async fn request_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let url = format!("{}/api/token", self.accounts_base);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!("Spotify refused the refresh token: {}", body);
            return Err(Error::Unauthorized(format!("token endpoint returned {}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(Error::status(status, url));
        }

        Ok(response.json().await?)
    }

    /// Track or episode currently played by the user
    ///
    /// `Ok(None)` when nothing is playing. A `401` drops the cached token
    /// so that the next call starts with a refresh; the call itself is not
    /// retried.
    pub async fn currently_playing(&self) -> Result<Option<PlaybackSnapshot>> {
        let token = self.ensure_token().await?;

        let mut url = Url::parse(&format!("{}/me/player/currently-playing", self.api_base))?;
        url.query_pairs_mut()
            .append_pair("additional_types", "track,episode");

        debug!("Fetching currently playing: {}", url);
        let response = self.client.get(url.clone()).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::UNAUTHORIZED => {
                self.invalidate_token().await;
                Err(Error::Unauthorized("access token rejected".to_string()))
            }
            status if !status.is_success() => Err(Error::status(status, url.as_str())),
            _ => {
                let body = response.text().await?;
                if body.trim().is_empty() {
                    return Ok(None);
                }
                let playing: CurrentlyPlaying = serde_json::from_str(&body)?;
                playing.into_snapshot()
            }
        }
    }

    /// Download raw bytes, used for album art
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)?;
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status, url));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl PlaybackSource for SpotifyClient {
    async fn currently_playing(&self) -> anyhow::Result<Option<PlaybackSnapshot>> {
        Ok(SpotifyClient::currently_playing(self).await?)
    }

    async fn fetch_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        Ok(SpotifyClient::fetch_bytes(self, url).await?)
    }
}

/// Builder for [`SpotifyClient`]
pub struct ClientBuilder {
    client: Option<Client>,
    api_base: String,
    accounts_base: String,
    timeout: Duration,
    user_agent: String,
    credentials: Option<Credentials>,
    on_rotation: Option<RotationHook>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            accounts_base: DEFAULT_ACCOUNTS_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credentials: None,
            on_rotation: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the Web API base URL (without trailing slash)
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the accounts service base URL (without trailing slash)
    pub fn accounts_base(mut self, url: impl Into<String>) -> Self {
        self.accounts_base = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Callback receiving a rotated refresh token, typically to persist it
    pub fn on_rotation(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_rotation = Some(Arc::new(hook));
        self
    }

    /// Build the client
    ///
    /// Fails with [`Error::MissingCredential`] when no credentials were set
    /// or one of them is empty.
    pub fn build(self) -> Result<SpotifyClient> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::MissingCredential("no credentials provided".to_string()))?;

        for (name, value) in [
            ("client_id", &credentials.client_id),
            ("client_secret", &credentials.client_secret),
            ("refresh_token", &credentials.refresh_token),
        ] {
            if value.trim().is_empty() {
                return Err(Error::MissingCredential(name.to_string()));
            }
        }

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(SpotifyClient {
            client,
            api_base: self.api_base.trim_end_matches('/').to_string(),
            accounts_base: self.accounts_base.trim_end_matches('/').to_string(),
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            tokens: Arc::new(Mutex::new(TokenState::new(credentials.refresh_token))),
            on_rotation: self.on_rotation,
        })
    }
}
