//! Extension pour intégrer Spotify dans sfconfig
//!
//! Les identifiants sont lus dans la section `spotify` de la configuration
//! puis, à défaut, dans l'environnement (`SPOTIPY_CLIENT_ID`,
//! `SPOTIPY_CLIENT_SECRET`, `SPOTIFRAME_REFRESH_TOKEN`). Ceux venant de
//! l'environnement ne sont pas recopiés dans `config.yaml`, sauf le refresh
//! token quand Spotify le fait tourner : le nouveau y est enregistré.
//!
//! ```no_run
//! use sfconfig::get_config;
//! use sfspotify::SpotifyClient;
//!
//! # fn main() -> sfspotify::Result<()> {
//! let client = SpotifyClient::from_config(&get_config())?;
//! # Ok(())
//! # }
//! ```

use crate::auth::Credentials;
use crate::client::{
    SpotifyClient, DEFAULT_ACCOUNTS_BASE, DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use serde_yaml::{Number, Value};
use sfconfig::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const ENV_CLIENT_ID: &str = "SPOTIPY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIPY_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "SPOTIFRAME_REFRESH_TOKEN";

/// Trait d'extension pour la section `spotify` de `sfconfig::Config`
pub trait SpotifyConfigExt {
    fn get_spotify_client_id(&self) -> Option<String>;
    fn get_spotify_client_secret(&self) -> Option<String>;
    fn get_spotify_refresh_token(&self) -> Option<String>;
    fn set_spotify_refresh_token(&self, token: &str) -> anyhow::Result<()>;

    /// Les trois identifiants, ou le nom du premier manquant
    fn get_spotify_credentials(&self) -> Result<Credentials> {
        let client_id = self
            .get_spotify_client_id()
            .ok_or_else(|| missing("spotify.client_id", ENV_CLIENT_ID))?;
        let client_secret = self
            .get_spotify_client_secret()
            .ok_or_else(|| missing("spotify.client_secret", ENV_CLIENT_SECRET))?;
        let refresh_token = self
            .get_spotify_refresh_token()
            .ok_or_else(|| missing("spotify.refresh_token", ENV_REFRESH_TOKEN))?;
        Ok(Credentials::new(client_id, client_secret, refresh_token))
    }

    /// Base de l'API Web (défaut `https://api.spotify.com/v1`)
    fn get_spotify_api_base(&self) -> anyhow::Result<String>;
    fn set_spotify_api_base(&self, url: &str) -> anyhow::Result<()>;

    /// Base du service de comptes (défaut `https://accounts.spotify.com`)
    fn get_spotify_accounts_base(&self) -> anyhow::Result<String>;
    fn set_spotify_accounts_base(&self, url: &str) -> anyhow::Result<()>;

    /// Timeout HTTP du client (défaut 10 s)
    fn get_spotify_timeout(&self) -> anyhow::Result<Duration>;
    fn set_spotify_timeout(&self, timeout: Duration) -> anyhow::Result<()>;
}

fn missing(key: &str, env: &str) -> Error {
    Error::MissingCredential(format!("{} (or {} environment variable)", key, env))
}

fn from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl SpotifyConfigExt for Config {
    fn get_spotify_client_id(&self) -> Option<String> {
        self.get_string(&["spotify", "client_id"])
            .or_else(|| from_env(ENV_CLIENT_ID))
    }

    fn get_spotify_client_secret(&self) -> Option<String> {
        self.get_string(&["spotify", "client_secret"])
            .or_else(|| from_env(ENV_CLIENT_SECRET))
    }

    fn get_spotify_refresh_token(&self) -> Option<String> {
        self.get_string(&["spotify", "refresh_token"])
            .or_else(|| from_env(ENV_REFRESH_TOKEN))
    }

    fn set_spotify_refresh_token(&self, token: &str) -> anyhow::Result<()> {
        self.set_value(&["spotify", "refresh_token"], Value::String(token.to_string()))
    }

    fn get_spotify_api_base(&self) -> anyhow::Result<String> {
        match self.get_string(&["spotify", "api_base"]) {
            Some(url) => Ok(url),
            None => {
                self.set_spotify_api_base(DEFAULT_API_BASE)?;
                Ok(DEFAULT_API_BASE.to_string())
            }
        }
    }

    fn set_spotify_api_base(&self, url: &str) -> anyhow::Result<()> {
        self.set_value(&["spotify", "api_base"], Value::String(url.to_string()))
    }

    fn get_spotify_accounts_base(&self) -> anyhow::Result<String> {
        match self.get_string(&["spotify", "accounts_base"]) {
            Some(url) => Ok(url),
            None => {
                self.set_spotify_accounts_base(DEFAULT_ACCOUNTS_BASE)?;
                Ok(DEFAULT_ACCOUNTS_BASE.to_string())
            }
        }
    }

    fn set_spotify_accounts_base(&self, url: &str) -> anyhow::Result<()> {
        self.set_value(&["spotify", "accounts_base"], Value::String(url.to_string()))
    }

    fn get_spotify_timeout(&self) -> anyhow::Result<Duration> {
        match self.get_value(&["spotify", "timeout_secs"]) {
            Ok(Value::Number(n)) if n.as_u64().is_some_and(|v| v > 0) => {
                Ok(Duration::from_secs(n.as_u64().unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)))
            }
            _ => {
                let timeout = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);
                self.set_spotify_timeout(timeout)?;
                Ok(timeout)
            }
        }
    }

    fn set_spotify_timeout(&self, timeout: Duration) -> anyhow::Result<()> {
        self.set_value(
            &["spotify", "timeout_secs"],
            Value::Number(Number::from(timeout.as_secs())),
        )
    }
}

impl SpotifyClient {
    /// Construit le client depuis la section `spotify` de la configuration
    ///
    /// Un refresh token renouvelé par Spotify est enregistré dans
    /// `spotify.refresh_token`.
    pub fn from_config(config: &Arc<Config>) -> Result<Self> {
        let credentials = config.get_spotify_credentials()?;
        let api_base = config
            .get_spotify_api_base()
            .map_err(|e| Error::other(format!("{:#}", e)))?;
        let accounts_base = config
            .get_spotify_accounts_base()
            .map_err(|e| Error::other(format!("{:#}", e)))?;
        let timeout = config
            .get_spotify_timeout()
            .map_err(|e| Error::other(format!("{:#}", e)))?;

        let store = Arc::clone(config);
        SpotifyClient::builder()
            .api_base(api_base)
            .accounts_base(accounts_base)
            .timeout(timeout)
            .credentials(credentials)
            .on_rotation(move |token| {
                if let Err(e) = store.set_spotify_refresh_token(token) {
                    warn!("Unable to save the rotated refresh token: {:#}", e);
                }
            })
            .build()
    }
}
