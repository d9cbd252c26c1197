//! # sfspotify - Client Spotify pour Spotiframe
//!
//! Ce crate fournit la capacité amont du service now-playing :
//!
//! - échange d'un refresh token contre des access tokens (mis en cache)
//! - lecture de `GET /me/player/currently-playing`, validée en
//!   [`PlaybackSnapshot`](sfnowplaying::PlaybackSnapshot)
//! - téléchargement des pochettes
//!
//! [`SpotifyClient`] implémente [`sfnowplaying::PlaybackSource`].
//!
//! ## Exemple
//!
//! ```no_run
//! use sfspotify::{Credentials, SpotifyClient};
//! use std::time::Duration;
//!
//! # fn main() -> sfspotify::Result<()> {
//! let client = SpotifyClient::builder()
//!     .timeout(Duration::from_secs(5))
//!     .credentials(Credentials::new("client-id", "client-secret", "refresh-token"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

#[cfg(feature = "sfconfig")]
pub mod config_ext;

pub use auth::Credentials;
pub use client::{ClientBuilder, RotationHook, SpotifyClient};
pub use error::{Error, Result};
pub use models::{CurrentlyPlaying, PlayableItem};

#[cfg(feature = "sfconfig")]
pub use config_ext::SpotifyConfigExt;
