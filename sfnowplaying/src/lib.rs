//! # sfnowplaying - État "now playing" partagé par `/current` et `/album`
//!
//! Cette crate contient le cœur de Spotiframe : un cache du dernier morceau
//! observé et le protocole de rafraîchissement qui décide quand retélécharger
//! la pochette et recalculer la couleur dominante.
//!
//! ## Architecture
//!
//! - [`PlaybackSource`] : capacité amont (API de lecture + téléchargement
//!   d'octets), implémentée par `sfspotify`
//! - [`ArtProcessor`] : décodage, rendu PNG et couleur, implémenté par
//!   [`CoverProcessor`] au-dessus de `sfcovers`
//! - [`TrackCache`] : seul état mutable partagé, remplacé d'un bloc
//! - [`NowPlayingService`] : orchestre les deux endpoints
//!
//! Avec la feature `server` (par défaut), [`NowPlayingExt`] enregistre les
//! routes sur un `sfserver::Server` :
//!
//! - `GET /current` - métadonnées JSON du morceau en cours
//! - `GET /album` - pochette PNG carrée
//!
//! ## Exemple
//!
//! ```rust,ignore
//! use sfnowplaying::{CoverProcessor, NowPlayingOptions, NowPlayingService};
//! use std::sync::Arc;
//!
//! let service = NowPlayingService::new(
//!     Arc::new(spotify_client),
//!     Arc::new(CoverProcessor),
//!     NowPlayingOptions::default(),
//! );
//! let current = service.current().await?;
//! ```

pub mod cache;
pub mod error;
pub mod model;
pub mod processor;
pub mod service;
pub mod source;

#[cfg(feature = "config")]
pub mod config_ext;

#[cfg(feature = "server")]
pub mod api;

#[cfg(feature = "server")]
pub mod openapi;

#[cfg(feature = "server")]
pub mod server_ext;

#[cfg(feature = "server")]
mod server_impl;

pub use cache::TrackCache;
pub use error::{NowPlayingError, Result};
pub use model::{AlbumImage, CachedPayload, CurrentTrack, NowPlaying, PlaybackSnapshot, PlaybackStatus};
pub use processor::{ArtProcessor, CoverProcessor};
pub use service::{NowPlayingOptions, NowPlayingService, StoppedPolicy};
pub use source::PlaybackSource;

#[cfg(feature = "config")]
pub use config_ext::NowPlayingConfigExt;

#[cfg(feature = "server")]
pub use openapi::ApiDoc;

#[cfg(feature = "server")]
pub use api::create_router;

#[cfg(feature = "server")]
pub use error::ErrorResponse;

#[cfg(feature = "server")]
pub use server_ext::NowPlayingExt;
