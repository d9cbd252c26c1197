//! Data models for the Spotify Web API
//!
//! Only the fields read by Spotiframe are modelled. Everything else in the
//! payloads is ignored by serde.

use crate::error::{Error, Result};
use serde::Deserialize;
use sfnowplaying::PlaybackSnapshot;

/// Response of `GET /me/player/currently-playing`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    /// Absent for ads and in private sessions
    #[serde(default)]
    pub item: Option<PlayableItem>,
}

/// Item currently played, discriminated by its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayableItem {
    Track(Track),
    Episode(Episode),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    /// Absent for local files
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub show: Option<Show>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Show {
    pub name: String,
}

/// Artwork reference, Spotify lists the largest first
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Response of `POST /api/token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    /// Spotify may rotate the refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl CurrentlyPlaying {
    /// Validates the payload into a [`PlaybackSnapshot`]
    ///
    /// `Ok(None)` when no playable item is reported (ads, private session,
    /// nothing playing).
    pub fn into_snapshot(self) -> Result<Option<PlaybackSnapshot>> {
        let is_playing = self.is_playing;
        match self.item {
            None => Ok(None),
            Some(item) => item.into_snapshot(is_playing).map(Some),
        }
    }
}

impl PlayableItem {
    pub fn into_snapshot(self, is_playing: bool) -> Result<PlaybackSnapshot> {
        match self {
            PlayableItem::Track(track) => {
                let track_id = identity(track.id, track.uri, &track.name)?;
                Ok(PlaybackSnapshot {
                    track_id,
                    title: track.name,
                    artists: track.artists.into_iter().map(|a| a.name).collect(),
                    album_art_url: track.album.and_then(|album| first_image(album.images)),
                    is_playing,
                })
            }
            PlayableItem::Episode(episode) => {
                let track_id = identity(episode.id, episode.uri, &episode.name)?;
                Ok(PlaybackSnapshot {
                    track_id,
                    title: episode.name,
                    artists: episode.show.map(|show| show.name).into_iter().collect(),
                    album_art_url: first_image(episode.images),
                    is_playing,
                })
            }
        }
    }
}

/// `id`, or `uri` for local files
fn identity(id: Option<String>, uri: Option<String>, name: &str) -> Result<String> {
    id.filter(|s| !s.is_empty())
        .or(uri.filter(|s| !s.is_empty()))
        .ok_or_else(|| Error::malformed(format!("item '{}' has neither id nor uri", name)))
}

fn first_image(images: Vec<Image>) -> Option<String> {
    images.into_iter().next().map(|image| image.url)
}
