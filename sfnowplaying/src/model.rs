//! Types de données du cache now-playing

use serde::Serialize;
use sfcovers::{PNG_CONTENT_TYPE, Rgb};

/// Rapport instantané de l'API amont
///
/// Éphémère : consommé puis jeté à chaque interrogation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// Identifiant amont, unique par morceau
    pub track_id: String,
    pub title: String,
    /// Artistes dans l'ordre fourni par l'amont
    pub artists: Vec<String>,
    pub album_art_url: Option<String>,
    /// Informatif seulement : un morceau en pause reste le morceau courant
    /// et n'est ni rafraîchi ni vidé pour autant. Il n'apparaît que dans
    /// les logs.
    pub is_playing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Playing,
    Stopped,
}

/// Contenu du [`TrackCache`](crate::TrackCache)
///
/// `track_id` désigne le dernier morceau dont le rafraîchissement complet
/// (pochette + couleur) a abouti. Le payload est toujours remplacé en bloc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPayload {
    pub track_id: Option<String>,
    pub title: String,
    /// Artistes joints par ", "
    pub artist: String,
    pub album_art_url: Option<String>,
    pub dominant_color: Option<Rgb>,
    pub status: PlaybackStatus,
}

impl CachedPayload {
    /// Payload initial : rien en cache
    pub fn empty() -> Self {
        Self {
            track_id: None,
            title: String::new(),
            artist: String::new(),
            album_art_url: None,
            dominant_color: None,
            status: PlaybackStatus::Stopped,
        }
    }

    /// Construit le payload d'un morceau fraîchement rafraîchi
    pub fn playing(snapshot: PlaybackSnapshot, dominant_color: Option<Rgb>) -> Self {
        Self {
            track_id: Some(snapshot.track_id),
            title: snapshot.title,
            artist: snapshot.artists.join(", "),
            album_art_url: snapshot.album_art_url,
            dominant_color,
            status: PlaybackStatus::Playing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.track_id.is_none()
    }

    /// Vue publique servie par `/current`
    pub fn to_current(&self) -> CurrentTrack {
        match (&self.track_id, self.status) {
            (Some(id), PlaybackStatus::Playing) => CurrentTrack::Playing(NowPlaying {
                title: self.title.clone(),
                artist: self.artist.clone(),
                id: id.clone(),
                album_url: self.album_art_url.clone(),
                color: self.dominant_color,
                status: PlaybackStatus::Playing,
            }),
            _ => CurrentTrack::stopped(),
        }
    }
}

impl Default for CachedPayload {
    fn default() -> Self {
        Self::empty()
    }
}

/// Corps JSON d'un morceau en lecture
///
/// L'ordre des champs est celui de la sérialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub id: String,
    pub album_url: Option<String>,
    /// `#rrggbb` en minuscules
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "#1db954"))]
    pub color: Option<Rgb>,
    pub status: PlaybackStatus,
}

/// Réponse de `/current`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum CurrentTrack {
    Playing(NowPlaying),
    Stopped { status: PlaybackStatus },
}

impl CurrentTrack {
    pub fn stopped() -> Self {
        CurrentTrack::Stopped {
            status: PlaybackStatus::Stopped,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, CurrentTrack::Playing(_))
    }
}

/// Pochette rendue pour `/album`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumImage {
    pub png: Vec<u8>,
    /// Côté du carré en pixels
    pub size: u32,
}

impl AlbumImage {
    pub fn content_type(&self) -> &'static str {
        PNG_CONTENT_TYPE
    }
}
