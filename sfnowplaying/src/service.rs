//! Service now-playing : protocole de rafraîchissement et lecture de pochette
//!
//! `current()` interroge la source à chaque appel. Tant que l'identifiant
//! du morceau ne change pas, le payload en cache est renvoyé tel quel :
//! téléchargement, décodage et calcul de couleur n'ont lieu qu'une fois par
//! morceau distinct, quelle que soit la fréquence de polling.
//!
//! `album()` n'interroge jamais l'API de lecture. Il relit l'URL en cache,
//! retélécharge la pochette et la rend au format d'affichage.

use crate::cache::TrackCache;
use crate::error::{NowPlayingError, Result};
use crate::model::{AlbumImage, CachedPayload, CurrentTrack, PlaybackSnapshot};
use crate::processor::ArtProcessor;
use crate::source::PlaybackSource;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Côté par défaut de l'image servie par `/album`
pub const DEFAULT_ALBUM_SIZE: u32 = 420;

/// Timeout par défaut des appels amont
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Comportement du cache quand l'amont ne joue plus rien
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoppedPolicy {
    /// Le dernier payload reste en cache, `/album` continue de servir la pochette
    #[default]
    Retain,
    /// Le cache est vidé, `/album` répond 404
    Clear,
}

impl StoppedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoppedPolicy::Retain => "retain",
            StoppedPolicy::Clear => "clear",
        }
    }
}

impl fmt::Display for StoppedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoppedPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(StoppedPolicy::Retain),
            "clear" => Ok(StoppedPolicy::Clear),
            other => Err(anyhow::anyhow!(
                "Unknown stopped policy '{}' (expected 'retain' or 'clear')",
                other
            )),
        }
    }
}

/// Réglages du service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlayingOptions {
    /// Côté du carré PNG servi par `/album`
    pub album_size: u32,
    pub stopped_policy: StoppedPolicy,
    /// Borne chaque appel amont (lecture et pochette)
    pub timeout: Duration,
}

impl Default for NowPlayingOptions {
    fn default() -> Self {
        Self {
            album_size: DEFAULT_ALBUM_SIZE,
            stopped_policy: StoppedPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct NowPlayingService {
    source: Arc<dyn PlaybackSource>,
    processor: Arc<dyn ArtProcessor>,
    cache: Arc<TrackCache>,
    options: NowPlayingOptions,
}

impl NowPlayingService {
    /// Crée le service avec un cache vide
    pub fn new(
        source: Arc<dyn PlaybackSource>,
        processor: Arc<dyn ArtProcessor>,
        options: NowPlayingOptions,
    ) -> Self {
        Self::with_cache(source, processor, Arc::new(TrackCache::new()), options)
    }

    /// Crée le service autour d'un cache existant
    pub fn with_cache(
        source: Arc<dyn PlaybackSource>,
        processor: Arc<dyn ArtProcessor>,
        cache: Arc<TrackCache>,
        options: NowPlayingOptions,
    ) -> Self {
        Self {
            source,
            processor,
            cache,
            options,
        }
    }

    pub fn cache(&self) -> &Arc<TrackCache> {
        &self.cache
    }

    pub fn options(&self) -> &NowPlayingOptions {
        &self.options
    }

    /// Morceau en cours, servi depuis le cache quand l'identifiant n'a pas changé
    pub async fn current(&self) -> Result<CurrentTrack> {
        let polled = bounded(self.options.timeout, self.source.currently_playing())
            .await
            .map_err(|e| {
                warn!("Playback API unavailable: {:#}", e);
                NowPlayingError::UpstreamUnavailable(format!("{:#}", e))
            })?;

        let Some(snapshot) = polled else {
            self.on_stopped().await;
            return Ok(CurrentTrack::stopped());
        };

        let cached = self.cache.read().await;
        if cached.track_id.as_deref() == Some(snapshot.track_id.as_str()) {
            debug!(track_id = %snapshot.track_id, "cache hit");
            return Ok(cached.to_current());
        }

        let payload = self.refresh(snapshot).await?;
        Ok(payload.to_current())
    }

    /// Pochette du morceau en cache, retéléchargée et rendue en carré PNG
    pub async fn album(&self) -> Result<AlbumImage> {
        let url = self
            .cache
            .read()
            .await
            .album_art_url
            .clone()
            .ok_or(NowPlayingError::NoCachedAlbum)?;

        let bytes = self.fetch_art(&url).await?;

        let processor = self.processor.clone();
        let size = self.options.album_size;
        let png = tokio::task::spawn_blocking(move || {
            let image = processor.decode(&bytes)?;
            processor.render(&image, size)
        })
        .await
        .map_err(|e| NowPlayingError::DecodeFailed(format!("render task failed: {}", e)))?
        .map_err(|e| {
            warn!("Cannot render album art {}: {:#}", url, e);
            NowPlayingError::DecodeFailed(format!("{:#}", e))
        })?;

        Ok(AlbumImage { png, size })
    }

    /// Télécharge, décode et colore la pochette d'un nouveau morceau puis
    /// remplace le cache
    ///
    /// Rien n'est écrit si une étape échoue.
    async fn refresh(&self, snapshot: PlaybackSnapshot) -> Result<Arc<CachedPayload>> {
        info!(
            track_id = %snapshot.track_id,
            paused = !snapshot.is_playing,
            "New track: {} - {}",
            snapshot.artists.join(", "),
            snapshot.title
        );

        let color = match snapshot.album_art_url.as_deref() {
            Some(url) => {
                let bytes = self.fetch_art(url).await?;
                let processor = self.processor.clone();
                let color = tokio::task::spawn_blocking(move || {
                    processor
                        .decode(&bytes)
                        .map(|image| processor.dominant_color(&image))
                })
                .await
                .map_err(|e| NowPlayingError::DecodeFailed(format!("decode task failed: {}", e)))?
                .map_err(|e| {
                    warn!("Cannot decode album art {}: {:#}", url, e);
                    NowPlayingError::DecodeFailed(format!("{:#}", e))
                })?;
                debug!(track_id = %snapshot.track_id, color = %color, "dominant color");
                Some(color)
            }
            None => None,
        };

        Ok(self.cache.write(CachedPayload::playing(snapshot, color)).await)
    }

    async fn fetch_art(&self, url: &str) -> Result<Vec<u8>> {
        bounded(self.options.timeout, self.source.fetch_bytes(url))
            .await
            .map_err(|e| {
                warn!("Cannot fetch album art {}: {:#}", url, e);
                NowPlayingError::ArtFetchFailed(format!("{:#}", e))
            })
    }

    async fn on_stopped(&self) {
        match self.options.stopped_policy {
            StoppedPolicy::Retain => debug!("nothing playing"),
            StoppedPolicy::Clear => {
                if !self.cache.read().await.is_empty() {
                    info!("Playback stopped, clearing cache");
                    self.cache.clear().await;
                }
            }
        }
    }
}

/// Applique `timeout` à un appel amont, le dépassement devenant une erreur
async fn bounded<T, F>(timeout: Duration, call: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("timed out after {:?}", timeout)),
    }
}
