//! Extension sfserver pour le service now-playing
//!
//! `sfserver` ne connaît pas `sfnowplaying` : les routes sont greffées sur
//! le serveur par ce trait, implémenté dans `server_impl`.

use crate::service::NowPlayingService;
use crate::source::PlaybackSource;
use anyhow::Result;
use std::sync::Arc;

/// Trait pour étendre `sfserver::Server` avec `/current` et `/album`
///
/// # Exemple
///
/// ```rust,ignore
/// use sfnowplaying::NowPlayingExt;
/// use sfserver::ServerBuilder;
///
/// let mut server = ServerBuilder::new_configured().build();
/// server.init_now_playing_configured(Arc::new(spotify_client)).await?;
/// server.start().await?;
/// server.wait().await;
/// ```
pub trait NowPlayingExt {
    /// Enregistre les routes d'un service déjà construit
    ///
    /// - `GET /current`
    /// - `GET /album`
    /// - `/swagger-ui/nowplaying` et `/api-docs/nowplaying.json`
    async fn init_now_playing(&mut self, service: Arc<NowPlayingService>) -> Arc<NowPlayingService>;

    /// Construit le service depuis la configuration (`nowplaying.*`) avec le
    /// processeur par défaut, puis enregistre les routes
    async fn init_now_playing_configured(
        &mut self,
        source: Arc<dyn PlaybackSource>,
    ) -> Result<Arc<NowPlayingService>>;
}
