//! Implémentation de [`NowPlayingExt`](crate::NowPlayingExt) pour `sfserver::Server`

use crate::api::create_router;
use crate::config_ext::NowPlayingConfigExt;
use crate::openapi::ApiDoc;
use crate::processor::CoverProcessor;
use crate::server_ext::NowPlayingExt;
use crate::service::NowPlayingService;
use crate::source::PlaybackSource;
use anyhow::Result;
use sfserver::Server;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

impl NowPlayingExt for Server {
    async fn init_now_playing(&mut self, service: Arc<NowPlayingService>) -> Arc<NowPlayingService> {
        self.add_router("/", create_router(service.clone())).await;
        self.add_swagger(ApiDoc::openapi(), "nowplaying").await;

        info!(
            album_size = service.options().album_size,
            stopped_policy = %service.options().stopped_policy,
            "Now playing endpoints available at /current and /album"
        );
        service
    }

    async fn init_now_playing_configured(
        &mut self,
        source: Arc<dyn PlaybackSource>,
    ) -> Result<Arc<NowPlayingService>> {
        let options = sfconfig::get_config().get_nowplaying_options()?;
        let service = Arc::new(NowPlayingService::new(
            source,
            Arc::new(CoverProcessor),
            options,
        ));
        Ok(self.init_now_playing(service).await)
    }
}
