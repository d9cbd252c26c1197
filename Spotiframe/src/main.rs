use dotenv::dotenv;
use sfconfig::get_config;
use sfnowplaying::NowPlayingExt;
use sfserver::ServerBuilder;
use sfspotify::SpotifyClient;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Les variables du .env doivent être visibles avant le chargement de la config
    dotenv().ok();

    // ========== PHASE 1 : Serveur et logs ==========

    let mut server = ServerBuilder::new_configured().build();
    server.init_logging().await;

    server
        .add_route("/info", || async {
            serde_json::json!({
                "name": "Spotiframe",
                "version": env!("CARGO_PKG_VERSION"),
            })
        })
        .await;

    // ========== PHASE 2 : Spotify et now-playing ==========

    info!("🎵 Connecting to Spotify...");
    let spotify = SpotifyClient::from_config(&get_config())?;

    // Un premier token avant d'ouvrir le port, les erreurs de
    // credentials apparaissent ainsi dès le démarrage
    if let Err(e) = spotify.ensure_token().await {
        warn!("⚠️ Cannot obtain a Spotify access token yet: {}", e);
    }

    server.init_now_playing_configured(Arc::new(spotify)).await?;

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🌐 Starting HTTP server...");
    server.start().await?;

    info!("✅ Spotiframe is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
