//! Endpoints HTTP `/current` et `/album`
//!
//! Les handlers ne font que déléguer au [`NowPlayingService`] et sérialiser
//! le résultat. Les erreurs sont converties par `IntoResponse` sur
//! [`NowPlayingError`].

use crate::error::NowPlayingError;
use crate::model::CurrentTrack;
use crate::service::NowPlayingService;
use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

/// Crée le router des deux endpoints, à monter à la racine
pub fn create_router(service: Arc<NowPlayingService>) -> Router {
    Router::new()
        .route("/current", get(current))
        .route("/album", get(album))
        .with_state(service)
}

/// Morceau en cours de lecture
#[utoipa::path(
    get,
    path = "/current",
    tag = "nowplaying",
    responses(
        (status = 200, description = "Morceau en cours ou `{\"status\":\"stopped\"}`", body = CurrentTrack),
        (status = 502, description = "API de lecture ou pochette indisponible", body = crate::error::ErrorResponse),
    )
)]
pub async fn current(
    State(service): State<Arc<NowPlayingService>>,
) -> Result<Json<CurrentTrack>, NowPlayingError> {
    service.current().await.map(Json)
}

/// Pochette du dernier morceau, carré PNG
#[utoipa::path(
    get,
    path = "/album",
    tag = "nowplaying",
    responses(
        (status = 200, description = "Image PNG carrée", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Aucune pochette en cache (`no cached album`)", body = String),
        (status = 502, description = "Pochette indisponible ou illisible", body = crate::error::ErrorResponse),
    )
)]
pub async fn album(
    State(service): State<Arc<NowPlayingService>>,
) -> Result<Response, NowPlayingError> {
    let image = service.album().await?;
    Ok(([(header::CONTENT_TYPE, image.content_type())], image.png).into_response())
}
