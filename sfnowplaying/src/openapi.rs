//! Documentation OpenAPI des endpoints now-playing

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::current, crate::api::album),
    components(schemas(
        crate::model::CurrentTrack,
        crate::model::NowPlaying,
        crate::model::PlaybackStatus,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "nowplaying", description = "Morceau en cours et pochette pour l'affichage")
    ),
    info(
        title = "Spotiframe Now Playing API",
        version = "0.1.0",
        description = r#"
## GET /current
Métadonnées JSON du morceau en cours. `{"status":"stopped"}` quand rien n'est joué.
La couleur dominante (`#rrggbb`) n'est calculée qu'une fois par morceau.

## GET /album
Pochette du dernier morceau rafraîchi, redimensionnée en carré PNG.
Répond 404 `no cached album` tant qu'aucun morceau n'a été observé.
        "#,
    )
)]
pub struct ApiDoc;
