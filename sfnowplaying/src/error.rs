//! Erreurs du service now-playing
//!
//! Toutes les erreurs sont locales à la requête qui les déclenche. Le
//! service ne réessaie jamais : le client d'affichage rappellera au
//! prochain intervalle.

/// Result type alias for now-playing operations
pub type Result<T> = std::result::Result<T, NowPlayingError>;

#[derive(Debug, thiserror::Error)]
pub enum NowPlayingError {
    /// Échec réseau, authentification ou timeout sur l'API de lecture
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Échec réseau, statut non-2xx ou timeout sur la pochette
    #[error("Album art fetch failed: {0}")]
    ArtFetchFailed(String),

    /// Octets de pochette illisibles
    #[error("Album art decode failed: {0}")]
    DecodeFailed(String),

    /// `/album` appelé avant tout rafraîchissement réussi
    #[error("no cached album")]
    NoCachedAlbum,
}

impl NowPlayingError {
    /// Code stable exposé dans les réponses JSON
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::ArtFetchFailed(_) => "ART_FETCH_FAILED",
            Self::DecodeFailed(_) => "DECODE_FAILED",
            Self::NoCachedAlbum => "NO_CACHED_ALBUM",
        }
    }

    /// Erreur passagère : le prochain appel peut réussir
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::NoCachedAlbum)
    }
}

#[cfg(feature = "server")]
mod http {
    use super::NowPlayingError;
    use axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use serde::Serialize;

    /// Corps JSON des erreurs passagères
    #[derive(Debug, Serialize, utoipa::ToSchema)]
    pub struct ErrorResponse {
        pub error: String,
        pub message: String,
    }

    impl IntoResponse for NowPlayingError {
        fn into_response(self) -> Response {
            match self {
                NowPlayingError::NoCachedAlbum => {
                    (StatusCode::NOT_FOUND, "no cached album").into_response()
                }
                other => (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse {
                        error: other.code().to_string(),
                        message: other.to_string(),
                    }),
                )
                    .into_response(),
            }
        }
    }
}

#[cfg(feature = "server")]
pub use http::ErrorResponse;
