//! Capacité amont : API de lecture et téléchargement des pochettes

use crate::model::PlaybackSnapshot;
use async_trait::async_trait;

/// Source de l'état de lecture d'un compte
///
/// Les implémentations portent leur propre authentification ; le service
/// ne voit que des snapshots déjà validés.
#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// Morceau en cours, `None` quand rien n'est joué
    async fn currently_playing(&self) -> anyhow::Result<Option<PlaybackSnapshot>>;

    /// Télécharge les octets d'une URL (pochette)
    ///
    /// Une réponse non-2xx est une erreur.
    async fn fetch_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}
