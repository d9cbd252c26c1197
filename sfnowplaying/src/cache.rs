//! Cache du dernier morceau observé
//!
//! Le payload est stocké derrière un `Arc` : une lecture clone le pointeur
//! et relâche le verrou aussitôt, une écriture remplace le pointeur entier.
//! Aucun lecteur ne peut donc voir un payload à moitié écrit, et aucun
//! travail lent n'est fait sous le verrou.

use crate::model::CachedPayload;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct TrackCache {
    current: RwLock<Arc<CachedPayload>>,
}

impl TrackCache {
    /// Cache vide (aucun morceau)
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload courant, éventuellement vide
    pub async fn read(&self) -> Arc<CachedPayload> {
        self.current.read().await.clone()
    }

    /// Remplace atomiquement tout le payload
    pub async fn write(&self, payload: CachedPayload) -> Arc<CachedPayload> {
        let payload = Arc::new(payload);
        *self.current.write().await = payload.clone();
        payload
    }

    /// Revient à l'état vide
    pub async fn clear(&self) {
        self.write(CachedPayload::empty()).await;
    }
}
