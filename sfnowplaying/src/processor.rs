//! Traitement d'image appelé par le service

use sfcovers::{DynamicImage, Rgb};

/// Primitives d'image utilisées par [`NowPlayingService`](crate::NowPlayingService)
///
/// Les méthodes sont synchrones et coûteuses : le service les exécute sur
/// le pool bloquant de tokio.
pub trait ArtProcessor: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<DynamicImage>;

    fn dominant_color(&self, image: &DynamicImage) -> Rgb;

    /// Carré `size` x `size` encodé en PNG
    fn render(&self, image: &DynamicImage, size: u32) -> anyhow::Result<Vec<u8>>;
}

/// Implémentation par défaut basée sur `sfcovers`
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverProcessor;

impl ArtProcessor for CoverProcessor {
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<DynamicImage> {
        sfcovers::decode(bytes)
    }

    fn dominant_color(&self, image: &DynamicImage) -> Rgb {
        sfcovers::dominant_color(image)
    }

    fn render(&self, image: &DynamicImage, size: u32) -> anyhow::Result<Vec<u8>> {
        sfcovers::render_png(image, size)
    }
}
