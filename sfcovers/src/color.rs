//! Couleur dominante d'une pochette
//!
//! La couleur retenue est la moyenne des pixels d'une vignette 50x50,
//! ce qui suffit pour teinter le fond d'un cadre d'affichage.

use image::{DynamicImage, imageops::FilterType};
use serde::{Serialize, Serializer};
use std::fmt;

/// Côté de la vignette utilisée pour le calcul de la moyenne
const SAMPLE_SIZE: u32 = 50;

/// Couleur RGB 8 bits par canal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Représentation `#rrggbb` en minuscules
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Calcule la couleur dominante d'une image
///
/// L'image est réduite en 50x50 (plus proche voisin, pour ne pas créer de
/// teintes absentes de l'original), puis chaque canal est moyenné.
/// La transparence est ignorée.
pub fn dominant_color(img: &DynamicImage) -> Rgb {
    let small = img
        .resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Nearest)
        .to_rgb8();

    let mut sums = [0u64; 3];
    for pixel in small.pixels() {
        sums[0] += u64::from(pixel[0]);
        sums[1] += u64::from(pixel[1]);
        sums[2] += u64::from(pixel[2]);
    }

    let count = u64::from(small.width()) * u64::from(small.height());
    if count == 0 {
        return Rgb::new(0, 0, 0);
    }

    // Moyenne tronquée
    Rgb::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}
