//! # sfcovers - Traitement des pochettes d'albums pour Spotiframe
//!
//! Cette crate regroupe les primitives d'image utilisées par le service
//! now-playing :
//!
//! - Décodage des octets téléchargés (JPEG, PNG, WebP...)
//! - Rendu carré à la taille d'affichage et ré-encodage PNG
//! - Extraction de la couleur dominante, exposée en `#rrggbb`
//!
//! Aucune opération réseau n'est faite ici : les octets sont fournis par
//! l'appelant, ce qui permet de dériver l'image et la couleur d'un seul
//! téléchargement.
//!
//! ## Exemple
//!
//! ```rust,no_run
//! use sfcovers::{decode, dominant_color, render_png};
//!
//! # fn main() -> anyhow::Result<()> {
//! let bytes = std::fs::read("cover.jpg")?;
//! let img = decode(&bytes)?;
//! println!("couleur: {}", dominant_color(&img));
//! let png = render_png(&img, 420)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod render;

pub use color::{Rgb, dominant_color};
pub use render::{decode, encode_png, ensure_square, render_png};

/// Type MIME des images produites par [`render_png`]
pub const PNG_CONTENT_TYPE: &str = "image/png";

pub use image::DynamicImage;
