use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use std::io::Cursor;

/// Décode des octets d'image quel que soit leur format
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Image decode error")
}

pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .context("PNG encode error")?;
    Ok(buffer)
}

/// Redimensionne l'image dans un carré `size` x `size`
///
/// Le ratio est conservé : l'image est centrée et les bandes restantes
/// sont transparentes.
pub fn ensure_square(img: &DynamicImage, size: u32) -> DynamicImage {
    let size = size.max(1);
    let (width, height) = (img.width().max(1), img.height().max(1));

    // Calculer le ratio de mise à l'échelle
    let scale = if width > height {
        size as f32 / width as f32
    } else {
        size as f32 / height as f32
    };

    let new_width = ((width as f32 * scale).round() as u32).clamp(1, size);
    let new_height = ((height as f32 * scale).round() as u32).clamp(1, size);

    let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);

    let mut square = DynamicImage::new_rgba8(size, size);

    // Centrer l'image redimensionnée
    let x = (size - resized.width()) / 2;
    let y = (size - resized.height()) / 2;
    image::imageops::overlay(&mut square, &resized, x.into(), y.into());

    square
}

/// Rendu complet pour l'affichage : carré `size` x `size` encodé en PNG
pub fn render_png(img: &DynamicImage, size: u32) -> Result<Vec<u8>> {
    let square = ensure_square(img, size);
    tracing::trace!(size, "Rendered square cover");
    encode_png(&square)
}
