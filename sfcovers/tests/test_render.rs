use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use sfcovers::{decode, dominant_color, encode_png, ensure_square, render_png};

/// Crée une image de test simple
fn create_test_image(width: u32, height: u32) -> DynamicImage {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

fn to_jpeg(img: &DynamicImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    buffer
}

#[test]
fn test_encode_png_signature() {
    let img = create_test_image(100, 100);
    let data = encode_png(&img).unwrap();

    assert_eq!(&data[0..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_ensure_square_portrait() {
    let img = create_test_image(100, 200);
    let square = ensure_square(&img, 420);

    assert_eq!(square.width(), 420);
    assert_eq!(square.height(), 420);
}

#[test]
fn test_ensure_square_landscape() {
    let img = create_test_image(640, 300);
    let square = ensure_square(&img, 420);

    assert_eq!(square.width(), 420);
    assert_eq!(square.height(), 420);
}

#[test]
fn test_ensure_square_extreme_ratio() {
    let img = create_test_image(2000, 3);
    let square = ensure_square(&img, 200);

    assert_eq!(square.width(), 200);
    assert_eq!(square.height(), 200);
}

#[test]
fn test_ensure_square_different_sizes() {
    let img = create_test_image(100, 100);

    for size in [64, 200, 420, 512] {
        let square = ensure_square(&img, size);
        assert_eq!(square.width(), size);
        assert_eq!(square.height(), size);
    }
}

#[test]
fn test_render_png_from_jpeg_bytes() {
    let bytes = to_jpeg(&create_test_image(300, 200));

    let img = decode(&bytes).unwrap();
    let png = render_png(&img, 420).unwrap();

    let rendered = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
    assert_eq!(rendered.width(), 420);
    assert_eq!(rendered.height(), 420);
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(decode(b"definitely not an image").is_err());
}

#[test]
fn test_color_from_decoded_png() {
    let red = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(64, 64, Rgba([255, 0, 0, 255])));
    let bytes = encode_png(&red).unwrap();

    let img = decode(&bytes).unwrap();
    assert_eq!(dominant_color(&img).to_hex(), "#ff0000");
}

#[test]
fn test_ensure_square_keeps_ratio_with_transparent_bands() {
    let red: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(200, 100, Rgba([255, 0, 0, 255]));
    let square = ensure_square(&DynamicImage::ImageRgba8(red), 100).to_rgba8();

    // 200x100 -> 100x50 centré verticalement, bandes de 25 px
    assert_eq!(square.get_pixel(50, 10)[3], 0);
    assert_eq!(square.get_pixel(50, 90)[3], 0);
    assert_eq!(*square.get_pixel(50, 50), Rgba([255, 0, 0, 255]));

    let png = render_png(&DynamicImage::ImageRgba8(square), 100).unwrap();
    let rendered = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
    assert!(rendered.color().has_alpha());
}
