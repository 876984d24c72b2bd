//! Shared fixtures for integration tests.

use std::io::Cursor;

use image::{ImageBuffer, Rgb};

/// Encode a PNG of pseudo-random noise at the given size.
///
/// Noise keeps the payload safely above the transcoder's minimum byte floor;
/// flat colors would compress under it.
pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let v = x
            .wrapping_mul(2_654_435_761)
            .wrapping_add(y.wrapping_mul(40_503))
            .wrapping_mul(2_246_822_519);
        Rgb([(v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8])
    });
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .expect("PNG encoding of an in-memory buffer cannot fail");
    png
}

/// A syntactically valid PNG under the transcoder's minimum byte floor,
/// standing in for the source site's placeholder images.
pub fn placeholder_png() -> Vec<u8> {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(ImageBuffer::from_pixel(2, 2, Rgb([200, 200, 200])))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .expect("PNG encoding of an in-memory buffer cannot fail");
    assert!(png.len() < 4096, "placeholder fixture must stay under the size floor");
    png
}
