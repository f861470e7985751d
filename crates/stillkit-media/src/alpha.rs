// crates/stillkit-media/src/alpha.rs
//
// Transparent-pixel PNG processing. The whole trick: re-encode the image as
// RGBA PNG with the top-left pixel forced to a near-zero alpha, which is
// enough to defeat platforms that flatten fully-opaque uploads.

use crate::error::Result;
use image::{DynamicImage, Rgba};
use std::io::Cursor;
use std::path::Path;

/// Alpha written into the corner pixel. Low enough to mark the image as
/// carrying transparency, high enough to survive quantizers that strip
/// alpha = 0 pixels.
pub const TRANSPARENT_ALPHA: u8 = 3;

/// Read the image at `path` (any format the decoder knows), punch the
/// corner pixel, and return the bytes of the re-encoded PNG.
pub fn process_image(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    process_bytes(&bytes)
}

pub fn process_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut rgba = image::load_from_memory(bytes)?.to_rgba8();
    let Rgba([r, g, b, _]) = *rgba.get_pixel(0, 0);
    rgba.put_pixel(0, 0, Rgba([r, g, b, TRANSPARENT_ALPHA]));

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba).write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat};

    fn encode(img: ImageBuffer<Rgba<u8>, Vec<u8>>, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn corner_pixel_keeps_color_but_loses_opacity() {
        let img = ImageBuffer::from_pixel(4, 4, Rgba([200u8, 100, 50, 255]));
        let processed = process_bytes(&encode(img, ImageFormat::Png)).unwrap();

        let rgba = image::load_from_memory(&processed).unwrap().to_rgba8();
        assert_eq!(*rgba.get_pixel(0, 0), Rgba([200, 100, 50, TRANSPARENT_ALPHA]));
        assert_eq!(*rgba.get_pixel(1, 0), Rgba([200, 100, 50, 255]));
        assert_eq!(*rgba.get_pixel(3, 3), Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn output_is_png_regardless_of_input_format() {
        let rgb = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            8,
            8,
            Rgba([10u8, 20, 30, 255]),
        ))
        .to_rgb8();
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();
        let jpeg = out.into_inner();

        let processed = process_bytes(&jpeg).unwrap();
        assert_eq!(&processed[..8], b"\x89PNG\r\n\x1a\n");
        let rgba = image::load_from_memory(&processed).unwrap().to_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0[3], TRANSPARENT_ALPHA);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(process_bytes(b"not an image at all").is_err());
    }
}
