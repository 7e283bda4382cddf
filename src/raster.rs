//! Conversions between `tiny-skia` pixmaps and `image` buffers, plus encoders.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, RgbImage};
use tiny_skia::{Color, Pixmap};

use crate::error::{Error, Result};

/// An opaque pixmap filled with `rgb`.
pub fn canvas(width: u32, height: u32, rgb: [u8; 3]) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| Error::Raster {
        reason: format!("cannot allocate a {width}x{height} pixmap"),
    })?;
    pixmap.fill(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
    Ok(pixmap)
}

/// Drop the alpha channel of an opaque pixmap.
pub fn to_rgb(pixmap: &Pixmap) -> RgbImage {
    let mut out = RgbImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue()];
    }
    out
}

/// Wrap an RGB buffer into an opaque pixmap.
pub fn from_rgb(image: &RgbImage) -> Result<Pixmap> {
    let mut pixmap = canvas(image.width(), image.height(), [255, 255, 255])?;
    for (chunk, src) in pixmap.data_mut().chunks_exact_mut(4).zip(image.pixels()) {
        chunk.copy_from_slice(&[src[0], src[1], src[2], 255]);
    }
    Ok(pixmap)
}

/// Lossless WEBP bytes.
pub fn encode_webp(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    WebPEncoder::new_lossless(&mut buf).encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Encode to WEBP and write to `path`, creating parent directories.
pub fn save_webp(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encode_webp(image)?)?;
    Ok(())
}

/// Baseline JPEG bytes, used to embed images in PDFs.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut cursor, quality).encode_image(image)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixmap_round_trips_through_rgb() {
        let pixmap = canvas(3, 2, [241, 237, 228]).unwrap();
        let rgb = to_rgb(&pixmap);
        assert_eq!(rgb.get_pixel(2, 1).0, [241, 237, 228]);
        let back = from_rgb(&rgb).unwrap();
        assert_eq!(back.data(), pixmap.data());
    }

    #[test]
    fn encoders_emit_their_magic_bytes() {
        let rgb = to_rgb(&canvas(16, 16, [10, 20, 30]).unwrap());
        let webp = encode_webp(&rgb).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
        let jpeg = encode_jpeg(&rgb, 90).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&webp).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        assert!(matches!(canvas(0, 10, [0, 0, 0]), Err(Error::Raster { .. })));
    }
}
