//! Contact sheet of rendered scan images.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::error::Result;
use crate::fonts::{draw_text, FontStyle};
use crate::raster;
use crate::scan::outline_rect;

const COLUMNS: u32 = 4;
const CELL_WIDTH: u32 = 360;
const CELL_HEIGHT: u32 = 500;
const HEADER_HEIGHT: u32 = 50;
const CARD_WIDTH: u32 = CELL_WIDTH - 18;
const CARD_HEIGHT: u32 = CELL_HEIGHT - 26;

/// Lay out `images` as labelled thumbnails in a four-column grid and save
/// the sheet as WEBP.
///
/// Unreadable images are skipped, leaving their cell empty. Returns `false`
/// without writing anything when `images` is empty.
pub fn make_contact_sheet<P: AsRef<Path>>(images: &[P], out_path: &Path) -> Result<bool> {
    if images.is_empty() {
        return Ok(false);
    }

    let rows = (images.len() as u32).div_ceil(COLUMNS);
    let mut sheet = raster::canvas(
        COLUMNS * CELL_WIDTH,
        rows * CELL_HEIGHT + HEADER_HEIGHT,
        [246, 246, 246],
    )?;
    draw_text(
        &mut sheet,
        20.0,
        14.0,
        "Synthetic Scan-Style Preview (local renderer)",
        FontStyle::Bold,
        20.0,
        [20, 20, 20],
    );

    for (i, path) in images.iter().enumerate() {
        let path = path.as_ref();
        let (row, col) = (i as u32 / COLUMNS, i as u32 % COLUMNS);
        let x0 = col * CELL_WIDTH + 12;
        let y0 = row * CELL_HEIGHT + 56;

        let image = match image::open(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("skipping {} in contact sheet: {e}", path.display());
                continue;
            }
        };
        let card = card(&image, path)?;
        paste(&mut sheet, &card, x0, y0);
    }

    raster::save_webp(&raster::to_rgb(&sheet), out_path)?;
    Ok(true)
}

fn card(image: &DynamicImage, path: &Path) -> Result<Pixmap> {
    let thumb = image
        .resize(CELL_WIDTH - 24, CELL_HEIGHT - 78, FilterType::CatmullRom)
        .to_rgb8();
    let thumb = raster::from_rgb(&thumb)?;

    let mut card = raster::canvas(CARD_WIDTH, CARD_HEIGHT, [255, 255, 255])?;
    outline_rect(
        &mut card,
        [0.0, 0.0, (CARD_WIDTH - 1) as f32, (CARD_HEIGHT - 1) as f32],
        [180, 180, 180, 255],
        1.0,
    );
    paste(&mut card, &thumb, (CARD_WIDTH - thumb.width()) / 2, 8);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().chars().take(38).collect::<String>())
        .unwrap_or_default();
    draw_text(
        &mut card,
        10.0,
        (CARD_HEIGHT - 42) as f32,
        &name,
        FontStyle::Sans,
        16.0,
        [40, 40, 40],
    );
    Ok(card)
}

fn paste(dst: &mut Pixmap, src: &Pixmap, x: u32, y: u32) {
    dst.draw_pixmap(
        0,
        0,
        src.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(x as f32, y as f32),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn write_scan(path: &Path, w: u32, h: u32) {
        raster::save_webp(&RgbImage::from_pixel(w, h, image::Rgb([90, 90, 90])), path).unwrap();
    }

    #[test]
    fn no_images_means_no_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sheet.webp");
        assert!(!make_contact_sheet::<&Path>(&[], &out).unwrap());
        assert!(!out.exists());
    }

    #[test]
    fn sheet_grows_by_rows_of_four() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..5)
            .map(|i| {
                let p = dir.path().join(format!("scan_{i}.webp"));
                write_scan(&p, 165, 234);
                p
            })
            .collect();
        let out = dir.path().join("previews").join("sheet.webp");
        assert!(make_contact_sheet(&paths, &out).unwrap());

        let size = imagesize::size(&out).unwrap();
        assert_eq!((size.width, size.height), (1440, 1050));

        let sheet = image::open(&out).unwrap().to_rgb8();
        // Card border of the first cell, then the thumbnail centre.
        assert!(sheet.get_pixel(12, 56)[0] < 200);
        assert_eq!(sheet.get_pixel(12 + 171, 56 + 8 + 211).0, [90, 90, 90]);
        // Background around cards.
        assert_eq!(sheet.get_pixel(5, 1040).0, [246, 246, 246]);
    }

    #[test]
    fn unreadable_images_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("broken.webp");
        std::fs::write(&bad, b"not an image").unwrap();
        let out = dir.path().join("sheet.webp");
        assert!(make_contact_sheet(&[&bad], &out).unwrap());
        let sheet = image::open(&out).unwrap().to_rgb8();
        assert_eq!(sheet.get_pixel(12, 56).0, [246, 246, 246]);
    }
}
