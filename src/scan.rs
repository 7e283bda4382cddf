//! Local scan-style raster renderer.
//!
//! Builds a letter-sized page image at 200 dpi (1654x2339) that looks like
//! a photocopy or fax of the document: tinted paper with texture, a boxed
//! header, optional ruled form lines, the document text, a "RECEIVED"
//! stamp, and artifacts scaled by the document's `artifact_level`.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use rand::Rng;
use tiny_skia::{FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use crate::error::Result;
use crate::fonts::{draw_text, FontStyle};
use crate::model::{ArtifactLevel, Document, VisualProfile};
use crate::pdf::{colors, PdfCanvas, INCH, PAGE_HEIGHT, PAGE_WIDTH};
use crate::raster;
use crate::text::{clip, document_text_lines, wrap_lines};

/// Scan width in pixels (A4 at 200 dpi).
pub const SCAN_WIDTH: u32 = 1654;
/// Scan height in pixels.
pub const SCAN_HEIGHT: u32 = 2339;

/// Background exposed by rotating the page.
const ROTATION_FILL: [u8; 3] = [235, 235, 235];

/// Text below this line is cut off.
const TEXT_BOTTOM: f32 = 2240.0;

/// Base paper colour for a `paper_tone` name.
pub fn paper_rgb(tone: &str) -> [u8; 3] {
    match tone {
        "warm_offwhite" => [241, 237, 228],
        "yellowed_offwhite" => [235, 229, 207],
        "gray_white" => [232, 233, 235],
        "plain_white" => [246, 247, 248],
        "bright_white" => [248, 250, 252],
        _ => [242, 242, 242],
    }
}

/// Standard normal sample (Box-Muller).
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u1: f32 = rng.gen::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

/// Tinted paper with a faint multiplicative grain around 220/255.
pub fn paper_background<R: Rng + ?Sized>(tone: &str, rng: &mut R) -> Result<Pixmap> {
    let mut pixmap = raster::canvas(SCAN_WIDTH, SCAN_HEIGHT, paper_rgb(tone))?;
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        let level = (220.0 + gaussian(rng).clamp(-5.0, 5.0) * 2.0).round();
        for channel in &mut px[..3] {
            *channel = (*channel as f32 * level / 255.0) as u8;
        }
    }
    Ok(pixmap)
}

fn paint(rgba: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    paint.anti_alias = false;
    paint
}

/// Rectangle outline whose stroke sits inside the inclusive box
/// `(left, top)..=(right, bottom)`.
pub(crate) fn outline_rect(pixmap: &mut Pixmap, ltrb: [f32; 4], rgba: [u8; 4], width: f32) {
    let [left, top, right, bottom] = ltrb;
    let inset = width / 2.0;
    let Some(rect) = Rect::from_ltrb(left + inset, top + inset, right + 1.0 - inset, bottom + 1.0 - inset)
    else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke { width, ..Stroke::default() };
    pixmap.stroke_path(&path, &paint(rgba), &stroke, Transform::identity(), None);
}

fn line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), rgba: [u8; 4]) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0 + 0.5, from.1 + 0.5);
    pb.line_to(to.0 + 0.5, to.1 + 0.5);
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke { width: 1.0, ..Stroke::default() };
    pixmap.stroke_path(&path, &paint(rgba), &stroke, Transform::identity(), None);
}

fn ellipse(pixmap: &mut Pixmap, cx: f32, cy: f32, r: f32, rgba: [u8; 4], width: f32) {
    let Some(path) = Rect::from_ltrb(cx - r, cy - r, cx + r, cy + r).and_then(PathBuilder::from_oval)
    else {
        return;
    };
    let mut paint = paint(rgba);
    paint.anti_alias = true;
    let stroke = Stroke { width, ..Stroke::default() };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn put_gray(pixmap: &mut Pixmap, x: u32, y: u32, value: u8) {
    let idx = ((y * pixmap.width() + x) * 4) as usize;
    pixmap.data_mut()[idx..idx + 4].copy_from_slice(&[value, value, value, 255]);
}

/// Apply edge shadow, stains, speckles, fax lines, blur and rotation.
///
/// Rotated pages are re-cropped to the scan size; unrotated pages keep
/// the pixmap's dimensions.
pub fn add_scan_artifacts<R: Rng + ?Sized>(
    mut pixmap: Pixmap,
    profile: &VisualProfile,
    rng: &mut R,
) -> Result<RgbImage> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let (wf, hf) = (w as f32, h as f32);

    for i in 0..6u8 {
        let inset = 12.0 + i as f32;
        outline_rect(
            &mut pixmap,
            [inset, inset, wf - inset, hf - inset],
            [90, 90, 90, 25 - i * 3],
            1.0,
        );
    }

    let level = profile.artifact_level;
    if level.is_degraded() {
        let stains = if level == ArtifactLevel::Heavy { 4 } else { 2 };
        for _ in 0..stains {
            let x = rng.gen_range(80..=w.saturating_sub(160).max(80)) as f32;
            let y = rng.gen_range(80..=h.saturating_sub(160).max(80)) as f32;
            let r = rng.gen_range(20..=90) as f32;
            ellipse(&mut pixmap, x, y, r, [120, 100, 80, 28], 2.0);
        }
    }

    if level == ArtifactLevel::Heavy {
        for _ in 0..900 {
            let x = rng.gen_range(0..w);
            let y = rng.gen_range(0..h);
            let value = rng.gen_range(140..=210);
            put_gray(&mut pixmap, x, y, value);
        }
    }

    if level.is_degraded() {
        for _ in 0..4 {
            let y = rng.gen_range(40..=h.saturating_sub(40).max(40)) as f32;
            let drift = rng.gen_range(-2..=2) as f32;
            line(&mut pixmap, (20.0, y), (wf - 20.0, y + drift), [120, 120, 120, 28]);
        }
    }

    let mut image = raster::to_rgb(&pixmap);

    let blur = profile.blur_px.unwrap_or(0.0);
    if blur > 0.0 {
        image = imageops::blur(&image, blur as f32);
    }

    let rotation = profile.rotation_degrees.unwrap_or(0.0);
    if rotation != 0.0 {
        image = rotate_expanded(&image, rotation as f32)?;
        image = DynamicImage::ImageRgb8(image)
            .resize_to_fill(SCAN_WIDTH, SCAN_HEIGHT, FilterType::CatmullRom)
            .to_rgb8();
    }

    Ok(image)
}

/// Rotate counter-clockwise by `degrees`, growing the canvas to fit the
/// whole page and filling the exposed corners.
fn rotate_expanded(image: &RgbImage, degrees: f32) -> Result<RgbImage> {
    let src = raster::from_rgb(image)?;
    let (w, h) = (image.width() as f32, image.height() as f32);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let new_w = (w * cos.abs() + h * sin.abs()).ceil() as u32;
    let new_h = (w * sin.abs() + h * cos.abs()).ceil() as u32;

    let mut dst = raster::canvas(new_w, new_h, ROTATION_FILL)?;
    let transform = Transform::from_translate(new_w as f32 / 2.0, new_h as f32 / 2.0)
        .pre_rotate(-degrees)
        .pre_translate(-w / 2.0, -h / 2.0);
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    dst.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    Ok(raster::to_rgb(&dst))
}

/// Compose the full scan image for `doc`.
pub fn build_scan_image<R: Rng + ?Sized>(doc: &Document, rng: &mut R) -> Result<RgbImage> {
    let profile = &doc.structured_content.visual_profile;
    let mut page = paper_background(&profile.paper_tone, rng)?;

    outline_rect(&mut page, [70.0, 60.0, 1584.0, 240.0], [70, 70, 70, 255], 3.0);
    draw_text(&mut page, 95.0, 82.0, &clip(&doc.title, 70), FontStyle::Bold, 42.0, [25, 25, 25]);
    let issuer = format!("Issuer: {}", doc.issuing_organization);
    draw_text(&mut page, 98.0, 150.0, &issuer, FontStyle::Sans, 23.0, [40, 40, 40]);
    let issued = format!("Issue Date: {}", doc.issue_date);
    draw_text(&mut page, 980.0, 150.0, &issued, FontStyle::Sans, 23.0, [40, 40, 40]);

    if doc.document_type.is_ruled_form() {
        outline_rect(&mut page, [70.0, 270.0, 1584.0, 2100.0], [90, 90, 90, 255], 2.0);
        for y in (330..2060).step_by(90) {
            let y = y as f32;
            line(&mut page, (85.0, y), (1570.0, y), [175, 175, 175, 255]);
        }
        for x in [470.0, 980.0, 1270.0] {
            line(&mut page, (x, 285.0), (x, 2090.0), [180, 180, 180, 255]);
        }
    }

    let x = 96.0;
    let mut y = 285.0;
    draw_text(
        &mut page,
        x,
        y,
        "DOCUMENT CONTENT (SYNTHETIC FACSIMILE)",
        FontStyle::Bold,
        24.0,
        [20, 20, 20],
    );
    y += 55.0;
    'lines: for text_line in document_text_lines(doc) {
        for chunk in wrap_lines(&text_line, 108) {
            if y > TEXT_BOTTOM {
                break 'lines;
            }
            let (style, size) = if chunk.chars().count() > 45 || chunk.contains('|') {
                (FontStyle::Mono, 20.0)
            } else {
                (FontStyle::Sans, 23.0)
            };
            draw_text(&mut page, x, y, &chunk, style, size, [30, 30, 30]);
            y += 28.0;
        }
    }

    outline_rect(&mut page, [1220.0, 2160.0, 1550.0, 2280.0], [120, 60, 60, 255], 3.0);
    draw_text(&mut page, 1240.0, 2196.0, "RECEIVED", FontStyle::Bold, 28.0, [120, 60, 60]);

    add_scan_artifacts(page, profile, rng)
}

/// Write the scan image as WEBP.
pub fn render_scan_webp<R: Rng + ?Sized>(doc: &Document, out_path: &Path, rng: &mut R) -> Result<()> {
    let image = build_scan_image(doc, rng)?;
    raster::save_webp(&image, out_path)
}

/// Place the scan image on a white letter page inside 0.45in margins.
pub fn render_scanned_pdf<R: Rng + ?Sized>(doc: &Document, out_path: &Path, rng: &mut R) -> Result<()> {
    let image = build_scan_image(doc, rng)?;
    let margin = 0.45 * INCH;
    let (iw, ih) = (image.width() as f32, image.height() as f32);
    let scale = ((PAGE_WIDTH - 2.0 * margin) / iw).min((PAGE_HEIGHT - 2.0 * margin) / ih);
    let (draw_w, draw_h) = (iw * scale, ih * scale);

    let mut c = PdfCanvas::new();
    c.set_fill_color(colors::WHITE);
    c.rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, true, false);
    c.draw_image(
        &image,
        (PAGE_WIDTH - draw_w) / 2.0,
        (PAGE_HEIGHT - draw_h) / 2.0,
        draw_w,
        draw_h,
    )?;
    c.save(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{build_dataset, visual};
    use crate::model::{DocumentType, VisualStyle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn find(id: &str, doc_type: DocumentType) -> Document {
        build_dataset()
            .applicants
            .into_iter()
            .find(|a| a.applicant_id == id)
            .and_then(|a| a.document_bundle.into_iter().find(|d| d.document_type == doc_type))
            .unwrap()
    }

    #[test]
    fn unknown_tones_fall_back_to_neutral_gray() {
        assert_eq!(paper_rgb("yellowed_offwhite"), [235, 229, 207]);
        assert_eq!(paper_rgb("sepia"), [242, 242, 242]);
    }

    #[test]
    fn paper_grain_darkens_the_base_tone() {
        let mut rng = StdRng::seed_from_u64(7);
        let paper = raster::to_rgb(&paper_background("plain_white", &mut rng).unwrap());
        let mean = paper.pixels().map(|p| p[0] as f64).sum::<f64>() / paper.pixels().len() as f64;
        // 246 * 220 / 255
        assert!((mean - 212.2).abs() < 1.5, "mean red {mean}");
    }

    #[test]
    fn rotation_keeps_the_page_size_and_fills_corners() {
        let profile = visual(VisualStyle::ScannedPhoto, "gray_white", ArtifactLevel::None, 2.0, 0.0, "");
        let page = raster::canvas(SCAN_WIDTH, SCAN_HEIGHT, [20, 20, 20]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let image = add_scan_artifacts(page, &profile, &mut rng).unwrap();
        assert_eq!(image.dimensions(), (SCAN_WIDTH, SCAN_HEIGHT));
        assert!(image.get_pixel(1, 1)[0] > 200);
        assert!(image.get_pixel(SCAN_WIDTH / 2, SCAN_HEIGHT / 2)[0] < 40);
    }

    #[test]
    fn small_pages_survive_heavy_artifacts() {
        let profile = visual(VisualStyle::ScannedPhoto, "gray_white", ArtifactLevel::Heavy, 0.0, 0.8, "");
        let page = raster::canvas(200, 120, [240, 240, 240]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let image = add_scan_artifacts(page, &profile, &mut rng).unwrap();
        assert_eq!(image.dimensions(), (200, 120));
    }

    #[test]
    fn scan_image_is_reproducible_per_seed() {
        let doc = find("APPL-002", DocumentType::Dd214);
        let a = build_scan_image(&doc, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = build_scan_image(&doc, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.dimensions(), (SCAN_WIDTH, SCAN_HEIGHT));
        assert!(a == b);
    }

    #[test]
    fn scan_outputs_are_webp_and_pdf() {
        let doc = find("APPL-004", DocumentType::Dd214);
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let webp = dir.path().join("dd214.webp");
        render_scan_webp(&doc, &webp, &mut rng).unwrap();
        let bytes = std::fs::read(&webp).unwrap();
        assert_eq!(&bytes[8..12], b"WEBP");
        assert_eq!(imagesize::blob_size(&bytes).unwrap().width, SCAN_WIDTH as usize);

        let pdf = dir.path().join("dd214.pdf");
        render_scanned_pdf(&doc, &pdf, &mut rng).unwrap();
        let text = String::from_utf8_lossy(&std::fs::read(&pdf).unwrap()).into_owned();
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/Count 1"));
    }
}
