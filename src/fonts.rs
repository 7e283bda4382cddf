//! TrueType fonts for drawing text into scan images.
//!
//! Fonts are looked up once per process from the usual DejaVu/Liberation
//! locations. A face that cannot be found is replaced by the bundled
//! DejaVu Sans Mono, so scans always carry text.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use rusttype::{point, Font, Scale};
use tiny_skia::Pixmap;

const MONO_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
];

const SANS_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
];

/// The faces the scan layout draws with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FontStyle {
    /// Regular sans serif.
    Sans,
    /// Bold sans serif.
    Bold,
    /// Monospace, for dense text.
    Mono,
}

/// Compiled-in face used when no system candidate loads.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// The loaded faces. A face is only `None` if even the bundled font fails
/// to parse.
pub struct FontSet {
    sans: Option<Font<'static>>,
    bold: Option<Font<'static>>,
    mono: Option<Font<'static>>,
}

impl FontSet {
    fn load() -> Self {
        let sans = load_first(SANS_CANDIDATES);
        // Bold falls back to the regular sans face.
        let bold = load_first(BOLD_CANDIDATES).or_else(|| load_first(SANS_CANDIDATES));
        let mono = load_first(MONO_CANDIDATES);

        let [sans, bold, mono] = [("sans", sans), ("bold", bold), ("mono", mono)].map(|(style, font)| {
            font.or_else(|| {
                log::warn!("no {style} TrueType font found; using the bundled face");
                bundled()
            })
        });

        Self { sans, bold, mono }
    }

    /// The face for `style`, if one was found.
    pub fn get(&self, style: FontStyle) -> Option<&Font<'static>> {
        match style {
            FontStyle::Sans => self.sans.as_ref(),
            FontStyle::Bold => self.bold.as_ref(),
            FontStyle::Mono => self.mono.as_ref(),
        }
    }
}

fn load_first(candidates: &[&str]) -> Option<Font<'static>> {
    candidates
        .iter()
        .map(Path::new)
        .filter(|path| path.exists())
        .find_map(|path| match fs::read(path) {
            Ok(data) => Font::try_from_vec(data),
            Err(e) => {
                log::debug!("skipping font {}: {e}", path.display());
                None
            }
        })
}

/// The compiled-in fallback face.
pub fn bundled() -> Option<Font<'static>> {
    Font::try_from_bytes(BUNDLED_FONT)
}

/// The process-wide font set.
pub fn fonts() -> &'static FontSet {
    static FONTS: OnceLock<FontSet> = OnceLock::new();
    FONTS.get_or_init(FontSet::load)
}

/// Draw `text` with its top-left corner at `(x, y)` in pixel coordinates.
///
/// Glyph coverage is blended directly into the pixmap. The pixmap is
/// assumed to be opaque.
pub fn draw_text(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    text: &str,
    style: FontStyle,
    size: f32,
    color: [u8; 3],
) {
    if let Some(font) = fonts().get(style) {
        draw_with(pixmap, font, x, y, text, size, color);
    }
}

fn draw_with(pixmap: &mut Pixmap, font: &Font<'_>, x: f32, y: f32, text: &str, size: f32, color: [u8; 3]) {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let pixels = pixmap.pixels_mut();

    for glyph in font.layout(text, scale, point(x, y + ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let pixel = &mut pixels[(py * width + px) as usize];
            let blend = |bg: u8, fg: u8| {
                (fg as f32 * coverage + bg as f32 * (1.0 - coverage)).round() as u8
            };
            let r = blend(pixel.red(), color[0]);
            let g = blend(pixel.green(), color[1]);
            let b = blend(pixel.blue(), color[2]);
            if let Some(c) = tiny_skia::PremultipliedColorU8::from_rgba(r, g, b, 255) {
                *pixel = c;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn drawing_never_panics_at_the_edges() {
        let mut pixmap = Pixmap::new(40, 20).unwrap();
        pixmap.fill(Color::WHITE);
        draw_text(&mut pixmap, -10.0, -5.0, "Edge case", FontStyle::Bold, 24.0, [0, 0, 0]);
        draw_text(&mut pixmap, 35.0, 15.0, "Edge case", FontStyle::Mono, 24.0, [0, 0, 0]);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    }

    fn dark_pixels(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.red() < 128).count()
    }

    #[test]
    fn every_style_draws_text() {
        for style in [FontStyle::Sans, FontStyle::Bold, FontStyle::Mono] {
            let mut pixmap = Pixmap::new(200, 60).unwrap();
            pixmap.fill(Color::WHITE);
            draw_text(&mut pixmap, 5.0, 5.0, "RECEIVED", style, 28.0, [0, 0, 0]);
            assert!(dark_pixels(&pixmap) > 0, "{style:?}");
        }
    }

    #[test]
    fn bundled_face_draws_text() {
        let font = bundled().unwrap();
        let mut pixmap = Pixmap::new(200, 60).unwrap();
        pixmap.fill(Color::WHITE);
        draw_with(&mut pixmap, &font, 5.0, 5.0, "DD-214", 28.0, [0, 0, 0]);
        assert!(dark_pixels(&pixmap) > 0);
    }
}
