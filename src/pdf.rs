//! A small page-at-a-time PDF canvas on top of `pdf-writer`.
//!
//! Coordinates are PDF points with the origin in the lower-left corner of a
//! US Letter page. Text uses the base-14 Helvetica and Courier faces with
//! WinAnsi encoding, so nothing has to be embedded.

use std::fs;
use std::path::Path;

use image::RgbImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};

use crate::error::Result;
use crate::raster;
use crate::text::wrap_lines;

/// Points per inch.
pub const INCH: f32 = 72.0;
/// US Letter width in points.
pub const PAGE_WIDTH: f32 = 8.5 * INCH;
/// US Letter height in points.
pub const PAGE_HEIGHT: f32 = 11.0 * INCH;

const JPEG_QUALITY: u8 = 90;

/// The base-14 faces a [`PdfCanvas`] can draw with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PdfFont {
    /// Helvetica.
    Helvetica,
    /// Helvetica-Bold.
    HelveticaBold,
    /// Courier.
    Courier,
}

impl PdfFont {
    const ALL: [PdfFont; 3] = [PdfFont::Helvetica, PdfFont::HelveticaBold, PdfFont::Courier];

    fn resource_name(&self) -> Name<'static> {
        match self {
            PdfFont::Helvetica => Name(b"F1"),
            PdfFont::HelveticaBold => Name(b"F2"),
            PdfFont::Courier => Name(b"F3"),
        }
    }

    fn base_font(&self) -> Name<'static> {
        match self {
            PdfFont::Helvetica => Name(b"Helvetica"),
            PdfFont::HelveticaBold => Name(b"Helvetica-Bold"),
            PdfFont::Courier => Name(b"Courier"),
        }
    }

    /// Advance width of `text` at `size`, in points.
    ///
    /// Courier is 600 units per glyph. Both Helvetica faces use the regular
    /// Helvetica metrics.
    pub fn string_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = match self {
            PdfFont::Courier => 600 * text.chars().count() as u32,
            PdfFont::Helvetica | PdfFont::HelveticaBold => {
                text.chars().map(helvetica_width).sum()
            }
        };
        units as f32 * size / 1000.0
    }
}

fn helvetica_width(c: char) -> u32 {
    const WIDTHS: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
    ];
    match c {
        ' '..='~' => u32::from(WIDTHS[(c as u32 - 32) as usize]),
        '\u{2018}' | '\u{2019}' | '\u{201A}' => 222,
        '\u{201C}' | '\u{201D}' | '\u{201E}' => 333,
        '\u{2022}' => 350,
        '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
        _ => 556,
    }
}

/// The WinAnsi (cp1252) byte for `c`, if it has one.
fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode text for a WinAnsi base-14 font. Characters WinAnsi lacks become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

fn unit_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Colour constants used by the layouts.
pub mod colors {
    /// Black.
    pub const BLACK: u32 = 0x000000;
    /// White.
    pub const WHITE: u32 = 0xFFFFFF;
}

/// Collects drawing operations page by page and serializes them to a PDF.
///
/// Font, colours and line width carry over across [`PdfCanvas::show_page`].
pub struct PdfCanvas {
    pdf: Pdf,
    next_id: Ref,
    catalog_id: Ref,
    tree_id: Ref,
    font_ids: [Ref; 3],
    pages: Vec<Ref>,
    content: Content,
    page_images: Vec<(String, Ref)>,
    image_count: usize,
    dirty: bool,
    font: PdfFont,
    font_size: f32,
    fill: u32,
    stroke: u32,
    line_width: f32,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    /// A canvas with one empty page, Helvetica 10 and black ink.
    pub fn new() -> Self {
        let mut next_id = Ref::new(1);
        let catalog_id = next_id.bump();
        let tree_id = next_id.bump();
        let font_ids = [next_id.bump(), next_id.bump(), next_id.bump()];

        let mut canvas = Self {
            pdf: Pdf::new(),
            next_id,
            catalog_id,
            tree_id,
            font_ids,
            pages: Vec::new(),
            content: Content::new(),
            page_images: Vec::new(),
            image_count: 0,
            dirty: false,
            font: PdfFont::Helvetica,
            font_size: 12.0,
            fill: colors::BLACK,
            stroke: colors::BLACK,
            line_width: 1.0,
        };
        canvas.begin_page();
        canvas
    }

    /// Number of pages finished or in progress.
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.dirty || self.pages.is_empty())
    }

    /// Font for subsequent text.
    pub fn set_font(&mut self, font: PdfFont, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    /// Current font and size.
    pub fn font(&self) -> (PdfFont, f32) {
        (self.font, self.font_size)
    }

    /// Fill colour as `0xRRGGBB`.
    pub fn set_fill_color(&mut self, hex: u32) {
        self.fill = hex;
        let [r, g, b] = unit_rgb(hex);
        self.content.set_fill_rgb(r, g, b);
    }

    /// Stroke colour as `0xRRGGBB`.
    pub fn set_stroke_color(&mut self, hex: u32) {
        self.stroke = hex;
        let [r, g, b] = unit_rgb(hex);
        self.content.set_stroke_rgb(r, g, b);
    }

    /// Stroke width in points.
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.content.set_line_width(width);
    }

    /// Draw `text` with its baseline starting at `(x, y)`.
    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        let encoded = win_ansi(text);
        self.content
            .begin_text()
            .set_font(self.font.resource_name(), self.font_size)
            .set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y])
            .show(Str(&encoded))
            .end_text();
        self.dirty = true;
    }

    /// Draw `text` so that it ends at `x`.
    pub fn draw_right_string(&mut self, x: f32, y: f32, text: &str) {
        let width = self.font.string_width(text, self.font_size);
        self.draw_string(x - width, y, text);
    }

    /// Rectangle with its lower-left corner at `(x, y)`, filled and/or stroked.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: bool, stroke: bool) {
        self.content.rect(x, y, width, height);
        match (fill, stroke) {
            (true, true) => self.content.fill_nonzero_and_stroke(),
            (true, false) => self.content.fill_nonzero(),
            (false, true) => self.content.stroke(),
            (false, false) => self.content.end_path(),
        };
        self.dirty = true;
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.content.move_to(x1, y1).line_to(x2, y2).stroke();
        self.dirty = true;
    }

    /// Place an RGB image into the box with lower-left corner `(x, y)`.
    pub fn draw_image(
        &mut self,
        image: &RgbImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let jpeg = raster::encode_jpeg(image, JPEG_QUALITY)?;
        let id = self.next_id.bump();
        let mut xobject = self.pdf.image_xobject(id, &jpeg);
        xobject.filter(Filter::DctDecode);
        xobject.width(image.width() as i32);
        xobject.height(image.height() as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.content
            .save_state()
            .transform([width, 0.0, 0.0, height, x, y])
            .x_object(Name(name.as_bytes()))
            .restore_state();
        self.page_images.push((name, id));
        self.dirty = true;
        Ok(())
    }

    /// Finish the current page and start a new one.
    pub fn show_page(&mut self) {
        self.end_page();
        self.begin_page();
    }

    fn begin_page(&mut self) {
        self.content = Content::new();
        self.dirty = false;
        let [r, g, b] = unit_rgb(self.fill);
        self.content.set_fill_rgb(r, g, b);
        let [r, g, b] = unit_rgb(self.stroke);
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(self.line_width);
    }

    fn end_page(&mut self) {
        let page_id = self.next_id.bump();
        let content_id = self.next_id.bump();
        let content = std::mem::replace(&mut self.content, Content::new()).finish();
        self.pdf.stream(content_id, &content);

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(self.tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (font, id) in PdfFont::ALL.iter().zip(self.font_ids) {
            fonts.pair(font.resource_name(), id);
        }
        fonts.finish();
        if !self.page_images.is_empty() {
            let mut x_objects = resources.x_objects();
            for (name, id) in self.page_images.drain(..) {
                x_objects.pair(Name(name.as_bytes()), id);
            }
            x_objects.finish();
        }
        resources.finish();
        page.finish();

        self.pages.push(page_id);
    }

    /// Serialize the document. The last page is kept when something was drawn
    /// on it or when the document would otherwise be empty.
    pub fn finish(mut self) -> Vec<u8> {
        if self.dirty || self.pages.is_empty() {
            self.end_page();
        }

        for (font, id) in PdfFont::ALL.iter().zip(self.font_ids) {
            self.pdf
                .type1_font(id)
                .base_font(font.base_font())
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }
        self.pdf
            .pages(self.tree_id)
            .kids(self.pages.iter().copied())
            .count(self.pages.len() as i32);
        self.pdf.catalog(self.catalog_id).pages(self.tree_id);
        self.pdf.finish()
    }

    /// Serialize and write to `path`, creating parent directories.
    pub fn save(self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.finish())?;
        Ok(())
    }
}

/// Draws a column of text lines, wrapping and breaking pages as needed.
#[derive(Copy, Clone, Debug)]
pub struct TextFlow {
    /// Left edge.
    pub x: f32,
    /// Wrap width in characters.
    pub width_chars: usize,
    /// Font.
    pub font: PdfFont,
    /// Font size.
    pub size: f32,
    /// Baseline to baseline distance.
    pub leading: f32,
    /// A new page starts below this height.
    pub bottom_margin: f32,
    /// Baseline of the first line after a page break.
    pub top: f32,
}

impl TextFlow {
    /// A flow with the default bottom margin.
    pub fn new(x: f32, width_chars: usize, font: PdfFont, size: f32, leading: f32) -> Self {
        Self {
            x,
            width_chars,
            font,
            size,
            leading,
            bottom_margin: 0.7 * INCH,
            top: PAGE_HEIGHT - 0.75 * INCH,
        }
    }

    /// Draw `lines` starting at baseline `y`; returns the next free baseline.
    pub fn draw<I, S>(&self, canvas: &mut PdfCanvas, y: f32, lines: I) -> f32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        canvas.set_font(self.font, self.size);
        let mut y = y;
        for line in lines {
            for chunk in wrap_lines(line.as_ref(), self.width_chars) {
                if y <= self.bottom_margin {
                    canvas.show_page();
                    y = self.top;
                }
                canvas.draw_string(self.x, y, &chunk);
                y -= self.leading;
            }
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn empty_canvas_still_has_one_page() {
        let canvas = PdfCanvas::new();
        assert_eq!(canvas.page_count(), 1);
        let bytes = canvas.finish();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text_of(&bytes).contains("/Count 1"));
    }

    #[test]
    fn helvetica_widths_follow_afm() {
        assert_eq!(PdfFont::Helvetica.string_width("W", 1000.0), 944.0);
        assert_eq!(PdfFont::Helvetica.string_width("il", 10.0), 4.44);
        assert_eq!(PdfFont::Courier.string_width("abc", 10.0), 18.0);
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(win_ansi("A\u{2713}b"), b"A?b".to_vec());
        assert_eq!(win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn typographic_punctuation_uses_win_ansi_codes() {
        assert_eq!(
            win_ansi("\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}\u{2022}\u{2026}\u{20AC}\u{2122}"),
            vec![0x92, 0x93, 0x94, 0x96, 0x97, 0x95, 0x85, 0x80, 0x99]
        );
        assert_eq!(PdfFont::Helvetica.string_width("\u{2014}", 10.0), 10.0);
    }

    #[test]
    fn flow_breaks_pages_and_keeps_font() {
        let mut canvas = PdfCanvas::new();
        let flow = TextFlow::new(INCH, 80, PdfFont::Courier, 9.0, 11.0);
        let lines: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        let y = flow.draw(&mut canvas, PAGE_HEIGHT - INCH, &lines);
        assert!(y > flow.bottom_margin - flow.leading);
        assert!(canvas.page_count() >= 3);
        assert_eq!(canvas.font(), (PdfFont::Courier, 9.0));

        let pages = canvas.page_count();
        let bytes = canvas.finish();
        assert!(text_of(&bytes).contains(&format!("/Count {pages}")));
        assert!(text_of(&bytes).contains("/BaseFont /Courier"));
    }

    #[test]
    fn show_page_without_drawing_adds_no_trailing_blank() {
        let mut canvas = PdfCanvas::new();
        canvas.draw_string(10.0, 10.0, "one");
        canvas.show_page();
        assert_eq!(canvas.page_count(), 1);
        assert!(text_of(&canvas.finish()).contains("/Count 1"));
    }

    #[test]
    fn images_are_embedded_as_jpeg() {
        let mut canvas = PdfCanvas::new();
        let image = RgbImage::from_pixel(8, 8, image::Rgb([200, 100, 50]));
        canvas.draw_image(&image, 0.0, 0.0, 100.0, 100.0).unwrap();
        let text = text_of(&canvas.finish());
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/Im1"));
    }
}
