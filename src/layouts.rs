//! Vector layouts: the designed "pristine" PDF, the monospaced text dump
//! PDF and the plain `.txt` export.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Document;
use crate::pdf::{colors, PdfCanvas, PdfFont, TextFlow, INCH, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::{clip, format_decimal, raw_text_lines};

/// Start a new page unless at least `needed` points remain above the
/// bottom edge. Returns the baseline to continue from.
fn ensure_room(canvas: &mut PdfCanvas, y: f32, needed: f32) -> f32 {
    if y < needed {
        canvas.show_page();
        PAGE_HEIGHT - 0.9 * INCH
    } else {
        y
    }
}

fn section_heading(canvas: &mut PdfCanvas, y: f32, text: &str) {
    canvas.set_font(PdfFont::HelveticaBold, 11.0);
    canvas.draw_string(0.75 * INCH, y, text);
}

/// Render a designed, digitally issued credential.
pub fn render_pristine_pdf(doc: &Document, out_path: &Path) -> Result<()> {
    let (width, height) = (PAGE_WIDTH, PAGE_HEIGHT);
    let sc = &doc.structured_content;
    let mut c = PdfCanvas::new();

    // Header band.
    c.set_stroke_color(0xD1D5DB);
    c.set_fill_color(0xF8FAFC);
    c.rect(0.5 * INCH, height - 1.35 * INCH, width - INCH, 0.85 * INCH, true, true);
    c.set_fill_color(0x0F172A);
    c.set_font(PdfFont::HelveticaBold, 16.0);
    c.draw_string(0.75 * INCH, height - 0.9 * INCH, &doc.title);
    c.set_font(PdfFont::Helvetica, 9.0);
    c.set_fill_color(0x334155);
    c.draw_string(
        0.75 * INCH,
        height - 1.15 * INCH,
        &format!("Issuer: {}", doc.issuing_organization),
    );
    c.draw_right_string(
        width - 0.75 * INCH,
        height - 1.15 * INCH,
        &format!("Issue Date: {}", doc.issue_date),
    );

    let mut y = height - 1.7 * INCH;
    if let Some(name) = sc.student_name.as_deref().filter(|n| !n.is_empty()) {
        c.set_fill_color(colors::BLACK);
        c.set_font(PdfFont::HelveticaBold, 11.0);
        c.draw_string(0.75 * INCH, y, &format!("Student: {name}"));
        y -= 0.25 * INCH;
    }

    c.set_fill_color(colors::BLACK);
    let summary = sc.summary_lines.iter().map(|line| format!("- {line}"));
    y = TextFlow::new(0.75 * INCH, 95, PdfFont::Helvetica, 10.0, 14.0).draw(&mut c, y, summary);
    y -= 0.1 * INCH;

    if let Some(cert) = &sc.certificate_record {
        section_heading(&mut c, y, "Credential Details");
        y -= 0.2 * INCH;
        let rows = [
            format!("Certificate: {}", cert.certificate_name),
            format!("Provider: {}", cert.provider),
            format!("Credential ID: {}", cert.credential_id),
            format!("Issue Date: {}", cert.issue_date),
            format!(
                "Expiration Date: {}",
                cert.expiration_date.as_deref().filter(|d| !d.is_empty()).unwrap_or("N/A")
            ),
            format!("Verification URL: {}", cert.verification_url),
        ];
        y = TextFlow::new(0.9 * INCH, 92, PdfFont::Helvetica, 9.0, 12.0).draw(&mut c, y, &rows);

        if !cert.skills.is_empty() {
            y -= 0.1 * INCH;
            c.set_font(PdfFont::HelveticaBold, 10.0);
            c.draw_string(0.9 * INCH, y, "Skills");
            y -= 0.18 * INCH;
            let skills = cert.skills.iter().map(|s| format!("* {s}"));
            y = TextFlow::new(1.05 * INCH, 88, PdfFont::Helvetica, 9.0, 12.0).draw(&mut c, y, skills);
        }
    }

    if let Some(ev) = &sc.evaluation_record {
        c.set_font(PdfFont::HelveticaBold, 11.0);
        y = ensure_room(&mut c, y, 2.5 * INCH);
        section_heading(&mut c, y, "Evaluation Summary");
        y -= 0.2 * INCH;
        let gpa = ev.us_gpa.map_or_else(|| "N/A".to_string(), format_decimal);
        let rows = [
            format!("Agency: {}", ev.agency),
            format!("Report Type: {}", ev.report_type),
            format!("Origin Institution: {} ({})", ev.origin_institution, ev.origin_country),
            format!("Origin Credential: {}", ev.origin_credential),
            format!("U.S. Equivalency: {}", ev.us_equivalency),
            format!("U.S. GPA: {gpa}"),
            format!("Reference Number: {}", ev.reference_number),
        ];
        y = TextFlow::new(0.9 * INCH, 90, PdfFont::Helvetica, 9.0, 12.0).draw(&mut c, y, &rows);
    }

    if let Some(scores) = sc.scores.as_ref().filter(|s| !s.is_empty()) {
        y = ensure_room(&mut c, y, 2.2 * INCH);
        section_heading(&mut c, y, "Score Breakdown");
        y -= 0.2 * INCH;
        for score in scores {
            c.set_stroke_color(0xCBD5E1);
            c.rect(0.9 * INCH, y - 0.15 * INCH, width - 1.8 * INCH, 0.28 * INCH, false, true);
            c.set_font(PdfFont::Helvetica, 9.0);
            c.draw_string(1.0 * INCH, y - 0.03 * INCH, &score.section);
            c.draw_right_string(
                width - 1.0 * INCH,
                y - 0.03 * INCH,
                &format!("{} ({})", score.score, score.scale),
            );
            y -= 0.34 * INCH;
        }
    }

    if let Some(courses) = sc.courses.as_ref().filter(|c| !c.is_empty()) {
        y = ensure_room(&mut c, y, 3.0 * INCH);
        section_heading(&mut c, y, "Course Table");
        y -= 0.18 * INCH;

        const COLUMNS: [(f32, &str); 6] = [
            (0.8, "Code"),
            (1.8, "Course Title"),
            (4.6, "Term"),
            (5.35, "Yr"),
            (5.8, "Cr"),
            (6.15, "Grade"),
        ];
        c.set_font(PdfFont::HelveticaBold, 8.0);
        for (x, label) in COLUMNS {
            c.draw_string(x * INCH, y, label);
        }
        y -= 0.12 * INCH;
        c.line(0.75 * INCH, y, width - 0.75 * INCH, y);
        y -= 0.15 * INCH;

        c.set_font(PdfFont::Helvetica, 8.0);
        for course in courses {
            if y < 0.9 * INCH {
                c.show_page();
                y = height - 0.9 * INCH;
                c.set_font(PdfFont::Helvetica, 8.0);
            }
            let cells = [
                clip(&course.course_code, 15),
                clip(&course.course_title, 44),
                clip(&course.term_label, 8),
                course.year.to_string(),
                format!("{:.1}", course.credits),
                course.grade.clone().unwrap_or_default(),
            ];
            for ((x, _), cell) in COLUMNS.iter().zip(&cells) {
                c.draw_string(x * INCH, y, cell);
            }
            y -= 0.18 * INCH;
        }
    }

    if let Some(hints) = sc.ai_mapping_hints.as_ref().filter(|h| !h.is_empty()) {
        y = ensure_room(&mut c, y, 2.0 * INCH);
        c.set_font(PdfFont::HelveticaBold, 10.0);
        c.draw_string(0.75 * INCH, y, "AI Mapping Hints (for demo renderer)");
        y -= 0.18 * INCH;
        let lines = hints.iter().map(|h| {
            format!(
                "- {} -> {} ({:.1} cr)",
                h.source_evidence, h.proposed_college_course_code, h.credits
            )
        });
        TextFlow::new(0.9 * INCH, 90, PdfFont::Helvetica, 8.0, 11.0).draw(&mut c, y, lines);
    }

    c.save(out_path)
}

/// Render the document as a dense Courier text dump.
pub fn render_raw_text_pdf(doc: &Document, out_path: &Path) -> Result<()> {
    let mut c = PdfCanvas::new();
    let flow = TextFlow {
        bottom_margin: 0.55 * INCH,
        top: PAGE_HEIGHT - 0.55 * INCH,
        ..TextFlow::new(0.55 * INCH, 102, PdfFont::Courier, 9.0, 11.0)
    };
    flow.draw(&mut c, flow.top, raw_text_lines(doc));
    c.save(out_path)
}

/// Write the text dump as UTF-8 with a trailing newline.
pub fn render_raw_text_txt(doc: &Document, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut body = raw_text_lines(doc).join("\n");
    body.push('\n');
    fs::write(out_path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::build_dataset;
    use crate::model::DocumentType;

    fn find(id: &str, doc_type: DocumentType) -> Document {
        build_dataset()
            .applicants
            .into_iter()
            .find(|a| a.applicant_id == id)
            .and_then(|a| a.document_bundle.into_iter().find(|d| d.document_type == doc_type))
            .unwrap()
    }

    fn render(f: fn(&Document, &Path) -> Result<()>, doc: &Document) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.pdf");
        f(doc, &path).unwrap();
        String::from_utf8_lossy(&fs::read(&path).unwrap()).into_owned()
    }

    #[test]
    fn certificate_gets_credential_details() {
        let doc = find("APPL-001", DocumentType::CompTiaSecurityPlusCertificate);
        let pdf = render(render_pristine_pdf, &doc);
        assert!(pdf.starts_with("%PDF-"));
        assert!(pdf.contains("Credential Details"));
        assert!(pdf.contains("Skills"));
        assert!(pdf.contains("/Count 1"));
    }

    #[test]
    fn evaluation_gets_course_table_and_hints() {
        let doc = find("APPL-009", DocumentType::WesCourseByCourseEvaluation);
        let pdf = render(render_pristine_pdf, &doc);
        assert!(pdf.contains("Evaluation Summary"));
        assert!(pdf.contains("Course Table"));
        assert!(pdf.contains("AI Mapping Hints"));
    }

    #[test]
    fn toefl_report_gets_score_rows() {
        let doc = find("APPL-009", DocumentType::ToeflScoreReport);
        let pdf = render(render_pristine_pdf, &doc);
        assert!(pdf.contains("Score Breakdown"));
        assert!(pdf.contains("Reading"));
    }

    #[test]
    fn long_text_dump_spans_pages() {
        let mut doc = find("APPL-002", DocumentType::Jst);
        doc.structured_content.summary_lines = (0..200).map(|i| format!("line {i}")).collect();
        let pdf = render(render_raw_text_pdf, &doc);
        assert!(pdf.contains("/BaseFont /Courier"));
        assert!(!pdf.contains("/Count 1\n") && !pdf.contains("/Count 1 "));
    }

    #[test]
    fn txt_export_ends_with_newline() {
        let doc = find("APPL-001", DocumentType::Jst);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jst.txt");
        render_raw_text_txt(&doc, &path).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.ends_with("END OF DOCUMENT\n"));
        assert_eq!(body.lines().count(), raw_text_lines(&doc).len());
    }
}
