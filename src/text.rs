//! Plain-text layout shared by every rendering method.

use crate::model::{Course, Document};

/// Turn a person's name into a folder-friendly slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_alphanumeric() { c } else { '_' };
        if c == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches('_').to_string()
}

/// Greedy word wrap to `width` characters.
///
/// Leading indentation of the first line survives, whitespace at the edges of
/// wrapped lines is dropped and words longer than `width` are split. Blank
/// input yields a single empty line.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let normalized: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if normalized.trim().is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for chunk in chunks(&normalized) {
        let is_space = chunk.starts_with(' ');
        let chunk_len = chunk.chars().count();

        if is_space && current_len == 0 && !lines.is_empty() {
            continue;
        }
        if current_len + chunk_len <= width {
            current.push_str(chunk);
            current_len += chunk_len;
            continue;
        }
        if is_space {
            lines.push(current.trim_end().to_string());
            current.clear();
            current_len = 0;
            continue;
        }
        if current_len > 0 && chunk_len <= width {
            lines.push(current.trim_end().to_string());
            current = chunk.to_string();
            current_len = chunk_len;
            continue;
        }

        // Word longer than a line: fill what is left, then hard-split.
        let mut rest: Vec<char> = chunk.chars().collect();
        while !rest.is_empty() {
            let room = width - current_len;
            if room == 0 {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_len = 0;
                continue;
            }
            let take = room.min(rest.len());
            current.extend(rest.drain(..take));
            current_len += take;
        }
    }

    let last = current.trim_end();
    if !last.is_empty() {
        lines.push(last.to_string());
    }
    lines
}

/// Split into alternating runs of spaces and non-spaces.
fn chunks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_space = None;
    for (i, c) in text.char_indices() {
        let space = c == ' ';
        if let Some(prev) = prev_space {
            if prev != space {
                out.push(&text[start..i]);
                start = i;
            }
        }
        prev_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// `rank_at_separation` -> `Rank At Separation`.
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Credits and GPAs print with at least one decimal, like `3.0` or `3.11`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn optional<T: ToString>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

/// Truncate to `width` characters and pad on the right.
pub fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{truncated:<width$}")
}

/// Truncate to `width` characters without padding.
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn labeled(lines: &mut Vec<String>, key: &str, value: impl AsRef<str>) {
    lines.push(format!("{}: {}", field_label(key), value.as_ref()));
}

/// One fixed-width row of the course records table.
pub fn course_row(course: &Course) -> String {
    let grade = course.grade.as_deref().unwrap_or("");
    format!(
        "{} | {} | {} | {:>4} | {:>4} | {} | {}",
        fit(&course.course_code, 13),
        fit(&course.course_title, 33),
        fit(&course.term_label, 6),
        course.year,
        format!("{:.1}", course.credits),
        fit(grade, 5),
        fit(course.status.as_str(), 9),
    )
}

/// The canonical plain-text rendering of a document record.
pub fn document_text_lines(doc: &Document) -> Vec<String> {
    let sc = &doc.structured_content;
    let mut lines = vec![
        doc.title.to_uppercase(),
        format!("Issuer: {}", doc.issuing_organization),
        format!("Issue Date: {}", doc.issue_date),
        format!("Document Type: {}", doc.document_type),
    ];
    if let Some(name) = non_empty(&sc.student_name) {
        lines.push(format!("Student: {name}"));
    }
    if let Some(id) = non_empty(&sc.student_id_on_document) {
        lines.push(format!("Document Student ID: {id}"));
    }
    if let Some(number) = non_empty(&sc.document_number) {
        lines.push(format!("Document Number: {number}"));
    }
    if !sc.summary_lines.is_empty() {
        lines.push(String::new());
        lines.push("SUMMARY".into());
        lines.extend(sc.summary_lines.iter().cloned());
    }

    if let Some(service) = &sc.service_record {
        lines.push(String::new());
        lines.push("SERVICE RECORD".into());
        labeled(&mut lines, "branch", &service.branch);
        labeled(&mut lines, "component", &service.component);
        labeled(&mut lines, "rank_at_separation", &service.rank_at_separation);
        labeled(&mut lines, "mos_code", &service.mos_code);
        labeled(&mut lines, "mos_title", &service.mos_title);
        labeled(&mut lines, "service_start", &service.service_start);
        labeled(&mut lines, "service_end", &service.service_end);
        labeled(&mut lines, "character_of_service", &service.character_of_service);
        labeled(&mut lines, "deployments_count", service.deployments_count.to_string());
    }

    if let Some(edu) = &sc.education_record {
        lines.push(String::new());
        lines.push("EDUCATION RECORD".into());
        labeled(&mut lines, "institution_name", &edu.institution_name);
        labeled(&mut lines, "student_number", &edu.student_number);
        labeled(&mut lines, "program", &edu.program);
        labeled(&mut lines, "credential_awarded", &edu.credential_awarded);
        labeled(&mut lines, "attendance_start", &edu.attendance_start);
        labeled(&mut lines, "attendance_end", &edu.attendance_end);
        labeled(&mut lines, "gpa", optional(&edu.gpa.map(format_decimal)));
        labeled(&mut lines, "graduation_date", optional(&edu.graduation_date));
    }

    if let Some(ev) = &sc.evaluation_record {
        lines.push(String::new());
        lines.push("CREDENTIAL EVALUATION".into());
        labeled(&mut lines, "agency", &ev.agency);
        labeled(&mut lines, "report_type", &ev.report_type);
        labeled(&mut lines, "origin_country", &ev.origin_country);
        labeled(&mut lines, "origin_institution", &ev.origin_institution);
        labeled(&mut lines, "origin_credential", &ev.origin_credential);
        labeled(&mut lines, "us_equivalency", &ev.us_equivalency);
        labeled(&mut lines, "us_gpa", optional(&ev.us_gpa.map(format_decimal)));
        labeled(&mut lines, "report_date", &ev.report_date);
        labeled(&mut lines, "reference_number", &ev.reference_number);
    }

    if let Some(cert) = &sc.certificate_record {
        lines.push(String::new());
        lines.push("CERTIFICATE".into());
        labeled(&mut lines, "certificate_name", &cert.certificate_name);
        labeled(&mut lines, "provider", &cert.provider);
        labeled(&mut lines, "credential_id", &cert.credential_id);
        labeled(&mut lines, "issue_date", &cert.issue_date);
        labeled(&mut lines, "expiration_date", optional(&cert.expiration_date));
        labeled(&mut lines, "verification_url", &cert.verification_url);
        if !cert.skills.is_empty() {
            lines.push("Skills:".into());
            lines.extend(cert.skills.iter().map(|skill| format!(" - {skill}")));
        }
    }

    if let Some(scores) = non_empty_list(&sc.scores) {
        lines.push(String::new());
        lines.push("SCORES".into());
        for s in scores {
            lines.push(format!(
                "{} | {}: {} ({}) [{}]",
                s.test_name, s.section, s.score, s.scale, s.test_date
            ));
        }
    }

    if let Some(courses) = non_empty_list(&sc.courses) {
        lines.push(String::new());
        lines.push("COURSE RECORDS".into());
        lines.push(
            "Code           | Title                             | Term   | Yr | Cr | Grade | Status"
                .into(),
        );
        lines.push("-".repeat(94));
        lines.extend(courses.iter().map(course_row));
    }

    if let Some(recs) = non_empty_list(&sc.ace_recommendations) {
        lines.push(String::new());
        lines.push("ACE CREDIT RECOMMENDATIONS".into());
        for rec in recs {
            lines.push(format!(
                "{}: {} (LL {:.1} / UL {:.1})",
                rec.experience_or_training,
                rec.subject,
                rec.lower_division_credits,
                rec.upper_division_credits
            ));
            lines.extend(wrap_lines(&format!("Basis: {}", rec.recommendation_basis), 92));
        }
    }

    if let Some(hints) = non_empty_list(&sc.ai_mapping_hints) {
        lines.push(String::new());
        lines.push("AI MAPPING HINTS".into());
        for hint in hints {
            lines.push(format!(
                "{} -> {} ({}, {:.1} cr)",
                hint.source_evidence,
                hint.proposed_college_course_code,
                hint.proposed_college_course_title,
                hint.credits
            ));
        }
    }

    if let Some(preview) = non_empty_list(&sc.raw_text_preview) {
        lines.push(String::new());
        lines.push("RAW TEXT PREVIEW".into());
        lines.extend(preview.iter().cloned());
    }

    if let Some(notes) = non_empty_list(&sc.notes) {
        lines.push(String::new());
        lines.push("NOTES".into());
        for note in notes {
            lines.extend(wrap_lines(note, 92));
        }
    }

    lines
}

/// Banner-wrapped text dump used by the raw text renderers.
pub fn raw_text_lines(doc: &Document) -> Vec<String> {
    let rule = "=".repeat(106);
    let mut lines = vec![rule.clone(), doc.title.to_uppercase(), rule];
    lines.extend(document_text_lines(doc));
    lines.push(String::new());
    lines.push("END OF DOCUMENT".into());
    lines
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn non_empty_list<T>(value: &Option<Vec<T>>) -> Option<&[T]> {
    value.as_deref().filter(|list| !list.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{build_dataset, course};
    use crate::model::{CourseStatus, DocumentType};
    use pretty_assertions::assert_eq;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Miguel Rivera"), "Miguel_Rivera");
        assert_eq!(slugify("  Brandon O'Neal  "), "Brandon_O_Neal");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn wrap_keeps_words_whole() {
        let wrapped = wrap_lines("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(wrapped, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_indent() {
        assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_lines(" - item", 20), vec![" - item"]);
        assert_eq!(wrap_lines("   ", 20), vec![""]);
        assert_eq!(wrap_lines("", 20), vec![""]);
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(field_label("rank_at_separation"), "Rank At Separation");
        assert_eq!(field_label("us_gpa"), "Us Gpa");
    }

    #[test]
    fn decimals_keep_one_place() {
        assert_eq!(format_decimal(3.0), "3.0");
        assert_eq!(format_decimal(3.11), "3.11");
    }

    #[test]
    fn course_rows_are_fixed_width() {
        let row = course_row(&course(
            "HR-42A-BLC",
            "Basic Leader Course",
            "Military Training",
            2012,
            3.0,
            None,
        ));
        assert_eq!(
            row,
            "HR-42A-BLC    | Basic Leader Course               | Milita | 2012 |  3.0 |       | Completed"
        );
        let mut evaluated = course("X", "Y", "Evaluated", 2025, 3.0, Some("Pass"));
        evaluated.status = CourseStatus::Evaluated;
        assert!(course_row(&evaluated).ends_with("| Pass  | Evaluated"));
    }

    #[test]
    fn text_lines_cover_structured_sections() {
        let dataset = build_dataset();
        let jst = dataset.applicants[0]
            .document_bundle
            .iter()
            .find(|d| d.document_type == DocumentType::Jst)
            .unwrap();
        let lines = document_text_lines(jst);
        assert_eq!(lines[0], "JOINT SERVICES TRANSCRIPT");
        assert!(lines.contains(&"COURSE RECORDS".to_string()));
        assert!(lines.contains(&"ACE CREDIT RECOMMENDATIONS".to_string()));
        assert!(lines.contains(&"Document Student ID: JST-AR-5729441".to_string()));

        let raw = raw_text_lines(jst);
        assert_eq!(raw[0], "=".repeat(106));
        assert_eq!(raw.last().unwrap(), "END OF DOCUMENT");
    }

    #[test]
    fn whole_gpas_keep_their_decimal() {
        let mut evaluation = build_dataset().applicants[8].document_bundle[0].clone();
        let record = evaluation.structured_content.evaluation_record.as_mut().unwrap();
        record.us_gpa = Some(3.0);
        assert!(document_text_lines(&evaluation).contains(&"Us Gpa: 3.0".to_string()));

        evaluation.structured_content.evaluation_record.as_mut().unwrap().us_gpa = None;
        assert!(document_text_lines(&evaluation).contains(&"Us Gpa: None".to_string()));
    }
}
