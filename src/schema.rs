//! The strict JSON Schema for the dataset and the validator around it.

use std::fs;
use std::path::Path;

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::model::{Dataset, DocumentType};

/// Number of applicants the dataset must contain.
pub const APPLICANT_COUNT: usize = 12;

/// Build the Draft 2020-12 schema describing [`Dataset`].
pub fn build_schema() -> Value {
    let mut defs = Map::new();
    defs.insert("applicant".into(), applicant_def());
    defs.insert("persona".into(), persona_def());
    defs.insert("expected_ai_output".into(), expected_ai_output_def());
    defs.insert("mapping".into(), mapping_def());
    defs.insert("document".into(), document_def());
    defs.insert("structured_content".into(), structured_content_def());
    defs.insert("course".into(), course_def());
    defs.insert("score".into(), score_def());
    defs.insert("ace_recommendation".into(), ace_recommendation_def());
    defs.insert("date_range".into(), date_range_def());
    defs.insert("service_record".into(), service_record_def());
    defs.insert("certificate_record".into(), certificate_record_def());
    defs.insert("education_record".into(), education_record_def());
    defs.insert("evaluation_record".into(), evaluation_record_def());
    defs.insert("gpa_summary".into(), gpa_summary_def());
    defs.insert("signature_block".into(), signature_block_def());
    defs.insert("visual_profile".into(), visual_profile_def());

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "SyntheticApplicantDocumentBundles",
        "type": "object",
        "additionalProperties": false,
        "required": ["dataset_id", "generated_on", "dataset_notes", "applicants"],
        "properties": {
            "dataset_id": {"type": "string", "minLength": 1},
            "generated_on": {"type": "string", "format": "date"},
            "dataset_notes": {
                "type": "array",
                "items": {"type": "string"},
                "minItems": 1,
            },
            "applicants": {
                "type": "array",
                "minItems": APPLICANT_COUNT,
                "maxItems": APPLICANT_COUNT,
                "items": {"$ref": "#/$defs/applicant"},
            },
        },
        "$defs": Value::Object(defs),
    })
}

fn string() -> Value {
    json!({"type": "string"})
}

fn date() -> Value {
    json!({"type": "string", "format": "date"})
}

fn nullable_date() -> Value {
    json!({"type": ["string", "null"], "format": "date"})
}

fn string_list() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

fn number() -> Value {
    json!({"type": "number"})
}

fn reference(def: &str) -> Value {
    json!({"$ref": format!("#/$defs/{def}")})
}

fn list_of(def: &str) -> Value {
    json!({"type": "array", "items": reference(def)})
}

fn strict_object(required: &[&str], properties: Value) -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": required,
        "properties": properties,
    })
}

fn applicant_def() -> Value {
    strict_object(
        &[
            "Applicant_ID",
            "Archetype_Code",
            "Archetype_Label",
            "Persona",
            "Target_Program",
            "Admissions_Term",
            "Document_Bundle",
            "Expected_AI_Output",
        ],
        json!({
            "Applicant_ID": string(),
            "Archetype_Code": {"type": "string", "enum": ["A", "B", "C"]},
            "Archetype_Label": string(),
            "Persona": reference("persona"),
            "Target_Program": string(),
            "Admissions_Term": string(),
            "Document_Bundle": {
                "type": "array",
                "minItems": 2,
                "maxItems": 4,
                "items": reference("document"),
            },
            "Expected_AI_Output": reference("expected_ai_output"),
        }),
    )
}

fn persona_def() -> Value {
    strict_object(
        &[
            "full_name",
            "preferred_name",
            "career_goal",
            "prior_learning_sources",
            "demo_storyline",
        ],
        json!({
            "full_name": string(),
            "preferred_name": string(),
            "career_goal": string(),
            "prior_learning_sources": {
                "type": "array",
                "items": {"type": "string"},
                "minItems": 2,
            },
            "demo_storyline": string(),
        }),
    )
}

fn expected_ai_output_def() -> Value {
    strict_object(
        &[
            "Target_Pathway",
            "Pathway_Theme",
            "Proposed_Transfer_Credits_Total",
            "Mapped_Courses",
            "Remaining_Admissions_Checks",
            "Advisor_Review_Focus",
            "Narrative",
        ],
        json!({
            "Target_Pathway": string(),
            "Pathway_Theme": string(),
            "Proposed_Transfer_Credits_Total": number(),
            "Mapped_Courses": {
                "type": "array",
                "minItems": 1,
                "items": reference("mapping"),
            },
            "Remaining_Admissions_Checks": string_list(),
            "Advisor_Review_Focus": string_list(),
            "Narrative": string(),
        }),
    )
}

fn mapping_def() -> Value {
    strict_object(
        &[
            "source_evidence",
            "proposed_college_course_code",
            "proposed_college_course_title",
            "credits",
            "rationale",
        ],
        json!({
            "source_evidence": string(),
            "proposed_college_course_code": string(),
            "proposed_college_course_title": string(),
            "credits": number(),
            "rationale": string(),
        }),
    )
}

fn document_def() -> Value {
    let document_types: Vec<&str> = DocumentType::ALL.iter().map(|t| t.as_str()).collect();
    strict_object(
        &[
            "Document_ID",
            "Document_Type",
            "Title",
            "Issuing_Organization",
            "Issue_Date",
            "Document_Format",
            "Rendering_Method",
            "Output_File_Name",
            "Page_Count",
            "Structured_Content",
        ],
        json!({
            "Document_ID": string(),
            "Document_Type": {"type": "string", "enum": document_types},
            "Title": string(),
            "Issuing_Organization": string(),
            "Issue_Date": date(),
            "Document_Format": {"type": "string", "enum": ["pdf", "webp", "txt"]},
            "Rendering_Method": {
                "type": "string",
                "enum": [
                    "pristine_pdf",
                    "scanned_pdf",
                    "raw_text_pdf",
                    "raw_text_txt",
                    "simulated_scan_webp",
                    "gemimg_scan_webp",
                ],
            },
            "Output_File_Name": string(),
            "Page_Count": {"type": "integer", "minimum": 1, "maximum": 8},
            "Gemimg_Prompt": string(),
            "Structured_Content": reference("structured_content"),
        }),
    )
}

fn structured_content_def() -> Value {
    strict_object(
        &["summary_lines", "visual_profile"],
        json!({
            "student_name": string(),
            "student_id_on_document": string(),
            "document_number": string(),
            "date_range": reference("date_range"),
            "service_record": reference("service_record"),
            "certificate_record": reference("certificate_record"),
            "education_record": reference("education_record"),
            "evaluation_record": reference("evaluation_record"),
            "gpa_summary": reference("gpa_summary"),
            "signature_block": reference("signature_block"),
            "summary_lines": {
                "type": "array",
                "minItems": 1,
                "items": {"type": "string"},
            },
            "notes": string_list(),
            "raw_text_preview": string_list(),
            "courses": list_of("course"),
            "ace_recommendations": list_of("ace_recommendation"),
            "scores": list_of("score"),
            "ai_mapping_hints": list_of("mapping"),
            "visual_profile": reference("visual_profile"),
        }),
    )
}

fn course_def() -> Value {
    strict_object(
        &[
            "course_code",
            "course_title",
            "term_label",
            "year",
            "credits",
            "grade",
            "status",
        ],
        json!({
            "course_code": string(),
            "course_title": string(),
            "term_label": string(),
            "year": {"type": "integer", "minimum": 1990, "maximum": 2030},
            "credits": number(),
            "grade": {"type": ["string", "null"]},
            "status": {"type": "string", "enum": ["Completed", "In Progress", "Evaluated"]},
            "level": string(),
            "source_system": string(),
            "notes": string(),
        }),
    )
}

fn score_def() -> Value {
    strict_object(
        &["test_name", "section", "score", "scale", "test_date"],
        json!({
            "test_name": string(),
            "section": string(),
            "score": number(),
            "scale": string(),
            "test_date": date(),
        }),
    )
}

fn ace_recommendation_def() -> Value {
    strict_object(
        &[
            "experience_or_training",
            "subject",
            "lower_division_credits",
            "upper_division_credits",
            "recommendation_basis",
        ],
        json!({
            "experience_or_training": string(),
            "subject": string(),
            "lower_division_credits": number(),
            "upper_division_credits": number(),
            "recommendation_basis": string(),
        }),
    )
}

fn date_range_def() -> Value {
    strict_object(&["start", "end"], json!({"start": date(), "end": date()}))
}

fn service_record_def() -> Value {
    strict_object(
        &[
            "branch",
            "component",
            "rank_at_separation",
            "mos_code",
            "mos_title",
            "service_start",
            "service_end",
            "character_of_service",
            "deployments_count",
        ],
        json!({
            "branch": string(),
            "component": string(),
            "rank_at_separation": string(),
            "mos_code": string(),
            "mos_title": string(),
            "service_start": date(),
            "service_end": date(),
            "character_of_service": string(),
            "deployments_count": {"type": "integer", "minimum": 0, "maximum": 10},
        }),
    )
}

fn certificate_record_def() -> Value {
    strict_object(
        &[
            "certificate_name",
            "provider",
            "credential_id",
            "issue_date",
            "verification_url",
            "skills",
        ],
        json!({
            "certificate_name": string(),
            "provider": string(),
            "credential_id": string(),
            "issue_date": date(),
            "expiration_date": nullable_date(),
            "verification_url": string(),
            "skills": {"type": "array", "items": {"type": "string"}, "minItems": 1},
        }),
    )
}

fn education_record_def() -> Value {
    strict_object(
        &[
            "institution_name",
            "student_number",
            "program",
            "credential_awarded",
            "attendance_start",
            "attendance_end",
        ],
        json!({
            "institution_name": string(),
            "student_number": string(),
            "program": string(),
            "credential_awarded": string(),
            "attendance_start": date(),
            "attendance_end": date(),
            "gpa": {"type": ["number", "null"]},
            "graduation_date": nullable_date(),
        }),
    )
}

fn evaluation_record_def() -> Value {
    strict_object(
        &[
            "agency",
            "report_type",
            "origin_country",
            "origin_institution",
            "origin_credential",
            "us_equivalency",
            "report_date",
            "reference_number",
        ],
        json!({
            "agency": string(),
            "report_type": string(),
            "origin_country": string(),
            "origin_institution": string(),
            "origin_credential": string(),
            "us_equivalency": string(),
            "us_gpa": {"type": ["number", "null"]},
            "report_date": date(),
            "reference_number": string(),
        }),
    )
}

fn gpa_summary_def() -> Value {
    strict_object(
        &["gpa", "scale", "credits_attempted", "credits_earned"],
        json!({
            "gpa": number(),
            "scale": number(),
            "credits_attempted": number(),
            "credits_earned": number(),
        }),
    )
}

fn signature_block_def() -> Value {
    strict_object(
        &["signed_by", "title", "signed_date"],
        json!({
            "signed_by": string(),
            "title": string(),
            "signed_date": date(),
        }),
    )
}

fn visual_profile_def() -> Value {
    strict_object(
        &["style", "paper_tone", "artifact_level"],
        json!({
            "style": {
                "type": "string",
                "enum": ["pristine_digital", "dense_text_dump", "scanned_photo"],
            },
            "paper_tone": string(),
            "artifact_level": {
                "type": "string",
                "enum": ["none", "light", "medium", "heavy"],
            },
            "rotation_degrees": number(),
            "blur_px": number(),
            "notes": string(),
        }),
    )
}

/// Validate `instance` against `schema`, collecting every violation.
pub fn validate(schema: &Value, instance: &Value) -> Result<()> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft202012)
        .should_validate_formats(true)
        .compile(schema)
        .map_err(|e| Error::InvalidSchema {
            reason: e.to_string(),
        })?;

    if let Err(errors) = compiled.validate(instance) {
        let errors = errors
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();
        return Err(Error::SchemaValidation { errors });
    }

    Ok(())
}

/// Read a dataset file, validating the JSON exactly as written before
/// turning it into a [`Dataset`].
pub fn load_validated(path: &Path) -> Result<Dataset> {
    let raw: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    validate(&build_schema(), &raw)?;
    Ok(serde_json::from_value(raw)?)
}

/// Validate a typed dataset against [`build_schema`].
pub fn validate_dataset(dataset: &Dataset) -> Result<()> {
    let instance = serde_json::to_value(dataset)?;
    validate(&build_schema(), &instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_every_definition() {
        let schema = build_schema();
        let defs = schema["$defs"].as_object().unwrap();
        for name in [
            "applicant",
            "document",
            "structured_content",
            "course",
            "visual_profile",
        ] {
            assert!(defs.contains_key(name), "missing $defs/{name}");
        }
        assert_eq!(schema["properties"]["applicants"]["minItems"], json!(12));
        assert_eq!(
            defs["document"]["properties"]["Document_Type"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            DocumentType::ALL.len()
        );
    }

    #[test]
    fn rejects_missing_fields_and_extra_keys() {
        let schema = build_schema();
        let instance = json!({
            "dataset_id": "x",
            "generated_on": "2026-02-24",
            "dataset_notes": ["note"],
            "applicants": [],
            "unexpected": 1,
        });
        match validate(&schema, &instance) {
            Err(Error::SchemaValidation { errors }) => {
                assert!(errors.len() >= 2, "{errors:?}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn checks_date_formats() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {"when": date()},
        });
        assert!(validate(&schema, &json!({"when": "2025-11-05"})).is_ok());
        assert!(validate(&schema, &json!({"when": "11/05/2025"})).is_err());
    }

    #[test]
    fn explicit_nulls_in_the_file_are_rejected() {
        let dataset = crate::dataset::build_dataset();
        let mut raw = serde_json::to_value(&dataset).unwrap();
        let doc = &mut raw["applicants"][0]["Document_Bundle"][0];
        doc["Gemimg_Prompt"] = Value::Null;
        doc["Structured_Content"]["student_name"] = Value::Null;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundles.json");
        fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();

        match load_validated(&path) {
            Err(Error::SchemaValidation { errors }) => {
                assert!(errors.iter().any(|e| e.contains("Gemimg_Prompt")), "{errors:?}");
                assert!(errors.iter().any(|e| e.contains("student_name")), "{errors:?}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn valid_file_loads() {
        let dataset = crate::dataset::build_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundles.json");
        fs::write(&path, serde_json::to_string_pretty(&dataset).unwrap()).unwrap();
        assert_eq!(load_validated(&path).unwrap(), dataset);
    }
}
