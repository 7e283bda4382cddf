//! Records written next to the rendered files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gemimg::{GemimgJob, SampleResult};
use crate::model::{ArchetypeCode, DocumentFormat, DocumentType, RenderingMethod};
use crate::renderer::{Engine, RenderStatus, WebpBackend};

/// One rendered file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Source document.
    #[serde(rename = "Document_ID")]
    pub document_id: String,
    /// Source document type.
    #[serde(rename = "Document_Type")]
    pub document_type: DocumentType,
    /// Format of the written file.
    #[serde(rename = "Document_Format")]
    pub document_format: DocumentFormat,
    /// Method requested by the record.
    #[serde(rename = "Rendering_Method")]
    pub rendering_method: RenderingMethod,
    /// Engine that actually produced the file.
    #[serde(rename = "Render_Engine")]
    pub render_engine: Engine,
    /// `fallback` when gemimg failed.
    #[serde(rename = "Render_Status")]
    pub render_status: RenderStatus,
    /// Path relative to the render root.
    #[serde(rename = "Output_File")]
    pub output_file: String,
}

/// One applicant folder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Applicant identifier.
    #[serde(rename = "Applicant_ID")]
    pub applicant_id: String,
    /// Archetype code.
    #[serde(rename = "Archetype_Code")]
    pub archetype_code: ArchetypeCode,
    /// Archetype description.
    #[serde(rename = "Archetype_Label")]
    pub archetype_label: String,
    /// Applicant folder, relative to the render root.
    #[serde(rename = "Folder")]
    pub folder: String,
    /// Rendered files in bundle order.
    #[serde(rename = "Documents")]
    pub documents: Vec<RenderedDocument>,
    /// Files per format.
    #[serde(rename = "Format_Counts")]
    pub format_counts: BTreeMap<DocumentFormat, usize>,
    /// Formats present, in alphabetical order.
    #[serde(rename = "Format_Mix")]
    pub format_mix: Vec<DocumentFormat>,
}

impl ApplicantRecord {
    /// Number of documents in `format`.
    pub fn count(&self, format: DocumentFormat) -> usize {
        self.format_counts.get(&format).copied().unwrap_or(0)
    }
}

/// How many bundles hold a single format or a mix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMixSummary {
    /// Bundles with only PDFs.
    pub pdf_only: usize,
    /// Bundles with only WEBP images.
    pub image_only: usize,
    /// Bundles with only text files.
    pub text_only: usize,
    /// Bundles with more than one format.
    pub mixed: usize,
    /// Bundles with at least one text file.
    pub contains_txt: usize,
}

impl BundleMixSummary {
    /// Count one bundle given its de-duplicated formats in alphabetical order.
    pub fn add(&mut self, formats: &[DocumentFormat]) {
        if formats.contains(&DocumentFormat::Txt) {
            self.contains_txt += 1;
        }
        match formats {
            [DocumentFormat::Pdf] => self.pdf_only += 1,
            [DocumentFormat::Webp] => self.image_only += 1,
            [DocumentFormat::Txt] => self.text_only += 1,
            _ => self.mixed += 1,
        }
    }
}

/// `manifests/gemimg_jobs.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GemimgJobs {
    /// One entry per `gemimg_scan_webp` document with a prompt.
    pub jobs: Vec<GemimgJob>,
}

/// `manifests/render_manifest.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderManifest {
    /// Dataset identifier.
    pub dataset_id: String,
    /// Dataset generation date.
    pub generated_on: String,
    /// Output directory as configured.
    pub rendered_to: String,
    /// Directory holding the manifests.
    pub manifests_dir: String,
    /// Directory holding the previews.
    pub previews_dir: String,
    /// Backend requested for gemimg documents.
    pub webp_backend: WebpBackend,
    /// Per-applicant records.
    pub applicants: Vec<ApplicantRecord>,
    /// Number of applicants rendered.
    pub total_applicants: usize,
    /// Number of files written.
    pub total_documents: usize,
    /// Entries in `gemimg_jobs.json`.
    pub gemimg_job_count: usize,
    /// Format mix across bundles.
    pub bundle_mix_summary: BundleMixSummary,
    /// Files per engine.
    pub render_engine_counts: BTreeMap<Engine, usize>,
    /// Contact sheet path, or `null` when there were no scans.
    pub preview_contact_sheet: Option<String>,
    /// Preview generations, omitted when none were requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gemimg_sample_results: Vec<SampleResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use crate::model::DocumentFormat::*;

    #[test]
    fn bundles_are_classified_by_format_set() {
        let mut summary = BundleMixSummary::default();
        summary.add(&[Pdf]);
        summary.add(&[Webp]);
        summary.add(&[Txt]);
        summary.add(&[Pdf, Txt, Webp]);
        summary.add(&[Pdf, Webp]);
        assert_eq!(
            summary,
            BundleMixSummary {
                pdf_only: 1,
                image_only: 1,
                text_only: 1,
                mixed: 2,
                contains_txt: 2,
            }
        );
    }

    #[test]
    fn applicant_record_uses_manifest_keys() {
        let record = ApplicantRecord {
            applicant_id: "APPL-001".into(),
            archetype_code: ArchetypeCode::A,
            archetype_label: "Veteran".into(),
            folder: "data/applicants/APPL-001_Miguel_Rivera".into(),
            documents: vec![RenderedDocument {
                document_id: "APPL-001-D2".into(),
                document_type: DocumentType::Jst,
                document_format: Txt,
                rendering_method: RenderingMethod::RawTextTxt,
                render_engine: Engine::Local,
                render_status: RenderStatus::Ok,
                output_file: "data/applicants/APPL-001_Miguel_Rivera/JST.txt".into(),
            }],
            format_counts: BTreeMap::from([(Txt, 1)]),
            format_mix: vec![Txt],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Format_Counts"], json!({"txt": 1}));
        assert_eq!(value["Format_Mix"], json!(["txt"]));
        assert_eq!(value["Documents"][0]["Render_Engine"], json!("local"));
        assert_eq!(value["Documents"][0]["Document_Type"], json!("JST"));
        assert_eq!(record.count(Txt), 1);
        assert_eq!(record.count(Pdf), 0);
    }

    #[test]
    fn missing_contact_sheet_is_null_and_empty_samples_are_omitted() {
        let manifest = RenderManifest {
            dataset_id: "d".into(),
            generated_on: "2026-02-24".into(),
            rendered_to: "out".into(),
            manifests_dir: "manifests".into(),
            previews_dir: "previews".into(),
            webp_backend: WebpBackend::Local,
            applicants: vec![],
            total_applicants: 0,
            total_documents: 0,
            gemimg_job_count: 0,
            bundle_mix_summary: BundleMixSummary::default(),
            render_engine_counts: BTreeMap::from([(Engine::LocalFallback, 2)]),
            preview_contact_sheet: None,
            gemimg_sample_results: vec![],
        };
        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["preview_contact_sheet"], json!(null));
        assert!(value.get("gemimg_sample_results").is_none());
        assert_eq!(value["render_engine_counts"], json!({"local_fallback": 2}));
        assert_eq!(value["webp_backend"], json!("local"));
    }
}
