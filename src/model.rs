//! Typed view of the applicant bundle dataset.
//!
//! Field names follow the JSON document exactly: top-level records use
//! `Capitalized_Snake` keys, everything under `Structured_Content` is plain
//! `snake_case`. Optional keys are omitted when absent, nullable keys are
//! always written (as `null` when empty).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The whole generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    /// Stable dataset identifier.
    pub dataset_id: String,
    /// ISO generation date.
    pub generated_on: String,
    /// Free-form notes about the dataset.
    pub dataset_notes: Vec<String>,
    /// Exactly twelve applicants.
    pub applicants: Vec<Applicant>,
}

impl Dataset {
    /// Read a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Total number of documents across every bundle.
    pub fn document_count(&self) -> usize {
        self.applicants.iter().map(|a| a.document_bundle.len()).sum()
    }
}

/// The three applicant personas the dataset covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArchetypeCode {
    /// Military veteran transitioning to business/IT.
    A,
    /// Some college, no credential.
    B,
    /// International adult learner.
    C,
}

/// One fictitious applicant and their documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Applicant {
    /// `APPL-001` through `APPL-012`.
    #[serde(rename = "Applicant_ID")]
    pub applicant_id: String,
    /// Archetype.
    #[serde(rename = "Archetype_Code")]
    pub archetype_code: ArchetypeCode,
    /// Human-readable archetype.
    #[serde(rename = "Archetype_Label")]
    pub archetype_label: String,
    /// Who the applicant is.
    #[serde(rename = "Persona")]
    pub persona: Persona,
    /// Program applied to.
    #[serde(rename = "Target_Program")]
    pub target_program: String,
    /// Admissions term code.
    #[serde(rename = "Admissions_Term")]
    pub admissions_term: String,
    /// Two to four documents.
    #[serde(rename = "Document_Bundle")]
    pub document_bundle: Vec<Document>,
    /// Expected review result.
    #[serde(rename = "Expected_AI_Output")]
    pub expected_ai_output: ExpectedAiOutput,
}

/// Background story for an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Persona {
    /// Legal name.
    pub full_name: String,
    /// First name.
    pub preferred_name: String,
    /// Stated career goal.
    pub career_goal: String,
    /// Where prior learning came from.
    pub prior_learning_sources: Vec<String>,
    /// What the bundle is meant to demonstrate.
    pub demo_storyline: String,
}

/// What a credit-review assistant is expected to conclude for a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedAiOutput {
    /// Degree pathway.
    #[serde(rename = "Target_Pathway")]
    pub target_pathway: String,
    /// Short theme of the pathway.
    #[serde(rename = "Pathway_Theme")]
    pub pathway_theme: String,
    /// Sum of mapped course credits.
    #[serde(rename = "Proposed_Transfer_Credits_Total")]
    pub proposed_transfer_credits_total: f64,
    /// Proposed articulations.
    #[serde(rename = "Mapped_Courses")]
    pub mapped_courses: Vec<Mapping>,
    /// Items still to verify.
    #[serde(rename = "Remaining_Admissions_Checks")]
    pub remaining_admissions_checks: Vec<String>,
    /// What an advisor should look at.
    #[serde(rename = "Advisor_Review_Focus")]
    pub advisor_review_focus: Vec<String>,
    /// Summary paragraph.
    #[serde(rename = "Narrative")]
    pub narrative: String,
}

/// A proposed articulation from a piece of evidence to a college course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mapping {
    /// Evidence the credit is based on.
    pub source_evidence: String,
    /// Target course code.
    pub proposed_college_course_code: String,
    /// Target course title.
    pub proposed_college_course_title: String,
    /// Credits awarded.
    pub credits: f64,
    /// Why the evidence maps to the course.
    pub rationale: String,
}

/// Kinds of credential documents in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Military discharge papers.
    #[serde(rename = "DD214")]
    Dd214,
    /// Joint Services Transcript.
    #[serde(rename = "JST")]
    Jst,
    /// CompTIA Security+ certificate.
    #[serde(rename = "CompTIA_SecurityPlus_Certificate")]
    CompTiaSecurityPlusCertificate,
    /// High school completion attestation.
    #[serde(rename = "High_School_Attestation_Form")]
    HighSchoolAttestationForm,
    /// Community college transcript.
    #[serde(rename = "Community_College_Transcript")]
    CommunityCollegeTranscript,
    /// Sophia Learning transcript.
    #[serde(rename = "Sophia_Learning_Transcript")]
    SophiaLearningTranscript,
    /// Google Project Management certificate.
    #[serde(rename = "Google_Project_Management_Certificate")]
    GoogleProjectManagementCertificate,
    /// WES course-by-course evaluation.
    #[serde(rename = "WES_Course_By_Course_Evaluation")]
    WesCourseByCourseEvaluation,
    /// ECE course-by-course evaluation.
    #[serde(rename = "ECE_Course_By_Course_Evaluation")]
    EceCourseByCourseEvaluation,
    /// TOEFL iBT score report.
    #[serde(rename = "TOEFL_Score_Report")]
    ToeflScoreReport,
}

impl DocumentType {
    /// Every document type, in schema order.
    pub const ALL: [DocumentType; 10] = [
        DocumentType::Dd214,
        DocumentType::Jst,
        DocumentType::CompTiaSecurityPlusCertificate,
        DocumentType::HighSchoolAttestationForm,
        DocumentType::CommunityCollegeTranscript,
        DocumentType::SophiaLearningTranscript,
        DocumentType::GoogleProjectManagementCertificate,
        DocumentType::WesCourseByCourseEvaluation,
        DocumentType::EceCourseByCourseEvaluation,
        DocumentType::ToeflScoreReport,
    ];

    /// The JSON spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Dd214 => "DD214",
            DocumentType::Jst => "JST",
            DocumentType::CompTiaSecurityPlusCertificate => "CompTIA_SecurityPlus_Certificate",
            DocumentType::HighSchoolAttestationForm => "High_School_Attestation_Form",
            DocumentType::CommunityCollegeTranscript => "Community_College_Transcript",
            DocumentType::SophiaLearningTranscript => "Sophia_Learning_Transcript",
            DocumentType::GoogleProjectManagementCertificate => {
                "Google_Project_Management_Certificate"
            }
            DocumentType::WesCourseByCourseEvaluation => "WES_Course_By_Course_Evaluation",
            DocumentType::EceCourseByCourseEvaluation => "ECE_Course_By_Course_Evaluation",
            DocumentType::ToeflScoreReport => "TOEFL_Score_Report",
        }
    }

    /// Paper forms that get a ruled grid in the scan layout.
    pub fn is_ruled_form(&self) -> bool {
        matches!(
            self,
            DocumentType::Dd214
                | DocumentType::HighSchoolAttestationForm
                | DocumentType::CommunityCollegeTranscript
        )
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// PDF.
    Pdf,
    /// Plain text.
    Txt,
    /// WEBP image.
    Webp,
}

impl DocumentFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Webp => "webp",
            DocumentFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The template strategy used to turn a document record into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingMethod {
    /// Designed digital PDF.
    PristinePdf,
    /// Scan image wrapped in a PDF page.
    ScannedPdf,
    /// Courier text dump as PDF.
    RawTextPdf,
    /// Text dump as a `.txt` file.
    RawTextTxt,
    /// Locally simulated scan.
    SimulatedScanWebp,
    /// Scan from gemimg, with a local fallback.
    GemimgScanWebp,
}

impl RenderingMethod {
    /// JSON spelling.
    pub fn name(&self) -> &'static str {
        match self {
            RenderingMethod::PristinePdf => "pristine_pdf",
            RenderingMethod::ScannedPdf => "scanned_pdf",
            RenderingMethod::RawTextPdf => "raw_text_pdf",
            RenderingMethod::RawTextTxt => "raw_text_txt",
            RenderingMethod::SimulatedScanWebp => "simulated_scan_webp",
            RenderingMethod::GemimgScanWebp => "gemimg_scan_webp",
        }
    }
}

impl fmt::Display for RenderingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single credential document inside a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// `{Applicant_ID}-D{n}`.
    #[serde(rename = "Document_ID")]
    pub document_id: String,
    /// Kind of document.
    #[serde(rename = "Document_Type")]
    pub document_type: DocumentType,
    /// Title as printed.
    #[serde(rename = "Title")]
    pub title: String,
    /// Issuer.
    #[serde(rename = "Issuing_Organization")]
    pub issuing_organization: String,
    /// ISO issue date.
    #[serde(rename = "Issue_Date")]
    pub issue_date: String,
    /// Output format.
    #[serde(rename = "Document_Format")]
    pub document_format: DocumentFormat,
    /// How the file is produced.
    #[serde(rename = "Rendering_Method")]
    pub rendering_method: RenderingMethod,
    /// File name inside the applicant folder.
    #[serde(rename = "Output_File_Name")]
    pub output_file_name: String,
    /// Pages in the original document.
    #[serde(rename = "Page_Count")]
    pub page_count: u32,
    /// Everything printed on the document.
    #[serde(rename = "Structured_Content")]
    pub structured_content: StructuredContent,
    /// Image prompt; only for WEBP documents.
    #[serde(rename = "Gemimg_Prompt", default, skip_serializing_if = "Option::is_none")]
    pub gemimg_prompt: Option<String>,
}

/// The document body. Which sections are present depends on the document type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredContent {
    /// Name as printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Student or service identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id_on_document: Option<String>,
    /// Form or registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Period the document covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Military service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_record: Option<ServiceRecord>,
    /// Certificate details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_record: Option<CertificateRecord>,
    /// Enrollment at an institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_record: Option<EducationRecord>,
    /// Foreign credential evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_record: Option<EvaluationRecord>,
    /// GPA and credit totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa_summary: Option<GpaSummary>,
    /// Who signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_block: Option<SignatureBlock>,
    /// Short bullet summary.
    pub summary_lines: Vec<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    /// Lines as they appear in a text export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<Vec<String>>,
    /// Course records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    /// ACE credit recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ace_recommendations: Option<Vec<AceRecommendation>>,
    /// Test scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Score>>,
    /// Suggested articulations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_mapping_hints: Option<Vec<Mapping>>,
    /// How the rendered file should look.
    pub visual_profile: VisualProfile,
}

impl StructuredContent {
    /// Notes list, created on first use.
    pub fn notes_mut(&mut self) -> &mut Vec<String> {
        self.notes.get_or_insert_with(Vec::new)
    }
}

/// Completion state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    /// Finished with a grade.
    Completed,
    /// Currently enrolled.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Assessed by an evaluation agency.
    Evaluated,
}

impl CourseStatus {
    /// JSON spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Completed => "Completed",
            CourseStatus::InProgress => "In Progress",
            CourseStatus::Evaluated => "Evaluated",
        }
    }
}

/// One line of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Course {
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub course_title: String,
    /// Term, e.g. `Fall`.
    pub term_label: String,
    /// Year taken.
    pub year: i32,
    /// Credit hours.
    pub credits: f64,
    /// Letter grade; `null` while in progress.
    pub grade: Option<String>,
    /// Completion state.
    pub status: CourseStatus,
    /// Lower or upper division.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// System the record came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_system: Option<String>,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One section of a test score report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Score {
    /// Test name.
    pub test_name: String,
    /// Section, or `Total`.
    pub section: String,
    /// Points scored.
    pub score: u32,
    /// Score range, e.g. `0-30`.
    pub scale: String,
    /// ISO test date.
    pub test_date: String,
}

/// An ACE credit recommendation for military training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AceRecommendation {
    /// Training or occupation.
    pub experience_or_training: String,
    /// Subject area.
    pub subject: String,
    /// Lower-division credits.
    pub lower_division_credits: f64,
    /// Upper-division credits.
    pub upper_division_credits: f64,
    /// ACE identifier the credit is based on.
    pub recommendation_basis: String,
}

/// Inclusive ISO date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    /// First day.
    pub start: String,
    /// Last day.
    pub end: String,
}

/// Military service summary from a DD214.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceRecord {
    /// Branch of service.
    pub branch: String,
    /// Active, Reserve or Guard.
    pub component: String,
    /// Rank at separation.
    pub rank_at_separation: String,
    /// Occupational specialty code.
    pub mos_code: String,
    /// Occupational specialty title.
    pub mos_title: String,
    /// Entry date.
    pub service_start: String,
    /// Separation date.
    pub service_end: String,
    /// Discharge characterization.
    pub character_of_service: String,
    /// Number of deployments.
    pub deployments_count: u32,
}

/// An industry certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateRecord {
    /// Certificate name.
    pub certificate_name: String,
    /// Issuing provider.
    pub provider: String,
    /// Verification ID.
    pub credential_id: String,
    /// ISO issue date.
    pub issue_date: String,
    /// ISO expiry date; `null` if it never expires.
    pub expiration_date: Option<String>,
    /// Where to verify it.
    pub verification_url: String,
    /// Skills covered.
    pub skills: Vec<String>,
}

/// Enrollment at a school or college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationRecord {
    /// Institution.
    pub institution_name: String,
    /// Student number at the institution.
    pub student_number: String,
    /// Program of study.
    pub program: String,
    /// Credential earned, if any.
    pub credential_awarded: String,
    /// First term.
    pub attendance_start: String,
    /// Last term.
    pub attendance_end: String,
    /// Cumulative GPA.
    pub gpa: Option<f64>,
    /// ISO graduation date.
    pub graduation_date: Option<String>,
}

/// A foreign credential evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationRecord {
    /// WES or ECE.
    pub agency: String,
    /// Report type.
    pub report_type: String,
    /// Country of study.
    pub origin_country: String,
    /// Institution attended.
    pub origin_institution: String,
    /// Credential as awarded.
    pub origin_credential: String,
    /// US equivalent credential.
    pub us_equivalency: String,
    /// Converted GPA.
    pub us_gpa: Option<f64>,
    /// ISO report date.
    pub report_date: String,
    /// Agency reference number.
    pub reference_number: String,
}

/// GPA and credit totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GpaSummary {
    /// GPA.
    pub gpa: f64,
    /// GPA scale maximum.
    pub scale: f64,
    /// Credits attempted.
    pub credits_attempted: f64,
    /// Credits earned.
    pub credits_earned: f64,
}

/// Signature on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureBlock {
    /// Signer.
    pub signed_by: String,
    /// Signer's title.
    pub title: String,
    /// ISO signing date.
    pub signed_date: String,
}

/// Overall look of a rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualStyle {
    /// Clean digital original.
    #[default]
    PristineDigital,
    /// Utility text export.
    DenseTextDump,
    /// Scan or photo of paper.
    ScannedPhoto,
}

/// How much scan damage the local renderer adds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactLevel {
    /// Untouched.
    None,
    /// Paper grain and blur only.
    #[default]
    Light,
    /// Adds stains and fax lines.
    Medium,
    /// Adds speckles on top of medium damage.
    Heavy,
}

impl ArtifactLevel {
    /// Medium and heavy scans get stains and fax lines.
    pub fn is_degraded(&self) -> bool {
        matches!(self, ArtifactLevel::Medium | ArtifactLevel::Heavy)
    }
}

/// Rendering hints for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualProfile {
    /// Overall look.
    pub style: VisualStyle,
    /// Paper colour name, e.g. `yellowed_offwhite`.
    pub paper_tone: String,
    /// Scan damage.
    pub artifact_level: ArtifactLevel,
    /// Skew of the scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<f64>,
    /// Gaussian blur radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_px: Option<f64>,
    /// Free-form note on the look.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_use_json_spelling() {
        assert_eq!(
            serde_json::to_value(DocumentType::CompTiaSecurityPlusCertificate).unwrap(),
            json!("CompTIA_SecurityPlus_Certificate")
        );
        assert_eq!(
            serde_json::to_value(RenderingMethod::GemimgScanWebp).unwrap(),
            json!("gemimg_scan_webp")
        );
        assert_eq!(
            serde_json::to_value(CourseStatus::InProgress).unwrap(),
            json!("In Progress")
        );
        for ty in DocumentType::ALL {
            assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.as_str()));
        }
    }

    #[test]
    fn nullable_fields_are_written_optional_fields_are_not() {
        let course = Course {
            course_code: "PSY101".into(),
            course_title: "Intro to Psychology".into(),
            term_label: "Fall".into(),
            year: 2007,
            credits: 3.0,
            grade: None,
            status: CourseStatus::Completed,
            level: None,
            source_system: None,
            notes: None,
        };
        let value = serde_json::to_value(&course).unwrap();
        let object = value.as_object().unwrap();
        assert!(object["grade"].is_null());
        assert!(!object.contains_key("level"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = json!({
            "start": "2020-01-01",
            "end": "2020-02-01",
            "extra": true,
        });
        assert!(serde_json::from_value::<DateRange>(raw).is_err());
    }
}
