//! Builds the synthetic applicant dataset and writes it next to its schema.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    AceRecommendation, Applicant, ArchetypeCode, ArtifactLevel, CertificateRecord, Course,
    CourseStatus, Dataset, DateRange, Document, DocumentFormat, DocumentType, EducationRecord,
    EvaluationRecord, ExpectedAiOutput, GpaSummary, Mapping, Persona, RenderingMethod, Score,
    ServiceRecord, SignatureBlock, StructuredContent, VisualProfile, VisualStyle,
};
use crate::profiles::{self, InternationalProfile, ScncProfile, VeteranProfile};
use crate::schema;

/// Identifier written into every dataset.
pub const DATASET_ID: &str = "super-fast-ai-credit-checking.synthetic-applicant-bundles.v1";
/// Fixed generation date, so output is reproducible.
pub const GENERATED_ON: &str = "2026-02-24";
/// Term every applicant applies for.
pub const ADMISSIONS_TERM: &str = "2026FA";

/// Schema location relative to the output directory.
pub const SCHEMA_FILE: &str = "schema/synthetic_applicant_bundles.schema.json";
/// Dataset location relative to the output directory.
pub const DATA_FILE: &str = "manifests/synthetic_applicant_bundles.json";

/// A proposed course articulation.
pub fn mapping(
    source_evidence: &str,
    code: &str,
    title: &str,
    credits: f64,
    rationale: &str,
) -> Mapping {
    Mapping {
        source_evidence: source_evidence.to_string(),
        proposed_college_course_code: code.to_string(),
        proposed_college_course_title: title.to_string(),
        credits,
        rationale: rationale.to_string(),
    }
}

/// A completed course with no level, source system or notes.
pub fn course(
    code: &str,
    title: &str,
    term_label: &str,
    year: i32,
    credits: f64,
    grade: Option<&str>,
) -> Course {
    Course {
        course_code: code.to_string(),
        course_title: title.to_string(),
        term_label: term_label.to_string(),
        year,
        credits,
        grade: grade.map(str::to_string),
        status: CourseStatus::Completed,
        level: None,
        source_system: None,
        notes: None,
    }
}

impl Course {
    /// Mark as evaluated by a credential agency.
    pub fn evaluated(mut self) -> Self {
        self.status = CourseStatus::Evaluated;
        self
    }

    /// Set the course level (lower or upper division).
    pub fn level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }

    /// Record which system the course came from.
    pub fn source(mut self, source_system: &str) -> Self {
        self.source_system = Some(source_system.to_string());
        self
    }
}

/// One section of a test score report.
pub fn score(test_name: &str, section: &str, value: u32, scale: &str, test_date: &str) -> Score {
    Score {
        test_name: test_name.to_string(),
        section: section.to_string(),
        score: value,
        scale: scale.to_string(),
        test_date: test_date.to_string(),
    }
}

/// An ACE credit recommendation.
pub fn ace(
    experience_or_training: &str,
    subject: &str,
    lower: f64,
    upper: f64,
    recommendation_basis: &str,
) -> AceRecommendation {
    AceRecommendation {
        experience_or_training: experience_or_training.to_string(),
        subject: subject.to_string(),
        lower_division_credits: lower,
        upper_division_credits: upper,
        recommendation_basis: recommendation_basis.to_string(),
    }
}

/// Zero rotation, zero blur and empty notes are left out of the record.
pub fn visual(
    style: VisualStyle,
    paper_tone: &str,
    artifact_level: ArtifactLevel,
    rotation: f64,
    blur: f64,
    notes: &str,
) -> VisualProfile {
    VisualProfile {
        style,
        paper_tone: paper_tone.to_string(),
        artifact_level,
        rotation_degrees: (rotation != 0.0).then_some(rotation),
        blur_px: (blur != 0.0).then_some(blur),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    }
}

/// Header fields shared by every document record.
pub struct DocHeader<'a> {
    /// Document type.
    pub doc_type: DocumentType,
    /// Title printed on the document.
    pub title: String,
    /// Issuing organization.
    pub issuer: &'a str,
    /// ISO date.
    pub issue_date: &'a str,
    /// Output format.
    pub format: DocumentFormat,
    /// How the file is produced.
    pub rendering: RenderingMethod,
    /// File name inside the applicant folder.
    pub file_name: &'a str,
    /// Pages in the original document.
    pub page_count: u32,
    /// Prompt for the image generator, if any.
    pub gemimg_prompt: Option<&'a str>,
}

/// Assemble the `index`-th document of `applicant_id`.
pub fn make_doc(
    applicant_id: &str,
    index: usize,
    header: DocHeader<'_>,
    structured: StructuredContent,
) -> Document {
    Document {
        document_id: format!("{applicant_id}-D{index}"),
        document_type: header.doc_type,
        title: header.title,
        issuing_organization: header.issuer.to_string(),
        issue_date: header.issue_date.to_string(),
        document_format: header.format,
        rendering_method: header.rendering,
        output_file_name: header.file_name.to_string(),
        page_count: header.page_count,
        gemimg_prompt: header
            .gemimg_prompt
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        structured_content: structured,
    }
}

fn applicant_id(idx: usize) -> String {
    format!("APPL-{idx:03}")
}

fn preferred_name(name: &str) -> String {
    name.split_whitespace().next().unwrap_or(name).to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Archetype A: a veteran with a DD214, JST and Security+ certificate.
pub fn veteran_applicant(idx: usize, p: &VeteranProfile) -> Applicant {
    let id = applicant_id(idx);
    let name = p.name;

    let service_record = ServiceRecord {
        branch: "U.S. Army".into(),
        component: p.component.into(),
        rank_at_separation: p.rank.into(),
        mos_code: "42A".into(),
        mos_title: "Human Resources Specialist".into(),
        service_start: p.service_start.into(),
        service_end: p.service_end.into(),
        character_of_service: "Honorable".into(),
        deployments_count: p.deployments,
    };

    let dd214 = make_doc(
        &id,
        1,
        DocHeader {
            doc_type: DocumentType::Dd214,
            title: "Certificate of Release or Discharge from Active Duty (DD Form 214)".into(),
            issuer: "Department of Defense",
            issue_date: p.service_end,
            format: DocumentFormat::Webp,
            rendering: RenderingMethod::GemimgScanWebp,
            file_name: p.dd214_file,
            page_count: 1,
            gemimg_prompt: Some(
                "Photorealistic scanned DD-214 form on off-white paper, slight 2-degree skew, \
                 mild coffee ring, monochrome copier noise, legible typed fields, Army discharge form, \
                 businesslike desk scan, no hands visible.",
            ),
        },
        StructuredContent {
            student_name: Some(name.into()),
            document_number: Some(p.dd214_number.into()),
            date_range: Some(DateRange {
                start: p.service_start.into(),
                end: p.service_end.into(),
            }),
            service_record: Some(service_record),
            summary_lines: vec![
                format!("Name: {name}"),
                "Branch: U.S. Army".into(),
                "MOS: 42A Human Resources Specialist".into(),
                format!("Rank at Separation: {}", p.rank),
                "Character of Service: Honorable".into(),
            ],
            notes: Some(strings(&[
                "Synthetic DD-214 facsimile for demo ingestion only.",
                "Form fields intentionally varied to simulate scan quality issues.",
            ])),
            visual_profile: visual(
                VisualStyle::ScannedPhoto,
                "warm_offwhite",
                ArtifactLevel::Medium,
                2.0,
                0.8,
                "Monochrome artifacting, compression halos, faint fold crease.",
            ),
            ..Default::default()
        },
    );

    let jst_courses = vec![
        course("HR-42A-BLC", "Basic Leader Course", "Military Training", 2012 + p.offset, 3.0, None)
            .evaluated()
            .level("Lower")
            .source("JST"),
        course(
            "HR-42A-ADV",
            "Human Resources Specialist Course",
            "Military Training",
            2008 + p.offset,
            4.0,
            None,
        )
        .evaluated()
        .level("Lower")
        .source("JST"),
        course(
            "ARMY-OPS",
            "Personnel Administration in Unit Operations",
            "Military Occupation",
            2013 + p.offset,
            3.0,
            None,
        )
        .evaluated()
        .level("Upper")
        .source("JST"),
    ];
    let ace_recs = vec![
        ace(
            "MOS 42A Duty Performance",
            "Human Resource Management / Personnel Administration",
            3.0,
            3.0,
            "ACE military guide recommendation for Army MOS 42A (skill level reflected on JST).",
        ),
        ace(
            "Army Structured Self-Development + HR systems workflow",
            "Business Communications / Information Systems",
            3.0,
            0.0,
            "ACE recommendation derived from completed military schooling and documented duty assignments.",
        ),
    ];
    let jst = make_doc(
        &id,
        2,
        DocHeader {
            doc_type: DocumentType::Jst,
            title: "Joint Services Transcript".into(),
            issuer: "Joint Services Transcript / American Council on Education",
            issue_date: p.jst_issue_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::RawTextPdf,
            file_name: p.jst_file,
            page_count: 3,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            student_id_on_document: Some(p.jst_id.into()),
            summary_lines: vec![
                format!("Joint Services Transcript for {name}"),
                "Army MOS history includes 42A Human Resources Specialist".into(),
                "ACE credit recommendations included for training and occupational experience"
                    .into(),
            ],
            raw_text_preview: Some(vec![
                "JOINT SERVICES TRANSCRIPT (UNOFFICIAL COPY FOR REVIEW)".into(),
                format!("STUDENT: {}   JST ID: {}", name.to_uppercase(), p.jst_id),
                "SERVICE BRANCH: ARMY".into(),
                "PRIMARY MOS: 42A HUMAN RESOURCES SPECIALIST".into(),
                "ACE CREDIT RECOMMENDATIONS:".into(),
                "  - HUMAN RESOURCE MANAGEMENT / PERSONNEL ADMINISTRATION: 3 LL / 3 UL".into(),
                "  - BUSINESS COMMUNICATIONS / INFO SYSTEMS SUPPORT: 3 LL".into(),
            ]),
            courses: Some(jst_courses),
            ace_recommendations: Some(ace_recs),
            ai_mapping_hints: Some(vec![
                mapping(
                    "JST ACE recommendation for MOS 42A (HR / Personnel Administration)",
                    "HRM-ELEC",
                    "Human Resource Management elective credit",
                    3.0,
                    "MOS 42A duties and ACE recommendation align with HR operations and personnel records workflows.",
                ),
                mapping(
                    "JST ACE recommendation for MOS 42A (upper-division HR / personnel)",
                    "HRM-3XX",
                    "Advanced Human Resource Management elective",
                    3.0,
                    "Upper-division ACE recommendation supports leadership-level personnel administration credit review.",
                ),
            ]),
            visual_profile: visual(
                VisualStyle::DenseTextDump,
                "plain_white",
                ArtifactLevel::Light,
                0.0,
                0.0,
                "Monospaced utilitarian JST text export style.",
            ),
            ..Default::default()
        },
    );

    let secplus = make_doc(
        &id,
        3,
        DocHeader {
            doc_type: DocumentType::CompTiaSecurityPlusCertificate,
            title: "CompTIA Security+ Certification".into(),
            issuer: "CompTIA",
            issue_date: p.secplus_issue_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::PristinePdf,
            file_name: p.secplus_file,
            page_count: 1,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            certificate_record: Some(CertificateRecord {
                certificate_name: "CompTIA Security+".into(),
                provider: "CompTIA".into(),
                credential_id: p.secplus_id.into(),
                issue_date: p.secplus_issue_date.into(),
                expiration_date: Some(p.secplus_expiry.into()),
                verification_url: "https://www.certmetrics.com/comptia/public/verification.aspx"
                    .into(),
                skills: strings(&[
                    "Threat management",
                    "Network security",
                    "Risk mitigation",
                    "Security operations",
                ]),
            }),
            summary_lines: vec![
                format!("CompTIA Security+ digital certificate for {name}"),
                format!("Credential ID: {}", p.secplus_id),
                "AI demo hook: maps to IT-253 (Computer Systems Security)".into(),
            ],
            ai_mapping_hints: Some(vec![mapping(
                "CompTIA Security+ certificate",
                "IT-253",
                "Computer Systems Security",
                3.0,
                "Current Security+ coverage aligns with foundational cybersecurity and systems security outcomes.",
            )]),
            visual_profile: visual(
                VisualStyle::PristineDigital,
                "bright_white",
                ArtifactLevel::None,
                0.0,
                0.0,
                "Modern digital certificate with seal and QR-like footer.",
            ),
            ..Default::default()
        },
    );

    let mapped_courses = vec![
        mapping(
            "JST MOS 42A ACE recommendation",
            "HRM-ELEC",
            "Human Resource Management elective credit",
            3.0,
            "Personnel administration, records management, and HR workflow experience documented on JST.",
        ),
        mapping(
            "JST MOS 42A ACE upper-division recommendation",
            "HRM-3XX",
            "Upper-level Human Resource Management elective",
            3.0,
            "ACE upper-division recommendation supports advisor review for advanced HR elective placement.",
        ),
        mapping(
            "CompTIA Security+",
            "IT-253",
            "Computer Systems Security",
            3.0,
            "Certification outcomes match course competencies in computer systems security.",
        ),
        mapping(
            "JST training + ACE communication/systems recommendation",
            "BUS/IT-ELEC",
            "Business or IT elective credit",
            3.0,
            "Military training indicates structured administrative systems and business communication skills.",
        ),
    ];

    Applicant {
        applicant_id: id,
        archetype_code: ArchetypeCode::A,
        archetype_label: "Military Veteran Transitioning to Business/IT".into(),
        persona: Persona {
            full_name: name.into(),
            preferred_name: preferred_name(name),
            career_goal: p.career_goal.into(),
            prior_learning_sources: strings(&[
                "U.S. Army service (MOS 42A Human Resources Specialist)",
                "Joint Services Transcript (ACE credit recommendations)",
                "CompTIA Security+ certification",
            ]),
            demo_storyline: p.storyline.into(),
        },
        target_program: p.target_program.into(),
        admissions_term: ADMISSIONS_TERM.into(),
        document_bundle: vec![dd214, jst, secplus],
        expected_ai_output: ExpectedAiOutput {
            target_pathway: p.target_program.into(),
            pathway_theme: "Military-to-business/IT accelerated transfer review".into(),
            proposed_transfer_credits_total: 12.0,
            mapped_courses,
            remaining_admissions_checks: strings(&[
                "Confirm official JST delivery status",
                "Verify CompTIA credential active status on evaluation date",
            ]),
            advisor_review_focus: strings(&[
                "Approve MOS 42A HR management elective mapping",
                "Determine whether upper-division HR elective can be transcripted directly",
                "Sequence IT-253 with degree plan prerequisites",
            ]),
            narrative: "Bundle demonstrates cross-domain mapping: Army MOS 42A personnel administration experience \
                        supports Human Resource Management credit consideration, while Security+ yields a direct IT-253 \
                        equivalency for a business/IT transition pathway."
                .into(),
        },
    }
}

/// Archetype B: some college, no credential.
pub fn scnc_applicant(idx: usize, p: &ScncProfile) -> Applicant {
    let id = applicant_id(idx);
    let name = p.name;

    let hs = make_doc(
        &id,
        1,
        DocHeader {
            doc_type: DocumentType::HighSchoolAttestationForm,
            title: "High School Completion Attestation".into(),
            issuer: p.hs_issuer,
            issue_date: p.hs_attestation_date,
            format: DocumentFormat::Webp,
            rendering: RenderingMethod::GemimgScanWebp,
            file_name: p.hs_file,
            page_count: 1,
            gemimg_prompt: Some(
                "Realistic scanned high school completion attestation form, blue ink signature, slight page curl, \
                 fax artifacts, grayscale office scan, dated form with stamp and checkbox fields, legible typed text.",
            ),
        },
        StructuredContent {
            student_name: Some(name.into()),
            summary_lines: vec![
                "High school completion attestation form".into(),
                format!("School/attestor: {}", p.hs_issuer),
                format!("Attestation date: {}", p.hs_attestation_date),
            ],
            signature_block: Some(SignatureBlock {
                signed_by: p.hs_signer.into(),
                title: "Registrar / Records Officer".into(),
                signed_date: p.hs_attestation_date.into(),
            }),
            notes: Some(strings(&[
                "Synthetic form included to test low-quality scanned admissions paperwork ingestion.",
            ])),
            visual_profile: visual(
                VisualStyle::ScannedPhoto,
                "yellowed_offwhite",
                ArtifactLevel::Medium,
                -1.6,
                0.6,
                "Fax streaks and toner dropout around signature block.",
            ),
            ..Default::default()
        },
    );

    let cc_course = |code: &str, title: &str, term: &str, year: i32, grade: &str| {
        course(code, title, term, year, 3.0, Some(grade)).source("CommunityCollege")
    };
    let cc_courses = vec![
        cc_course("PSY101", "Intro to Psychology", p.cc_term_1_label, p.cc_year_1, p.psy_grade),
        cc_course("ENG111", "English Composition I", p.cc_term_1_label, p.cc_year_1, p.eng_grade),
        cc_course("MAT092", "Beginning Algebra", p.cc_term_1_label, p.cc_year_1, p.alg_grade),
        cc_course("CIS105", "Computer Applications", p.cc_term_2_label, p.cc_year_2, p.cis_grade),
    ];
    let cc_title = format!("Official Transcript - {}", p.cc_name);
    let cc_transcript = make_doc(
        &id,
        2,
        DocHeader {
            doc_type: DocumentType::CommunityCollegeTranscript,
            title: cc_title,
            issuer: p.cc_name,
            issue_date: p.cc_issue_date,
            format: DocumentFormat::Webp,
            rendering: RenderingMethod::GemimgScanWebp,
            file_name: p.cc_file,
            page_count: 1,
            gemimg_prompt: Some(
                "Photorealistic 2000s community college transcript scan, monochrome copier output, slightly skewed, \
                 faint staple shadow, old registrar layout with course table and GPA section, readable row text.",
            ),
        },
        StructuredContent {
            student_name: Some(name.into()),
            student_id_on_document: Some(p.cc_student_id.into()),
            education_record: Some(EducationRecord {
                institution_name: p.cc_name.into(),
                student_number: p.cc_student_id.into(),
                program: "General Studies (no credential completed)".into(),
                credential_awarded: "No Credential".into(),
                attendance_start: format!("{}-09-01", p.cc_year_1),
                attendance_end: format!("{}-05-20", p.cc_year_2),
                gpa: Some(p.cc_gpa),
                graduation_date: None,
            }),
            gpa_summary: Some(GpaSummary {
                gpa: p.cc_gpa,
                scale: 4.0,
                credits_attempted: 12.0,
                credits_earned: 12.0,
            }),
            summary_lines: vec![
                format!("Legacy transcript from {}", p.cc_name),
                format!("Attendance years: {}-{}", p.cc_year_1, p.cc_year_2),
                "Key demo hook: includes Intro to Psychology for instant transfer mapping".into(),
            ],
            courses: Some(cc_courses),
            ai_mapping_hints: Some(vec![mapping(
                &format!("{} PSY101 Intro to Psychology", p.cc_name),
                "PSY-108",
                "Introduction to Psychology",
                3.0,
                "Standard lower-division psychology course with transferable grade.",
            )]),
            visual_profile: visual(
                VisualStyle::ScannedPhoto,
                "gray_white",
                ArtifactLevel::Heavy,
                2.2,
                1.1,
                "2000s copier compression, edge shadowing, mild speckle noise.",
            ),
            ..Default::default()
        },
    );

    let sophia_course = |code: &str, title: &str, year: i32| {
        course(code, title, "Self-Paced", year, 3.0, Some("Pass")).source("Sophia")
    };
    let sophia = make_doc(
        &id,
        3,
        DocHeader {
            doc_type: DocumentType::SophiaLearningTranscript,
            title: "Sophia Learning Transcript".into(),
            issuer: "Sophia Learning",
            issue_date: p.sophia_issue_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::RawTextPdf,
            file_name: p.sophia_file,
            page_count: 2,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            summary_lines: strings(&[
                "Sophia Learning transcript export",
                "Competency-based coursework transcripted as pass/fail",
            ]),
            raw_text_preview: Some(vec![
                "SOPHIA LEARNING UNOFFICIAL TRANSCRIPT".into(),
                format!("LEARNER: {}", name.to_uppercase()),
                "COURSES COMPLETED".into(),
                " - Introduction to Statistics ........ PASS .... 3.0 credits".into(),
                " - Project Management ................ PASS .... 3.0 credits".into(),
                " - Business Communication ............ PASS .... 3.0 credits".into(),
            ]),
            courses: Some(vec![
                sophia_course("SOPH-STAT1001", "Introduction to Statistics", 2024),
                sophia_course("SOPH-PM1001", "Project Management", 2025),
                sophia_course("SOPH-BUS1001", "Business Communication", 2025),
            ]),
            visual_profile: visual(
                VisualStyle::DenseTextDump,
                "plain_white",
                ArtifactLevel::Light,
                0.0,
                0.0,
                "Plain text export PDF for utility-style parser testing.",
            ),
            ..Default::default()
        },
    );

    let google_cert = make_doc(
        &id,
        4,
        DocHeader {
            doc_type: DocumentType::GoogleProjectManagementCertificate,
            title: "Google Project Management Professional Certificate".into(),
            issuer: "Google / Coursera",
            issue_date: p.google_issue_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::PristinePdf,
            file_name: p.google_file,
            page_count: 1,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            certificate_record: Some(CertificateRecord {
                certificate_name: "Google Project Management Professional Certificate".into(),
                provider: "Google via Coursera".into(),
                credential_id: p.google_cred_id.into(),
                issue_date: p.google_issue_date.into(),
                expiration_date: None,
                verification_url: "https://coursera.org/verify/professional-cert".into(),
                skills: strings(&[
                    "Project initiation",
                    "Agile project management",
                    "Stakeholder communication",
                    "Risk and schedule management",
                ]),
            }),
            summary_lines: strings(&[
                "Google Project Management Professional Certificate",
                "AI demo hook: maps to QSO340, QSO355, QSO420, QSO435 (12 credits)",
            ]),
            ai_mapping_hints: Some(vec![
                mapping("Google PM Certificate", "QSO340", "Project Management", 3.0, "Certificate competency coverage aligns to project management fundamentals."),
                mapping("Google PM Certificate", "QSO355", "Resource Estimating and Scheduling", 3.0, "Includes scheduling, estimation, and planning modules."),
                mapping("Google PM Certificate", "QSO420", "Integrated Cost and Schedule Control", 3.0, "Includes tracking, reporting, and project controls concepts."),
                mapping("Google PM Certificate", "QSO435", "Adaptive Project Management", 3.0, "Agile/scrum and adaptive delivery content included."),
            ]),
            visual_profile: visual(
                VisualStyle::PristineDigital,
                "bright_white",
                ArtifactLevel::None,
                0.0,
                0.0,
                "Modern certificate layout with colored branding stripe.",
            ),
            ..Default::default()
        },
    );

    let articulation = "Direct certificate-to-course articulation.";
    let mapped = vec![
        mapping(
            &format!("{} PSY101 Intro to Psychology", p.cc_name),
            "PSY-108",
            "Introduction to Psychology",
            3.0,
            "Legacy community college course transfers as foundational psychology credit.",
        ),
        mapping("Google Project Management Certificate", "QSO340", "Project Management", 3.0, articulation),
        mapping("Google Project Management Certificate", "QSO355", "Resource Estimating and Scheduling", 3.0, articulation),
        mapping("Google Project Management Certificate", "QSO420", "Integrated Cost and Schedule Control", 3.0, articulation),
        mapping("Google Project Management Certificate", "QSO435", "Adaptive Project Management", 3.0, articulation),
        mapping(
            "Sophia Introduction to Statistics",
            "MAT/STAT-ELEC",
            "Statistics elective (advisor review)",
            3.0,
            "Sophia ACE-backed statistics course is commonly evaluated for lower-division statistics transfer.",
        ),
    ];

    Applicant {
        applicant_id: id,
        archetype_code: ArchetypeCode::B,
        archetype_label: "SCNC Corporate Upskiller (Some College, No Credential)".into(),
        persona: Persona {
            full_name: name.into(),
            preferred_name: preferred_name(name),
            career_goal: p.career_goal.into(),
            prior_learning_sources: vec![
                "High school completion documentation".into(),
                format!("Regional community college coursework at {}", p.cc_name),
                "Sophia Learning self-paced coursework".into(),
                "Google Project Management Professional Certificate".into(),
            ],
            demo_storyline: p.storyline.into(),
        },
        target_program: "BS in Operations Management".into(),
        admissions_term: ADMISSIONS_TERM.into(),
        document_bundle: vec![hs, cc_transcript, sophia, google_cert],
        expected_ai_output: ExpectedAiOutput {
            target_pathway: "BS in Operations Management".into(),
            pathway_theme: "SCNC fast-track credit aggregation across old and new learning".into(),
            proposed_transfer_credits_total: 18.0,
            mapped_courses: mapped,
            remaining_admissions_checks: strings(&[
                "Confirm official community college transcript source",
                "Verify Coursera certificate credential link if required by policy",
                "Finalize Sophia transfer policy limits for current catalog year",
            ]),
            advisor_review_focus: strings(&[
                "Confirm Google PM articulation pack (QSO340/QSO355/QSO420/QSO435)",
                "Review math placement impact of MAT092 legacy coursework",
                "Sequence remaining degree requirements after 12-credit QSO jump",
            ]),
            narrative: "Bundle demonstrates high-value aggregation for a working adult with some college, no credential: \
                        the AI picks up the old Intro to Psychology course from a noisy transcript, adds modern Sophia work, \
                        and applies a 12-credit Google PM articulation block to accelerate the pathway."
                .into(),
        },
    }
}

/// Archetype C: an international adult learner with an evaluation and a TOEFL report.
pub fn international_applicant(idx: usize, p: &InternationalProfile) -> Applicant {
    let id = applicant_id(idx);
    let name = p.name;
    let eval_type = if p.agency == "WES" {
        DocumentType::WesCourseByCourseEvaluation
    } else {
        DocumentType::EceCourseByCourseEvaluation
    };

    let evaluation = make_doc(
        &id,
        1,
        DocHeader {
            doc_type: eval_type,
            title: format!("{} Course-by-Course Credential Evaluation", p.agency),
            issuer: p.agency,
            issue_date: p.report_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::PristinePdf,
            file_name: p.eval_file,
            page_count: 2,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            evaluation_record: Some(EvaluationRecord {
                agency: p.agency.into(),
                report_type: "Course-by-Course".into(),
                origin_country: p.country.into(),
                origin_institution: p.institution.into(),
                origin_credential: p.credential.into(),
                us_equivalency: p.us_equivalency.into(),
                us_gpa: Some(p.us_gpa),
                report_date: p.report_date.into(),
                reference_number: p.ref_number.into(),
            }),
            summary_lines: vec![
                format!("{} course-by-course evaluation report", p.agency),
                format!("Origin credential: {} ({})", p.credential, p.country),
                format!("U.S. equivalency: {}", p.us_equivalency),
            ],
            courses: Some(p.evaluated_courses.clone()),
            gpa_summary: Some(GpaSummary {
                gpa: p.us_gpa,
                scale: 4.0,
                credits_attempted: p.eval_credits,
                credits_earned: p.eval_credits,
            }),
            ai_mapping_hints: Some(p.eval_mapping_hints.clone()),
            visual_profile: visual(
                VisualStyle::PristineDigital,
                "bright_white",
                ArtifactLevel::None,
                0.0,
                0.0,
                "Credential evaluation report table layout with agency header.",
            ),
            ..Default::default()
        },
    );

    let b = &p.toefl_breakdown;
    let toefl_score = |section: &str, value: u32, scale: &str| {
        score("TOEFL iBT", section, value, scale, p.toefl_date)
    };
    let toefl = make_doc(
        &id,
        2,
        DocHeader {
            doc_type: DocumentType::ToeflScoreReport,
            title: "TOEFL iBT Score Report".into(),
            issuer: "ETS",
            issue_date: p.toefl_date,
            format: DocumentFormat::Pdf,
            rendering: RenderingMethod::PristinePdf,
            file_name: p.toefl_file,
            page_count: 1,
            gemimg_prompt: None,
        },
        StructuredContent {
            student_name: Some(name.into()),
            document_number: Some(p.toefl_registration.into()),
            summary_lines: vec![
                "Official TOEFL iBT score report".into(),
                format!("Total score: {}", p.toefl_total),
                "Used for English proficiency review in admissions workflow".into(),
            ],
            scores: Some(vec![
                toefl_score("Reading", b.reading, "0-30"),
                toefl_score("Listening", b.listening, "0-30"),
                toefl_score("Speaking", b.speaking, "0-30"),
                toefl_score("Writing", b.writing, "0-30"),
                toefl_score("Total", p.toefl_total, "0-120"),
            ]),
            notes: Some(vec![format!(
                "ETS registration number {}",
                p.toefl_registration
            )]),
            visual_profile: visual(
                VisualStyle::PristineDigital,
                "bright_white",
                ArtifactLevel::None,
                0.0,
                0.0,
                "Digital score report with boxed section scores.",
            ),
            ..Default::default()
        },
    );

    let mut mapped = p.eval_mapping_hints.clone();
    mapped.push(mapping(
        &format!("TOEFL iBT total {}", p.toefl_total),
        "ENGL-PROF",
        "English proficiency satisfied (admissions requirement)",
        0.0,
        "TOEFL score meets demonstration threshold for English proficiency review; no transfer credits awarded.",
    ));

    Applicant {
        applicant_id: id,
        archetype_code: ArchetypeCode::C,
        archetype_label: "International Adult Learner".into(),
        persona: Persona {
            full_name: name.into(),
            preferred_name: preferred_name(name),
            career_goal: p.career_goal.into(),
            prior_learning_sources: vec![
                format!("{} from {} ({})", p.credential, p.institution, p.country),
                format!("{} course-by-course U.S. credential evaluation", p.agency),
                "TOEFL iBT score report".into(),
            ],
            demo_storyline: p.storyline.into(),
        },
        target_program: p.target_program.into(),
        admissions_term: ADMISSIONS_TERM.into(),
        document_bundle: vec![evaluation, toefl],
        expected_ai_output: ExpectedAiOutput {
            target_pathway: p.target_program.into(),
            pathway_theme:
                "International transfer with credential evaluation + language verification".into(),
            proposed_transfer_credits_total: p.proposed_transfer_total,
            mapped_courses: mapped,
            remaining_admissions_checks: strings(&[
                "Confirm official evaluator PDF authenticity/reference number",
                "Validate TOEFL score delivery policy window",
            ]),
            advisor_review_focus: strings(&[
                "Review major-course equivalencies from evaluator report",
                "Confirm residency and catalog requirements for remaining credits",
            ]),
            narrative: "Bundle shows international admissions acceleration: a course-by-course evaluation supplies U.S.-equivalent \
                        credit details while the TOEFL report resolves English proficiency in the same intake pass."
                .into(),
        },
    }
}

/// The twelve applicants in their canonical, unmixed formats.
pub fn build_dataset() -> Dataset {
    let mut applicants = Vec::with_capacity(schema::APPLICANT_COUNT);
    for (i, profile) in profiles::veterans().iter().enumerate() {
        applicants.push(veteran_applicant(i + 1, profile));
    }
    for (i, profile) in profiles::scncs().iter().enumerate() {
        applicants.push(scnc_applicant(i + 5, profile));
    }
    for (i, profile) in profiles::internationals().iter().enumerate() {
        applicants.push(international_applicant(i + 9, profile));
    }

    Dataset {
        dataset_id: DATASET_ID.into(),
        generated_on: GENERATED_ON.into(),
        dataset_notes: strings(&[
            "Synthetic records only; names, IDs, and credentials are fictitious.",
            "Document_Bundle arrays intentionally mix pristine, dense-text, and scan-style artifacts for ingestion testing.",
            "SCNC bundles include both high school attestation and Sophia transcript to satisfy multiple demo scenarios.",
        ]),
        applicants,
    }
}

/// Replace the extension of `file_name` with `extension`.
pub fn swap_suffix(file_name: &str, extension: &str) -> String {
    Path::new(file_name)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}

/// Find the first document of the given type in an applicant's bundle.
pub fn get_doc(applicant: &mut Applicant, doc_type: DocumentType) -> Result<&mut Document> {
    applicant
        .document_bundle
        .iter_mut()
        .find(|d| d.document_type == doc_type)
        .ok_or_else(|| Error::DocumentNotFound {
            applicant_id: applicant.applicant_id.clone(),
            document_type: doc_type.to_string(),
        })
}

/// Prompt handed to gemimg for a document that is delivered as an image.
pub fn inferred_gemimg_prompt(doc: &Document) -> String {
    let mut prompt = String::from(match doc.document_type {
        DocumentType::Dd214 => {
            "Photorealistic smartphone photo of a printed DD-214 discharge form on a dark desk, \
             slight perspective skew, grayscale copier text, faint coffee ring, mild motion blur, \
             realistic paper texture, legible form labels, no hands."
        }
        DocumentType::Jst => {
            "Photorealistic scan/photo of a Joint Services Transcript page, dense monospaced text table, \
             Army transcript formatting, ACE credit recommendation section visible, slight skew, scanner noise, \
             high OCR-friendly contrast with realistic artifacts."
        }
        DocumentType::CompTiaSecurityPlusCertificate => {
            "Photorealistic phone screenshot or printed certificate photo of a modern CompTIA Security+ certificate, \
             clean digital certificate styling, seal/badge visible, slight glare and perspective, readable name and credential area."
        }
        DocumentType::HighSchoolAttestationForm => {
            "Photorealistic scanned high school completion attestation form, checkbox fields, blue-ink signature, \
             fax artifacts, slightly yellowed paper, office copier grain, mild skew."
        }
        DocumentType::CommunityCollegeTranscript => {
            "Photorealistic 2000s community college transcript scan, monochrome registrar transcript table, \
             staple shadow, slight 2-degree skew, copier speckle noise, readable course rows and GPA section."
        }
        DocumentType::SophiaLearningTranscript => {
            "Photorealistic screenshot/printout of a Sophia Learning transcript export, simple tabular course completion list, \
             text-heavy layout, slight screen moire or print scan noise, readable rows."
        }
        DocumentType::GoogleProjectManagementCertificate => {
            "Photorealistic screenshot or printed certificate photo of a Google Project Management Professional Certificate, \
             modern Coursera/Google certificate layout, colored branding strip, slight desk shadow, readable credential block."
        }
        DocumentType::WesCourseByCourseEvaluation => {
            "Photorealistic photo of a printed WES course-by-course credential evaluation report page, \
             formal report header, table of evaluated courses, slight page curl and shadow, high-detail scan quality."
        }
        DocumentType::EceCourseByCourseEvaluation => {
            "Photorealistic photo of a printed ECE credential evaluation report page, formal evaluation header and table, \
             mild skew, office lighting shadow, legible academic equivalency lines."
        }
        DocumentType::ToeflScoreReport => {
            "Photorealistic photo of a printed TOEFL iBT score report on a desk, boxed section scores, \
             slight fold crease, mild shadow and lens distortion, readable score fields."
        }
    });

    let content = &doc.structured_content;
    if content.visual_profile.artifact_level.is_degraded() {
        prompt.push_str(" Include subtle copier dust, compression noise, and edge shadowing.");
    }
    if doc.document_type == DocumentType::Jst {
        prompt.push_str(" Show a line mentioning MOS 42A Human Resources Specialist.");
    }
    let student = content.student_name.as_deref().unwrap_or("adult learner");
    if !student.is_empty() {
        prompt.push_str(&format!(" Synthetic demo document for {student}."));
    }
    prompt
}

/// Switch a document to another delivery format.
pub fn set_doc_variant(
    doc: &mut Document,
    format: DocumentFormat,
    rendering: RenderingMethod,
    single_page_image: bool,
) {
    let old_format = doc.document_format;
    doc.document_format = format;
    doc.rendering_method = rendering;
    doc.output_file_name = swap_suffix(&doc.output_file_name, format.extension());

    match format {
        DocumentFormat::Webp => {
            if single_page_image && doc.page_count != 1 {
                doc.structured_content.notes_mut().push(
                    "Applicant uploaded a single image capture of this document (page 1 / summary page only); \
                     remaining pages may be requested."
                        .into(),
                );
                doc.page_count = 1;
            }
            doc.gemimg_prompt = Some(inferred_gemimg_prompt(doc));
        }
        DocumentFormat::Pdf | DocumentFormat::Txt => {
            doc.gemimg_prompt = None;
            if format == DocumentFormat::Txt && old_format != DocumentFormat::Txt {
                doc.structured_content
                    .notes_mut()
                    .push("Content provided as a plain-text export file instead of scanned pages.".into());
            }
        }
    }
}

type Variant = (DocumentType, DocumentFormat, RenderingMethod, bool);

fn variant_plan(applicant_id: &str) -> &'static [Variant] {
    use DocumentFormat::{Pdf, Txt, Webp};
    use DocumentType::*;
    use RenderingMethod::{GemimgScanWebp, PristinePdf, RawTextPdf, RawTextTxt, ScannedPdf};

    match applicant_id {
        "APPL-001" => &[
            (Dd214, Webp, GemimgScanWebp, false),
            (Jst, Txt, RawTextTxt, false),
            (CompTiaSecurityPlusCertificate, Pdf, PristinePdf, false),
        ],
        "APPL-002" => &[
            (Dd214, Pdf, ScannedPdf, false),
            (Jst, Pdf, RawTextPdf, false),
            (CompTiaSecurityPlusCertificate, Webp, GemimgScanWebp, false),
        ],
        "APPL-003" => &[
            (Dd214, Webp, GemimgScanWebp, false),
            (Jst, Webp, GemimgScanWebp, true),
            (CompTiaSecurityPlusCertificate, Webp, GemimgScanWebp, false),
        ],
        "APPL-004" => &[
            (Dd214, Pdf, ScannedPdf, false),
            (Jst, Pdf, RawTextPdf, false),
            (CompTiaSecurityPlusCertificate, Pdf, PristinePdf, false),
        ],
        "APPL-005" => &[
            (HighSchoolAttestationForm, Webp, GemimgScanWebp, false),
            (CommunityCollegeTranscript, Webp, GemimgScanWebp, false),
            (SophiaLearningTranscript, Txt, RawTextTxt, false),
            (GoogleProjectManagementCertificate, Pdf, PristinePdf, false),
        ],
        "APPL-006" => &[
            (HighSchoolAttestationForm, Pdf, ScannedPdf, false),
            (CommunityCollegeTranscript, Pdf, ScannedPdf, false),
            (SophiaLearningTranscript, Pdf, RawTextPdf, false),
            (GoogleProjectManagementCertificate, Pdf, PristinePdf, false),
        ],
        "APPL-007" => &[
            (HighSchoolAttestationForm, Webp, GemimgScanWebp, false),
            (CommunityCollegeTranscript, Webp, GemimgScanWebp, false),
            (SophiaLearningTranscript, Webp, GemimgScanWebp, true),
            (GoogleProjectManagementCertificate, Webp, GemimgScanWebp, false),
        ],
        "APPL-008" => &[
            (HighSchoolAttestationForm, Webp, GemimgScanWebp, false),
            (CommunityCollegeTranscript, Pdf, ScannedPdf, false),
            (SophiaLearningTranscript, Txt, RawTextTxt, false),
            (GoogleProjectManagementCertificate, Webp, GemimgScanWebp, false),
        ],
        "APPL-009" | "APPL-011" => &[
            (WesCourseByCourseEvaluation, Pdf, PristinePdf, false),
            (ToeflScoreReport, Pdf, PristinePdf, false),
        ],
        "APPL-010" | "APPL-012" => &[
            (EceCourseByCourseEvaluation, Pdf, PristinePdf, false),
            (ToeflScoreReport, Webp, GemimgScanWebp, false),
        ],
        _ => &[],
    }
}

/// Vary delivery formats per applicant so bundles look like real uploads.
pub fn apply_realistic_format_mix(dataset: &mut Dataset) -> Result<()> {
    for applicant in &mut dataset.applicants {
        let plan = variant_plan(&applicant.applicant_id);
        for &(doc_type, format, rendering, single_page_image) in plan {
            let doc = get_doc(applicant, doc_type)?;
            set_doc_variant(doc, format, rendering, single_page_image);
        }
    }
    dataset.dataset_notes.push(
        "Bundle formats intentionally vary by applicant (PDF-only, image-only, mixed PDF/WEBP/TXT) \
         to mimic real submission behavior."
            .into(),
    );
    Ok(())
}

/// Key order of `Structured_Content` for each document type. Notes added
/// after the fact by a format conversion trail everything else.
fn content_key_order(ty: DocumentType) -> &'static [&'static str] {
    match ty {
        DocumentType::Dd214 => &[
            "student_name",
            "document_number",
            "date_range",
            "service_record",
            "summary_lines",
            "notes",
            "visual_profile",
        ],
        DocumentType::Jst => &[
            "student_name",
            "student_id_on_document",
            "summary_lines",
            "raw_text_preview",
            "courses",
            "ace_recommendations",
            "ai_mapping_hints",
            "visual_profile",
            "notes",
        ],
        DocumentType::CompTiaSecurityPlusCertificate | DocumentType::GoogleProjectManagementCertificate => &[
            "student_name",
            "certificate_record",
            "summary_lines",
            "ai_mapping_hints",
            "visual_profile",
            "notes",
        ],
        DocumentType::HighSchoolAttestationForm => &[
            "student_name",
            "summary_lines",
            "signature_block",
            "notes",
            "visual_profile",
        ],
        DocumentType::CommunityCollegeTranscript => &[
            "student_name",
            "student_id_on_document",
            "education_record",
            "gpa_summary",
            "summary_lines",
            "courses",
            "ai_mapping_hints",
            "visual_profile",
            "notes",
        ],
        DocumentType::SophiaLearningTranscript => &[
            "student_name",
            "summary_lines",
            "raw_text_preview",
            "courses",
            "visual_profile",
            "notes",
        ],
        DocumentType::WesCourseByCourseEvaluation | DocumentType::EceCourseByCourseEvaluation => &[
            "student_name",
            "evaluation_record",
            "summary_lines",
            "courses",
            "gpa_summary",
            "ai_mapping_hints",
            "visual_profile",
            "notes",
        ],
        DocumentType::ToeflScoreReport => &[
            "student_name",
            "document_number",
            "summary_lines",
            "scores",
            "notes",
            "visual_profile",
        ],
    }
}

/// `dataset` as JSON, with every `Structured_Content` object laid out in
/// its document type's key order.
pub fn to_ordered_json(dataset: &Dataset) -> Result<Value> {
    let mut value = serde_json::to_value(dataset)?;
    let raw_applicants = value.get_mut("applicants").and_then(Value::as_array_mut);
    for (applicant, raw) in dataset.applicants.iter().zip(raw_applicants.into_iter().flatten()) {
        let raw_docs = raw.get_mut("Document_Bundle").and_then(Value::as_array_mut);
        for (doc, raw_doc) in applicant.document_bundle.iter().zip(raw_docs.into_iter().flatten()) {
            if let Some(Value::Object(content)) = raw_doc.get_mut("Structured_Content") {
                let order = content_key_order(doc.document_type);
                let mut entries: Vec<_> = std::mem::take(content).into_iter().collect();
                entries.sort_by_key(|(key, _)| order.iter().position(|k| *k == key.as_str()).unwrap_or(order.len()));
                content.extend(entries);
            }
        }
    }
    Ok(value)
}

/// Pretty-print `payload` to `path` with a trailing newline, creating parents.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, payload: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut body = serde_json::to_string_pretty(payload)?;
    body.push('\n');
    fs::write(path, body)?;
    Ok(())
}

/// What [`generate`] wrote.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Where the schema was written.
    pub schema_path: PathBuf,
    /// Where the dataset was written.
    pub data_path: PathBuf,
    /// Number of applicants.
    pub applicants: usize,
    /// Applicants per archetype.
    pub archetypes: BTreeMap<ArchetypeCode, usize>,
    /// Number of documents across all bundles.
    pub documents: usize,
}

impl fmt::Display for GenerateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |code| self.archetypes.get(&code).copied().unwrap_or(0);
        write!(
            f,
            "Applicants: {} total (A={}, B={}, C={}); Documents: {}",
            self.applicants,
            count(ArchetypeCode::A),
            count(ArchetypeCode::B),
            count(ArchetypeCode::C),
            self.documents
        )
    }
}

/// Build, mix and validate the dataset, then write schema and data under `out_dir`.
pub fn generate(out_dir: &Path) -> Result<GenerateSummary> {
    let schema = schema::build_schema();
    let mut dataset = build_dataset();
    apply_realistic_format_mix(&mut dataset)?;
    let payload = to_ordered_json(&dataset)?;
    schema::validate(&schema, &payload)?;

    let schema_path = out_dir.join(SCHEMA_FILE);
    let data_path = out_dir.join(DATA_FILE);
    write_json(&schema_path, &schema)?;
    write_json(&data_path, &payload)?;
    log::info!(
        "wrote {} and {}",
        schema_path.display(),
        data_path.display()
    );

    let mut archetypes = BTreeMap::new();
    for applicant in &dataset.applicants {
        *archetypes.entry(applicant.archetype_code).or_insert(0) += 1;
    }

    Ok(GenerateSummary {
        schema_path,
        data_path,
        applicants: dataset.applicants.len(),
        archetypes,
        documents: dataset.document_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mixed() -> Dataset {
        let mut dataset = build_dataset();
        apply_realistic_format_mix(&mut dataset).unwrap();
        dataset
    }

    fn doc(dataset: &mut Dataset, applicant: usize, ty: DocumentType) -> Document {
        get_doc(&mut dataset.applicants[applicant], ty).unwrap().clone()
    }

    #[test]
    fn twelve_applicants_across_three_archetypes() {
        let dataset = build_dataset();
        let ids: Vec<_> = dataset.applicants.iter().map(|a| a.applicant_id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"APPL-001"));
        assert_eq!(ids.last(), Some(&"APPL-012"));
        assert_eq!(dataset.applicants.len(), schema::APPLICANT_COUNT);
        assert_eq!(dataset.document_count(), 36);

        let codes: Vec<_> = dataset.applicants.iter().map(|a| a.archetype_code).collect();
        assert_eq!(&codes[..4], &[ArchetypeCode::A; 4]);
        assert_eq!(&codes[4..8], &[ArchetypeCode::B; 4]);
        assert_eq!(&codes[8..], &[ArchetypeCode::C; 4]);

        assert_eq!(dataset.applicants[0].document_bundle[1].document_id, "APPL-001-D2");
        assert_eq!(dataset.applicants[1].persona.preferred_name, "Ashley");
    }

    #[test]
    fn expected_outputs_match_archetype() {
        let dataset = build_dataset();
        let a = &dataset.applicants[0].expected_ai_output;
        assert_eq!(a.proposed_transfer_credits_total, 12.0);
        assert_eq!(a.mapped_courses.len(), 4);

        let b = &dataset.applicants[4].expected_ai_output;
        assert_eq!(b.proposed_transfer_credits_total, 18.0);
        assert_eq!(b.mapped_courses.len(), 6);

        let c = &dataset.applicants[9].expected_ai_output;
        let last = c.mapped_courses.last().unwrap();
        assert_eq!(last.proposed_college_course_code, "ENGL-PROF");
        assert_eq!(last.credits, 0.0);
        assert_eq!(
            dataset.applicants[9].document_bundle[0].document_type,
            DocumentType::EceCourseByCourseEvaluation
        );
    }

    #[test]
    fn visual_omits_zero_fields() {
        let v = visual(VisualStyle::PristineDigital, "bright_white", ArtifactLevel::None, 0.0, 0.0, "");
        assert_eq!(v.rotation_degrees, None);
        assert_eq!(v.blur_px, None);
        assert_eq!(v.notes, None);
        let v = visual(VisualStyle::ScannedPhoto, "gray_white", ArtifactLevel::Heavy, -1.6, 0.6, "x");
        assert_eq!(v.rotation_degrees, Some(-1.6));
    }

    #[test]
    fn txt_variant_swaps_suffix_and_drops_prompt() {
        let mut dataset = mixed();
        let jst = doc(&mut dataset, 0, DocumentType::Jst);
        assert_eq!(jst.document_format, DocumentFormat::Txt);
        assert_eq!(jst.rendering_method, RenderingMethod::RawTextTxt);
        assert_eq!(jst.output_file_name, "JST_MRivera_2024-11-12.txt");
        assert_eq!(jst.gemimg_prompt, None);
        assert!(jst
            .structured_content
            .notes
            .unwrap()
            .iter()
            .any(|n| n.contains("plain-text export")));

        let dd214 = doc(&mut dataset, 1, DocumentType::Dd214);
        assert_eq!(dd214.rendering_method, RenderingMethod::ScannedPdf);
        assert_eq!(dd214.output_file_name, "scan_ashley_kim_dd214_final.pdf");
        assert_eq!(dd214.gemimg_prompt, None);
    }

    #[test]
    fn single_page_capture_collapses_pages_and_infers_prompt() {
        let mut dataset = mixed();
        let jst = doc(&mut dataset, 2, DocumentType::Jst);
        assert_eq!(jst.page_count, 1);
        assert_eq!(jst.output_file_name, "Turner_Darnell_JST_unofficial.webp");
        let prompt = jst.gemimg_prompt.unwrap();
        assert!(prompt.contains("MOS 42A Human Resources Specialist"));
        assert!(prompt.ends_with("Synthetic demo document for Darnell Turner."));
        assert!(jst
            .structured_content
            .notes
            .unwrap()
            .iter()
            .any(|n| n.starts_with("Applicant uploaded a single image capture")));

        let transcript = doc(&mut dataset, 4, DocumentType::CommunityCollegeTranscript);
        assert!(transcript
            .gemimg_prompt
            .unwrap()
            .contains("Include subtle copier dust"));
    }

    #[test]
    fn missing_document_type_is_an_error() {
        let mut dataset = build_dataset();
        let err = get_doc(&mut dataset.applicants[0], DocumentType::ToeflScoreReport).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Document type not found for APPL-001: TOEFL_Score_Report"
        );
    }

    #[test]
    fn mixed_dataset_passes_schema() {
        let dataset = mixed();
        assert_eq!(dataset.dataset_notes.len(), 4);
        schema::validate_dataset(&dataset).unwrap();
    }

    #[test]
    fn generate_writes_schema_and_data() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate(dir.path()).unwrap();
        assert_eq!(
            summary.to_string(),
            "Applicants: 12 total (A=4, B=4, C=4); Documents: 36"
        );

        let raw = fs::read_to_string(&summary.data_path).unwrap();
        assert!(raw.ends_with("}\n"));
        let reloaded = Dataset::load(&summary.data_path).unwrap();
        assert_eq!(reloaded, mixed());
        assert!(summary.schema_path.is_file());
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn written_objects_keep_builder_key_order() {
        let json = to_ordered_json(&mixed()).unwrap();
        let bundle = |applicant: usize| json["applicants"][applicant]["Document_Bundle"].as_array().unwrap();

        let dd214 = &bundle(0)[0];
        assert_eq!(keys(dd214).last(), Some(&"Gemimg_Prompt"));
        assert_eq!(
            keys(&dd214["Structured_Content"]),
            ["student_name", "document_number", "date_range", "service_record", "summary_lines", "notes", "visual_profile"]
        );

        let jst = &bundle(0)[1]["Structured_Content"];
        assert_eq!(keys(jst).last(), Some(&"notes"));

        let toefl = &bundle(8)[1]["Structured_Content"];
        assert_eq!(
            keys(toefl),
            ["student_name", "document_number", "summary_lines", "scores", "notes", "visual_profile"]
        );
        assert_eq!(toefl["scores"][0]["score"], serde_json::json!(26));
        assert!(!serde_json::to_string(&toefl["scores"]).unwrap().contains(".0"));

        let evaluation = &bundle(8)[0]["Structured_Content"];
        assert_eq!(
            keys(evaluation)[..5],
            ["student_name", "evaluation_record", "summary_lines", "courses", "gpa_summary"]
        );
    }
}
