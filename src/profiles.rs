//! Literal persona data for the twelve synthetic applicants.
//!
//! Every name, identifier and credential here is fictitious.

use crate::dataset::{course, mapping};
use crate::model::{Course, Mapping};

pub struct VeteranProfile {
    pub name: &'static str,
    pub component: &'static str,
    pub rank: &'static str,
    pub service_start: &'static str,
    pub service_end: &'static str,
    pub deployments: u32,
    /// Shifts the JST training years.
    pub offset: i32,
    pub jst_issue_date: &'static str,
    pub secplus_issue_date: &'static str,
    pub secplus_expiry: &'static str,
    pub secplus_id: &'static str,
    pub jst_id: &'static str,
    pub dd214_number: &'static str,
    pub dd214_file: &'static str,
    pub jst_file: &'static str,
    pub secplus_file: &'static str,
    pub target_program: &'static str,
    pub career_goal: &'static str,
    pub storyline: &'static str,
}

pub struct ScncProfile {
    pub name: &'static str,
    pub hs_issuer: &'static str,
    pub hs_signer: &'static str,
    pub hs_attestation_date: &'static str,
    pub hs_file: &'static str,
    pub cc_name: &'static str,
    pub cc_student_id: &'static str,
    pub cc_year_1: i32,
    pub cc_year_2: i32,
    pub cc_term_1_label: &'static str,
    pub cc_term_2_label: &'static str,
    pub psy_grade: &'static str,
    pub eng_grade: &'static str,
    pub alg_grade: &'static str,
    pub cis_grade: &'static str,
    pub cc_gpa: f64,
    pub cc_issue_date: &'static str,
    pub cc_file: &'static str,
    pub sophia_issue_date: &'static str,
    pub sophia_file: &'static str,
    pub google_issue_date: &'static str,
    pub google_cred_id: &'static str,
    pub google_file: &'static str,
    pub career_goal: &'static str,
    pub storyline: &'static str,
}

/// TOEFL iBT section scores.
pub struct ToeflBreakdown {
    pub reading: u32,
    pub listening: u32,
    pub speaking: u32,
    pub writing: u32,
}

pub struct InternationalProfile {
    pub name: &'static str,
    /// `WES` or `ECE`.
    pub agency: &'static str,
    pub country: &'static str,
    pub institution: &'static str,
    pub credential: &'static str,
    pub us_equivalency: &'static str,
    pub us_gpa: f64,
    pub report_date: &'static str,
    pub ref_number: &'static str,
    pub eval_file: &'static str,
    pub eval_credits: f64,
    pub evaluated_courses: Vec<Course>,
    pub eval_mapping_hints: Vec<Mapping>,
    pub toefl_date: &'static str,
    pub toefl_registration: &'static str,
    pub toefl_breakdown: ToeflBreakdown,
    pub toefl_total: u32,
    pub toefl_file: &'static str,
    pub target_program: &'static str,
    pub proposed_transfer_total: f64,
    pub career_goal: &'static str,
    pub storyline: &'static str,
}

pub fn veterans() -> Vec<VeteranProfile> {
    vec![
        VeteranProfile {
            name: "Miguel Rivera",
            component: "Active Duty",
            rank: "SSG / E-6",
            service_start: "2006-08-15",
            service_end: "2014-09-30",
            deployments: 1,
            offset: 0,
            jst_issue_date: "2024-11-12",
            secplus_issue_date: "2025-06-21",
            secplus_expiry: "2028-06-21",
            secplus_id: "COMP-SEC-8A1R-1927",
            jst_id: "JST-AR-5729441",
            dd214_number: "DD214-8471-AR-2006",
            dd214_file: "IMG_1044_dd214_rivera.webp",
            jst_file: "JST_MRivera_2024-11-12.pdf",
            secplus_file: "CompTIA_SecurityPlus_Miguel_Rivera.pdf",
            target_program: "BS in Information Technologies",
            career_goal: "Move from Army HR operations into corporate HRIS and cybersecurity-aware IT support roles.",
            storyline: "Veteran with strong personnel records experience wants a business/IT degree path without losing military credit.",
        },
        VeteranProfile {
            name: "Ashley Kim",
            component: "Army Reserve",
            rank: "SGT / E-5",
            service_start: "2009-03-10",
            service_end: "2018-05-18",
            deployments: 0,
            offset: 1,
            jst_issue_date: "2025-01-09",
            secplus_issue_date: "2025-09-04",
            secplus_expiry: "2028-09-04",
            secplus_id: "COMP-SEC-4K2M-0083",
            jst_id: "JST-AK-4482020",
            dd214_number: "DD214-1120-AK-2009",
            dd214_file: "scan_ashley_kim_dd214_final.webp",
            jst_file: "JST_AKim_reserve_copy.pdf",
            secplus_file: "SecurityPlus_Certificate_AshleyKim_2025.pdf",
            target_program: "BS in Business Administration",
            career_goal: "Pivot into HR operations and compliance technology roles in a healthcare employer.",
            storyline: "Reserve service and recent IT certification create a mixed HR/IT profile that benefits from fast cross-walking.",
        },
        VeteranProfile {
            name: "Darnell Turner",
            component: "Active Duty",
            rank: "SFC / E-7",
            service_start: "2004-01-12",
            service_end: "2016-02-01",
            deployments: 2,
            offset: -1,
            jst_issue_date: "2024-08-28",
            secplus_issue_date: "2024-12-10",
            secplus_expiry: "2027-12-10",
            secplus_id: "COMP-SEC-7D9T-5512",
            jst_id: "JST-DT-3319475",
            dd214_number: "DD214-5399-DT-2004",
            dd214_file: "phone-photo_dd214_turner.webp",
            jst_file: "Turner_Darnell_JST_unofficial.pdf",
            secplus_file: "comptia_security_plus_turner.pdf",
            target_program: "BS in Business Administration",
            career_goal: "Translate military personnel leadership into civilian HR management while keeping IT security credibility.",
            storyline: "Senior NCO HR specialist needs rapid review of ACE and certification credit to choose the best degree track.",
        },
        VeteranProfile {
            name: "Brianna Patel",
            component: "National Guard",
            rank: "SSG / E-6",
            service_start: "2010-07-06",
            service_end: "2022-10-14",
            deployments: 1,
            offset: 2,
            jst_issue_date: "2025-03-03",
            secplus_issue_date: "2025-11-16",
            secplus_expiry: "2028-11-16",
            secplus_id: "COMP-SEC-2P7L-7644",
            jst_id: "JST-BP-9021547",
            dd214_number: "DD214-2886-BP-2010",
            dd214_file: "BPatel_DD214_scan.webp",
            jst_file: "JST_BriannaPatel_guard.pdf",
            secplus_file: "BriannaPatel_SecurityPlus_Credential.pdf",
            target_program: "BS in Information Technologies",
            career_goal: "Advance from administrative roles into IT governance and systems security support.",
            storyline: "Guard HR specialist completed Security+ and wants immediate visibility into transfer credit before enrolling.",
        },
    ]
}

pub fn scncs() -> Vec<ScncProfile> {
    vec![
        ScncProfile {
            name: "Nicole Hernandez",
            hs_issuer: "Springfield Adult Learning Center",
            hs_signer: "L. McCarthy",
            hs_attestation_date: "2025-09-11",
            hs_file: "hs_attestation_signed_nhernandez.webp",
            cc_name: "Bunker Hill Community College",
            cc_student_id: "BH-00492177",
            cc_year_1: 2007,
            cc_year_2: 2008,
            cc_term_1_label: "Fall",
            cc_term_2_label: "Spring",
            psy_grade: "B+",
            eng_grade: "B",
            alg_grade: "C+",
            cis_grade: "A-",
            cc_gpa: 3.11,
            cc_issue_date: "2025-10-02",
            cc_file: "scan0001_BHCC_transcript_2008.webp",
            sophia_issue_date: "2025-12-06",
            sophia_file: "SophiaLearning-Transcript-NH-2025.pdf",
            google_issue_date: "2025-11-21",
            google_cred_id: "GPM-NH-8452-2025",
            google_file: "Google_Project_Management_Certificate_Nicole_Hernandez.pdf",
            career_goal: "Move from office coordinator work into operations/project management with a bachelor's pathway.",
            storyline: "Classic SCNC profile: old community college credits, new online upskilling, and a high-value Google PM certificate.",
        },
        ScncProfile {
            name: "Brandon ONeal",
            hs_issuer: "Metro Regional Adult Education Program",
            hs_signer: "T. Alvarez",
            hs_attestation_date: "2025-08-19",
            hs_file: "attestation_form_boneal_scan.webp",
            cc_name: "Middlesex Community College",
            cc_student_id: "MX-7712043",
            cc_year_1: 2004,
            cc_year_2: 2005,
            cc_term_1_label: "Fall",
            cc_term_2_label: "Spring",
            psy_grade: "A-",
            eng_grade: "B-",
            alg_grade: "B",
            cis_grade: "B+",
            cc_gpa: 3.22,
            cc_issue_date: "2025-09-30",
            cc_file: "mcc_old_transcript_copy_2005.webp",
            sophia_issue_date: "2025-11-27",
            sophia_file: "BrandonONeal_Sophia_Transcript.pdf",
            google_issue_date: "2025-10-18",
            google_cred_id: "GPM-BO-1922-2025",
            google_file: "BrandonONeal_GooglePM_ProfCert.pdf",
            career_goal: "Grow from warehouse team lead to operations project coordinator in manufacturing.",
            storyline: "Has old credits and recent self-paced coursework but needs quick clarity on what still counts.",
        },
        ScncProfile {
            name: "Tasha Nguyen",
            hs_issuer: "North Shore Adult Diploma Office",
            hs_signer: "R. Patel",
            hs_attestation_date: "2025-07-08",
            hs_file: "HS_completion_attestation_tnguyen.webp",
            cc_name: "Northern Essex Community College",
            cc_student_id: "NE-229915",
            cc_year_1: 2002,
            cc_year_2: 2003,
            cc_term_1_label: "Spring",
            cc_term_2_label: "Fall",
            psy_grade: "B",
            eng_grade: "A-",
            alg_grade: "C",
            cis_grade: "B",
            cc_gpa: 2.94,
            cc_issue_date: "2025-09-04",
            cc_file: "NECC_transcript_scanned_03.webp",
            sophia_issue_date: "2025-10-29",
            sophia_file: "SophiaTranscript_TNguyen_102925.pdf",
            google_issue_date: "2025-12-01",
            google_cred_id: "GPM-TN-7710-2025",
            google_file: "GooglePMCert_TashaNguyen.pdf",
            career_goal: "Transition from customer service supervision to project operations and process improvement.",
            storyline: "Long gap since community college makes the AI transcript read/normalize capability especially compelling.",
        },
        ScncProfile {
            name: "Kevin Morales",
            hs_issuer: "City Schools Records Verification Office",
            hs_signer: "J. Bennett",
            hs_attestation_date: "2025-10-03",
            hs_file: "kmorales_hs_attestation_scan.webp",
            cc_name: "Quinsigamond Community College",
            cc_student_id: "QCC-518884",
            cc_year_1: 2009,
            cc_year_2: 2010,
            cc_term_1_label: "Fall",
            cc_term_2_label: "Spring",
            psy_grade: "A",
            eng_grade: "B+",
            alg_grade: "B-",
            cis_grade: "A-",
            cc_gpa: 3.45,
            cc_issue_date: "2025-11-14",
            cc_file: "qcc_transcript_2010_scan-copy.webp",
            sophia_issue_date: "2025-12-19",
            sophia_file: "KMorales_Sophia_Learning_Transcript.pdf",
            google_issue_date: "2025-12-09",
            google_cred_id: "GPM-KM-3348-2025",
            google_file: "Google_Project_Mgmt_Certificate_KMorales.pdf",
            career_goal: "Advance from field service logistics to operations program management.",
            storyline: "Strong mix of older academic credits and modern credentialing for a dramatic credit-jump demo.",
        },
    ]
}

fn evaluated(agency: &str, code: &str, title: &str) -> Course {
    course(code, title, "Evaluated", 2025, 3.0, None)
        .evaluated()
        .source(agency)
}

pub fn internationals() -> Vec<InternationalProfile> {
    vec![
        InternationalProfile {
            name: "Priya Nair",
            agency: "WES",
            country: "India",
            institution: "University of Mumbai",
            credential: "Bachelor of Commerce",
            us_equivalency: "U.S. Bachelor's degree (4 years) in Business Administration",
            us_gpa: 3.18,
            report_date: "2025-11-05",
            ref_number: "WES-7349912",
            eval_file: "WES_CourseByCourse_PriyaNair.pdf",
            eval_credits: 90.0,
            evaluated_courses: vec![
                evaluated("WES", "WES-EVAL-ACC", "Financial Accounting"),
                evaluated("WES", "WES-EVAL-MKT", "Principles of Marketing"),
                evaluated("WES", "WES-EVAL-MGMT", "Principles of Management"),
                evaluated("WES", "WES-EVAL-ECON", "Microeconomics"),
            ],
            eval_mapping_hints: vec![
                mapping(
                    "WES course equivalency: Financial Accounting",
                    "ACC-201",
                    "Financial Accounting",
                    3.0,
                    "Evaluator identifies equivalent lower-division accounting coursework.",
                ),
                mapping(
                    "WES course equivalency: Principles of Management",
                    "BUS-210",
                    "Managing and Leading in Business",
                    3.0,
                    "Management fundamentals align to business core outcomes.",
                ),
            ],
            toefl_date: "2025-09-17",
            toefl_registration: "ETS-IBT-99150012",
            toefl_breakdown: ToeflBreakdown {
                reading: 26,
                listening: 24,
                speaking: 23,
                writing: 25,
            },
            toefl_total: 98,
            toefl_file: "TOEFL_iBT_PriyaNair_2025.pdf",
            target_program: "BS in Business Administration",
            proposed_transfer_total: 60.0,
            career_goal: "Move into U.S.-based operations and finance management after relocating.",
            storyline: "International applicant needs simultaneous credential evaluation ingestion and English proficiency verification.",
        },
        InternationalProfile {
            name: "Wei Chen",
            agency: "ECE",
            country: "China",
            institution: "Shanghai Open University",
            credential: "Associate Degree in Information Technology",
            us_equivalency: "U.S. Associate degree in Information Technology",
            us_gpa: 3.01,
            report_date: "2025-10-21",
            ref_number: "ECE-8821045",
            eval_file: "ECE_Evaluation_WeiChen_course_by_course.pdf",
            eval_credits: 63.0,
            evaluated_courses: vec![
                evaluated("ECE", "ECE-EVAL-PROG", "Programming Fundamentals"),
                evaluated("ECE", "ECE-EVAL-NET", "Computer Networking"),
                evaluated("ECE", "ECE-EVAL-DB", "Database Concepts"),
                evaluated("ECE", "ECE-EVAL-MATH", "Discrete Mathematics"),
            ],
            eval_mapping_hints: vec![
                mapping(
                    "ECE evaluated course: Computer Networking",
                    "IT-212",
                    "Introduction to Computer Networks",
                    3.0,
                    "Evaluator course equivalency aligns with lower-division networking outcomes.",
                ),
                mapping(
                    "ECE evaluated course: Database Concepts",
                    "IT-235",
                    "Database Design",
                    3.0,
                    "Database fundamentals are suitable for transfer articulation review.",
                ),
            ],
            toefl_date: "2025-08-28",
            toefl_registration: "ETS-IBT-99200418",
            toefl_breakdown: ToeflBreakdown {
                reading: 23,
                listening: 22,
                speaking: 21,
                writing: 24,
            },
            toefl_total: 90,
            toefl_file: "TOEFL_WeiChen_official_score_report.pdf",
            target_program: "BS in Information Technologies",
            proposed_transfer_total: 45.0,
            career_goal: "Complete a U.S. IT bachelor's while working in technical support.",
            storyline: "ECE report plus TOEFL lets the AI intake both transfer and language documentation in one pass.",
        },
        InternationalProfile {
            name: "Maria Lopes",
            agency: "WES",
            country: "Brazil",
            institution: "Universidade Paulista",
            credential: "Tecnologo em Logistica",
            us_equivalency: "U.S. Associate degree in Logistics / Operations",
            us_gpa: 3.34,
            report_date: "2025-12-02",
            ref_number: "WES-7411228",
            eval_file: "WES_MariaLopes_CourseByCourse_Report.pdf",
            eval_credits: 66.0,
            evaluated_courses: vec![
                evaluated("WES", "WES-EVAL-LOG", "Logistics Management"),
                evaluated("WES", "WES-EVAL-SCM", "Supply Chain Fundamentals"),
                evaluated("WES", "WES-EVAL-QM", "Quality Management"),
                evaluated("WES", "WES-EVAL-STATS", "Business Statistics"),
            ],
            eval_mapping_hints: vec![
                mapping(
                    "WES evaluated course: Logistics Management",
                    "QSO-330",
                    "Logistics Management",
                    3.0,
                    "Evaluator's translated course content matches logistics management competencies.",
                ),
                mapping(
                    "WES evaluated course: Business Statistics",
                    "QSO/STAT-ELEC",
                    "Business Statistics elective",
                    3.0,
                    "Transferable quantitative business/statistics content.",
                ),
            ],
            toefl_date: "2025-09-29",
            toefl_registration: "ETS-IBT-99087165",
            toefl_breakdown: ToeflBreakdown {
                reading: 24,
                listening: 23,
                speaking: 24,
                writing: 23,
            },
            toefl_total: 94,
            toefl_file: "TOEFL_MariaLopes_ETS_Report.pdf",
            target_program: "BS in Operations Management",
            proposed_transfer_total: 48.0,
            career_goal: "Advance into supply chain and operations leadership in a U.S. employer.",
            storyline: "International transfer into operations management with evaluator report and TOEFL ready for same-day review.",
        },
        InternationalProfile {
            name: "Samuel Ofori",
            agency: "ECE",
            country: "Ghana",
            institution: "Kumasi Technical University",
            credential: "Higher National Diploma in Business Studies",
            us_equivalency: "U.S. Associate degree in Business",
            us_gpa: 2.92,
            report_date: "2025-10-07",
            ref_number: "ECE-8793310",
            eval_file: "ECE_SamuelOfori_Credential_Evaluation.pdf",
            eval_credits: 60.0,
            evaluated_courses: vec![
                evaluated("ECE", "ECE-EVAL-BUSCOM", "Business Communication"),
                evaluated("ECE", "ECE-EVAL-MGMT", "Management Principles"),
                evaluated("ECE", "ECE-EVAL-ACC", "Accounting Principles"),
                evaluated("ECE", "ECE-EVAL-MKT", "Marketing Principles"),
            ],
            eval_mapping_hints: vec![
                mapping(
                    "ECE evaluated course: Management Principles",
                    "BUS-210",
                    "Managing and Leading in Business",
                    3.0,
                    "Foundational management content transfers to business core review.",
                ),
                mapping(
                    "ECE evaluated course: Business Communication",
                    "BUS-COMM-ELEC",
                    "Business Communication elective",
                    3.0,
                    "Communication content is directly relevant to business communication requirements.",
                ),
            ],
            toefl_date: "2025-08-14",
            toefl_registration: "ETS-IBT-99311804",
            toefl_breakdown: ToeflBreakdown {
                reading: 21,
                listening: 23,
                speaking: 22,
                writing: 21,
            },
            toefl_total: 87,
            toefl_file: "SamuelOfori_TOEFL_iBT_ScoreReport.pdf",
            target_program: "BS in Business Administration",
            proposed_transfer_total: 42.0,
            career_goal: "Complete a bachelor's in business while continuing full-time employment.",
            storyline: "International adult learner needs rapid clarity on how prior HND coursework converts into a U.S. degree pathway.",
        },
    ]
}
