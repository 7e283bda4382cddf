//! Per-document rendering: picks the layout for each output format and routes
//! WEBP scans through gemimg when asked, falling back to the local renderer.
use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gemimg::{self, Gemimg};
use crate::layouts::{render_pristine_pdf, render_raw_text_pdf, render_raw_text_txt};
use crate::model::{Document, RenderingMethod};
use crate::scan::{render_scan_webp, render_scanned_pdf};

/// Which backend produces `gemimg_scan_webp` documents.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebpBackend {
    /// Ask gemimg first, fall back to the local renderer on failure.
    Gemimg,
    /// Always use the local scan renderer.
    #[default]
    Local,
}

impl WebpBackend {
    /// Get the name of the backend.
    pub fn name(&self) -> &'static str {
        match self {
            WebpBackend::Gemimg => "gemimg",
            WebpBackend::Local => "local",
        }
    }
}

impl fmt::Display for WebpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What actually produced a rendered file.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Rendered locally as requested.
    Local,
    /// Produced by gemimg.
    Gemimg,
    /// gemimg failed and the local scan renderer stepped in.
    LocalFallback,
}

impl Engine {
    /// Get the name of the engine.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Local => "local",
            Engine::Gemimg => "gemimg",
            Engine::LocalFallback => "local_fallback",
        }
    }
}

/// Whether a document was rendered the way its record asked.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    /// As requested.
    Ok,
    /// Through the local fallback.
    Fallback,
}

/// The options that should be applied when rendering a document.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Backend for `gemimg_scan_webp` documents.
    pub webp_backend: WebpBackend,
    /// The generator used by the gemimg backend.
    pub gemimg: Gemimg,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            webp_backend: WebpBackend::Local,
            gemimg: Gemimg::default(),
        }
    }
}

/// The result of rendering one document.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome {
    /// Engine that wrote the file.
    pub engine: Engine,
    /// Whether a fallback happened.
    pub status: RenderStatus,
    /// Why gemimg was not used, when the local renderer stood in.
    pub error: Option<String>,
    /// Trimmed generator output on gemimg success.
    pub stdout: Option<String>,
}

impl RenderOutcome {
    fn local() -> Self {
        Self {
            engine: Engine::Local,
            status: RenderStatus::Ok,
            error: None,
            stdout: None,
        }
    }
}

/// Render `doc` to `out_path` with the method its record asks for.
///
/// Only the gemimg path can fall back; every local renderer error is
/// returned as-is.
pub fn render_document<R: Rng + ?Sized>(
    doc: &Document,
    out_path: &Path,
    rng: &mut R,
    options: &RenderOptions,
) -> Result<RenderOutcome> {
    match doc.rendering_method {
        RenderingMethod::PristinePdf => render_pristine_pdf(doc, out_path)?,
        RenderingMethod::ScannedPdf => render_scanned_pdf(doc, out_path, rng)?,
        RenderingMethod::RawTextPdf => render_raw_text_pdf(doc, out_path)?,
        RenderingMethod::RawTextTxt => render_raw_text_txt(doc, out_path)?,
        RenderingMethod::GemimgScanWebp if options.webp_backend == WebpBackend::Gemimg => {
            let prompt = gemimg::prompt_for(doc);
            return match options.gemimg.generate(&doc.document_id, &prompt, out_path) {
                Ok(stdout) => Ok(RenderOutcome {
                    engine: Engine::Gemimg,
                    status: RenderStatus::Ok,
                    error: None,
                    stdout: Some(stdout),
                }),
                Err(e) => {
                    log::warn!("{e}; using the local scan renderer");
                    render_scan_webp(doc, out_path, rng)?;
                    Ok(RenderOutcome {
                        engine: Engine::LocalFallback,
                        status: RenderStatus::Fallback,
                        error: Some(e.to_string()),
                        stdout: None,
                    })
                }
            };
        }
        RenderingMethod::GemimgScanWebp | RenderingMethod::SimulatedScanWebp => {
            render_scan_webp(doc, out_path, rng)?
        }
    }
    Ok(RenderOutcome::local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::build_dataset;
    use crate::model::{DocumentFormat, DocumentType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toefl() -> Document {
        let mut doc = build_dataset()
            .applicants
            .into_iter()
            .find(|a| a.applicant_id == "APPL-010")
            .and_then(|a| {
                a.document_bundle
                    .into_iter()
                    .find(|d| d.document_type == DocumentType::ToeflScoreReport)
            })
            .unwrap();
        doc.document_format = DocumentFormat::Webp;
        doc.rendering_method = RenderingMethod::GemimgScanWebp;
        doc
    }

    #[test]
    fn local_backend_renders_scans_locally() {
        let doc = toefl();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("toefl.webp");
        let outcome =
            render_document(&doc, &out, &mut StdRng::seed_from_u64(42), &RenderOptions::default())
                .unwrap();
        assert_eq!(outcome, RenderOutcome::local());
        assert!(out.is_file());
    }

    #[test]
    fn broken_gemimg_falls_back_to_local() {
        let doc = toefl();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("toefl.webp");
        let options = RenderOptions {
            webp_backend: WebpBackend::Gemimg,
            gemimg: Gemimg::from_command_line("definitely-not-a-gemimg-binary", gemimg::DEFAULT_TIMEOUT)
                .unwrap(),
        };
        let outcome = render_document(&doc, &out, &mut StdRng::seed_from_u64(42), &options).unwrap();
        assert_eq!(outcome.engine, Engine::LocalFallback);
        assert_eq!(outcome.status, RenderStatus::Fallback);
        assert!(outcome.error.unwrap().contains(&doc.document_id));
        assert_eq!(&std::fs::read(&out).unwrap()[8..12], b"WEBP");
    }

    #[cfg(unix)]
    #[test]
    fn working_gemimg_is_used() {
        let doc = toefl();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("toefl.webp");
        let options = RenderOptions {
            webp_backend: WebpBackend::Gemimg,
            gemimg: gemimg::tests::working_generator(dir.path()),
        };
        let outcome = render_document(&doc, &out, &mut StdRng::seed_from_u64(42), &options).unwrap();
        assert_eq!(outcome.engine, Engine::Gemimg);
        assert_eq!(outcome.status, RenderStatus::Ok);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.stdout.as_deref(), Some("done"));
        assert_eq!(imagesize::size(&out).unwrap().height, 8);
    }

    #[test]
    fn names_match_manifest_spelling() {
        assert_eq!(Engine::LocalFallback.name(), "local_fallback");
        assert_eq!(
            serde_json::to_value(Engine::LocalFallback).unwrap(),
            serde_json::json!("local_fallback")
        );
        assert_eq!(WebpBackend::Gemimg.to_string(), "gemimg");
    }
}
