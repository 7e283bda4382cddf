//! Render a whole dataset into applicant folders plus manifests and previews.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::dataset::write_json;
use crate::error::Result;
use crate::gemimg::{self, GemimgJob};
use crate::manifest::{ApplicantRecord, BundleMixSummary, GemimgJobs, RenderManifest, RenderedDocument};
use crate::model::{Applicant, Dataset, DocumentFormat, RenderingMethod};
use crate::preview::make_contact_sheet;
use crate::renderer::{render_document, Engine, RenderOptions};
use crate::text::slugify;

/// At most this many scan images go on the contact sheet.
const CONTACT_SHEET_LIMIT: usize = 12;

const HELPER_SCRIPT: &str = concat!(
    "#!/usr/bin/env bash\n",
    "set -euo pipefail\n",
    "COUNT=\"${1:-3}\"\n",
    "OUT_DIR=\"$(dirname \"$0\")/gemimg_samples\"\n",
    "mkdir -p \"$OUT_DIR\"\n",
    "echo \"Use: set -a && source .env && set +a && credit-fixtures render --gemimg-samples $COUNT\"\n",
);

/// Where and how to render.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Folder that receives one sub-folder per applicant. Manifests and
    /// previews go next to it.
    pub output_dir: PathBuf,
    /// Paths in the manifest are written relative to this directory.
    pub root: PathBuf,
    /// Base seed for the per-document noise generators.
    pub seed: u64,
    /// Preview generations to attempt after rendering.
    pub gemimg_samples: usize,
    /// Backend selection and gemimg command.
    pub options: RenderOptions,
}

impl RenderConfig {
    /// Defaults: root `.`, seed 42, no samples, local WEBP backend.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            root: PathBuf::from("."),
            seed: 42,
            gemimg_samples: 0,
            options: RenderOptions::default(),
        }
    }

    fn data_root(&self) -> PathBuf {
        self.output_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `manifests/` next to the output directory.
    pub fn manifests_dir(&self) -> PathBuf {
        self.data_root().join("manifests")
    }

    /// `previews/` next to the output directory.
    pub fn previews_dir(&self) -> PathBuf {
        self.data_root().join("previews")
    }

    /// The render manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifests_dir().join("render_manifest.json")
    }

    /// The gemimg job list.
    pub fn jobs_path(&self) -> PathBuf {
        self.manifests_dir().join("gemimg_jobs.json")
    }

    /// The scan contact sheet.
    pub fn contact_sheet_path(&self) -> PathBuf {
        self.previews_dir().join("scan_contact_sheet.webp")
    }

    /// `path` relative to the configured root, for display and manifests.
    pub fn relative(&self, path: &Path) -> String {
        relative_to(path, &self.root)
    }
}

/// `path` with `root` stripped, or unchanged when it lies outside `root`.
pub fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .display()
        .to_string()
}

/// Seed for one document's noise, independent of render order.
pub fn document_seed(seed: u64, document_id: &str) -> u64 {
    // FNV-1a
    seed.to_le_bytes()
        .iter()
        .chain(document_id.as_bytes())
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
        })
}

struct RenderedApplicant {
    record: ApplicantRecord,
    engines: Vec<Engine>,
    scans: Vec<PathBuf>,
    jobs: Vec<GemimgJob>,
}

struct Progress {
    done: AtomicUsize,
    total: usize,
}

fn render_applicant(
    applicant: &Applicant,
    position: usize,
    applicant_total: usize,
    config: &RenderConfig,
    progress: &Progress,
) -> Result<RenderedApplicant> {
    let slug = slugify(&applicant.persona.full_name);
    let folder = config
        .output_dir
        .join(format!("{}_{}", applicant.applicant_id, slug));
    fs::create_dir_all(&folder)?;

    let mut documents = Vec::with_capacity(applicant.document_bundle.len());
    let mut format_counts = BTreeMap::new();
    let mut engines = Vec::new();
    let mut scans = Vec::new();
    let mut jobs = Vec::new();

    for doc in &applicant.document_bundle {
        let out_path = folder.join(&doc.output_file_name);
        let k = progress.done.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!(
            "[{k}/{}] Rendering {} {} -> {}",
            progress.total,
            applicant.applicant_id,
            doc.document_id,
            doc.output_file_name
        );

        let mut rng = StdRng::seed_from_u64(document_seed(config.seed, &doc.document_id));
        let outcome = render_document(doc, &out_path, &mut rng, &config.options)?;
        engines.push(outcome.engine);
        *format_counts.entry(doc.document_format).or_insert(0) += 1;

        documents.push(RenderedDocument {
            document_id: doc.document_id.clone(),
            document_type: doc.document_type,
            document_format: doc.document_format,
            rendering_method: doc.rendering_method,
            render_engine: outcome.engine,
            render_status: outcome.status,
            output_file: config.relative(&out_path),
        });

        if doc.document_format == DocumentFormat::Webp {
            scans.push(out_path.clone());
        }
        let has_prompt = doc.gemimg_prompt.as_deref().is_some_and(|p| !p.is_empty());
        if doc.rendering_method == RenderingMethod::GemimgScanWebp && has_prompt {
            jobs.push(GemimgJob::new(doc, config.relative(&out_path)));
        }
    }

    let record = ApplicantRecord {
        applicant_id: applicant.applicant_id.clone(),
        archetype_code: applicant.archetype_code,
        archetype_label: applicant.archetype_label.clone(),
        folder: config.relative(&folder),
        documents,
        format_mix: format_counts.keys().copied().collect(),
        format_counts,
    };
    log::info!(
        "  -> mix for {} (applicant {position}/{applicant_total}): pdf={}, webp={}, txt={}",
        record.applicant_id,
        record.count(DocumentFormat::Pdf),
        record.count(DocumentFormat::Webp),
        record.count(DocumentFormat::Txt),
    );

    Ok(RenderedApplicant {
        record,
        engines,
        scans,
        jobs,
    })
}

fn write_helper_script(path: &Path) -> Result<()> {
    fs::write(path, HELPER_SCRIPT)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

/// Render every document of `dataset` and write the manifests.
///
/// Applicants render in parallel. A failing local renderer aborts the
/// run; gemimg failures fall back per document.
pub fn render_dataset(dataset: &Dataset, config: &RenderConfig) -> Result<RenderManifest> {
    let manifests_dir = config.manifests_dir();
    let previews_dir = config.previews_dir();
    for dir in [&config.output_dir, &manifests_dir, &previews_dir] {
        fs::create_dir_all(dir)?;
    }

    let progress = Progress {
        done: AtomicUsize::new(0),
        total: dataset.document_count(),
    };
    let applicant_total = dataset.applicants.len();
    let rendered = dataset
        .applicants
        .par_iter()
        .enumerate()
        .map(|(i, applicant)| render_applicant(applicant, i + 1, applicant_total, config, &progress))
        .collect::<Result<Vec<_>>>()?;

    let mut applicants = Vec::with_capacity(rendered.len());
    let mut mix = BundleMixSummary::default();
    let mut engine_counts = BTreeMap::new();
    let mut scans = Vec::new();
    let mut jobs = Vec::new();
    for part in rendered {
        mix.add(&part.record.format_mix);
        for engine in part.engines {
            *engine_counts.entry(engine).or_insert(0) += 1;
        }
        scans.extend(part.scans);
        jobs.extend(part.jobs);
        applicants.push(part.record);
    }
    let total_documents = engine_counts.values().sum();

    let jobs = GemimgJobs { jobs };
    write_json(&config.jobs_path(), &jobs)?;
    write_helper_script(&previews_dir.join("run_gemimg_samples.sh"))?;

    let sheet_path = config.contact_sheet_path();
    let scans = &scans[..scans.len().min(CONTACT_SHEET_LIMIT)];
    let preview_contact_sheet = make_contact_sheet(scans, &sheet_path)?
        .then(|| config.relative(&sheet_path));

    let gemimg_sample_results = if config.gemimg_samples > 0 && !jobs.jobs.is_empty() {
        gemimg::run_samples(
            &config.options.gemimg,
            &jobs.jobs,
            &previews_dir.join("gemimg_samples"),
            config.gemimg_samples,
        )?
    } else {
        Vec::new()
    };

    let manifest = RenderManifest {
        dataset_id: dataset.dataset_id.clone(),
        generated_on: dataset.generated_on.clone(),
        rendered_to: config.output_dir.display().to_string(),
        manifests_dir: manifests_dir.display().to_string(),
        previews_dir: previews_dir.display().to_string(),
        webp_backend: config.options.webp_backend,
        total_applicants: applicants.len(),
        applicants,
        total_documents,
        gemimg_job_count: jobs.jobs.len(),
        bundle_mix_summary: mix,
        render_engine_counts: engine_counts,
        preview_contact_sheet,
        gemimg_sample_results,
    };
    write_json(&config.manifest_path(), &manifest)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_depend_on_seed_and_document() {
        let a = document_seed(42, "APPL-001-D1");
        assert_eq!(a, document_seed(42, "APPL-001-D1"));
        assert_ne!(a, document_seed(43, "APPL-001-D1"));
        assert_ne!(a, document_seed(42, "APPL-001-D2"));
    }

    #[test]
    fn layout_hangs_off_the_output_parent() {
        let config = RenderConfig::new("data/applicants");
        assert_eq!(config.manifests_dir(), Path::new("data/manifests"));
        assert_eq!(config.previews_dir(), Path::new("data/previews"));
        assert_eq!(
            config.contact_sheet_path(),
            Path::new("data/previews/scan_contact_sheet.webp")
        );
    }

    #[test]
    fn paths_are_relative_to_root() {
        let mut config = RenderConfig::new("./data/applicants");
        assert_eq!(config.relative(Path::new("./data/applicants/x.pdf")), "data/applicants/x.pdf");
        config.root = PathBuf::from("/srv/repo");
        assert_eq!(config.relative(Path::new("/srv/repo/data/x.pdf")), "data/x.pdf");
        assert_eq!(config.relative(Path::new("/elsewhere/x.pdf")), "/elsewhere/x.pdf");
    }

    #[cfg(unix)]
    #[test]
    fn helper_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_gemimg_samples.sh");
        write_helper_script(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert!(fs::read_to_string(&path).unwrap().starts_with("#!/usr/bin/env bash\n"));
    }
}
