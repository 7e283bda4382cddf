use std::fs;
use std::path::Path;
use std::time::Duration;

use credit_fixtures::dataset::{self, DATA_FILE};
use credit_fixtures::gemimg::Gemimg;
use credit_fixtures::manifest::{GemimgJobs, RenderManifest};
use credit_fixtures::model::{Dataset, DocumentFormat};
use credit_fixtures::pipeline::{render_dataset, RenderConfig};
use credit_fixtures::{schema, Engine, RenderOptions, RenderStatus, WebpBackend};
use pretty_assertions::assert_eq;

fn generated(dir: &Path) -> Dataset {
    dataset::generate(&dir.join("data")).unwrap();
    Dataset::load(&dir.join("data").join(DATA_FILE)).unwrap()
}

fn subset(mut dataset: Dataset, ids: &[&str]) -> Dataset {
    dataset
        .applicants
        .retain(|a| ids.contains(&a.applicant_id.as_str()));
    dataset
}

#[test]
fn generated_dataset_round_trips_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generated(dir.path());
    assert_eq!(dataset.applicants.len(), 12);
    assert_eq!(dataset.document_count(), 36);
    schema::validate_dataset(&dataset).unwrap();

    let schema_file = dir.path().join("data").join(dataset::SCHEMA_FILE);
    let schema: serde_json::Value = serde_json::from_str(&fs::read_to_string(schema_file).unwrap()).unwrap();
    assert_eq!(schema["$schema"], "https://json-schema.org/draft/2020-12/schema");
}

#[test]
fn tampered_dataset_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let mut dataset = generated(dir.path());
    dataset.applicants.truncate(3);
    assert!(schema::validate_dataset(&dataset).is_err());
}

#[test]
fn unavailable_gemimg_falls_back_and_manifests_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = subset(generated(dir.path()), &["APPL-001", "APPL-010"]);

    let config = RenderConfig {
        root: dir.path().to_path_buf(),
        gemimg_samples: 2,
        options: RenderOptions {
            webp_backend: WebpBackend::Gemimg,
            gemimg: Gemimg::from_command_line("no-such-gemimg-command", Duration::from_secs(5)).unwrap(),
        },
        ..RenderConfig::new(dir.path().join("data").join("applicants"))
    };
    let manifest = render_dataset(&dataset, &config).unwrap();

    assert_eq!(manifest.total_applicants, 2);
    assert_eq!(manifest.total_documents, 5);
    assert_eq!(manifest.webp_backend, WebpBackend::Gemimg);

    let first = &manifest.applicants[0];
    assert_eq!(first.folder, "data/applicants/APPL-001_Miguel_Rivera");
    assert_eq!(
        first.format_mix,
        vec![DocumentFormat::Pdf, DocumentFormat::Txt, DocumentFormat::Webp]
    );
    for doc in manifest.applicants.iter().flat_map(|a| &a.documents) {
        assert!(dir.path().join(&doc.output_file).is_file(), "{}", doc.output_file);
        if doc.document_format == DocumentFormat::Webp {
            assert_eq!(doc.render_engine, Engine::LocalFallback);
            assert_eq!(doc.render_status, RenderStatus::Fallback);
        } else {
            assert_eq!(doc.render_engine, Engine::Local);
        }
    }
    assert_eq!(manifest.render_engine_counts.get(&Engine::LocalFallback), Some(&2));
    assert_eq!(manifest.bundle_mix_summary.mixed, 2);
    assert_eq!(manifest.bundle_mix_summary.contains_txt, 1);

    assert_eq!(
        manifest.preview_contact_sheet.as_deref(),
        Some("data/previews/scan_contact_sheet.webp")
    );
    assert!(dir.path().join("data/previews/run_gemimg_samples.sh").is_file());

    let jobs: GemimgJobs =
        serde_json::from_str(&fs::read_to_string(config.jobs_path()).unwrap()).unwrap();
    assert_eq!(jobs.jobs.len(), manifest.gemimg_job_count);
    assert!(jobs.jobs.iter().all(|job| !job.prompt.is_empty()));

    assert_eq!(
        manifest.gemimg_sample_results.len(),
        manifest.gemimg_job_count.min(2)
    );

    let written: RenderManifest =
        serde_json::from_str(&fs::read_to_string(config.manifest_path()).unwrap()).unwrap();
    assert_eq!(written, manifest);
}

#[test]
fn local_renders_are_deterministic_per_seed() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = subset(generated(dir.path()), &["APPL-012"]);

    let render_into = |name: &str| {
        let config = RenderConfig {
            root: dir.path().to_path_buf(),
            seed: 7,
            ..RenderConfig::new(dir.path().join(name).join("applicants"))
        };
        let manifest = render_dataset(&dataset, &config).unwrap();
        let webp = manifest.applicants[0]
            .documents
            .iter()
            .find(|d| d.document_format == DocumentFormat::Webp)
            .map(|d| dir.path().join(&d.output_file))
            .unwrap();
        fs::read(webp).unwrap()
    };

    assert!(render_into("first") == render_into("second"));
}
