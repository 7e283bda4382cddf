use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credit_fixtures::dataset::{self, DATA_FILE};
use credit_fixtures::gemimg::{Gemimg, SampleStatus, DEFAULT_COMMAND};
use credit_fixtures::model::Dataset;
use credit_fixtures::pipeline::{relative_to, render_dataset, RenderConfig};
use credit_fixtures::schema;
use credit_fixtures::{RenderOptions, WebpBackend};

#[derive(Parser)]
#[command(
    name = "credit-fixtures",
    about = "Synthetic applicant bundles for transfer credit review demos",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset and its JSON Schema
    Generate {
        /// Directory that receives schema/ and manifests/
        #[arg(long, default_value = "credit-checking/data")]
        out_dir: PathBuf,

        /// Printed paths are relative to this directory
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Check a dataset file against the schema
    Validate {
        /// Dataset JSON
        #[arg(long, default_value = "credit-checking/data/manifests/synthetic_applicant_bundles.json")]
        input: PathBuf,
    },

    /// Render every document of a dataset
    Render {
        /// Dataset JSON
        #[arg(long, default_value = "credit-checking/data/manifests/synthetic_applicant_bundles.json")]
        input: PathBuf,

        /// Applicant folders go here; manifests/ and previews/ go next to it
        #[arg(long, default_value = "credit-checking/data/applicants")]
        output_dir: PathBuf,

        /// Manifest paths are written relative to this directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Backend for gemimg_scan_webp documents
        #[arg(long, value_enum, default_value_t = Backend::Gemimg)]
        webp_backend: Backend,

        /// Seconds before a gemimg invocation is killed
        #[arg(long, default_value_t = 240)]
        gemimg_timeout_sec: u64,

        /// Number of extra gemimg previews to generate
        #[arg(long, default_value_t = 0)]
        gemimg_samples: usize,

        /// Seed for scan noise
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Command used to run gemimg
        #[arg(long, env = "GEMIMG_BIN", default_value = DEFAULT_COMMAND)]
        gemimg_bin: String,

        /// Worker threads (0 = one per core)
        #[arg(long, default_value_t = 0)]
        jobs: usize,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Backend {
    Gemimg,
    Local,
}

impl From<Backend> for WebpBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Gemimg => WebpBackend::Gemimg,
            Backend::Local => WebpBackend::Local,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_fixtures=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { out_dir, root } => {
            let summary = dataset::generate(&out_dir)
                .with_context(|| format!("failed to generate into {}", out_dir.display()))?;
            println!("Wrote schema: {}", relative_to(&summary.schema_path, &root));
            println!("Wrote data:   {}", relative_to(&summary.data_path, &root));
            println!("{summary}");
        }

        Commands::Validate { input } => {
            let dataset = schema::load_validated(&input)
                .with_context(|| format!("{} is not a valid dataset", input.display()))?;
            println!(
                "Valid: {} applicants, {} documents",
                dataset.applicants.len(),
                dataset.document_count()
            );
        }

        Commands::Render {
            input,
            output_dir,
            root,
            webp_backend,
            gemimg_timeout_sec,
            gemimg_samples,
            seed,
            gemimg_bin,
            jobs,
        } => {
            if jobs > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build_global()
                    .context("failed to configure worker threads")?;
            }

            let dataset = Dataset::load(&input).with_context(|| {
                format!(
                    "failed to read {} (run `credit-fixtures generate` to create {DATA_FILE})",
                    input.display()
                )
            })?;
            let gemimg = Gemimg::from_command_line(&gemimg_bin, Duration::from_secs(gemimg_timeout_sec))
                .context("invalid --gemimg-bin")?;

            let config = RenderConfig {
                root,
                seed,
                gemimg_samples,
                options: RenderOptions {
                    webp_backend: webp_backend.into(),
                    gemimg,
                },
                ..RenderConfig::new(output_dir)
            };
            tracing::info!(
                applicants = dataset.applicants.len(),
                documents = dataset.document_count(),
                backend = %config.options.webp_backend,
                "rendering {}",
                input.display()
            );
            let manifest = render_dataset(&dataset, &config).context("rendering failed")?;

            println!(
                "Rendered {} documents for {} applicants -> {}",
                manifest.total_documents,
                manifest.total_applicants,
                config.relative(&config.output_dir)
            );
            println!(
                "Gemimg-ready scan jobs: {} (see {})",
                manifest.gemimg_job_count,
                config.relative(&config.jobs_path())
            );
            if let Some(sheet) = &manifest.preview_contact_sheet {
                println!("Preview contact sheet: {sheet}");
            }
            if !manifest.gemimg_sample_results.is_empty() {
                let ok = manifest
                    .gemimg_sample_results
                    .iter()
                    .filter(|r| r.status == SampleStatus::Ok)
                    .count();
                println!(
                    "Gemimg sample renders: {ok}/{} succeeded",
                    manifest.gemimg_sample_results.len()
                );
            }
        }
    }

    Ok(())
}
