//! Driver for the external `gemimg` image generator.
//!
//! The generator is invoked as a command-line utility, the way other
//! external renderers are: it runs in a scratch directory, its output file
//! is located by name, and only a decodable image is copied to the final
//! destination.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tempdir::TempDir;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentType};

/// Command used when none is configured.
pub const DEFAULT_COMMAND: &str = "uvx gemimg";

/// Default per-invocation timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(240);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A configured gemimg invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gemimg {
    /// The executable.
    pub program: String,
    /// Arguments placed before the generator flags.
    pub args: Vec<String>,
    /// How long one generation may run before it is killed.
    pub timeout: Duration,
}

impl Default for Gemimg {
    fn default() -> Self {
        Self {
            program: "uvx".to_string(),
            args: vec!["gemimg".to_string()],
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Gemimg {
    /// Split a whitespace-separated command line such as `uvx gemimg`.
    pub fn from_command_line(command: &str, timeout: Duration) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(Error::GemimgCommandEmpty)?;
        Ok(Self {
            program,
            args: parts.collect(),
            timeout,
        })
    }

    /// Generate a WEBP for `prompt` and place it at `out_path`.
    ///
    /// Returns the generator's trimmed stdout.
    pub fn generate(&self, document_id: &str, prompt: &str, out_path: &Path) -> Result<String> {
        let file_name = out_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::GemimgMissingOutput {
                path: out_path.to_path_buf(),
            })?;

        let dir = TempDir::new("gemimg")?;
        let stdout_path = dir.path().join(".stdout");
        let stderr_path = dir.path().join(".stderr");

        let child = Command::new(&self.program)
            .args(&self.args)
            .args(["--webp", "--force", "-o", file_name, prompt])
            .current_dir(dir.path())
            .stdin(Stdio::null())
            .stdout(File::create(&stdout_path)?)
            .stderr(File::create(&stderr_path)?)
            .spawn()
            .map_err(|e| Error::GemimgFailed {
                document_id: document_id.to_string(),
                message: format!("cannot start {}: {e}", self.program),
            })?;

        let status = wait_with_timeout(child, self.timeout).map_err(|e| match e {
            WaitError::Io(e) => Error::Io(e),
            WaitError::TimedOut => Error::GemimgTimeout {
                document_id: document_id.to_string(),
                seconds: self.timeout.as_secs(),
            },
        })?;

        let stdout = read_trimmed(&stdout_path);
        let stderr = read_trimmed(&stderr_path);
        if !stderr.is_empty() {
            log::warn!("gemimg stderr for {document_id}: {stderr}");
        }

        if !status.success() {
            let message = if stderr.is_empty() { stdout } else { stderr };
            return Err(Error::GemimgFailed {
                document_id: document_id.to_string(),
                message,
            });
        }

        let produced = find_output(dir.path(), file_name).ok_or_else(|| Error::GemimgMissingOutput {
            path: out_path.to_path_buf(),
        })?;
        if imagesize::size(&produced).is_err() {
            return Err(Error::GemimgMissingOutput {
                path: out_path.to_path_buf(),
            });
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&produced, out_path)?;
        Ok(stdout)
    }
}

enum WaitError {
    Io(std::io::Error),
    TimedOut,
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> std::result::Result<ExitStatus, WaitError> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(WaitError::Io)? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            if let Err(e) = child.kill() {
                log::warn!("failed to kill timed-out gemimg process: {e}");
            }
            let _ = child.wait();
            return Err(WaitError::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn read_trimmed(path: &Path) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// The exact file if present, otherwise the first `<stem>*.webp` in `dir`.
fn find_output(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let exact = dir.join(file_name);
    if exact.is_file() {
        return Some(exact);
    }

    let stem = Path::new(file_name).file_stem()?.to_str()?;
    let pattern = Regex::new(&format!(r"^{}.*\.webp$", regex::escape(stem))).ok()?;
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.is_match(name))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// The prompt sent for `doc`, falling back to a generic one built from
/// the title.
pub fn prompt_for(doc: &Document) -> String {
    match doc.gemimg_prompt.as_deref().filter(|p| !p.is_empty()) {
        Some(prompt) => prompt.to_string(),
        None => format!("Photorealistic scanned document image: {}", doc.title),
    }
}

/// A queued generation, written to `gemimg_jobs.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GemimgJob {
    /// Document the image stands in for.
    pub document_id: String,
    /// Destination, relative to the render root.
    pub output_file: String,
    /// Prompt passed to the generator.
    pub prompt: String,
    /// Type of the source document.
    pub document_type: DocumentType,
    /// Issuing organization.
    pub issuer: String,
    /// Document title.
    pub title: String,
}

impl GemimgJob {
    /// Job for `doc`, writing to `output_file`.
    pub fn new(doc: &Document, output_file: String) -> Self {
        Self {
            document_id: doc.document_id.clone(),
            output_file,
            prompt: doc.gemimg_prompt.clone().unwrap_or_default(),
            document_type: doc.document_type,
            issuer: doc.issuing_organization.clone(),
            title: doc.title.clone(),
        }
    }
}

/// Whether a preview generation produced an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    /// The image was written.
    Ok,
    /// The generator failed; see [`SampleResult::error`].
    Failed,
}

/// Outcome of one preview generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Document the preview belongs to.
    pub document_id: String,
    /// Where the preview was written.
    pub output_file: String,
    /// Outcome.
    pub status: SampleStatus,
    /// Generator output on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generate previews for the first `count` jobs into `out_dir`.
///
/// Failures are recorded per job and never abort the run.
pub fn run_samples(gemimg: &Gemimg, jobs: &[GemimgJob], out_dir: &Path, count: usize) -> Result<Vec<SampleResult>> {
    fs::create_dir_all(out_dir)?;
    let results = jobs
        .iter()
        .take(count)
        .map(|job| {
            let out_path = out_dir.join(format!("{}_gemimg_preview.webp", job.document_id));
            let mut result = SampleResult {
                document_id: job.document_id.clone(),
                output_file: out_path.display().to_string(),
                status: SampleStatus::Ok,
                stdout: None,
                error: None,
            };
            match gemimg.generate(&job.document_id, &job.prompt, &out_path) {
                Ok(stdout) => result.stdout = Some(stdout),
                Err(e) => {
                    log::warn!("gemimg sample for {} failed: {e}", job.document_id);
                    result.status = SampleStatus::Failed;
                    result.error = Some(e.to_string());
                }
            }
            result
        })
        .collect();
    Ok(results)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dataset::build_dataset;
    use image::RgbImage;

    /// A generator backed by a shell script. The script sees the generator
    /// flags as `$1..$5`, so the requested file name is `$4`.
    #[cfg(unix)]
    pub(crate) fn scripted(dir: &Path, body: &str) -> Gemimg {
        let script = dir.join("fake-gemimg.sh");
        fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        Gemimg {
            program: "sh".into(),
            args: vec![script.display().to_string()],
            timeout: Duration::from_secs(30),
        }
    }

    /// A generator that copies a real WEBP into place and prints `done`.
    #[cfg(unix)]
    pub(crate) fn working_generator(dir: &Path) -> Gemimg {
        let source = dir.join("source.webp");
        crate::raster::save_webp(&RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10])), &source).unwrap();
        scripted(dir, &format!("cp '{}' \"$4\"\necho done", source.display()))
    }

    #[test]
    fn command_line_is_split_on_whitespace() {
        let gemimg = Gemimg::from_command_line("  uvx   gemimg ", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(gemimg, Gemimg::default());

        let single = Gemimg::from_command_line("/opt/bin/gemimg", Duration::from_secs(5)).unwrap();
        assert_eq!(single.program, "/opt/bin/gemimg");
        assert!(single.args.is_empty());
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(matches!(
            Gemimg::from_command_line("   ", DEFAULT_TIMEOUT),
            Err(Error::GemimgCommandEmpty)
        ));
    }

    #[test]
    fn missing_prompt_falls_back_to_title() {
        let mut doc = build_dataset().applicants[0].document_bundle[0].clone();
        doc.gemimg_prompt = None;
        assert_eq!(
            prompt_for(&doc),
            format!("Photorealistic scanned document image: {}", doc.title)
        );
        doc.gemimg_prompt = Some("A crisp scan".into());
        assert_eq!(prompt_for(&doc), "A crisp scan");
    }

    #[test]
    fn output_is_found_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("DOC_1-2.webp"), b"x").unwrap();
        assert_eq!(
            find_output(dir.path(), "DOC_1.webp"),
            Some(dir.path().join("DOC_1-2.webp"))
        );
        fs::write(dir.path().join("DOC_1.webp"), b"x").unwrap();
        assert_eq!(
            find_output(dir.path(), "DOC_1.webp"),
            Some(dir.path().join("DOC_1.webp"))
        );
        assert_eq!(find_output(dir.path(), "OTHER.webp"), None);
    }

    #[test]
    fn unknown_program_fails_to_start() {
        let gemimg = Gemimg::from_command_line("definitely-not-a-gemimg-binary", DEFAULT_TIMEOUT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = gemimg
            .generate("DOC-1", "prompt", &dir.path().join("out.webp"))
            .unwrap_err();
        assert!(matches!(err, Error::GemimgFailed { .. }));
        assert!(!dir.path().join("out.webp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn slow_generator_is_killed() {
        // The generator flags land in `$0..` and are ignored.
        let gemimg = Gemimg {
            program: "sh".into(),
            args: vec!["-c".into(), "sleep 5".into(), "gemimg".into()],
            timeout: Duration::from_millis(200),
        };
        let dir = tempfile::tempdir().unwrap();
        let started = Instant::now();
        let err = gemimg
            .generate("DOC-1", "prompt", &dir.path().join("out.webp"))
            .unwrap_err();
        assert!(matches!(err, Error::GemimgTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn failing_generator_reports_its_output() {
        // `false` ignores its arguments and exits 1 without output.
        let gemimg = Gemimg::from_command_line("false", DEFAULT_TIMEOUT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = gemimg
            .generate("DOC-9", "prompt", &dir.path().join("out.webp"))
            .unwrap_err();
        assert_eq!(err.to_string(), "gemimg failed for DOC-9: ");
    }

    #[cfg(unix)]
    #[test]
    fn successful_generation_is_copied_into_place() {
        let scratch = tempfile::tempdir().unwrap();
        let gemimg = working_generator(scratch.path());
        let out = scratch.path().join("nested").join("DOC-3.webp");
        let stdout = gemimg.generate("DOC-3", "a scan", &out).unwrap();
        assert_eq!(stdout, "done");
        assert_eq!(imagesize::size(&out).unwrap().width, 8);
    }

    #[cfg(unix)]
    #[test]
    fn undecodable_output_is_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let gemimg = scripted(scratch.path(), "printf 'not an image' > \"$4\"");
        let out = scratch.path().join("DOC-4.webp");
        let err = gemimg.generate("DOC-4", "a scan", &out).unwrap_err();
        assert!(matches!(err, Error::GemimgMissingOutput { .. }), "{err}");
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn samples_record_successes() {
        let dataset = build_dataset();
        let doc = &dataset.applicants[0].document_bundle[0];
        let jobs = vec![GemimgJob::new(doc, "a.webp".into())];
        let scratch = tempfile::tempdir().unwrap();
        let gemimg = working_generator(scratch.path());
        let results = run_samples(&gemimg, &jobs, &scratch.path().join("samples"), 3).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, SampleStatus::Ok);
        assert_eq!(results[0].stdout.as_deref(), Some("done"));
        assert_eq!(results[0].error, None);
        assert!(Path::new(&results[0].output_file).is_file());
    }

    #[test]
    fn samples_record_failures() {
        let dataset = build_dataset();
        let doc = &dataset.applicants[0].document_bundle[0];
        let jobs = vec![
            GemimgJob::new(doc, "a.webp".into()),
            GemimgJob::new(doc, "b.webp".into()),
        ];
        let gemimg = Gemimg::from_command_line("definitely-not-a-gemimg-binary", DEFAULT_TIMEOUT).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let results = run_samples(&gemimg, &jobs, &dir.path().join("samples"), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, SampleStatus::Failed);
        assert!(results[0].output_file.ends_with("_gemimg_preview.webp"));
        assert!(results[0].error.is_some());
    }
}
