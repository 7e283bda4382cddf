/*!
# Motivation
The purpose of this crate is to produce realistic demo fixtures for an AI-assisted transfer
credit review. Reviewers of such a system need applicant bundles that look like what actually
arrives at an admissions office: crisp digital certificates, dense text dumps pulled from a
records system, and crooked photocopies of discharge papers. None of the people or credentials
are real.

# Generating
[`dataset::generate`] builds twelve fictitious applicants across three archetypes:

- A: military veterans (DD214, Joint Services Transcript, CompTIA Security+)
- B: some college, no credential (high school attestation, community college and Sophia
  transcripts, Google Project Management certificate)
- C: international adult learners (WES or ECE course-by-course evaluation, TOEFL report)

Each bundle then gets a realistic mix of output formats, and the result is validated against a
Draft 2020-12 JSON Schema ([`schema::build_schema`]) before both are written to disk.

# Rendering
[`pipeline::render_dataset`] turns every document record into a file, using the record's
rendering method:

- `pristine_pdf`: a designed letter-size PDF with header band, sections and tables
- `raw_text_pdf` / `raw_text_txt`: a Courier dump of the record
- `scanned_pdf` / `simulated_scan_webp`: a locally rasterized "scan" with paper tone, stains,
  fax lines, blur and rotation
- `gemimg_scan_webp`: an image from the external `gemimg` generator, falling back to the local
  scan renderer when it is unavailable

Applicants are rendered in parallel. Every document draws its noise from its own generator
seeded by the run seed and the document ID, so output does not depend on scheduling.

# Setup
The `gemimg` backend shells out to a command line (by default `uvx gemimg`), which needs network
access and an API key in its environment. Point `GEMIMG_BIN` at a different command to override
it, or pass `--webp-backend local` to skip it entirely.

Scan images draw text with DejaVu or Liberation TrueType fonts from `/usr/share/fonts`. Any face
that is not installed is replaced by a copy of DejaVu Sans Mono compiled into the crate.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dataset;
mod error;
pub mod fonts;
pub mod gemimg;
pub mod layouts;
pub mod manifest;
pub mod model;
pub mod pdf;
pub mod pipeline;
pub mod preview;
mod profiles;
pub mod raster;
pub mod renderer;
pub mod scan;
pub mod schema;
pub mod text;

pub use error::{Error, Result};
pub use renderer::*;
