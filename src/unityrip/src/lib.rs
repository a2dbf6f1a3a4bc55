//! # unityrip
//!
//! Unity asset extraction pipeline for Android APKs.
//!
//! Given an uploaded APK and a private working directory, the pipeline
//! decompiles the package (apktool, or plain archive extraction when it is
//! absent), locates the Unity data directory, scans it for asset bundles,
//! extracts them through the richest strategy the installed tools allow,
//! and produces a typed asset catalog plus aggregate statistics. Progress
//! is reported to an external job store through the [`JobSink`] seam.
//!
//! ## Example
//!
//! ```no_run
//! use unityrip::{run_pipeline, JobUpdate, ToolConfig};
//!
//! # fn main() -> Result<(), unityrip::PipelineError> {
//! let config = ToolConfig::from_env();
//! let sink = |job_id: &str, update: JobUpdate| {
//!     if let (Some(step), Some(progress)) = (update.step, update.progress) {
//!         println!("[{job_id}] {step:?} {progress}%");
//!     }
//! };
//!
//! let output = run_pipeline(
//!     "job-1",
//!     "upload.apk".as_ref(),
//!     "/tmp/jobs/job-1".as_ref(),
//!     &config,
//!     &sink,
//! )?;
//! println!("{} assets in {} bundles", output.stats.total, output.bundle_count);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod catalog;
pub mod config;
pub mod decompile;
pub mod extract;
pub mod file_utils;
pub mod job;
pub mod locate;
pub mod pipeline;
pub mod process;
pub mod scanner;
pub mod stats;

// Re-export commonly used items
#[doc(inline)]
pub use catalog::{build_catalog, classify, AssetRecord};
#[doc(inline)]
pub use config::ToolConfig;
#[doc(inline)]
pub use decompile::{decompile_apk, DecompileError, DecompileMethod};
#[doc(inline)]
pub use extract::{select_strategy, ExtractError, ExtractedFile, Strategy};
#[doc(inline)]
pub use job::{JobSink, JobStatus, JobStep, JobUpdate};
#[doc(inline)]
pub use locate::locate_unity_data;
#[doc(inline)]
pub use pipeline::{run_pipeline, PipelineError, PipelineOutput};
#[doc(inline)]
pub use process::{ProcessError, ToolCommand, ToolOutput};
#[doc(inline)]
pub use scanner::{is_bundle_file, scan_bundles};
#[doc(inline)]
pub use stats::{build_stats, StatsSummary};
