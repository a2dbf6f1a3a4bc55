//! Extraction pipeline orchestrator
//!
//! Runs the stages strictly in sequence for one job, reporting progress
//! through the [`JobSink`] before and after each stage:
//!
//! `upload` 10 → `decompile` 20→35 → `find` 40→55 → `extract` 60→80 →
//! `index` 88 → `done` 100
//!
//! Any stage-fatal failure is caught once here, recorded into the job as
//! `error`, and rethrown to the caller. No stage is retried.

use std::path::{Path, PathBuf};

use crate::catalog::{self, AssetRecord};
use crate::config::ToolConfig;
use crate::decompile::{self, DecompileError, DecompileMethod};
use crate::extract::{self, ExtractError, Strategy};
use crate::job::{JobSink, JobStatus, JobStep, JobUpdate};
use crate::locate;
use crate::process::ToolCommand;
use crate::scanner;
use crate::stats::{self, StatsSummary};

/// Stage-fatal pipeline failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("decompile stage failed: {0}")]
    Decompile(#[from] DecompileError),

    #[error("extract stage failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Result of a successful run, mirroring the fields merged into the job.
#[derive(Debug)]
pub struct PipelineOutput {
    pub assets: Vec<AssetRecord>,
    pub stats: StatsSummary,
    pub bundle_count: usize,
    pub data_dir: Option<PathBuf>,
    pub method: DecompileMethod,
    pub strategy: Strategy,
}

/// Run the full extraction pipeline for one job.
///
/// `work_dir` is exclusively owned by this job; the decompiled tree and
/// extracted assets are written beneath it. On failure the job is marked
/// `error` through the sink and the error is returned to the caller.
pub fn run_pipeline(
    job_id: &str,
    apk_path: &Path,
    work_dir: &Path,
    config: &ToolConfig,
    sink: &dyn JobSink,
) -> Result<PipelineOutput, PipelineError> {
    match run_stages(job_id, apk_path, work_dir, config, sink) {
        Ok(output) => Ok(output),
        Err(e) => {
            log::error!("job {}: pipeline failed: {}", job_id, e);
            sink.update(job_id, JobUpdate::failed(e.to_string()));
            Err(e)
        }
    }
}

fn run_stages(
    job_id: &str,
    apk_path: &Path,
    work_dir: &Path,
    config: &ToolConfig,
    sink: &dyn JobSink,
) -> Result<PipelineOutput, PipelineError> {
    sink.update(job_id, JobUpdate::stage(JobStep::Upload, "APK received", 10));

    // decompile
    sink.update(
        job_id,
        JobUpdate::stage(JobStep::Decompile, "Decompiling APK...", 20),
    );
    let decompiled = work_dir.join("decompiled");
    let method = decompile::decompile_apk(config, apk_path, &decompiled)?;
    sink.update(
        job_id,
        JobUpdate::stage(JobStep::Decompile, method.describe(), 35),
    );

    // find
    sink.update(
        job_id,
        JobUpdate::stage(JobStep::Find, "Locating Unity data...", 40),
    );
    let data_dir = locate::locate_unity_data(&decompiled);
    let bundles = match &data_dir {
        Some(dir) => scanner::scan_bundles(dir),
        None => Vec::new(),
    };

    let find_detail = match &data_dir {
        Some(dir) => format!(
            "Found Unity data ({} bundles) in {}",
            bundles.len(),
            dir.display()
        ),
        None => "No Unity data found; will catalog everything".to_string(),
    };
    let mut find_update = JobUpdate::stage(JobStep::Find, find_detail, 55)
        .with_bundle_count(bundles.len());
    if let Some(dir) = &data_dir {
        find_update = find_update.with_data_dir(dir.display().to_string());
    }
    sink.update(job_id, find_update);

    // extract
    let tool_available = !bundles.is_empty()
        && ToolCommand::new(&config.asset_ripper_bin, decompile::PROBE_TIMEOUT)
            .arg("--version")
            .probe();
    let strategy = extract::select_strategy(tool_available, bundles.len());
    sink.update(
        job_id,
        JobUpdate::stage(JobStep::Extract, strategy.describe(), 60),
    );

    let extract_root = work_dir.join("extracted");
    let extracted = extract::run_strategy(strategy, config, &bundles, &decompiled, &extract_root)?;
    sink.update(
        job_id,
        JobUpdate::stage(
            JobStep::Extract,
            format!("Extracted {} files", extracted.len()),
            80,
        ),
    );

    // index
    sink.update(
        job_id,
        JobUpdate::stage(JobStep::Index, "Building catalog...", 88),
    );
    let assets = catalog::build_catalog(&extracted, &extract_root);
    let summary = stats::build_stats(&assets);

    sink.update(
        job_id,
        JobUpdate {
            step: Some(JobStep::Done),
            detail: Some(format!("{} assets cataloged", summary.total)),
            progress: Some(100),
            status: Some(JobStatus::Done),
            assets: Some(assets.clone()),
            stats: Some(summary.clone()),
            bundle_count: Some(bundles.len()),
            data_dir: data_dir.as_ref().map(|d| d.display().to_string()),
            error: None,
        },
    );

    Ok(PipelineOutput {
        assets,
        stats: summary,
        bundle_count: bundles.len(),
        data_dir,
        method,
        strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use zip::write::SimpleFileOptions;

    /// Records every update for post-run assertions.
    #[derive(Default)]
    struct RecordingSink {
        updates: Mutex<Vec<JobUpdate>>,
    }

    impl JobSink for RecordingSink {
        fn update(&self, _job_id: &str, update: JobUpdate) {
            self.updates.lock().unwrap().push(update);
        }
    }

    impl RecordingSink {
        fn updates(&self) -> Vec<JobUpdate> {
            self.updates.lock().unwrap().clone()
        }
    }

    fn unavailable_tools() -> ToolConfig {
        ToolConfig {
            java_bin: PathBuf::from("/nonexistent/java"),
            apktool_jar: PathBuf::from("/nonexistent/apktool.jar"),
            asset_ripper_bin: PathBuf::from("/nonexistent/AssetRipper"),
        }
    }

    fn write_test_apk(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_unity_apk_without_tools_uses_raw_tier() {
        let temp_dir = tempfile::tempdir().unwrap();
        let apk = temp_dir.path().join("game.apk");
        write_test_apk(
            &apk,
            &[
                ("assets/bin/Data/globalgamemanagers", b"UnityFS" as &[u8]),
                ("assets/bin/Data/sharedassets0.assets", b"UnityFS"),
                ("classes.dex", b"dex"),
            ],
        );

        let sink = RecordingSink::default();
        let output = run_pipeline(
            "j1",
            &apk,
            temp_dir.path(),
            &unavailable_tools(),
            &sink,
        )
        .unwrap();

        assert_eq!(output.method, DecompileMethod::ArchiveCopy);
        assert_eq!(output.strategy, Strategy::Raw);
        assert_eq!(output.bundle_count, 2);
        assert_eq!(output.assets.len(), 2);
        assert!(output.assets.iter().all(|a| a.raw));
        assert_eq!(output.stats.total, 2);
        assert!(output
            .data_dir
            .as_ref()
            .unwrap()
            .ends_with("decompiled/assets/bin/Data"));

        let updates = sink.updates();
        let last = updates.last().unwrap();
        assert_eq!(last.status, Some(JobStatus::Done));
        assert_eq!(last.progress, Some(100));
        assert!(last.assets.is_some());
        assert!(last.stats.is_some());
    }

    #[test]
    fn test_progress_is_non_decreasing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let apk = temp_dir.path().join("game.apk");
        write_test_apk(&apk, &[("assets/bin/Data/level0", b"UnityFS" as &[u8])]);

        let sink = RecordingSink::default();
        run_pipeline("j2", &apk, temp_dir.path(), &unavailable_tools(), &sink).unwrap();

        let progress: Vec<u8> = sink
            .updates()
            .iter()
            .filter_map(|u| u.progress)
            .collect();
        assert!(!progress.is_empty());
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_non_unity_apk_falls_back_to_cataloging() {
        let temp_dir = tempfile::tempdir().unwrap();
        let apk = temp_dir.path().join("plain.apk");
        write_test_apk(
            &apk,
            &[
                ("res/sprite.png", b"png" as &[u8]),
                ("classes.dex", b"dex"),
            ],
        );

        let sink = RecordingSink::default();
        let output = run_pipeline("j3", &apk, temp_dir.path(), &unavailable_tools(), &sink).unwrap();

        assert_eq!(output.strategy, Strategy::Fallback);
        assert_eq!(output.bundle_count, 0);
        assert!(output.data_dir.is_none());
        assert_eq!(output.assets.len(), 1);
        assert_eq!(output.assets[0].asset_type, "texture");
        assert_eq!(output.stats.by_type["texture"], 1);
    }

    #[test]
    fn test_decompile_failure_marks_job_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let apk = temp_dir.path().join("broken.apk");
        std::fs::write(&apk, b"not a zip").unwrap();

        let sink = RecordingSink::default();
        let result = run_pipeline("j4", &apk, temp_dir.path(), &unavailable_tools(), &sink);
        assert!(result.is_err());

        let updates = sink.updates();
        let last = updates.last().unwrap();
        assert_eq!(last.status, Some(JobStatus::Error));
        assert!(last.error.as_deref().unwrap_or("").contains("archive"));
        // failed runs never publish a partial catalog
        assert!(updates.iter().all(|u| u.assets.is_none() && u.stats.is_none()));
    }

    #[test]
    fn test_stats_agree_with_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let apk = temp_dir.path().join("game.apk");
        write_test_apk(
            &apk,
            &[
                ("assets/bin/Data/sharedassets0.assets", b"a" as &[u8]),
                ("assets/bin/Data/sharedassets1.assets", b"bb"),
                ("assets/bin/Data/level0", b"ccc"),
            ],
        );

        let sink = RecordingSink::default();
        let output =
            run_pipeline("j5", &apk, temp_dir.path(), &unavailable_tools(), &sink).unwrap();

        assert_eq!(output.stats.total, output.assets.len());
        assert_eq!(
            output.stats.by_type.values().sum::<usize>(),
            output.stats.total
        );
        let ids: std::collections::HashSet<&str> =
            output.assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), output.assets.len());
    }
}
