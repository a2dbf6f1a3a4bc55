//! Job progress reporting
//!
//! The pipeline never owns job storage. It emits partial [`JobUpdate`]
//! messages through a [`JobSink`]; the external store merges them into the
//! job record keyed by id, where a polling transport reads them back.

use serde::Serialize;

use crate::catalog::AssetRecord;
use crate::stats::StatsSummary;

/// Pipeline stage, reported with each progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStep {
    Upload,
    Decompile,
    Find,
    Extract,
    Index,
    Done,
}

/// Terminal and running job states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Done,
    Error,
}

/// Partial job-record mutation. Unset fields are left untouched by the
/// store's merge, so updates stay small and idempotent-safe against
/// concurrent polling reads.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<JobStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<AssetRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobUpdate {
    /// A stage-transition update: step, detail line, progress percentage.
    pub fn stage(step: JobStep, detail: impl Into<String>, progress: u8) -> Self {
        Self {
            step: Some(step),
            detail: Some(detail.into()),
            progress: Some(progress),
            status: Some(JobStatus::Running),
            ..Self::default()
        }
    }

    /// The terminal error update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(JobStatus::Error),
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_bundle_count(mut self, count: usize) -> Self {
        self.bundle_count = Some(count);
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

/// Receiver for job updates. `Send + Sync` so independent jobs can report
/// into one shared store from separate threads.
pub trait JobSink: Send + Sync {
    fn update(&self, job_id: &str, update: JobUpdate);
}

impl<F> JobSink for F
where
    F: Fn(&str, JobUpdate) + Send + Sync,
{
    fn update(&self, job_id: &str, update: JobUpdate) {
        self(job_id, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_serializes_sparse_camel_case() {
        let update = JobUpdate::stage(JobStep::Decompile, "Decompiling APK...", 20);
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["step"], "decompile");
        assert_eq!(json["progress"], 20);
        assert_eq!(json["status"], "running");
        // unset fields must be absent, not null, for merge semantics
        assert!(json.get("assets").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_update_shape() {
        let json = serde_json::to_value(JobUpdate::failed("boom")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("progress").is_none());
    }

    #[test]
    fn test_closures_are_sinks() {
        let sink = |job_id: &str, update: JobUpdate| {
            assert_eq!(job_id, "j1");
            assert_eq!(update.progress, Some(10));
        };
        sink.update("j1", JobUpdate::stage(JobStep::Upload, "APK received", 10));
    }
}
