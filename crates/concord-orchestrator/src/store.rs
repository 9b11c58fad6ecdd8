//! In-memory report store

use async_trait::async_trait;
use concord_domain::{CapabilityError, Job, JobId, ReportStore, SummaryReport};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Records {
    jobs: HashMap<JobId, Job>,
    reports: HashMap<JobId, SummaryReport>,
}

/// Report store keeping the latest job state and each report in memory
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    records: Mutex<Records>,
}

impl InMemoryReportStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last saved state of a job
    pub fn job(&self, id: JobId) -> Option<Job> {
        self.records().jobs.get(&id).cloned()
    }

    /// Report of a job, if one was saved
    pub fn report(&self, job_id: JobId) -> Option<SummaryReport> {
        self.records().reports.get(&job_id).cloned()
    }

    /// Number of jobs seen
    pub fn job_count(&self) -> usize {
        self.records().jobs.len()
    }

    /// Number of reports saved
    pub fn report_count(&self) -> usize {
        self.records().reports.len()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save_job(&self, job: &Job) -> Result<(), CapabilityError> {
        self.records().jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn save_report(&self, report: &SummaryReport) -> Result<(), CapabilityError> {
        self.records().reports.insert(report.job_id, report.clone());
        Ok(())
    }
}
