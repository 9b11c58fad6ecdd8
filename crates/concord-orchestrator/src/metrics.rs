//! Metrics collection for pipeline runs

use concord_domain::FaultKind;
use std::collections::BTreeMap;

/// Counters collected across jobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Jobs that reached `done`
    pub jobs_completed: usize,

    /// Jobs that reached `failed`, cancellations included
    pub jobs_failed: usize,

    /// Failed jobs that were cancelled
    pub jobs_cancelled: usize,

    /// Documents scored
    pub documents_processed: usize,

    /// Absorbed faults per kind
    pub faults: BTreeMap<FaultKind, usize>,

    /// Conflicts found
    pub conflicts_found: usize,

    /// Conflicts left unresolved
    pub conflicts_unresolved: usize,
}

impl PipelineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed job
    pub fn record_completed(&mut self, documents: usize, conflicts: usize, unresolved: usize) {
        self.jobs_completed += 1;
        self.documents_processed += documents;
        self.conflicts_found += conflicts;
        self.conflicts_unresolved += unresolved;
    }

    /// Record a failed job
    pub fn record_failed(&mut self, cancelled: bool) {
        self.jobs_failed += 1;
        if cancelled {
            self.jobs_cancelled += 1;
        }
    }

    /// Record an absorbed fault
    pub fn record_fault(&mut self, kind: FaultKind) {
        *self.faults.entry(kind).or_insert(0) += 1;
    }

    /// Total faults across kinds
    pub fn total_faults(&self) -> usize {
        self.faults.values().sum()
    }

    /// Jobs that reached a terminal state
    pub fn total_jobs(&self) -> usize {
        self.jobs_completed + self.jobs_failed
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Pipeline Metrics Summary".to_string(),
            "========================".to_string(),
            format!("Jobs completed: {}", self.jobs_completed),
            format!(
                "Jobs failed: {} ({} cancelled)",
                self.jobs_failed, self.jobs_cancelled
            ),
            format!("Documents processed: {}", self.documents_processed),
            format!(
                "Conflicts: {} ({} unresolved)",
                self.conflicts_found, self.conflicts_unresolved
            ),
        ];

        if !self.faults.is_empty() {
            lines.push(String::new());
            lines.push("Faults by kind:".to_string());
            for (kind, count) in &self.faults {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_faults()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.total_jobs(), 0);
        assert_eq!(metrics.total_faults(), 0);
    }

    #[test]
    fn test_record_jobs() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_completed(3, 2, 1);
        metrics.record_completed(1, 0, 0);
        metrics.record_failed(false);
        metrics.record_failed(true);

        assert_eq!(metrics.jobs_completed, 2);
        assert_eq!(metrics.jobs_failed, 2);
        assert_eq!(metrics.jobs_cancelled, 1);
        assert_eq!(metrics.documents_processed, 4);
        assert_eq!(metrics.conflicts_found, 2);
        assert_eq!(metrics.conflicts_unresolved, 1);
        assert_eq!(metrics.total_jobs(), 4);
    }

    #[test]
    fn test_record_faults() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_fault(FaultKind::Scoring);
        metrics.record_fault(FaultKind::Embedding);
        metrics.record_fault(FaultKind::Scoring);

        assert_eq!(metrics.faults[&FaultKind::Scoring], 2);
        assert_eq!(metrics.total_faults(), 3);
    }

    #[test]
    fn test_reset() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_completed(1, 1, 1);
        metrics.record_fault(FaultKind::Extraction);
        metrics.reset();
        assert_eq!(metrics, PipelineMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = PipelineMetrics::new();
        metrics.record_completed(2, 1, 0);
        metrics.record_failed(true);
        metrics.record_fault(FaultKind::Generation);

        let summary = metrics.summary();
        assert!(summary.contains("Jobs completed: 1"));
        assert!(summary.contains("Jobs failed: 1 (1 cancelled)"));
        assert!(summary.contains("generation: 1"));
    }
}
