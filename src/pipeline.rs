//! Pipeline orchestration.
//!
//! Findings are processed strictly sequentially in report order:
//! normalize, exclusion check, then emission to the enabled sinks. Each
//! finding is atomic; a failure in one never corrupts state used by the
//! next, and sink effects of earlier findings are never rolled back.

use crate::error::Result;
use crate::exclusion::ExclusionList;
use crate::export::{CsvSink, FindingsSink, shape_finding};
use crate::identity::IdentityScope;
use crate::normalize::normalize;
use crate::report::AnalysisReport;
use chrono::Utc;
use tracing::{debug, warn};

/// Per-run counters, returned for reporting and exit-code decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Findings successfully normalized.
    pub processed: usize,
    /// Findings dropped by the exclusion list.
    pub excluded: usize,
    /// Findings skipped because normalization failed (input contract
    /// violation, e.g. no internet-gateway component).
    pub skipped: usize,
    /// Findings handed to the findings sink without reported failures.
    pub exported: usize,
    /// Failed imports reported by the sink, plus transport errors.
    pub failed_imports: usize,
}

impl RunSummary {
    /// A run is clean when nothing was skipped and every import succeeded.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed_imports == 0
    }
}

/// Process every finding in the report. `csv` and `sink` are optional so
/// either emission path can be disabled independently.
pub fn run(
    report: &AnalysisReport,
    exclusions: &ExclusionList,
    mut csv: Option<&mut CsvSink>,
    mut sink: Option<&mut dyn FindingsSink>,
    scope: IdentityScope,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for finding in &report.findings {
        let record = match normalize(finding) {
            Ok(record) => record,
            Err(e) => {
                // Skip-with-diagnostic: one bad finding never aborts the run.
                warn!(finding_id = %finding.finding_id, error = %e, "skipping finding");
                summary.skipped += 1;
                continue;
            }
        };
        summary.processed += 1;

        if exclusions.is_excluded(&record) {
            debug!(finding_id = %finding.finding_id, "finding matches exclusion list");
            summary.excluded += 1;
            continue;
        }

        if let Some(csv) = csv.as_mut() {
            csv.write_record(&record)?;
        }

        if let Some(sink) = sink.as_mut() {
            let payload = shape_finding(&record, scope, Utc::now());
            match sink.import(&payload) {
                Ok(0) => summary.exported += 1,
                Ok(failed) => {
                    warn!(
                        finding_id = %finding.finding_id,
                        failed, "sink reported failed imports"
                    );
                    summary.failed_imports += failed;
                }
                Err(e) => {
                    warn!(finding_id = %finding.finding_id, error = %e, "findings import failed");
                    summary.failed_imports += 1;
                }
            }
        }
    }

    Ok(summary)
}
