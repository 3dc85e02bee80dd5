pub mod classify;
pub mod cli;
pub mod error;
pub mod exclusion;
pub mod export;
pub mod handlers;
pub mod identity;
pub mod normalize;
pub mod pipeline;
pub mod report;

#[cfg(test)]
pub mod test_utils;

pub use classify::{ComponentRole, classify};
pub use cli::Cli;
pub use error::{Result, TriageError};
pub use exclusion::{ExclusionList, MatcherKind};
pub use export::{CsvSink, FindingsSink, HubFinding, JsonlSink};
pub use identity::{IdentityScope, external_finding_id, finding_digest};
pub use normalize::{NormalizedRecord, SENTINEL, normalize};
pub use pipeline::RunSummary;
pub use report::{AnalysisFinding, AnalysisReport, RawComponent, load_report};
