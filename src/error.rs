use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report: {path} - {message}")]
    ReportParseError { path: String, message: String },

    #[error("Finding {finding_id}: no internet-gateway component, cannot derive account/region")]
    MissingGateway { finding_id: String },

    #[error("Finding {finding_id}: malformed gateway ARN: {arn}")]
    MalformedArn { finding_id: String, arn: String },

    #[error("Exclusion rule at line {line} has {found} field(s), matcher requires {expected}")]
    ExclusionArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
