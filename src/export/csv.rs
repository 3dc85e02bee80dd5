//! CSV sink.
//!
//! Appends one row per surviving record to a comma-separated file. The
//! header is written only when the destination does not already exist, so
//! repeated runs against the same file accumulate rows under one header.

use crate::error::{Result, TriageError};
use crate::normalize::NormalizedRecord;
use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Column order of the output file. Matches the record field list minus
/// `partition`, which only exists for export shaping.
pub const CSV_FIELDS: [&str; 16] = [
    "account",
    "region",
    "vpc_id",
    "subnet_id",
    "loadbalancer_id",
    "loadbalancer_arn",
    "instance_id",
    "instance_arn",
    "instance_name",
    "resource_id",
    "resource_arn",
    "secgroup_id",
    "sgrule_direction",
    "sgrule_cidr",
    "sgrule_protocol",
    "sgrule_portrange",
];

pub struct CsvSink {
    file: std::fs::File,
    path: String,
}

impl CsvSink {
    /// Open the destination for appending, creating it (with a header row)
    /// when it does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let write_header = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TriageError::WriteError {
                path: path.display().to_string(),
                source: e,
            })?;

        let mut sink = Self {
            file,
            path: path.display().to_string(),
        };
        if write_header {
            sink.write_line(&CSV_FIELDS.map(String::from))?;
        }
        Ok(sink)
    }

    pub fn write_record(&mut self, record: &NormalizedRecord) -> Result<()> {
        let fields = [
            record.account.clone(),
            record.region.clone(),
            record.vpc_id.clone(),
            record.subnet_id.clone(),
            record.loadbalancer_id.clone(),
            record.loadbalancer_arn.clone(),
            record.instance_id.clone(),
            record.instance_arn.clone(),
            record.instance_name.clone(),
            record.resource_id.clone(),
            record.resource_arn.clone(),
            record.secgroup_id.clone(),
            record.sgrule_direction.clone(),
            record.sgrule_cidr.clone(),
            record.sgrule_protocol.clone(),
            record.sgrule_portrange.clone(),
        ];
        self.write_line(&fields)
    }

    fn write_line(&mut self, fields: &[String; 16]) -> Result<()> {
        let line = fields
            .iter()
            .map(|f| escape(f))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.file, "{line}").map_err(|e| TriageError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Quote a field when it contains a separator, quote, or line break.
/// Inner quotes are doubled per RFC 4180.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
