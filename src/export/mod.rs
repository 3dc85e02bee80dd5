pub mod csv;
pub mod hub;

pub use csv::{CSV_FIELDS, CsvSink};
pub use hub::{FindingsSink, HubFinding, JsonlSink, shape_finding};
