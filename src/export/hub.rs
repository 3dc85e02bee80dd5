//! Findings sink payload shaping and transport boundary.
//!
//! The shaped payload follows the Security Hub finding schema. Transport
//! (auth, batching, retries) belongs to whatever implements
//! [`FindingsSink`]; the pipeline only shapes one payload per surviving
//! record, hands it over, and surfaces a nonzero failed-import count.

use crate::error::{Result, TriageError};
use crate::identity::{IdentityScope, external_finding_id};
use crate::normalize::NormalizedRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const SCHEMA_VERSION: &str = "2018-10-08";
pub const GENERATOR_ID: &str = "NetworkAccessAnalyzer";

const FINDING_TITLE: &str = "Network Access Analyzer - Ingress Data Path From Internet";
const FINDING_DESCRIPTION: &str =
    "An ingress data path from the Internet to an AWS resource has been located by Network Access Analyzer";
const FINDING_REMEDIATION: &str = "Investigate the finding and determine if it is intended or not. Intended findings can be excluded and unintended findings should be remediated";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubFinding {
    pub schema_version: String,
    pub id: String,
    pub product_arn: String,
    pub generator_id: String,
    pub aws_account_id: String,
    pub product_fields: ProductFields,
    pub types: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub severity: HubSeverity,
    pub title: String,
    pub description: String,
    pub remediation: Remediation,
    pub resources: Vec<HubResource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductFields {
    pub provider_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubSeverity {
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Remediation {
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recommendation {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub id: String,
    pub partition: String,
    pub region: String,
    pub details: ResourceDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceDetails {
    /// The full normalized record, embedded as opaque details.
    pub other: NormalizedRecord,
}

/// Shape one normalized record into a findings payload. The id is the
/// content-addressed identifier from the identity hasher, so repeated runs
/// upsert rather than duplicate.
pub fn shape_finding(
    record: &NormalizedRecord,
    scope: IdentityScope,
    now: DateTime<Utc>,
) -> HubFinding {
    let timestamp = now.to_rfc3339();
    // Slashes in CIDRs and port ranges are not valid in resource ids.
    let resource_id = format!(
        "{},{},{},{},{}",
        record.resource_id,
        record.sgrule_cidr,
        record.sgrule_protocol,
        record.sgrule_portrange,
        record.region
    )
    .replace('/', "_");

    HubFinding {
        schema_version: SCHEMA_VERSION.to_string(),
        id: external_finding_id(record, scope),
        product_arn: format!(
            "arn:{}:securityhub:{}:{}:product/{}/default",
            record.partition, record.region, record.account, record.account
        ),
        generator_id: GENERATOR_ID.to_string(),
        aws_account_id: record.account.clone(),
        product_fields: ProductFields {
            provider_name: "Network Access Analyzer".to_string(),
        },
        types: vec![
            "Software and Configuration Checks/AWS Security Best Practices/Network Reachability"
                .to_string(),
        ],
        created_at: timestamp.clone(),
        updated_at: timestamp,
        severity: HubSeverity {
            label: "INFORMATIONAL".to_string(),
        },
        title: FINDING_TITLE.to_string(),
        description: FINDING_DESCRIPTION.to_string(),
        remediation: Remediation {
            recommendation: Recommendation {
                text: FINDING_REMEDIATION.to_string(),
            },
        },
        resources: vec![HubResource {
            resource_type: "Other".to_string(),
            id: resource_id,
            partition: record.partition.clone(),
            region: record.region.clone(),
            details: ResourceDetails {
                other: record.clone(),
            },
        }],
    }
}

/// Transport boundary for the findings-management system. Implementations
/// report how many findings the remote side failed to import; retrying is
/// their business, never the pipeline's.
pub trait FindingsSink {
    fn import(&mut self, finding: &HubFinding) -> Result<usize>;
}

/// Default transport: newline-delimited JSON appended to a local file,
/// suitable for batch upload tooling downstream.
pub struct JsonlSink {
    file: std::fs::File,
    path: String,
}

impl JsonlSink {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TriageError::WriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(Self {
            file,
            path: path.display().to_string(),
        })
    }
}

impl FindingsSink for JsonlSink {
    fn import(&mut self, finding: &HubFinding) -> Result<usize> {
        let json = serde_json::to_string(finding)?;
        writeln!(self.file, "{json}").map_err(|e| TriageError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(0)
    }
}
