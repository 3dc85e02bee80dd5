//! Stable finding identity.
//!
//! Repeated runs over the same underlying condition must produce the same
//! external identifier so the findings sink can upsert instead of
//! duplicating. The digest input is a `-`-joined projection of the record;
//! which fields participate depends on the scope.

use crate::normalize::NormalizedRecord;
use clap::ValueEnum;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IdentityScope {
    /// Hash over instance_arn and resource_id. One finding per attached
    /// instance, the legacy behavior.
    Instance,
    /// Hash over the network path (resource, rule, region) only. The same
    /// path reachable from several instances collapses to one finding.
    #[default]
    Rule,
}

/// Lowercase hex SHA-256 over the scope's field projection.
pub fn finding_digest(record: &NormalizedRecord, scope: IdentityScope) -> String {
    let material = match scope {
        IdentityScope::Instance => {
            format!("{}-{}", record.instance_arn, record.resource_id)
        }
        IdentityScope::Rule => format!(
            "{}-{}-{}-{}-{}",
            record.resource_id,
            record.sgrule_cidr,
            record.sgrule_protocol,
            record.sgrule_portrange,
            record.region
        ),
    };
    let mut hasher = Sha256::new();
    hasher.update(material.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Structured external identifier embedding the digest.
pub fn external_finding_id(record: &NormalizedRecord, scope: IdentityScope) -> String {
    format!(
        "arn:{}:securityhub:{}:{}:vpn/naa/{}",
        record.partition,
        record.region,
        record.account,
        finding_digest(record, scope)
    )
}
