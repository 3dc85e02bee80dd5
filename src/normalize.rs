//! Finding normalization.
//!
//! Folds the ordered component list of one finding into a flat record with
//! a fixed schema. Every field is always present; absent data is the
//! `"N/A"` sentinel, so downstream consumers branch on value, never on
//! presence. Later components win on field collision, preserving the fold
//! order of the input list.

use crate::classify::{ComponentRole, classify};
use crate::error::{Result, TriageError};
use crate::report::AnalysisFinding;
use serde::{Deserialize, Serialize};

/// Placeholder for fields no component contributed.
pub const SENTINEL: &str = "N/A";

/// Flat projection of one finding, used for CSV output and export shaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub account: String,
    pub region: String,
    pub partition: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub loadbalancer_id: String,
    pub loadbalancer_arn: String,
    pub instance_id: String,
    pub instance_arn: String,
    pub instance_name: String,
    /// Network interface id.
    pub resource_id: String,
    pub resource_arn: String,
    pub secgroup_id: String,
    pub sgrule_direction: String,
    /// CIDR block or peer security group id.
    pub sgrule_cidr: String,
    pub sgrule_protocol: String,
    /// `"<From> to <To>"`, literal `"all"`, or empty when the rule has no
    /// port semantics. Empty is a valid state distinct from the sentinel.
    pub sgrule_portrange: String,
}

impl Default for NormalizedRecord {
    fn default() -> Self {
        let na = || SENTINEL.to_string();
        Self {
            account: na(),
            region: na(),
            partition: na(),
            vpc_id: na(),
            subnet_id: na(),
            loadbalancer_id: na(),
            loadbalancer_arn: na(),
            instance_id: na(),
            instance_arn: na(),
            instance_name: na(),
            resource_id: na(),
            resource_arn: na(),
            secgroup_id: na(),
            sgrule_direction: na(),
            sgrule_cidr: na(),
            sgrule_protocol: na(),
            sgrule_portrange: na(),
        }
    }
}

/// Fold one finding's components into a [`NormalizedRecord`].
///
/// Fails when no component carries an internet-gateway ARN (the only source
/// for account/region/partition) or when that ARN does not split into the
/// standard six `:`-separated fields.
pub fn normalize(finding: &AnalysisFinding) -> Result<NormalizedRecord> {
    let mut record = NormalizedRecord::default();
    let mut gateway_arn: Option<String> = None;

    for raw in &finding.components {
        for role in classify(raw) {
            apply(&mut record, role, &mut gateway_arn);
        }
    }

    let gateway_arn = gateway_arn.ok_or_else(|| TriageError::MissingGateway {
        finding_id: finding.finding_id.clone(),
    })?;

    // arn:partition:service:region:account:resource
    let parts: Vec<&str> = gateway_arn.split(':').collect();
    if parts.len() < 6 {
        return Err(TriageError::MalformedArn {
            finding_id: finding.finding_id.clone(),
            arn: gateway_arn,
        });
    }
    record.partition = parts[1].to_string();
    record.region = parts[3].to_string();
    record.account = parts[4].to_string();

    Ok(record)
}

fn apply(record: &mut NormalizedRecord, role: ComponentRole, gateway_arn: &mut Option<String>) {
    match role {
        ComponentRole::NetworkInterface { id, arn } => {
            record.resource_id = id;
            record.resource_arn = arn;
        }
        ComponentRole::LoadBalancer { id, arn } => {
            record.loadbalancer_id = id;
            record.loadbalancer_arn = arn;
        }
        ComponentRole::InternetGateway { arn } => {
            *gateway_arn = Some(arn);
        }
        ComponentRole::Vpc { id } => {
            record.vpc_id = id;
        }
        ComponentRole::Subnet { id } => {
            record.subnet_id = id;
        }
        ComponentRole::SecurityGroup { id } => {
            record.secgroup_id = id;
        }
        ComponentRole::SecurityGroupRule {
            cidr_or_peer,
            direction,
            protocol,
            port_range,
        } => {
            if let Some(cidr) = cidr_or_peer {
                record.sgrule_cidr = cidr;
                record.sgrule_direction = direction;
                record.sgrule_protocol = protocol;
            }
            record.sgrule_portrange = match port_range {
                Some(range) => format!("{} to {}", range.from, range.to),
                None if record.sgrule_protocol == "all" => "all".to_string(),
                None => String::new(),
            };
        }
        ComponentRole::AttachedInstance { id, arn, name } => {
            record.instance_id = id;
            record.instance_arn = arn;
            record.instance_name = name;
        }
    }
}
