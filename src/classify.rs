//! Component classification.
//!
//! Replaces the presence-keyed checks scattered through the legacy scripts
//! with a single classification step that turns one raw component into an
//! explicit list of roles. Each role carries only the fields the normalizer
//! actually consumes.

use crate::report::{PortRange, RawComponent};

/// The semantic role(s) a raw component plays within a finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRole {
    NetworkInterface {
        id: String,
        arn: String,
    },
    LoadBalancer {
        id: String,
        arn: String,
    },
    /// Only used to derive account/region/partition; never stored on the
    /// normalized record itself.
    InternetGateway {
        arn: String,
    },
    Vpc {
        id: String,
    },
    Subnet {
        id: String,
    },
    SecurityGroup {
        id: String,
    },
    SecurityGroupRule {
        /// CIDR block, or the peer security group id for group-to-group
        /// rules. Both land in the same record field downstream.
        cidr_or_peer: Option<String>,
        direction: String,
        protocol: String,
        port_range: Option<PortRange>,
    },
    AttachedInstance {
        id: String,
        arn: String,
        name: String,
    },
}

/// Classify one raw component. Triggers are checked independently, so a
/// single entry can yield several roles if its keys collide (real exports
/// never produce that).
pub fn classify(raw: &RawComponent) -> Vec<ComponentRole> {
    let mut roles = Vec::new();

    if let Some(component) = &raw.component {
        if component.arn.contains("network-interface") {
            roles.push(ComponentRole::NetworkInterface {
                id: component.id.clone(),
                arn: component.arn.clone(),
            });
        }
        if component.arn.contains("loadbalancer") {
            roles.push(ComponentRole::LoadBalancer {
                id: component.id.clone(),
                arn: component.arn.clone(),
            });
        }
        if component.arn.contains("security-group") {
            roles.push(ComponentRole::SecurityGroup {
                id: component.id.clone(),
            });
        }
        if component.arn.contains("internet-gateway") {
            roles.push(ComponentRole::InternetGateway {
                arn: component.arn.clone(),
            });
        }
    }

    // Some export shapes carry the gateway ARN unnested.
    if let Some(arn) = &raw.arn {
        if arn.contains("internet-gateway") {
            roles.push(ComponentRole::InternetGateway { arn: arn.clone() });
        }
    }

    if let Some(vpc) = &raw.vpc {
        if vpc.arn.contains("vpc") {
            roles.push(ComponentRole::Vpc {
                id: vpc.id.clone(),
            });
        }
    }

    if let Some(subnet) = &raw.subnet {
        if subnet.arn.contains("subnet") {
            roles.push(ComponentRole::Subnet {
                id: subnet.id.clone(),
            });
        }
    }

    if let Some(rule) = &raw.security_group_rule {
        roles.push(ComponentRole::SecurityGroupRule {
            cidr_or_peer: rule
                .cidr
                .clone()
                .or_else(|| rule.security_group_id.clone()),
            direction: rule.direction.clone(),
            protocol: rule.protocol.clone(),
            port_range: rule.port_range,
        });
    }

    if let Some(attached) = &raw.attached_to {
        if attached.arn.contains("instance") {
            roles.push(ComponentRole::AttachedInstance {
                id: attached.id.clone(),
                arn: attached.arn.clone(),
                name: attached.name.clone(),
            });
        }
    }

    roles
}
