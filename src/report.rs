//! Input model for Network Access Analyzer exports.
//!
//! The export is a single JSON document with a top-level `AnalysisFindings`
//! array. Each finding carries an opaque id and an ordered list of
//! presence-keyed components; a component's kind is never tagged explicitly
//! and has to be inferred from which marker keys are set (see `classify`).

use crate::error::{Result, TriageError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "AnalysisFindings")]
    pub findings: Vec<AnalysisFinding>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisFinding {
    #[serde(rename = "FindingId")]
    pub finding_id: String,
    #[serde(rename = "FindingComponents", default)]
    pub components: Vec<RawComponent>,
}

/// One untyped component entry. All marker keys are optional; a single
/// entry can in principle set several of them, though real exports never do.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComponent {
    /// Unconditional top-level ARN, carried by gateway entries in some
    /// export shapes.
    #[serde(rename = "Arn")]
    pub arn: Option<String>,
    #[serde(rename = "Component")]
    pub component: Option<ResourceRef>,
    #[serde(rename = "Vpc")]
    pub vpc: Option<ResourceRef>,
    #[serde(rename = "Subnet")]
    pub subnet: Option<ResourceRef>,
    #[serde(rename = "AttachedTo")]
    pub attached_to: Option<ResourceRef>,
    #[serde(rename = "SecurityGroupRule")]
    pub security_group_rule: Option<RawSecurityGroupRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "Arn", default)]
    pub arn: String,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSecurityGroupRule {
    #[serde(rename = "Cidr")]
    pub cidr: Option<String>,
    /// Peer security group reference, present instead of `Cidr` for
    /// group-to-group rules.
    #[serde(rename = "SecurityGroupId")]
    pub security_group_id: Option<String>,
    #[serde(rename = "Direction", default)]
    pub direction: String,
    #[serde(rename = "Protocol", default)]
    pub protocol: String,
    #[serde(rename = "PortRange")]
    pub port_range: Option<PortRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PortRange {
    #[serde(rename = "From")]
    pub from: i64,
    #[serde(rename = "To")]
    pub to: i64,
}

/// Load and deserialize an analyzer export from disk.
pub fn load_report(path: &Path) -> Result<AnalysisReport> {
    if !path.exists() {
        return Err(TriageError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| TriageError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| TriageError::ReportParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_report() {
        let json = r#"{"AnalysisFindings": []}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_parse_finding_with_components() {
        let json = r#"{
            "AnalysisFindings": [
                {
                    "FindingId": "finding-1",
                    "FindingComponents": [
                        {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:network-interface/eni-1", "Id": "eni-1", "Name": ""}},
                        {"Vpc": {"Arn": "arn:aws:ec2:us-east-1:111122223333:vpc/vpc-1", "Id": "vpc-1"}}
                    ]
                }
            ]
        }"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.findings.len(), 1);

        let finding = &report.findings[0];
        assert_eq!(finding.finding_id, "finding-1");
        assert_eq!(finding.components.len(), 2);
        assert!(finding.components[0].component.is_some());
        assert!(finding.components[1].vpc.is_some());
    }

    #[test]
    fn test_parse_security_group_rule_with_port_range() {
        let json = r#"{
            "SecurityGroupRule": {
                "Cidr": "0.0.0.0/0",
                "Direction": "ingress",
                "Protocol": "tcp",
                "PortRange": {"From": 80, "To": 443}
            }
        }"#;
        let component: RawComponent = serde_json::from_str(json).unwrap();
        let rule = component.security_group_rule.unwrap();
        assert_eq!(rule.cidr.as_deref(), Some("0.0.0.0/0"));
        assert_eq!(rule.port_range, Some(PortRange { from: 80, to: 443 }));
    }

    #[test]
    fn test_parse_security_group_rule_with_peer_group() {
        let json = r#"{
            "SecurityGroupRule": {
                "SecurityGroupId": "sg-peer",
                "Direction": "ingress",
                "Protocol": "all"
            }
        }"#;
        let component: RawComponent = serde_json::from_str(json).unwrap();
        let rule = component.security_group_rule.unwrap();
        assert!(rule.cidr.is_none());
        assert_eq!(rule.security_group_id.as_deref(), Some("sg-peer"));
        assert!(rule.port_range.is_none());
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let json = r#"{"FindingId": "f", "FindingComponents": [], "RouteTable": {}}"#;
        let finding: AnalysisFinding = serde_json::from_str(json).unwrap();
        assert_eq!(finding.finding_id, "f");
    }

    #[test]
    fn test_parse_missing_components_defaults_empty() {
        let json = r#"{"FindingId": "f"}"#;
        let finding: AnalysisFinding = serde_json::from_str(json).unwrap();
        assert!(finding.components.is_empty());
    }

    #[test]
    fn test_load_report_not_found() {
        let result = load_report(Path::new("/nonexistent/report.json"));
        assert!(matches!(result, Err(TriageError::FileNotFound(_))));
    }

    #[test]
    fn test_load_report_malformed_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        fs::write(&path, "{not json").unwrap();

        let result = load_report(&path);
        assert!(matches!(result, Err(TriageError::ReportParseError { .. })));
    }
}
