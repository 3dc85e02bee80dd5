//! Shared fixtures for unit tests.

use crate::error::{Result, TriageError};
use crate::export::{FindingsSink, HubFinding};
use crate::report::AnalysisReport;

/// Sink that records every shaped payload it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub findings: Vec<HubFinding>,
}

impl FindingsSink for MemorySink {
    fn import(&mut self, finding: &HubFinding) -> Result<usize> {
        self.findings.push(finding.clone());
        Ok(0)
    }
}

/// Sink whose transport always fails.
#[derive(Debug, Default)]
pub struct FailingSink;

impl FindingsSink for FailingSink {
    fn import(&mut self, _finding: &HubFinding) -> Result<usize> {
        Err(TriageError::WriteError {
            path: "sink".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "unreachable"),
        })
    }
}

/// Two-finding report: a full instance/SG/VPC chain and a load-balancer
/// chain without instance data.
pub fn sample_report() -> AnalysisReport {
    serde_json::from_str(sample_report_json()).unwrap()
}

pub fn sample_report_json() -> &'static str {
    r#"{
        "AnalysisFindings": [
            {
                "FindingId": "finding-instance",
                "FindingComponents": [
                    {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:internet-gateway/igw-1", "Id": "igw-1", "Name": ""}},
                    {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:network-interface/eni-1", "Id": "eni-1", "Name": ""}},
                    {"Vpc": {"Arn": "arn:aws:ec2:us-east-1:111122223333:vpc/vpc-1", "Id": "vpc-1"}},
                    {"Subnet": {"Arn": "arn:aws:ec2:us-east-1:111122223333:subnet/subnet-1", "Id": "subnet-1"}},
                    {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:security-group/sg-1", "Id": "sg-1", "Name": "web-sg"}},
                    {"SecurityGroupRule": {"Cidr": "0.0.0.0/0", "Direction": "ingress", "Protocol": "tcp", "PortRange": {"From": 80, "To": 443}}},
                    {"AttachedTo": {"Arn": "arn:aws:ec2:us-east-1:111122223333:instance/i-1", "Id": "i-1", "Name": "web-1"}}
                ]
            },
            {
                "FindingId": "finding-loadbalancer",
                "FindingComponents": [
                    {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:internet-gateway/igw-1", "Id": "igw-1", "Name": ""}},
                    {"Component": {"Arn": "arn:aws:elasticloadbalancing:us-east-1:111122223333:loadbalancer/app/web/abc", "Id": "app/web/abc", "Name": "web"}},
                    {"Component": {"Arn": "arn:aws:ec2:us-east-1:111122223333:network-interface/eni-2", "Id": "eni-2", "Name": ""}}
                ]
            }
        ]
    }"#
}
