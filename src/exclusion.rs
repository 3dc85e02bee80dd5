//! Exclusion matching.
//!
//! An exclusion file is a headerless CSV of previously reviewed patterns.
//! The list is loaded once per run, held immutable, and scanned linearly
//! per candidate record; first match short-circuits. Expected volumes are
//! small enough that pre-indexing is not worth it.

use crate::error::{Result, TriageError};
use crate::normalize::NormalizedRecord;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

/// Tuple arity the exclusion file was written for. Producer and consumer
/// agree on this out of band; the file itself carries no arity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatcherKind {
    /// 4-tuple: resource_id, secgroup_id, sgrule_cidr, sgrule_portrange
    Legacy,
    /// 5-tuple: adds sgrule_protocol to the legacy tuple
    #[default]
    Exact,
    /// Single column: loadbalancer_id
    LoadBalancer,
}

impl MatcherKind {
    pub fn arity(&self) -> usize {
        match self {
            MatcherKind::Legacy => 4,
            MatcherKind::Exact => 5,
            MatcherKind::LoadBalancer => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExclusionList {
    kind: MatcherKind,
    rules: Vec<ExclusionRule>,
}

impl ExclusionList {
    /// An empty list that excludes nothing.
    pub fn empty(kind: MatcherKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    /// Load exclusion rules from a headerless CSV file. A row with fewer
    /// fields than the matcher's arity is fatal: silently matching on
    /// missing fields could mass-suppress findings.
    pub fn load(path: &Path, kind: MatcherKind) -> Result<Self> {
        if !path.exists() {
            return Err(TriageError::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| TriageError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, kind)
    }

    pub fn parse(content: &str, kind: MatcherKind) -> Result<Self> {
        let mut rules = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let keys: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
            if keys.len() < kind.arity() {
                return Err(TriageError::ExclusionArity {
                    line: idx + 1,
                    expected: kind.arity(),
                    found: keys.len(),
                });
            }
            rules.push(ExclusionRule { keys });
        }
        Ok(Self { kind, rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when a loaded rule suppresses this record. Tuple comparison is
    /// exact string equality with the sentinel as a valid match value. The
    /// first key of any rule additionally suppresses by load balancer id,
    /// regardless of the configured tuple arity.
    pub fn is_excluded(&self, record: &NormalizedRecord) -> bool {
        self.rules.iter().any(|rule| self.matches(rule, record))
    }

    fn matches(&self, rule: &ExclusionRule, record: &NormalizedRecord) -> bool {
        if rule.keys[0] == record.loadbalancer_id {
            return true;
        }
        match self.kind {
            MatcherKind::LoadBalancer => false,
            MatcherKind::Legacy => {
                rule.keys[0] == record.resource_id
                    && rule.keys[1] == record.secgroup_id
                    && rule.keys[2] == record.sgrule_cidr
                    && rule.keys[3] == record.sgrule_portrange
            }
            MatcherKind::Exact => {
                rule.keys[0] == record.resource_id
                    && rule.keys[1] == record.secgroup_id
                    && rule.keys[2] == record.sgrule_cidr
                    && rule.keys[3] == record.sgrule_portrange
                    && rule.keys[4] == record.sgrule_protocol
            }
        }
    }
}
