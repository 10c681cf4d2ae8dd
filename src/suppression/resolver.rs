//! Per-file suppression lookup consumed by the rule engine.

use crate::config::SuppressionPolicy;
use crate::rules::finding::RawFinding;
use crate::suppression::model::{SuppressionMarker, SuppressionScope};
use crate::suppression::parser::parse_markers;

/// Answers "is a finding from this rule at this line suppressed?" for
/// one file. Built once per file before rule evaluation.
#[derive(Debug, Clone)]
pub struct SuppressionResolver {
    markers: Vec<SuppressionMarker>,
    policy: SuppressionPolicy,
}

impl SuppressionResolver {
    /// Scan `source` for suppression markers.
    pub fn from_source(source: &str, policy: SuppressionPolicy) -> Self {
        Self {
            markers: parse_markers(source),
            policy,
        }
    }

    #[cfg(test)]
    fn from_markers(markers: Vec<SuppressionMarker>, policy: SuppressionPolicy) -> Self {
        Self { markers, policy }
    }

    /// Whether any marker suppresses `rule_name` at `line`.
    ///
    /// Findings without a line anchor are only covered by file-scope
    /// markers.
    pub fn is_suppressed(&self, rule_name: &str, line: Option<u32>) -> bool {
        self.markers.iter().any(|m| {
            m.names_rule(rule_name) && self.scope_covers(m, line)
        })
    }

    /// Drop suppressed findings from a batch, preserving order.
    pub fn filter_findings(&self, findings: Vec<RawFinding>) -> Vec<RawFinding> {
        if self.markers.is_empty() {
            return findings;
        }
        findings
            .into_iter()
            .filter(|f| !self.is_suppressed(&f.rule_name, f.line))
            .collect()
    }

    fn scope_covers(&self, marker: &SuppressionMarker, line: Option<u32>) -> bool {
        let scope = self.effective_scope(marker);
        match scope {
            SuppressionScope::File => true,
            SuppressionScope::NextLine => line == Some(marker.comment_line + 1),
            SuppressionScope::SameLine => line == Some(marker.comment_line),
        }
    }

    /// The positional scope, optionally widened for `all` markers.
    fn effective_scope(&self, marker: &SuppressionMarker) -> SuppressionScope {
        if self.policy.widen_all_to_file && marker.is_wildcard() {
            return SuppressionScope::File;
        }
        marker.scope
    }
}
