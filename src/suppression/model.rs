//! Data structures for violation suppression.

use serde::{Deserialize, Serialize};

/// A suppression directive found in source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionMarker {
    /// The rule names to suppress.
    ///
    /// The keyword `all` (case-insensitive) matches every rule; an
    /// empty list is treated the same way.
    pub rule_names: Vec<String>,

    /// The scope this marker covers.
    pub scope: SuppressionScope,

    /// Line number where the comment appears (1-indexed).
    pub comment_line: u32,
}

impl SuppressionMarker {
    /// Whether this marker names the given rule.
    pub fn names_rule(&self, rule_name: &str) -> bool {
        if self.rule_names.is_empty() {
            return true;
        }
        self.rule_names
            .iter()
            .any(|n| n.eq_ignore_ascii_case("all") || n.eq_ignore_ascii_case(rule_name))
    }

    /// Whether this marker targets every rule.
    pub fn is_wildcard(&self) -> bool {
        self.rule_names.is_empty()
            || self.rule_names.iter().any(|n| n.eq_ignore_ascii_case("all"))
    }
}

/// The scope of a suppression directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuppressionScope {
    /// Suppresses matching rules for the entire file.
    File,

    /// Suppresses matching rules for the next line only.
    NextLine,

    /// Suppresses matching rules for the same line (inline comment).
    SameLine,
}
