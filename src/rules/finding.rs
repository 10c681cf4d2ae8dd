use serde::{Deserialize, Serialize};

/// A raw finding produced by a rule before suppression filtering.
///
/// `source_line` may be left empty by the rule; when a line number is
/// present the engine backfills it with the literal line text before
/// suppression filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFinding {
    /// Name of the rule that produced this.
    pub rule_name: String,

    /// Rule priority, 1 = highest.
    pub priority: u8,

    /// Human-readable message.
    pub message: String,

    /// 1-based line number, absent when the finding is not line-anchored.
    pub line: Option<u32>,

    /// Literal source line text, empty when not line-anchored.
    #[serde(default)]
    pub source_line: String,
}

impl RawFinding {
    /// A line-anchored finding; the engine fills in `source_line`.
    pub fn at_line(
        rule_name: impl Into<String>,
        priority: u8,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            priority,
            message: message.into(),
            line: Some(line),
            source_line: String::new(),
        }
    }

    /// A file-level finding with no line anchor.
    pub fn for_file(rule_name: impl Into<String>, priority: u8, message: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            priority,
            message: message.into(),
            line: None,
            source_line: String::new(),
        }
    }
}

/// A finding that survived suppression filtering, attached to exactly
/// one file result.
///
/// The field set (rule name, priority, message, line number, source line
/// text) is part of the external contract; reporters consume it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_name: String,
    pub priority: u8,
    pub message: String,
    pub line: Option<u32>,
    #[serde(default)]
    pub source_line: String,
}

impl From<RawFinding> for Violation {
    fn from(rf: RawFinding) -> Self {
        Self {
            rule_name: rf.rule_name,
            priority: rf.priority,
            message: rf.message,
            line: rf.line,
            source_line: rf.source_line,
        }
    }
}
