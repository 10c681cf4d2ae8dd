pub mod builtin;
pub mod finding;
pub mod registry;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::RuleError;
use crate::parse::ParsedSource;
use crate::rules::finding::RawFinding;

/// A single rule treelint can run.
///
/// Rules are pure: they inspect a parsed file and return findings. They
/// do not mutate engine state and may run concurrently across files.
#[async_trait]
pub trait Rule: Send + Sync + Debug {
    /// Unique name; the rule set de-duplicates on it.
    fn name(&self) -> &str;

    /// Numeric priority, 1 = highest.
    fn priority(&self) -> u8;

    /// Whether this rule should run at all for the given file.
    ///
    /// An inapplicable rule contributes nothing; this is not an error.
    fn applies_to(&self, _file: &ParsedSource) -> bool {
        true
    }

    /// Evaluate the rule against one parsed file.
    ///
    /// An `Err` is isolated to this rule/file pair and recorded as a
    /// diagnostic; it never aborts the run.
    async fn evaluate(&self, file: &ParsedSource) -> Result<Vec<RawFinding>, RuleError>;
}
