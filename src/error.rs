use thiserror::Error;

/// Top-level error type exposed by the analyzer.
///
/// This is what bubbles out to callers of [`crate::Engine::analyze`].
/// Per-file and per-rule failures are absorbed into the results tree
/// and never surface here.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("analysis cancelled by caller")]
    Cancelled,

    /// "Catch-all" for unexpected internal failures.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors that occur while reading or parsing individual files.
///
/// Non-fatal: the file is recorded as errored on its result node and
/// still counts toward the total file count.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse {file_path}: {source}")]
    File {
        file_path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors raised by a rule while evaluating a single file.
///
/// Non-fatal: isolated to the rule/file pair and recorded as a
/// diagnostic; remaining rules and files proceed unaffected.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {rule_name} failed: {source}")]
    RuleFailed {
        rule_name: String,
        #[source]
        source: anyhow::Error,
    },
}
