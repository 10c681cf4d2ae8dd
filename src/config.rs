use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Configuration for one analysis run.
///
/// Root selection: either `base_directory` or `source_directories`
/// must be non-empty; when both are set, `source_directories` wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Single base directory to analyze.
    pub base_directory: Option<String>,

    /// Ordered list of root directories; merged into one logical tree.
    pub source_directories: Vec<String>,

    /// Path-level regular expression; only matching files are analyzed.
    pub apply_to_files_matching: Option<String>,

    /// Path-level regular expression; matching files are excluded.
    pub do_not_apply_to_files_matching: Option<String>,

    /// Comma-separated filename globs (`*`, `?`); only matching files
    /// are analyzed.
    pub apply_to_file_names: Option<String>,

    /// Comma-separated filename globs; matching files are excluded.
    pub do_not_apply_to_file_names: Option<String>,

    /// Upper bound on files analyzed concurrently.
    pub max_parallel_files: usize,

    /// Scope policy for suppression markers.
    pub suppression: SuppressionPolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_directory: None,
            source_directories: Vec::new(),
            apply_to_files_matching: None,
            do_not_apply_to_files_matching: None,
            apply_to_file_names: None,
            do_not_apply_to_file_names: None,
            max_parallel_files: 16,
            suppression: SuppressionPolicy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Convenience constructor for a single base directory.
    pub fn for_base_directory(dir: impl Into<String>) -> Self {
        Self {
            base_directory: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Convenience constructor for an ordered list of roots.
    pub fn for_source_directories<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_directories: dirs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Resolve the effective root directories for this run.
    ///
    /// Blank entries are ignored. Fails with `AnalyzerError::Config`
    /// when no usable root remains; this is checked before any
    /// traversal starts.
    pub fn effective_roots(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let dirs: Vec<PathBuf> = self
            .source_directories
            .iter()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .collect();

        if !dirs.is_empty() {
            return Ok(dirs);
        }

        if let Some(base) = &self.base_directory {
            if !base.trim().is_empty() {
                return Ok(vec![PathBuf::from(base)]);
            }
        }

        Err(AnalyzerError::Config(
            "no base directory or source directories configured".to_string(),
        ))
    }
}

/// Scope policy for suppression markers.
///
/// Whether an `all` marker should cover the whole file instead of only
/// the following line is an explicit policy choice rather than inferred
/// behavior; named-rule markers always keep their positional scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionPolicy {
    /// Widen `all` markers to file scope regardless of position.
    pub widen_all_to_file: bool,
}
