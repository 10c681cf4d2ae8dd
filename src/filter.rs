//! Inclusion/exclusion policy applied per candidate file.
//!
//! Patterns come in two forms:
//! - a path-level regular expression, matched against the full
//!   forward-slash-normalized path
//! - a comma-separated list of filename globs (`*` = any run of
//!   characters, `?` = exactly one character), matched against the bare
//!   file name
//!
//! A file is included only if it matches at least one apply pattern (or
//! none are configured) and matches no do-not-apply pattern. Exclusion
//! wins when both fire. Directories are never filtered here; a subtree
//! disappears only because no file beneath it matches.

use glob::Pattern;
use regex::Regex;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;

/// One configured pattern, either path-level or filename-level.
#[derive(Debug, Clone)]
enum SelectorPattern {
    PathRegex(Regex),
    FileNameGlobs(Vec<Pattern>),
}

impl SelectorPattern {
    fn matches(&self, path: &str, file_name: &str) -> bool {
        match self {
            SelectorPattern::PathRegex(re) => re.is_match(path),
            SelectorPattern::FileNameGlobs(globs) => globs.iter().any(|g| g.matches(file_name)),
        }
    }
}

/// Decides whether a candidate file participates in analysis.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    apply: Vec<SelectorPattern>,
    do_not_apply: Vec<SelectorPattern>,
}

impl PathFilter {
    /// A filter with no patterns; includes every file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from the four pattern fields of a config.
    ///
    /// Invalid regexes and globs are configuration errors.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let mut filter = Self::new();

        if let Some(re) = &config.apply_to_files_matching {
            filter = filter.apply_to_paths_matching(re)?;
        }
        if let Some(re) = &config.do_not_apply_to_files_matching {
            filter = filter.do_not_apply_to_paths_matching(re)?;
        }
        if let Some(names) = &config.apply_to_file_names {
            filter = filter.apply_to_file_names(names)?;
        }
        if let Some(names) = &config.do_not_apply_to_file_names {
            filter = filter.do_not_apply_to_file_names(names)?;
        }

        Ok(filter)
    }

    /// Add an apply pattern matching full paths against a regex.
    pub fn apply_to_paths_matching(mut self, pattern: &str) -> Result<Self, AnalyzerError> {
        self.apply.push(compile_path_regex(pattern)?);
        Ok(self)
    }

    /// Add a do-not-apply pattern matching full paths against a regex.
    pub fn do_not_apply_to_paths_matching(mut self, pattern: &str) -> Result<Self, AnalyzerError> {
        self.do_not_apply.push(compile_path_regex(pattern)?);
        Ok(self)
    }

    /// Add an apply pattern from a comma-separated filename glob list.
    pub fn apply_to_file_names(mut self, names: &str) -> Result<Self, AnalyzerError> {
        self.apply.push(compile_name_globs(names)?);
        Ok(self)
    }

    /// Add a do-not-apply pattern from a comma-separated filename glob list.
    pub fn do_not_apply_to_file_names(mut self, names: &str) -> Result<Self, AnalyzerError> {
        self.do_not_apply.push(compile_name_globs(names)?);
        Ok(self)
    }

    /// Whether the file at `path` (with bare name `file_name`) should be
    /// analyzed. Matching is case-sensitive; `path` is normalized to
    /// forward slashes before regex matching.
    pub fn should_include(&self, path: &str, file_name: &str) -> bool {
        let normalized = normalize_separators(path);

        let applies = self.apply.is_empty()
            || self
                .apply
                .iter()
                .any(|p| p.matches(&normalized, file_name));

        let excluded = self
            .do_not_apply
            .iter()
            .any(|p| p.matches(&normalized, file_name));

        applies && !excluded
    }
}

/// Normalize host path separators to forward slashes.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn compile_path_regex(pattern: &str) -> Result<SelectorPattern, AnalyzerError> {
    let re = Regex::new(pattern)
        .map_err(|e| AnalyzerError::Config(format!("invalid path pattern {pattern:?}: {e}")))?;
    Ok(SelectorPattern::PathRegex(re))
}

fn compile_name_globs(names: &str) -> Result<SelectorPattern, AnalyzerError> {
    let mut globs = Vec::new();
    for name in names.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let glob = Pattern::new(name).map_err(|e| {
            AnalyzerError::Config(format!("invalid file name pattern {name:?}: {e}"))
        })?;
        globs.push(glob);
    }
    Ok(SelectorPattern::FileNameGlobs(globs))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Empty Filter Tests ====================

    #[test]
    fn empty_filter_includes_everything() {
        let filter = PathFilter::new();
        assert!(filter.should_include("src/Main.ext", "Main.ext"));
        assert!(filter.should_include("deep/nested/dir/File.ext", "File.ext"));
    }

    // ==================== Path Regex Tests ====================

    #[test]
    fn apply_path_regex_includes_only_matches() {
        let filter = PathFilter::new()
            .apply_to_paths_matching(r"src/.*\.ext")
            .unwrap();

        assert!(filter.should_include("src/Main.ext", "Main.ext"));
        assert!(!filter.should_include("docs/Main.ext", "Main.ext"));
    }

    #[test]
    fn do_not_apply_path_regex_excludes_matches() {
        let filter = PathFilter::new()
            .do_not_apply_to_paths_matching(r".*/generated/.*")
            .unwrap();

        assert!(filter.should_include("src/Main.ext", "Main.ext"));
        assert!(!filter.should_include("src/generated/Stub.ext", "Stub.ext"));
    }

    #[test]
    fn path_matching_normalizes_backslashes() {
        let filter = PathFilter::new()
            .apply_to_paths_matching(r"src/.*\.ext")
            .unwrap();

        assert!(filter.should_include(r"src\Main.ext", "Main.ext"));
    }

    #[test]
    fn path_matching_is_case_sensitive() {
        let filter = PathFilter::new()
            .apply_to_paths_matching(r"src/.*\.ext")
            .unwrap();

        assert!(!filter.should_include("SRC/Main.ext", "Main.ext"));
    }

    #[test]
    fn invalid_path_regex_is_config_error() {
        let err = PathFilter::new()
            .apply_to_paths_matching("([unclosed")
            .unwrap_err();
        assert!(err.to_string().contains("configuration error"));
    }

    // ==================== File Name Glob Tests ====================

    #[test]
    fn apply_file_names_star_matches_any_run() {
        let filter = PathFilter::new().apply_to_file_names("A*.ext").unwrap();

        assert!(filter.should_include("dir/Abc.ext", "Abc.ext"));
        assert!(filter.should_include("dir/A.ext", "A.ext"));
        assert!(!filter.should_include("dir/Bcd.ext", "Bcd.ext"));
    }

    #[test]
    fn apply_file_names_question_mark_matches_exactly_one() {
        let filter = PathFilter::new().apply_to_file_names("B?.ext").unwrap();

        assert!(filter.should_include("dir/B1.ext", "B1.ext"));
        assert!(!filter.should_include("dir/B12.ext", "B12.ext"));
        assert!(!filter.should_include("dir/B.ext", "B.ext"));
    }

    #[test]
    fn comma_separated_list_is_a_union() {
        let filter = PathFilter::new()
            .apply_to_file_names("A*.ext, B?.ext")
            .unwrap();

        assert!(filter.should_include("Abc.ext", "Abc.ext"));
        assert!(filter.should_include("B1.ext", "B1.ext"));
        assert!(!filter.should_include("C.ext", "C.ext"));
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        // B1.ext matches the apply list and the do-not-apply list;
        // the exclusion must win.
        let filter = PathFilter::new()
            .apply_to_file_names("A*.ext,B?.ext")
            .unwrap()
            .do_not_apply_to_file_names("B1.ext")
            .unwrap();

        assert!(filter.should_include("dir/Abc.ext", "Abc.ext"));
        assert!(filter.should_include("dir/B2.ext", "B2.ext"));
        assert!(!filter.should_include("dir/B1.ext", "B1.ext"));
    }

    #[test]
    fn adding_exclusion_only_shrinks_included_set() {
        let base = PathFilter::new().apply_to_file_names("*.ext").unwrap();
        let narrowed = base
            .clone()
            .do_not_apply_to_file_names("b.ext")
            .unwrap();

        let candidates = ["a.ext", "b.ext", "c.ext", "d.other"];
        for name in candidates {
            let in_base = base.should_include(name, name);
            let in_narrowed = narrowed.should_include(name, name);
            assert!(
                in_base || !in_narrowed,
                "{name} appeared after adding an exclusion"
            );
        }
    }

    #[test]
    fn file_name_globs_are_case_sensitive() {
        let filter = PathFilter::new().apply_to_file_names("A*.ext").unwrap();
        assert!(!filter.should_include("abc.ext", "abc.ext"));
    }

    #[test]
    fn invalid_glob_is_config_error() {
        let err = PathFilter::new().apply_to_file_names("[").unwrap_err();
        assert!(err.to_string().contains("configuration error"));
    }

    // ==================== Combined Pattern Tests ====================

    #[test]
    fn regex_and_globs_combine_as_union_of_apply_patterns() {
        let filter = PathFilter::new()
            .apply_to_paths_matching(r"special/.*")
            .unwrap()
            .apply_to_file_names("A*.ext")
            .unwrap();

        // Either pattern is enough to include.
        assert!(filter.should_include("special/Whatever.txt", "Whatever.txt"));
        assert!(filter.should_include("other/Abc.ext", "Abc.ext"));
        assert!(!filter.should_include("other/Zzz.txt", "Zzz.txt"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let filter = PathFilter::new()
            .apply_to_file_names("A*.ext")
            .unwrap()
            .do_not_apply_to_file_names("A1.ext")
            .unwrap();

        for _ in 0..3 {
            assert!(filter.should_include("A2.ext", "A2.ext"));
            assert!(!filter.should_include("A1.ext", "A1.ext"));
        }
    }

    // ==================== from_config Tests ====================

    #[test]
    fn from_config_wires_all_four_fields() {
        let config = crate::config::AnalyzerConfig {
            apply_to_files_matching: Some(r".*\.ext".to_string()),
            do_not_apply_to_files_matching: Some(r".*/skip/.*".to_string()),
            apply_to_file_names: Some("*.ext".to_string()),
            do_not_apply_to_file_names: Some("Ignored.ext".to_string()),
            ..Default::default()
        };

        let filter = PathFilter::from_config(&config).unwrap();
        assert!(filter.should_include("src/Ok.ext", "Ok.ext"));
        assert!(!filter.should_include("src/skip/Ok.ext", "Ok.ext"));
        assert!(!filter.should_include("src/Ignored.ext", "Ignored.ext"));
    }

    #[test]
    fn from_config_empty_includes_everything() {
        let config = crate::config::AnalyzerConfig::default();
        let filter = PathFilter::from_config(&config).unwrap();
        assert!(filter.should_include("any/File.ext", "File.ext"));
    }
}
