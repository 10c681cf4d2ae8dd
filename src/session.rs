//! One analysis run: traversal, per-file rule dispatch, tree assembly.
//!
//! A session walks the configured roots in deterministic lexical
//! depth-first order, fans file analysis out over a bounded worker pool,
//! then folds the outcomes back into a [`ResultsTree`] in walk order so
//! two runs over the same inputs produce identical trees regardless of
//! task scheduling.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use ignore::WalkBuilder;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, ParseError};
use crate::filter::PathFilter;
use crate::parse::SourceParser;
use crate::results::{DirectoryResults, FileResults, ResultsTree, RuleDiagnostic};
use crate::rules::finding::{RawFinding, Violation};
use crate::rules::registry::RuleSet;
use crate::suppression::SuppressionResolver;

/// A file selected for analysis, in walk order.
#[derive(Debug)]
struct Candidate {
    root_index: usize,
    abs_path: PathBuf,
    /// Path shown in results and diagnostics; root-prefixed when the
    /// run has multiple roots.
    display_path: String,
    /// Directory components between the root and the file.
    dir_components: Vec<String>,
    file_name: String,
}

/// Everything one file contributes to the run.
#[derive(Debug)]
struct FileOutcome {
    root_index: usize,
    dir_components: Vec<String>,
    file: FileResults,
    diagnostics: Vec<RuleDiagnostic>,
}

/// State for a single analysis run.
///
/// Built by [`crate::Engine`] with a snapshot of the config and rule
/// set; concurrent config swaps never affect a run in flight.
pub struct AnalysisSession {
    config: AnalyzerConfig,
    rules: Arc<RuleSet>,
    parser: Arc<dyn SourceParser>,
    cancel: Arc<AtomicBool>,
}

impl AnalysisSession {
    pub fn new(
        config: AnalyzerConfig,
        rules: Arc<RuleSet>,
        parser: Arc<dyn SourceParser>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            rules,
            parser,
            cancel,
        }
    }

    /// Run the analysis to completion.
    ///
    /// Fails fast on configuration problems and on cancellation;
    /// per-file and per-rule failures are absorbed into the tree.
    pub async fn run(self) -> Result<ResultsTree, AnalyzerError> {
        let roots = self.config.effective_roots()?;
        for root in &roots {
            if !root.is_dir() {
                return Err(AnalyzerError::Config(format!(
                    "source directory {} does not exist or is not a directory",
                    root.display()
                )));
            }
        }

        let filter = PathFilter::from_config(&self.config)?;
        let candidates = self.collect_candidates(&roots, &filter)?;

        info!(
            roots = roots.len(),
            files = candidates.len(),
            rules = self.rules.len(),
            "starting analysis run"
        );

        let outcomes = self.analyze_candidates(candidates).await?;
        Ok(self.build_tree(&roots, outcomes))
    }

    /// Walk every root in order, lexically sorted within each
    /// directory, and apply the path filter.
    fn collect_candidates(
        &self,
        roots: &[PathBuf],
        filter: &PathFilter,
    ) -> Result<Vec<Candidate>, AnalyzerError> {
        let multi_root = roots.len() > 1;
        let mut candidates = Vec::new();

        for (root_index, root) in roots.iter().enumerate() {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(AnalyzerError::Cancelled);
            }

            let walker = WalkBuilder::new(root)
                .standard_filters(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }

                let Ok(rel) = entry.path().strip_prefix(root) else {
                    continue;
                };
                let mut components: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                let Some(file_name) = components.pop() else {
                    continue;
                };

                let rel_path = if components.is_empty() {
                    file_name.clone()
                } else {
                    format!("{}/{}", components.join("/"), file_name)
                };
                if !filter.should_include(&rel_path, &file_name) {
                    debug!(path = %rel_path, "filtered out");
                    continue;
                }

                let display_path = if multi_root {
                    format!("{}/{}", root_label(root), rel_path)
                } else {
                    rel_path
                };

                candidates.push(Candidate {
                    root_index,
                    abs_path: entry.into_path(),
                    display_path,
                    dir_components: components,
                    file_name,
                });
            }
        }

        Ok(candidates)
    }

    /// Analyze candidates concurrently under the configured parallelism
    /// bound, then restore walk order.
    async fn analyze_candidates(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<FileOutcome>, AnalyzerError> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_parallel_files.max(1)));
        let mut join_set: JoinSet<Option<(usize, FileOutcome)>> = JoinSet::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            if self.cancel.load(Ordering::Relaxed) {
                join_set.abort_all();
                return Err(AnalyzerError::Cancelled);
            }

            let semaphore = semaphore.clone();
            let cancel = self.cancel.clone();
            let rules = self.rules.clone();
            let parser = self.parser.clone();
            let policy = self.config.suppression;

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                let outcome = analyze_file(candidate, &rules, parser.as_ref(), policy).await;
                Some((index, outcome))
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            let task_result = joined.map_err(|e| AnalyzerError::Internal(anyhow!(e)))?;
            if let Some(indexed) = task_result {
                outcomes.push(indexed);
            }
            if self.cancel.load(Ordering::Relaxed) {
                join_set.abort_all();
                return Err(AnalyzerError::Cancelled);
            }
        }

        if self.cancel.load(Ordering::Relaxed) {
            return Err(AnalyzerError::Cancelled);
        }

        outcomes.sort_by_key(|(index, _)| *index);
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Fold ordered outcomes into the final tree.
    ///
    /// The root node always has an empty path. A single root's contents
    /// attach directly beneath it; with multiple roots each root becomes
    /// a child directory, in the order the roots were supplied.
    fn build_tree(&self, roots: &[PathBuf], outcomes: Vec<FileOutcome>) -> ResultsTree {
        let mut diagnostics = Vec::new();
        let mut tree_root = DirectoryResults::new("");

        if roots.len() <= 1 {
            for outcome in outcomes {
                diagnostics.extend(outcome.diagnostics);
                let dirs: Vec<&str> = outcome.dir_components.iter().map(String::as_str).collect();
                tree_root.insert_file(&dirs, outcome.file);
            }
        } else {
            let mut per_root: Vec<DirectoryResults> =
                roots.iter().map(|r| DirectoryResults::new(root_label(r))).collect();
            for outcome in outcomes {
                diagnostics.extend(outcome.diagnostics);
                let dirs: Vec<&str> = outcome.dir_components.iter().map(String::as_str).collect();
                per_root[outcome.root_index].insert_file(&dirs, outcome.file);
            }
            for dir in per_root {
                // A root no file survived under contributes nothing.
                if dir.total_file_count() > 0 {
                    tree_root.attach_directory(dir);
                }
            }
        }

        ResultsTree::new(tree_root, diagnostics)
    }
}

/// Label used for a root's directory node in multi-root runs.
fn root_label(root: &Path) -> String {
    root.to_string_lossy()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_string()
}

/// Read, parse, and evaluate one file.
///
/// Never fails: read and parse errors become an errored file node, rule
/// errors become diagnostics.
async fn analyze_file(
    candidate: Candidate,
    rules: &RuleSet,
    parser: &dyn SourceParser,
    policy: crate::config::SuppressionPolicy,
) -> FileOutcome {
    let Candidate {
        root_index,
        abs_path,
        display_path,
        dir_components,
        file_name,
    } = candidate;

    let content = match tokio::fs::read_to_string(&abs_path).await {
        Ok(content) => content,
        Err(e) => {
            let err = ParseError::File {
                file_path: display_path.clone(),
                source: e.into(),
            };
            warn!(path = %display_path, "failed to read file");
            return FileOutcome {
                root_index,
                dir_components,
                file: FileResults::errored(file_name, err.to_string()),
                diagnostics: Vec::new(),
            };
        }
    };

    let parsed = match parser.parse(&display_path, &content) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(path = %display_path, error = %e, "parse failure");
            return FileOutcome {
                root_index,
                dir_components,
                file: FileResults::errored(file_name, e.to_string()),
                diagnostics: Vec::new(),
            };
        }
    };

    let mut diagnostics = Vec::new();
    let mut tagged: Vec<(usize, RawFinding)> = Vec::new();

    for (rule_index, rule) in rules.all().iter().enumerate() {
        if !rule.applies_to(&parsed) {
            continue;
        }
        match rule.evaluate(&parsed).await {
            Ok(findings) => {
                tagged.extend(findings.into_iter().map(|f| (rule_index, f)));
            }
            Err(e) => {
                warn!(rule = rule.name(), path = %display_path, error = %e, "rule failed");
                diagnostics.push(RuleDiagnostic {
                    rule_name: rule.name().to_string(),
                    file_path: display_path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    // Line order first, then rule declaration order as the tie-break.
    // File-level findings (no line) sort ahead of line 1.
    tagged.sort_by_key(|(rule_index, f)| (f.line.unwrap_or(0), *rule_index));

    let mut findings: Vec<RawFinding> = tagged.into_iter().map(|(_, f)| f).collect();
    for finding in &mut findings {
        if finding.source_line.is_empty() {
            if let Some(line) = finding.line {
                finding.source_line = parsed.line(line).unwrap_or_default().to_string();
            }
        }
    }

    let resolver = SuppressionResolver::from_source(&parsed.source, policy);
    let violations: Vec<Violation> = resolver
        .filter_findings(findings)
        .into_iter()
        .map(Violation::from)
        .collect();

    debug!(path = %display_path, violations = violations.len(), "file analyzed");

    FileOutcome {
        root_index,
        dir_components,
        file: FileResults::new(file_name, violations),
        diagnostics,
    }
}
