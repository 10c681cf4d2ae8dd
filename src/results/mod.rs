//! The hierarchical, aggregated outcome of one analysis run.
//!
//! The tree mirrors the analyzed directory layout: directory nodes own
//! their children outright (no parent back-references) and carry
//! aggregate counts; file nodes hold the violations. Counts are updated
//! eagerly on every insertion, so the invariants hold at every
//! intermediate state, not only at the end. Once a run completes the
//! tree is handed off immutable; every query operation is read-only.

use serde::{Deserialize, Serialize};

use crate::rules::finding::Violation;

/// One node in the results tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultNode {
    Directory(DirectoryResults),
    File(FileResults),
}

impl ResultNode {
    /// Path segment relative to the parent node.
    pub fn path(&self) -> &str {
        match self {
            ResultNode::Directory(d) => &d.path,
            ResultNode::File(f) => &f.path,
        }
    }

    /// Number of analyzed files under this node.
    pub fn total_file_count(&self) -> usize {
        match self {
            ResultNode::Directory(d) => d.total_file_count(),
            ResultNode::File(_) => 1,
        }
    }

    /// Number of analyzed files under this node with at least one
    /// violation.
    pub fn files_with_violations(&self) -> usize {
        match self {
            ResultNode::Directory(d) => d.files_with_violations(),
            ResultNode::File(f) => {
                if f.violations.is_empty() {
                    0
                } else {
                    1
                }
            }
        }
    }

    fn collect_violations_with_priority<'a>(&'a self, priority: u8, out: &mut Vec<&'a Violation>) {
        match self {
            ResultNode::Directory(d) => {
                for child in &d.children {
                    child.collect_violations_with_priority(priority, out);
                }
            }
            ResultNode::File(f) => {
                out.extend(f.violations.iter().filter(|v| v.priority == priority));
            }
        }
    }
}

/// Result node for a single analyzed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResults {
    /// File name relative to the parent directory node.
    pub path: String,

    /// Violations found in this file, ordered by line then rule order.
    pub violations: Vec<Violation>,

    /// Recorded parse failure; the file still counts toward totals but
    /// contributed no violations.
    pub parse_error: Option<String>,
}

impl FileResults {
    pub fn new(path: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            path: path.into(),
            violations,
            parse_error: None,
        }
    }

    /// A file that could not be parsed.
    pub fn errored(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            violations: Vec::new(),
            parse_error: Some(error.into()),
        }
    }
}

/// Result node for a directory, holding aggregate counts over its
/// descendants. Directories never hold violations directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResults {
    /// Directory name relative to the parent; empty for the root.
    pub path: String,

    children: Vec<ResultNode>,
    total_file_count: usize,
    files_with_violations: usize,
}

impl DirectoryResults {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            children: Vec::new(),
            total_file_count: 0,
            files_with_violations: 0,
        }
    }

    /// Ordered child nodes.
    pub fn children(&self) -> &[ResultNode] {
        &self.children
    }

    pub fn total_file_count(&self) -> usize {
        self.total_file_count
    }

    pub fn files_with_violations(&self) -> usize {
        self.files_with_violations
    }

    /// Insert an analyzed file at the relative path given by
    /// `components` (intermediate directories first, file name last is
    /// carried by `file.path`).
    ///
    /// Missing intermediate directory nodes are created on demand, so a
    /// directory is materialized only once a file beneath it exists.
    /// Counts on this node and every descendant on the insertion path
    /// are updated before returning.
    pub fn insert_file(&mut self, dir_components: &[&str], file: FileResults) {
        self.total_file_count += 1;
        if !file.violations.is_empty() {
            self.files_with_violations += 1;
        }

        match dir_components.split_first() {
            None => self.children.push(ResultNode::File(file)),
            Some((head, rest)) => {
                self.child_dir_mut(head).insert_file(rest, file);
            }
        }
    }

    /// Attach a fully built subtree (used when merging multiple roots).
    pub fn attach_directory(&mut self, dir: DirectoryResults) {
        self.total_file_count += dir.total_file_count;
        self.files_with_violations += dir.files_with_violations;
        self.children.push(ResultNode::Directory(dir));
    }

    /// Find or create the child directory named `name`, appending new
    /// directories at the end (callers insert in traversal order, which
    /// keeps siblings lexically sorted).
    fn child_dir_mut(&mut self, name: &str) -> &mut DirectoryResults {
        let pos = self.children.iter().position(
            |c| matches!(c, ResultNode::Directory(d) if d.path == name),
        );
        let pos = match pos {
            Some(pos) => pos,
            None => {
                self.children
                    .push(ResultNode::Directory(DirectoryResults::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[pos] {
            ResultNode::Directory(d) => d,
            ResultNode::File(_) => unreachable!("position found by directory match"),
        }
    }

    /// A child's path segment may itself contain separators (root
    /// labels in multi-root runs do); matching consumes as many leading
    /// components as the child's own path spans.
    fn find_node(&self, components: &[&str]) -> Option<&ResultNode> {
        for child in &self.children {
            let segments: Vec<&str> =
                child.path().split('/').filter(|s| !s.is_empty()).collect();
            if segments.is_empty() || components.len() < segments.len() {
                continue;
            }
            if components[..segments.len()] != segments[..] {
                continue;
            }
            let rest = &components[segments.len()..];
            if rest.is_empty() {
                return Some(child);
            }
            if let ResultNode::Directory(d) = child {
                if let Some(found) = d.find_node(rest) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// A recorded rule evaluation failure, isolated to one rule/file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub rule_name: String,
    pub file_path: String,
    pub error: String,
}

/// The finished, immutable result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsTree {
    root: DirectoryResults,
    diagnostics: Vec<RuleDiagnostic>,
}

impl ResultsTree {
    pub fn new(root: DirectoryResults, diagnostics: Vec<RuleDiagnostic>) -> Self {
        Self { root, diagnostics }
    }

    /// The top-level node. Its path is empty; callers must not assume a
    /// fixed tree depth below it.
    pub fn root(&self) -> &DirectoryResults {
        &self.root
    }

    /// Path of the root node (always empty).
    pub fn path(&self) -> &str {
        &self.root.path
    }

    /// Ordered top-level children.
    pub fn children(&self) -> &[ResultNode] {
        self.root.children()
    }

    /// Total number of analyzed files in the run.
    pub fn total_file_count(&self) -> usize {
        self.root.total_file_count()
    }

    /// Number of analyzed files with at least one violation.
    pub fn files_with_violations(&self) -> usize {
        self.root.files_with_violations()
    }

    /// All violations with the given priority, collected recursively
    /// depth-first in tree order.
    pub fn violations_with_priority(&self, priority: u8) -> Vec<&Violation> {
        let mut out = Vec::new();
        for child in self.root.children() {
            child.collect_violations_with_priority(priority, &mut out);
        }
        out
    }

    /// Look up the node at a `/`-separated path relative to the root.
    pub fn find(&self, path: &str) -> Option<&ResultNode> {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        if components.is_empty() {
            return None;
        }
        self.root.find_node(&components)
    }

    /// Rule evaluation failures recorded during the run.
    pub fn diagnostics(&self) -> &[RuleDiagnostic] {
        &self.diagnostics
    }
}
