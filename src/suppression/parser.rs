//! Parser for suppression comments in source code.

use crate::suppression::model::{SuppressionMarker, SuppressionScope};

/// The suppression comment marker.
const MARKER: &str = "treelint-ignore:";

/// Maximum line number for file-level suppressions.
const FILE_LEVEL_MAX_LINE: u32 = 10;

/// Parse suppression markers from source code.
///
/// Scans the source for comments containing `treelint-ignore:` and
/// extracts the rule names and scope for each directive. The engine is
/// language-agnostic, so any of `#`, `//`, or `/*` before the marker
/// counts as a comment.
pub fn parse_markers(source: &str) -> Vec<SuppressionMarker> {
    let mut markers = Vec::new();

    for (line_idx, line) in source.lines().enumerate() {
        let line_num = line_idx as u32 + 1;

        if let Some(pos) = line.find(MARKER) {
            if !is_in_comment(line, pos) {
                continue;
            }

            let after_marker = &line[pos + MARKER.len()..];
            let rule_names = parse_rule_names(after_marker);
            let scope = determine_scope(line_num, pos, line);

            markers.push(SuppressionMarker {
                rule_names,
                scope,
                comment_line: line_num,
            });
        }
    }

    markers
}

/// Check if the marker position is inside a comment.
fn is_in_comment(line: &str, marker_pos: usize) -> bool {
    let before = &line[..marker_pos];
    before.contains('#') || before.contains("//") || before.contains("/*")
}

/// Determine the scope of a marker from its position.
fn determine_scope(line_num: u32, comment_pos: usize, line: &str) -> SuppressionScope {
    // Inline suppression takes priority over file-level position: code
    // before the comment means same-line scope.
    let before = line[..comment_pos].trim();
    let is_code_before = !before.is_empty()
        && !before.starts_with('#')
        && !before.starts_with("//")
        && !before.starts_with("/*")
        && !before.starts_with('*');
    if is_code_before {
        return SuppressionScope::SameLine;
    }

    if line_num <= FILE_LEVEL_MAX_LINE {
        return SuppressionScope::File;
    }

    SuppressionScope::NextLine
}

/// Parse the comma-separated rule names after the marker.
///
/// Text after ` - ` or ` -- ` is a free-form reason and is discarded.
fn parse_rule_names(text: &str) -> Vec<String> {
    let text = text.trim();

    let rules_part = if let Some(pos) = text.find(" -- ") {
        &text[..pos]
    } else if let Some(pos) = text.find(" - ") {
        &text[..pos]
    } else {
        text
    };

    rules_part
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
