//! The parser seam between the engine and the language front end.
//!
//! The engine never parses source language grammar itself; it consumes a
//! [`SourceParser`] capability that turns raw file content into a
//! [`ParsedSource`] the rule set can inspect. Parsing may fail per file;
//! such failures are recorded on the file's result node and never abort
//! the run.

use std::fmt::Debug;

use crate::error::ParseError;

/// A parsed file as seen by rules.
///
/// Carries the normalized relative path, the bare file name, and the raw
/// source with 1-based line access. Front ends with richer structure can
/// wrap this in their own types behind the rule seam.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    /// Path relative to the analyzed root, forward-slash separated.
    pub path: String,

    /// Bare file name.
    pub file_name: String,

    /// Raw file content.
    pub source: String,
}

impl ParsedSource {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            path,
            file_name,
            source: source.into(),
        }
    }

    /// The literal text of a 1-based line, without its terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.source.lines().nth((line - 1) as usize)
    }

    /// Iterate lines as `(1-based line number, text)` pairs.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.source
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx as u32 + 1, text))
    }
}

/// Capability that turns file content into an inspectable structure.
///
/// Supplied by the language front end; the engine only calls `parse`.
pub trait SourceParser: Send + Sync + Debug {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedSource, ParseError>;
}

/// Default parser: a line-oriented view over the raw text.
///
/// Never fails. Suitable for text-level rules and as the stand-in
/// capability when no language front end is plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl SourceParser for PlainTextParser {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedSource, ParseError> {
        Ok(ParsedSource::new(path, content))
    }
}
