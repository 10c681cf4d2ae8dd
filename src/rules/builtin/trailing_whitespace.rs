//! Rule: trailing whitespace at end of line.

use async_trait::async_trait;

use crate::error::RuleError;
use crate::parse::ParsedSource;
use crate::rules::finding::RawFinding;
use crate::rules::Rule;

/// Flags lines ending in spaces or tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingWhitespaceRule;

#[async_trait]
impl Rule for TrailingWhitespaceRule {
    fn name(&self) -> &str {
        "TrailingWhitespace"
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn evaluate(&self, file: &ParsedSource) -> Result<Vec<RawFinding>, RuleError> {
        let mut findings = Vec::new();
        for (line_num, text) in file.numbered_lines() {
            if !text.is_empty() && text.ends_with([' ', '\t']) {
                findings.push(RawFinding::at_line(
                    self.name(),
                    self.priority(),
                    line_num,
                    "line has trailing whitespace",
                ));
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_lines_pass() {
        let rule = TrailingWhitespaceRule;
        let file = ParsedSource::new("a.ext", "clean\nlines");
        assert!(rule.evaluate(&file).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trailing_space_and_tab_are_flagged() {
        let rule = TrailingWhitespaceRule;
        let file = ParsedSource::new("a.ext", "space \nclean\ntab\t");
        let findings = rule.evaluate(&file).await.unwrap();

        let lines: Vec<Option<u32>> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![Some(1), Some(3)]);
    }

    #[tokio::test]
    async fn whitespace_only_line_is_flagged() {
        let rule = TrailingWhitespaceRule;
        let file = ParsedSource::new("a.ext", "   ");
        assert_eq!(rule.evaluate(&file).await.unwrap().len(), 1);
    }
}
