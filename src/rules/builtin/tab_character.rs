//! Rule: hard tab characters.

use async_trait::async_trait;

use crate::error::RuleError;
use crate::parse::ParsedSource;
use crate::rules::finding::RawFinding;
use crate::rules::Rule;

/// Flags lines containing hard tab characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabCharacterRule;

#[async_trait]
impl Rule for TabCharacterRule {
    fn name(&self) -> &str {
        "TabCharacter"
    }

    fn priority(&self) -> u8 {
        2
    }

    async fn evaluate(&self, file: &ParsedSource) -> Result<Vec<RawFinding>, RuleError> {
        let mut findings = Vec::new();
        for (line_num, text) in file.numbered_lines() {
            if text.contains('\t') {
                findings.push(RawFinding::at_line(
                    self.name(),
                    self.priority(),
                    line_num,
                    "line contains a tab character",
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
    async fn no_tabs_pass() {
        let rule = TabCharacterRule;
        let file = ParsedSource::new("a.ext", "    indented with spaces");
        assert!(rule.evaluate(&file).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tab_anywhere_in_line_is_flagged_once() {
        let rule = TabCharacterRule;
        let file = ParsedSource::new("a.ext", "\tindent\nmid\ttab\nclean");
        let findings = rule.evaluate(&file).await.unwrap();

        let lines: Vec<Option<u32>> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![Some(1), Some(2)]);
    }
}
