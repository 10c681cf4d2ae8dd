//! Rule: lines longer than a configured maximum.

use async_trait::async_trait;

use crate::error::RuleError;
use crate::parse::ParsedSource;
use crate::rules::finding::RawFinding;
use crate::rules::Rule;

const DEFAULT_MAX_LENGTH: usize = 120;

/// Flags lines whose character count exceeds `max_length`.
#[derive(Debug, Clone)]
pub struct LineLengthRule {
    pub max_length: usize,
}

impl Default for LineLengthRule {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl LineLengthRule {
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }
}

#[async_trait]
impl Rule for LineLengthRule {
    fn name(&self) -> &str {
        "LineLength"
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn evaluate(&self, file: &ParsedSource) -> Result<Vec<RawFinding>, RuleError> {
        let mut findings = Vec::new();
        for (line_num, text) in file.numbered_lines() {
            let length = text.chars().count();
            if length > self.max_length {
                findings.push(RawFinding::at_line(
                    self.name(),
                    self.priority(),
                    line_num,
                    format!(
                        "line is {length} characters, exceeds maximum of {}",
                        self.max_length
                    ),
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
    async fn short_lines_pass() {
        let rule = LineLengthRule::with_max_length(10);
        let file = ParsedSource::new("a.ext", "short\nlines");
        let findings = rule.evaluate(&file).await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn long_line_is_flagged_with_line_number() {
        let rule = LineLengthRule::with_max_length(5);
        let file = ParsedSource::new("a.ext", "ok\nthis line is long\nok");
        let findings = rule.evaluate(&file).await.unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, Some(2));
        assert_eq!(findings[0].rule_name, "LineLength");
        assert!(findings[0].message.contains("exceeds maximum of 5"));
    }

    #[tokio::test]
    async fn length_is_counted_in_characters_not_bytes() {
        let rule = LineLengthRule::with_max_length(4);
        // four characters, more than four bytes
        let file = ParsedSource::new("a.ext", "äöüß");
        let findings = rule.evaluate(&file).await.unwrap();
        assert!(findings.is_empty());
    }
}
