//! Built-in text-level rules.
//!
//! Real deployments register language-specific rules through the
//! [`crate::rules::Rule`] trait; these rules work on any text file and
//! exercise the engine end to end.

mod line_length;
mod tab_character;
mod trailing_whitespace;

pub use line_length::LineLengthRule;
pub use tab_character::TabCharacterRule;
pub use trailing_whitespace::TrailingWhitespaceRule;
