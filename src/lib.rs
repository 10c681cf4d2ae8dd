//! treelint: rule-based static analysis over directory trees.
//!
//! This crate provides the analysis orchestration engine for treelint:
//! - deterministic traversal and file selection over one or more roots
//! - per-file rule dispatch with suppression handling
//! - a hierarchical, queryable results tree mirroring the input layout
//!
//! The language front end is a pluggable [`parse::SourceParser`]; rule
//! bodies are pluggable [`rules::Rule`] implementations.
//!
//! # Example
//!
//! ```ignore
//! use treelint::Engine;
//!
//! let engine = Engine::with_default_config();
//! let results = engine.analyze().await?;
//! println!("{} files analyzed", results.total_file_count());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod parse;
pub mod results;
pub mod rules;
pub mod session;
pub mod suppression;

// Re-export commonly used types
pub use config::{AnalyzerConfig, SuppressionPolicy};
pub use engine::Engine;
pub use error::{AnalyzerError, ParseError, RuleError};
pub use filter::PathFilter;
pub use parse::{ParsedSource, PlainTextParser, SourceParser};
pub use results::{DirectoryResults, FileResults, ResultNode, ResultsTree, RuleDiagnostic};
pub use rules::finding::{RawFinding, Violation};
pub use rules::registry::RuleSet;
pub use rules::Rule;
pub use suppression::SuppressionResolver;
