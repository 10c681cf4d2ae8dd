//! Violation suppression via inline comments.
//!
//! Developers can drop findings at a given location with comments like:
//!
//! ```text
//! # treelint-ignore: LineLength, TabCharacter
//! // treelint-ignore: all -- vendored file
//! ```
//!
//! Suppressions can be:
//! - **File-level**: comment in the first 10 lines, before any code,
//!   suppresses matching rules for the entire file
//! - **Line-level**: comment on its own line suppresses the next line
//! - **Inline**: comment at the end of a line suppresses that line
//!
//! Rule names match case-insensitively; the keyword `all` matches every
//! rule. Whether an `all` marker widens to file scope is controlled by
//! [`crate::config::SuppressionPolicy`].

mod model;
mod parser;
mod resolver;

pub use model::{SuppressionMarker, SuppressionScope};
pub use parser::parse_markers;
pub use resolver::SuppressionResolver;
