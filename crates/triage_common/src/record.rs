//! Structured compiler diagnostics.

use serde::{Deserialize, Serialize};

/// One compiler-reported error with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Full path of the originating source file, as printed by the compiler
    pub file_path: String,
    /// Final path segment of `file_path`
    pub file_name: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    /// Diagnostic text, continuation lines joined by single spaces
    pub message: String,
}

impl ErrorRecord {
    /// Build a record, deriving `file_name` from `file_path`.
    ///
    /// Returns `None` when the location is not 1-based.
    pub fn new(file_path: &str, line: u32, column: u32, message: &str) -> Option<Self> {
        if line == 0 || column == 0 {
            return None;
        }
        Some(Self {
            file_path: file_path.to_string(),
            file_name: file_name_of(file_path).to_string(),
            line,
            column,
            message: message.to_string(),
        })
    }
}

/// Last segment of a `/` or `\` separated path.
///
/// A path ending in a separator yields the whole trimmed path rather than an
/// empty name.
pub fn file_name_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}
