//! Symbol name type for type-safe handling of dotted names.
//!
//! Invariants:
//! - At least one segment
//! - No empty segments (`A..B` does not parse)
//! - Trailing dots are trimmed on parse

use std::fmt;

/// A dot-separated symbol name, e.g. `App.Models.User`.
///
/// The last segment names the loadable artifact (or deepest namespace),
/// the segments before it form the owning namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolName(Vec<String>);

impl SymbolName {
    /// Parse a dotted name. Trailing dots are trimmed first.
    ///
    /// Returns `None` for an empty input or a name with blank segments.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return None;
        }
        let segments: Vec<String> = trimmed.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self(segments))
    }

    /// Build from pre-split segments. Returns `None` on empty or blank input.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        if segments.is_empty() || segments.iter().any(|s| s.as_ref().is_empty()) {
            return None;
        }
        Some(Self(segments.iter().map(|s| s.as_ref().to_string()).collect()))
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// First segment (the root namespace).
    pub fn head(&self) -> &str {
        &self.0[0]
    }

    /// Last segment (the artifact or deepest namespace name).
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Segments of the owning namespace path (everything but the leaf).
    ///
    /// Empty for a single-segment name.
    pub fn namespace_segments(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    /// Dotted form, e.g. `App.Models.User`.
    pub fn as_dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_dotted())
    }
}
