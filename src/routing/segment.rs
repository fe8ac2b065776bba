//! Path and pattern segmentation.
//!
//! # Responsibilities
//! - Split paths and patterns on the separator
//! - Classify pattern segments as literals or parameter references
//!
//! # Design Decisions
//! - Empty segments are discarded, so `/a//b/` and `/a/b` are identical
//! - A bare sigil (`:`) names nothing and is kept as a literal

/// Separator between segments of a path or pattern.
pub const SEPARATOR: char = '/';

/// Prefix marking a pattern segment as a named parameter.
pub const PARAM_SIGIL: char = ':';

/// Split a path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentToken {
    /// Matched by exact, case-sensitive equality.
    Literal(String),
    /// Bound to the named parameter.
    Param(String),
}

impl SegmentToken {
    /// Classify a single (non-empty) pattern segment.
    pub fn parse(segment: &str) -> Self {
        match segment.strip_prefix(PARAM_SIGIL) {
            Some(name) if !name.is_empty() => SegmentToken::Param(name.to_string()),
            _ => SegmentToken::Literal(segment.to_string()),
        }
    }

    /// The parameter name, if this segment references one.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            SegmentToken::Param(name) => Some(name),
            SegmentToken::Literal(_) => None,
        }
    }
}

/// Tokenize a route pattern.
pub fn tokenize(pattern: &str) -> Vec<SegmentToken> {
    split_path(pattern).into_iter().map(SegmentToken::parse).collect()
}
