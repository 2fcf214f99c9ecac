//! Mock path validation and normalization.
//!
//! Every stored or looked-up path goes through this module exactly once:
//! the raw string is checked against the path grammar, split into segments,
//! and carried onward as a typed key instead of being re-sliced ad hoc.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Grammar for a whole path: one or more `\w[\w-]*` segments separated by
/// `/`, with at most one trailing `/`. Empty segments and traversal tokens
/// (`.`, `..`) do not match.
const PATH_PATTERN: &str = r"^\w[\w-]*(/\w[\w-]*)*/?$";

/// Grammar for a single segment (group slugs are validated against this).
const SEGMENT_PATTERN: &str = r"^\w[\w-]*$";

fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PATH_PATTERN).expect("valid regex"))
}

fn segment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SEGMENT_PATTERN).expect("valid regex"))
}

/// Path validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The string does not match the path grammar.
    #[error("invalid path: {0:?}")]
    Malformed(String),
    /// The path is well-formed but too short to name `owner/group/endpoint`.
    #[error("path {raw:?} has {found} segment(s), need at least owner/group/endpoint")]
    TooShallow { raw: String, found: usize },
}

/// Validate `raw` against the path grammar and return its ordered segments.
///
/// A single trailing `/` is accepted and does not produce an empty segment.
pub fn validate(raw: &str) -> Result<Vec<String>, PathError> {
    if !path_regex().is_match(raw) {
        return Err(PathError::Malformed(raw.to_owned()));
    }
    Ok(raw
        .trim_end_matches('/')
        .split('/')
        .map(str::to_owned)
        .collect())
}

/// Canonical storage form of a path: always carries a trailing `/`, so that
/// `"items"` and `"items/"` address the same record.
pub fn normalize(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    }
}

/// Whether `segment` is a single valid path segment.
pub fn is_valid_segment(segment: &str) -> bool {
    segment_regex().is_match(segment)
}

/// Typed three-part resolution key, produced once from the raw path and
/// passed structurally from there on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPath {
    /// Tenant identity (first segment).
    pub owner: String,
    /// Group slug (second segment).
    pub group_slug: String,
    /// Remaining segments re-joined, in canonical (trailing-slash) form.
    pub endpoint_path: String,
}

impl MockPath {
    /// Split a full path into `owner`, `group_slug` and the endpoint path.
    ///
    /// Fails with [`PathError::TooShallow`] when fewer than three segments
    /// are present.
    pub fn parse(full: &str) -> Result<Self, PathError> {
        let segments = validate(full)?;
        if segments.len() < 3 {
            return Err(PathError::TooShallow {
                raw: full.to_owned(),
                found: segments.len(),
            });
        }
        Ok(Self {
            owner: segments[0].clone(),
            group_slug: segments[1].clone(),
            endpoint_path: normalize(&segments[2..].join("/")),
        })
    }
}
