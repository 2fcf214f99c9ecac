//! Endpoint records and the canonical HTTP method form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP method in canonical form.
///
/// Incoming method strings are normalized through [`HttpMethod::from_str`],
/// which accepts any casing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for method strings outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method: {0:?}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// A single mock endpoint inside a group.
///
/// `(group_id, path, method)` is unique. `path` is stored in canonical
/// trailing-slash form and the `id` is the only key linking into payload
/// storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Store-allocated identity; links to the payload document.
    pub id: i64,
    /// Owning group.
    pub group_id: i64,
    /// Canonical endpoint path (trailing slash).
    pub path: String,
    pub method: HttpMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
