//! Search queries and errors

use serde::{Deserialize, Serialize};

/// A user search over node/edge label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
    pub is_regex: bool,
    pub case_sensitive: bool,
}

impl SearchQuery {
    pub fn literal(pattern: impl Into<String>) -> Self {
        SearchQuery {
            pattern: pattern.into(),
            is_regex: false,
            case_sensitive: false,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        SearchQuery {
            pattern: pattern.into(),
            is_regex: true,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Search failures surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The user supplied a malformed regular expression. Propagated from the
    /// pattern compiler; the caller is responsible for surfacing it.
    #[error("invalid search pattern: {0}")]
    BadPattern(#[from] regex::Error),
}
