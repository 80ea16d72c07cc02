//! Visibility and name filtering for symbol records.

use super::{SymbolError, SymbolRecord};

/// Keep only public records. Errors pass through untouched so the caller
/// still sees them in row order.
pub fn public_only<I>(records: I) -> impl Iterator<Item = Result<SymbolRecord, SymbolError>>
where
    I: IntoIterator<Item = Result<SymbolRecord, SymbolError>>,
{
    records.into_iter().filter(|r| match r {
        Ok(record) => record.is_public(),
        Err(_) => true,
    })
}

/// Prefix-based name selection and renaming.
///
/// `strip_prefix` only has an effect together with `match_prefix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMatcher {
    match_prefix: Option<String>,
    strip_prefix: bool,
}

impl NameMatcher {
    /// Create a matcher that accepts every name unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept names starting with `prefix`.
    pub fn with_match_prefix(mut self, prefix: Option<String>) -> Self {
        self.match_prefix = prefix;
        self
    }

    /// Remove the match prefix from emitted names.
    pub fn with_strip_prefix(mut self, strip: bool) -> Self {
        self.strip_prefix = strip;
        self
    }

    /// The configured match prefix.
    pub fn match_prefix(&self) -> Option<&str> {
        self.match_prefix.as_deref()
    }

    /// Whether stripping was requested but cannot apply.
    pub fn strip_is_inert(&self) -> bool {
        self.strip_prefix && self.match_prefix.is_none()
    }

    /// Check whether a native name is selected.
    pub fn matches(&self, name: &str) -> bool {
        match self.match_prefix {
            Some(ref prefix) => name.starts_with(prefix.as_str()),
            None => true,
        }
    }

    /// Map a native name to the name it is declared under, or `None` if the
    /// name is not selected.
    pub fn emitted_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self.match_prefix {
            Some(ref prefix) if self.strip_prefix => name.strip_prefix(prefix.as_str()),
            Some(ref prefix) => name.starts_with(prefix.as_str()).then_some(name),
            None => Some(name),
        }
    }
}
