//! Composite cache keys.

use std::fmt;

/// Namespace of every notes list query.
pub const NOTES_NAMESPACE: &str = "notes";

/// Identifies one cached query: `(namespace, page, term)`.
///
/// Invalidation works on the namespace alone, so every page of every search
/// term can be dropped at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub namespace: &'static str,
    pub page: u32,
    pub term: String,
}

impl QueryKey {
    /// Key of a notes list query.
    pub fn notes(page: u32, term: impl Into<String>) -> Self {
        Self {
            namespace: NOTES_NAMESPACE,
            page,
            term: term.into(),
        }
    }

    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {:?}]", self.namespace, self.page, self.term)
    }
}
