//! Search and pagination state.

use crate::query::QueryKey;
use std::str::FromStr;

/// What an input that trims to nothing does to the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySearchPolicy {
    /// Ignore it; the last non-empty term stays active.
    #[default]
    Keep,
    /// Debounce it like any other input, so clearing the box shows every note.
    Clear,
}

impl FromStr for EmptySearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "clear" => Ok(Self::Clear),
            other => Err(format!("unknown empty_search policy: {other}")),
        }
    }
}

/// `{ raw_input, debounced_term, page }`.
///
/// `raw_input` follows every keystroke. `debounced_term` changes only when the
/// debounce window elapses and always resets `page` to 1. `page` never drops
/// below 1.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub raw_input: String,
    debounced_term: String,
    page: u32,
    policy: EmptySearchPolicy,
}

impl SearchQuery {
    #[must_use]
    pub const fn new(policy: EmptySearchPolicy) -> Self {
        Self {
            raw_input: String::new(),
            debounced_term: String::new(),
            page: 1,
            policy,
        }
    }

    #[must_use]
    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Cache key of the query currently on screen.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::notes(self.page, self.debounced_term.clone())
    }

    /// Records new raw input.
    ///
    /// Returns the trimmed term to debounce, or `None` when the input should
    /// not touch the filter under the configured policy.
    pub fn set_input(&mut self, text: impl Into<String>) -> Option<String> {
        self.raw_input = text.into();
        let term = self.raw_input.trim();

        if term.is_empty() && self.policy == EmptySearchPolicy::Keep {
            return None;
        }
        Some(term.to_string())
    }

    /// Applies a term whose debounce window elapsed, resetting to page 1.
    ///
    /// Returns whether the query key changed.
    pub fn apply_term(&mut self, term: String) -> bool {
        let changed = term != self.debounced_term || self.page != 1;
        self.debounced_term = term;
        self.page = 1;
        changed
    }

    /// Moves to page `n` if it lies in `1..=total_pages`.
    ///
    /// Returns whether the page changed.
    pub fn set_page(&mut self, n: u32, total_pages: u32) -> bool {
        if n == 0 || n > total_pages.max(1) || n == self.page {
            return false;
        }
        self.page = n;
        true
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(EmptySearchPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_trimmed() {
        let mut q = SearchQuery::default();
        assert_eq!(q.set_input("  milk "), Some("milk".to_string()));
        assert_eq!(q.raw_input, "  milk ");
    }

    #[test]
    fn blank_input_is_ignored_when_keeping_filter() {
        let mut q = SearchQuery::default();
        q.apply_term("milk".into());

        assert_eq!(q.set_input("   "), None);
        assert_eq!(q.debounced_term(), "milk");
    }

    #[test]
    fn blank_input_debounces_when_clearing() {
        let mut q = SearchQuery::new(EmptySearchPolicy::Clear);
        q.apply_term("milk".into());

        assert_eq!(q.set_input(""), Some(String::new()));
    }

    #[test]
    fn applying_term_resets_page() {
        let mut q = SearchQuery::default();
        assert!(q.set_page(3, 5));

        assert!(q.apply_term("milk".into()));
        assert_eq!(q.page(), 1);
        assert_eq!(q.key(), QueryKey::notes(1, "milk"));
    }

    #[test]
    fn same_term_on_first_page_is_no_change() {
        let mut q = SearchQuery::default();
        q.apply_term("milk".into());
        assert!(!q.apply_term("milk".into()));
    }

    #[test]
    fn page_must_stay_in_range() {
        let mut q = SearchQuery::default();
        assert!(!q.set_page(0, 3));
        assert!(!q.set_page(4, 3));
        assert!(!q.set_page(1, 3));
        assert!(q.set_page(3, 3));
        assert_eq!(q.page(), 3);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Clear".parse::<EmptySearchPolicy>(), Ok(EmptySearchPolicy::Clear));
        assert_eq!("keep".parse::<EmptySearchPolicy>(), Ok(EmptySearchPolicy::Keep));
        assert!("drop".parse::<EmptySearchPolicy>().is_err());
    }
}
