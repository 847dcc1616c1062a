//! Stale-while-revalidate cache for pages of notes.
//!
//! The cache owns three things:
//!
//! - the last successful [`PageResult`] per [`QueryKey`], with a stale flag
//!   and the last fetch error
//! - a pending registry mapping each key to the one [`RequestId`] whose
//!   response it is waiting for
//! - which key is currently observed, and which one was displayed before
//!   it, for the keep-previous-data policy
//!
//! A response is accepted only if its id is the one registered for its key.
//! Anything else (a response superseded by invalidation) is discarded on
//! arrival.

use super::key::QueryKey;
use crate::api::{ApiRequest, RequestId};
use crate::domain::error::Result;
use crate::domain::note::PageResult;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct CacheEntry {
    data: Option<PageResult>,
    stale: bool,
    error: Option<String>,
}

/// Read-only snapshot of one key, as the renderer consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryView<'a> {
    /// Result for the key, or the previously displayed result while the
    /// key's first fetch is pending.
    pub data: Option<&'a PageResult>,
    /// `data` belongs to an earlier key.
    pub is_placeholder: bool,
    /// A fetch for the key is in flight.
    pub is_loading: bool,
    /// The last fetch for the key failed and none is in flight.
    pub is_error: bool,
    pub error: Option<&'a str>,
    /// Cached data was invalidated and not yet refreshed.
    pub is_stale: bool,
}

impl QueryView<'_> {
    /// Data is the key's own, and nothing is in flight or failed.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.data.is_some() && !self.is_placeholder && !self.is_loading && !self.is_error
    }

    /// Total pages of the visible result, `1` when nothing is visible.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.data.map_or(1, |page| page.total_pages.max(1))
    }
}

/// Result of [`QueryCache::get`].
#[derive(Debug)]
pub struct Lookup<'a> {
    pub view: QueryView<'a>,
    /// Request the caller must send, if the lookup started a fetch.
    pub fetch: Option<ApiRequest>,
}

/// What happened to an arriving list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Stored under this key.
    Accepted(QueryKey),
    /// No key was waiting for this request id.
    Discarded,
}

/// Cache of note pages keyed by `(namespace, page, term)`.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    pending: HashMap<QueryKey, RequestId>,
    current: Option<QueryKey>,
    previous: Option<QueryKey>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes `key` and starts a fetch if one is needed.
    ///
    /// A fetch is started when the key has no data, is stale, or last failed,
    /// and no fetch for it is already pending. `start_fetch` builds the
    /// request; its id is registered before the request is returned.
    ///
    /// # Errors
    ///
    /// Propagates a failure of `start_fetch`, which is also recorded as the
    /// key's error.
    pub fn get<F>(&mut self, key: &QueryKey, start_fetch: F) -> Result<Lookup<'_>>
    where
        F: FnOnce(&QueryKey) -> Result<ApiRequest>,
    {
        self.observe(key);

        let needs_fetch = !self.pending.contains_key(key)
            && self
                .entries
                .get(key)
                .map_or(true, |entry| entry.data.is_none() || entry.stale || entry.error.is_some());

        let mut fetch = None;
        if needs_fetch {
            match start_fetch(key) {
                Ok(request) => {
                    tracing::debug!(key = %key, request_id = %request.id(), "starting fetch");
                    self.pending.insert(key.clone(), request.id());
                    fetch = Some(request);
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "could not start fetch");
                    self.entries.entry(key.clone()).or_default().error = Some(e.user_message());
                    return Err(e);
                }
            }
        } else {
            tracing::trace!(key = %key, pending = self.pending.contains_key(key), "serving from cache");
        }

        Ok(Lookup {
            view: self.view(key),
            fetch,
        })
    }

    /// Snapshot of `key` without observing it or starting a fetch.
    #[must_use]
    pub fn view(&self, key: &QueryKey) -> QueryView<'_> {
        let entry = self.entries.get(key);
        let own = entry.and_then(|e| e.data.as_ref());
        let is_loading = self.pending.contains_key(key);
        let error = entry.and_then(|e| e.error.as_deref()).filter(|_| !is_loading);

        let (data, is_placeholder) = match own {
            Some(page) => (Some(page), false),
            None => {
                let placeholder = self
                    .previous
                    .as_ref()
                    .filter(|prev| *prev != key)
                    .and_then(|prev| self.entries.get(prev))
                    .and_then(|e| e.data.as_ref());
                (placeholder, placeholder.is_some())
            }
        };

        QueryView {
            data,
            is_placeholder,
            is_loading,
            is_error: error.is_some(),
            error,
            is_stale: entry.is_some_and(|e| e.stale),
        }
    }

    /// Stores the outcome of a list request.
    ///
    /// A failure keeps the last good data for the key.
    pub fn resolve(&mut self, id: RequestId, result: Result<PageResult>) -> Resolution {
        let Some(key) = self
            .pending
            .iter()
            .find_map(|(key, pending)| (*pending == id).then(|| key.clone()))
        else {
            tracing::debug!(request_id = %id, "discarding superseded response");
            return Resolution::Discarded;
        };
        self.pending.remove(&key);

        let entry = self.entries.entry(key.clone()).or_default();
        match result {
            Ok(page) => {
                tracing::debug!(key = %key, notes = page.notes.len(), total_pages = page.total_pages, "fetch succeeded");
                entry.data = Some(page);
                entry.stale = false;
                entry.error = None;
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "fetch failed");
                entry.error = Some(e.user_message());
            }
        }

        Resolution::Accepted(key)
    }

    /// Evicts every entry under `namespace` and supersedes in-flight fetches.
    ///
    /// The observed key and the placeholder key survive, marked stale, so the
    /// screen keeps its data until the re-fetch lands. Everything else in the
    /// namespace is dropped.
    ///
    /// # Returns
    ///
    /// The number of entries evicted or marked stale.
    pub fn invalidate(&mut self, namespace: &str) -> usize {
        let before = self.entries.len();
        let (current, previous) = (&self.current, &self.previous);
        self.entries.retain(|key, _| {
            !key.in_namespace(namespace) || current.as_ref() == Some(key) || previous.as_ref() == Some(key)
        });
        let evicted = before - self.entries.len();

        let mut marked = 0;
        for (key, entry) in &mut self.entries {
            if key.in_namespace(namespace) {
                entry.stale = true;
                marked += 1;
            }
        }

        let pending_before = self.pending.len();
        self.pending.retain(|key, _| !key.in_namespace(namespace));

        tracing::debug!(
            namespace,
            evicted,
            marked,
            superseded = pending_before - self.pending.len(),
            "invalidated namespace"
        );
        evicted + marked
    }

    /// Marks a single key stale so its next [`get`](Self::get) re-fetches.
    pub fn mark_stale(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    #[must_use]
    pub fn is_pending(&self, key: &QueryKey) -> bool {
        self.pending.contains_key(key)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn observe(&mut self, key: &QueryKey) {
        if self.current.as_ref() == Some(key) {
            return;
        }

        if let Some(old) = self.current.take() {
            let had_data = self.entries.get(&old).is_some_and(|e| e.data.is_some());
            if had_data {
                self.previous = Some(old);
            }
        }
        self.current = Some(key.clone());
    }
}
