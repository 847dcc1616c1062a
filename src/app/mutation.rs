//! Create and delete requests in flight.
//!
//! The orchestrator only tracks which mutation each request id belongs to.
//! The effects of a settled mutation (invalidation, closing the modal,
//! notifications) are applied by the handler, which owns the state they
//! touch.

use crate::api::{ApiRequest, NoteClient, RequestId};
use crate::domain::error::Result;
use crate::domain::NewNote;
use std::collections::HashMap;

/// A mutation awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingMutation {
    Create { title: String },
    Delete { id: String },
}

#[derive(Debug, Default)]
pub struct MutationOrchestrator {
    pending: HashMap<RequestId, PendingMutation>,
}

impl MutationOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a create request and registers it.
    ///
    /// # Errors
    ///
    /// Fails if the request URL cannot be built.
    pub fn submit_create(&mut self, client: &NoteClient, note: &NewNote) -> Result<ApiRequest> {
        let request = client.create_note(note)?;
        tracing::debug!(request_id = %request.id(), title = %note.title, "submitting create");
        self.pending.insert(
            request.id(),
            PendingMutation::Create {
                title: note.title.clone(),
            },
        );
        Ok(request)
    }

    /// Builds a delete request and registers it.
    ///
    /// Returns `Ok(None)` if a delete for the same note is already in flight.
    ///
    /// # Errors
    ///
    /// Fails if the request URL cannot be built.
    pub fn submit_delete(&mut self, client: &NoteClient, id: &str) -> Result<Option<ApiRequest>> {
        if self.is_deleting(id) {
            tracing::debug!(note_id = %id, "delete already in flight");
            return Ok(None);
        }

        let request = client.delete_note(id)?;
        tracing::debug!(request_id = %request.id(), note_id = %id, "submitting delete");
        self.pending
            .insert(request.id(), PendingMutation::Delete { id: id.to_string() });
        Ok(Some(request))
    }

    /// Removes and returns the mutation a response belongs to.
    pub fn settle(&mut self, id: RequestId) -> Option<PendingMutation> {
        self.pending.remove(&id)
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.pending
            .values()
            .any(|m| matches!(m, PendingMutation::Create { .. }))
    }

    #[must_use]
    pub fn is_deleting(&self, note_id: &str) -> bool {
        self.pending
            .values()
            .any(|m| matches!(m, PendingMutation::Delete { id } if id == note_id))
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}
