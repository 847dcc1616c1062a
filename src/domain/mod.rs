//! Domain layer for the NoteHub plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP transport.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`note`]: Notes, tags, and pages of notes as the API returns them
//! - [`draft`]: Create-form values and their validation rules

pub mod draft;
pub mod error;
pub mod note;

pub use draft::{Field, FieldError, NoteDraft};
pub use error::{NoteHubError, Result};
pub use note::{NewNote, Note, NoteTag, PageResult};
