//! Create-form draft and its validation rules.
//!
//! Validation happens entirely on the client, before a create request is
//! built. Lengths are counted in characters, not bytes.

use crate::domain::error::{NoteHubError, Result};
use crate::domain::note::{NewNote, NoteTag};
use std::fmt;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 500;

/// Form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field {
    #[default]
    Title,
    Content,
    Tag,
}

impl Field {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Tag,
            Self::Tag => Self::Title,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tag,
            Self::Content => Self::Title,
            Self::Tag => Self::Content,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Tag => "tag",
        }
    }
}

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Values typed into the create form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NoteDraft {
    /// Checks every rule and returns all violations, in field order.
    #[must_use]
    pub fn check(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if title_len == 0 {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        } else if title_len < TITLE_MIN_CHARS {
            errors.push(FieldError::new(
                Field::Title,
                format!("Title must be at least {TITLE_MIN_CHARS} characters"),
            ));
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                Field::Title,
                format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            ));
        }

        if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.push(FieldError::new(
                Field::Content,
                format!("Content must be at most {CONTENT_MAX_CHARS} characters"),
            ));
        }

        errors
    }

    /// Converts the draft into a create request body.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Validation`] with every violated rule.
    pub fn validate(&self) -> Result<NewNote> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(NoteHubError::Validation(errors));
        }

        Ok(NewNote {
            title: self.title.clone(),
            content: self.content.clone(),
            tag: self.tag,
        })
    }

    /// Mutable text buffer for a text field, `None` for the tag selector.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Content => Some(&mut self.content),
            Field::Tag => None,
        }
    }
}
