//! Create-note modal form.

use crate::domain::{Field, FieldError, NoteDraft};

/// State of the open modal.
///
/// Created when the user asks to add a note and dropped on cancel or after a
/// successful create. A failed create leaves it in place with the draft kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub draft: NoteDraft,
    pub focus: Field,
    /// Violations from the last submit attempt.
    pub errors: Vec<FieldError>,
    /// A create request for this form is in flight.
    pub submitting: bool,
    /// Message of the last rejected create.
    pub server_error: Option<String>,
}

impl NoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Types into the focused field; on the tag field, cycles the tag.
    pub fn input_char(&mut self, c: char) {
        match self.draft.text_mut(self.focus) {
            Some(text) => text.push(c),
            None if c == ' ' => self.draft.tag = self.draft.tag.next(),
            None => {}
        }
        self.clear_field_error(self.focus);
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.draft.text_mut(self.focus) {
            text.pop();
        }
        self.clear_field_error(self.focus);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn next_tag(&mut self) {
        self.draft.tag = self.draft.tag.next();
    }

    pub fn prev_tag(&mut self) {
        self.draft.tag = self.draft.tag.prev();
    }

    /// First error recorded for `field`.
    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn clear_field_error(&mut self, field: Field) {
        self.errors.retain(|e| e.field != field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteTag;

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = NoteForm::new();
        form.input_char('a');
        form.focus_next();
        form.input_char('b');
        form.input_char('c');
        form.backspace();

        assert_eq!(form.draft.title, "a");
        assert_eq!(form.draft.content, "b");
    }

    #[test]
    fn space_on_tag_field_cycles_tag() {
        let mut form = NoteForm::new();
        form.focus = Field::Tag;
        form.input_char(' ');
        assert_eq!(form.draft.tag, NoteTag::Work);

        form.prev_tag();
        form.prev_tag();
        assert_eq!(form.draft.tag, NoteTag::Shopping);
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = NoteForm::new();
        form.errors = form.draft.check();
        assert_eq!(form.error_for(Field::Title), Some("Title is required"));

        form.input_char('x');
        assert_eq!(form.error_for(Field::Title), None);
    }
}
