//! Keyboard position inside the detail form

/// Focused field, highlighted option (reference fields) and the raw text
/// being typed. Number and date fields only reach the form once the text
/// parses; until then it lives here with its parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCursor {
    pub field: usize,
    pub option: usize,
    pub buffer: Option<String>,
    pub buffer_error: Option<String>,
}

impl FormCursor {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.field = (self.field + 1) % len;
        }
        self.leave();
    }

    pub fn previous(&mut self, len: usize) {
        if len > 0 {
            self.field = (self.field + len - 1) % len;
        }
        self.leave();
    }

    pub fn next_option(&mut self, len: usize) {
        if len > 0 {
            self.option = (self.option + 1) % len;
        }
    }

    pub fn previous_option(&mut self, len: usize) {
        if len > 0 {
            self.option = (self.option + len - 1) % len;
        }
    }

    /// Drop typed text and option position; the field stays focused.
    pub fn leave(&mut self) {
        self.option = 0;
        self.buffer = None;
        self.buffer_error = None;
    }

    /// Text to show for the focused field instead of the form value.
    pub fn pending_text(&self, field: usize) -> Option<&str> {
        (field == self.field).then_some(self.buffer.as_deref()).flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_moves_wrap_and_clear_the_buffer() {
        let mut cursor = FormCursor {
            buffer: Some("12".into()),
            ..FormCursor::default()
        };
        cursor.previous(4);
        assert_eq!(cursor.field, 3);
        assert_eq!(cursor.buffer, None);
        cursor.next(4);
        assert_eq!(cursor.field, 0);
        cursor.next(0);
        assert_eq!(cursor.field, 0);
    }

    #[test]
    fn pending_text_only_for_the_focused_field() {
        let cursor = FormCursor {
            field: 2,
            buffer: Some("2024-0".into()),
            ..FormCursor::default()
        };
        assert_eq!(cursor.pending_text(2), Some("2024-0"));
        assert_eq!(cursor.pending_text(1), None);
    }
}
