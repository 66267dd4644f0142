// Contact tab state management.
// Field focus, text editing, and the inline status message under the form.

use crate::contact::{ContactForm, SubmitOutcome};

/// Editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "your.email@example.com",
            Field::Message => "Your message here...",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

/// Inline status under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// Complete state for the Contact tab.
#[derive(Debug, Default)]
pub struct ContactTabState {
    pub form: ContactForm,
    pub focus: Field,
    /// Keystrokes go to the form while editing.
    pub editing: bool,
    pub sending: bool,
    pub notice: Option<Notice>,
}

impl ContactTabState {
    pub fn new(form: ContactForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Message => &self.form.message,
        }
    }

    fn value_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.form.name,
            Field::Email => &mut self.form.email,
            Field::Message => &mut self.form.message,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value_mut().push(c);
    }

    pub fn newline(&mut self) {
        if self.focus == Field::Message {
            self.form.message.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        self.value_mut().pop();
    }

    /// All fields are required.
    pub fn is_complete(&self) -> bool {
        [Field::Name, Field::Email, Field::Message]
            .iter()
            .all(|field| !self.value(*field).trim().is_empty())
    }

    /// Apply a submission result; a sent form is replaced by `next_form`.
    pub fn apply_outcome(&mut self, outcome: &SubmitOutcome, next_form: ContactForm) {
        self.sending = false;
        self.notice = match outcome.inline_message() {
            Some(message) => Some(Notice::Error(message)),
            None => Some(Notice::Success("Thanks! Your message has been sent.".to_string())),
        };
        if matches!(outcome, SubmitOutcome::Sent | SubmitOutcome::StaleForm) {
            let keep = (outcome == &SubmitOutcome::StaleForm).then(|| self.form.clone());
            self.form = next_form;
            if let Some(previous) = keep {
                self.form.name = previous.name;
                self.form.email = previous.email;
                self.form.message = previous.message;
            }
            if outcome == &SubmitOutcome::Sent {
                self.focus = Field::Name;
                self.editing = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn form(token: &str) -> ContactForm {
        ContactForm {
            token: token.to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = ContactTabState::new(form("t1"));
        state.insert_char('A');
        state.focus = state.focus.next();
        for c in "a@b.co".chars() {
            state.insert_char(c);
        }
        state.backspace();

        assert_eq!(state.form.name, "A");
        assert_eq!(state.form.email, "a@b.c");
        assert!(!state.is_complete());
    }

    #[test]
    fn test_newline_only_in_message() {
        let mut state = ContactTabState::new(form("t1"));
        state.newline();
        assert_eq!(state.form.name, "");
        state.focus = Field::Message;
        state.newline();
        assert_eq!(state.form.message, "\n");
    }

    #[test]
    fn test_sent_outcome_resets_form() {
        let mut state = ContactTabState::new(form("t1"));
        state.form.name = "Ada".to_string();
        state.focus = Field::Message;
        state.sending = true;

        state.apply_outcome(&SubmitOutcome::Sent, form("t2"));

        assert!(!state.sending);
        assert_eq!(state.form, form("t2"));
        assert_eq!(state.focus, Field::Name);
        assert!(matches!(state.notice, Some(Notice::Success(_))));
    }

    #[test]
    fn test_rejection_keeps_input() {
        let mut state = ContactTabState::new(form("t1"));
        state.form.name = "Ada".to_string();

        let outcome = SubmitOutcome::RateLimited {
            remaining: Duration::from_millis(900),
        };
        state.apply_outcome(&outcome, form("t2"));

        assert_eq!(state.form.name, "Ada");
        assert_eq!(state.form.token, "t1");
        assert_eq!(
            state.notice,
            Some(Notice::Error(
                "Please wait 1s before submitting again".to_string()
            ))
        );
    }

    #[test]
    fn test_stale_form_gets_fresh_token_and_keeps_text() {
        let mut state = ContactTabState::new(form("old"));
        state.form.message = "Hello".to_string();

        state.apply_outcome(&SubmitOutcome::StaleForm, form("new"));

        assert_eq!(state.form.token, "new");
        assert_eq!(state.form.message, "Hello");
    }
}
