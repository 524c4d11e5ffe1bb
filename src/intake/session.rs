use super::form::IntakeForm;
use super::validation::{FieldErrors, ValidProfile, validate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Success { customer_id: String },
    Error { message: String },
}

/// Lifecycle of one intake form: `Editing -> Submitting -> Success | Error`,
/// `Error -> Editing` on retry, `Success -> Editing` on reset.
#[derive(Debug, Clone)]
pub struct IntakeSession {
    form: IntakeForm,
    state: FormState,
}

impl IntakeSession {
    pub fn new(form: IntakeForm) -> Self {
        Self {
            form,
            state: FormState::Editing,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    /// Field edits are only accepted while editing.
    pub fn form_mut(&mut self) -> Option<&mut IntakeForm> {
        match self.state {
            FormState::Editing => Some(&mut self.form),
            _ => None,
        }
    }

    /// Validates and, on success, moves to `Submitting`. Invalid forms stay in `Editing`.
    /// Returns `None` when not editing (a submission is already pending or finished).
    pub fn begin_submit(&mut self) -> Option<Result<ValidProfile, FieldErrors>> {
        if self.state != FormState::Editing {
            return None;
        }
        let result = validate(&self.form);
        if result.is_ok() {
            self.state = FormState::Submitting;
        }
        Some(result)
    }

    pub fn succeed(&mut self, customer_id: String) {
        if self.state == FormState::Submitting {
            self.state = FormState::Success { customer_id };
        }
    }

    pub fn fail(&mut self, message: String) {
        if self.state == FormState::Submitting {
            self.state = FormState::Error { message };
        }
    }

    /// Back to editing after an error.
    ///
    /// Unlike [`reset`](Self::reset), the entered values are kept so the customer
    /// can correct the one the database rejected instead of retyping the whole form.
    pub fn retry(&mut self) -> bool {
        if matches!(self.state, FormState::Error { .. }) {
            self.state = FormState::Editing;
            true
        } else {
            false
        }
    }

    /// Back to an empty form after a successful submission.
    pub fn reset(&mut self) -> bool {
        if matches!(self.state, FormState::Success { .. }) {
            self.form.reset();
            self.state = FormState::Editing;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{Console, ShopCategory};

    fn valid_session() -> IntakeSession {
        let mut form = IntakeForm::new("+1 (246)");
        form.full_name = "Ana Gomez".into();
        form.email = "ana@example.com".into();
        form.input_whatsapp_number("5551234");
        form.accepted_terms = true;
        IntakeSession::new(form)
    }

    #[test]
    fn test_invalid_form_stays_editing() {
        let mut session = IntakeSession::new(IntakeForm::new("+1 (246)"));
        let result = session.begin_submit().unwrap();
        assert!(result.is_err());
        assert_eq!(session.state(), &FormState::Editing);
    }

    #[test]
    fn test_submit_success_then_reset_clears_values() {
        let mut session = valid_session();
        session.form_mut().unwrap().set_console(Console::Ps4, true);

        assert!(session.begin_submit().unwrap().is_ok());
        assert_eq!(session.state(), &FormState::Submitting);
        assert!(session.form_mut().is_none());
        assert!(session.begin_submit().is_none());

        session.succeed("c-1".into());
        assert_eq!(
            session.state(),
            &FormState::Success {
                customer_id: "c-1".into()
            }
        );
        assert!(!session.retry());

        assert!(session.reset());
        assert_eq!(session.state(), &FormState::Editing);
        assert!(session.form().full_name.is_empty());
        assert!(!session.form().accepted_terms);
        assert_eq!(session.form().shop_categories(), vec![ShopCategory::VideoGames]);
        assert!(session.form().selected_consoles().is_empty());
    }

    #[test]
    fn test_error_then_retry_keeps_values() {
        let mut session = valid_session();
        session.begin_submit().unwrap().unwrap();
        session.fail("duplicate".into());
        assert!(matches!(session.state(), FormState::Error { .. }));
        assert!(!session.reset());

        assert!(session.retry());
        assert_eq!(session.state(), &FormState::Editing);
        assert_eq!(session.form().full_name, "Ana Gomez");
        assert_eq!(session.form().email, "ana@example.com");
        assert!(session.form().accepted_terms);
        assert_eq!(session.form().whatsapp_number(), "555-1234");
    }
}
