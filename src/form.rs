//! Contact form validation and the simulated submission lifecycle.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

/// Alert shown when a required field is blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Alert shown once the simulated submission completes.
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// Label shown on the submit control while sending.
pub const SENDING_LABEL_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#;

/// Snapshot of one form control at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub required: bool,
    pub value: String,
}

impl FieldInput {
    #[must_use]
    pub fn required(value: &str) -> Self {
        Self { required: true, value: value.to_owned() }
    }

    #[must_use]
    pub fn optional(value: &str) -> Self {
        Self { required: false, value: value.to_owned() }
    }

    /// Required fields must hold something other than whitespace.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.trim().is_empty()
    }
}

/// Per-field validity, in field order.
#[must_use]
pub fn validate(fields: &[FieldInput]) -> Vec<bool> {
    fields.iter().map(FieldInput::is_valid).collect()
}

/// Where the form is in its submit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SubmitPhase {
    #[default]
    Idle,
    Sending,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// A submission is already in flight.
    Busy,
    /// Validation failed; the vector marks each field's validity.
    Rejected(Vec<bool>),
    /// Validation passed and sending has started.
    Accepted(Vec<bool>),
}

/// Contact form controller state.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    phase: SubmitPhase,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and, when every field passes, start sending.
    pub fn submit(&mut self, fields: &[FieldInput]) -> SubmitAttempt {
        if self.phase == SubmitPhase::Sending {
            return SubmitAttempt::Busy;
        }
        let validity = validate(fields);
        if validity.iter().all(|ok| *ok) {
            self.phase = SubmitPhase::Sending;
            SubmitAttempt::Accepted(validity)
        } else {
            SubmitAttempt::Rejected(validity)
        }
    }

    /// Leave the sending phase. Returns `false` if nothing was in flight.
    pub fn complete(&mut self) -> bool {
        let was_sending = self.phase == SubmitPhase::Sending;
        self.phase = SubmitPhase::Idle;
        was_sending
    }
}
