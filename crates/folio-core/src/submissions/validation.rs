//! Submission validation.

use super::model::{ContactForm, DEFAULT_SUBJECT, NewSubmission};

/// A required contact field was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty.
    EmptyName,
    /// Email address is empty.
    EmptyEmail,
    /// Message is empty.
    EmptyMessage,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::EmptyMessage => "Message is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyMessage => "message",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a contact form.
///
/// An empty name, email or message is rejected; an empty subject becomes
/// [`DEFAULT_SUBJECT`]. Only the empty string counts as missing: fields are
/// kept exactly as typed, whitespace included.
///
/// # Errors
///
/// Returns every `ValidationError` found.
pub fn validate(form: &ContactForm) -> Result<NewSubmission, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if form.name.is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if form.email.is_empty() {
        errors.push(ValidationError::EmptyEmail);
    }
    if form.message.is_empty() {
        errors.push(ValidationError::EmptyMessage);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let subject = if form.subject.is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        form.subject.clone()
    };

    Ok(NewSubmission {
        name: form.name.clone(),
        email: form.email.clone(),
        subject,
        message: form.message.clone(),
    })
}
