//! Free-text validation for WLD.
//!
//! Every text column (names, descriptions, user fields, message bodies) passes
//! through [`validate`] before it is written to the store.

use thiserror::Error;

/// Maximum length for board, thread and permission names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for board descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for first and last names.
pub const MAX_PERSON_NAME_LENGTH: usize = 64;

/// Maximum message body length.
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty (or only whitespace).
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// A field exceeds its maximum length in characters.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field label.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// A field contains control characters it does not allow.
    #[error("{0} contains invalid characters")]
    InvalidChars(&'static str),

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,
}

/// A validated text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Board, thread or permission name.
    Name,
    /// Board description.
    Description,
    /// Login name.
    Username,
    /// Email address.
    Email,
    /// Given name.
    FirstName,
    /// Surname.
    LastName,
    /// Message body.
    Message,
}

impl TextField {
    /// Label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Description => "description",
            TextField::Username => "username",
            TextField::Email => "email",
            TextField::FirstName => "first name",
            TextField::LastName => "last name",
            TextField::Message => "message",
        }
    }

    fn max_length(&self) -> usize {
        match self {
            TextField::Name => MAX_NAME_LENGTH,
            TextField::Description => MAX_DESCRIPTION_LENGTH,
            TextField::Username => MAX_USERNAME_LENGTH,
            TextField::Email => MAX_EMAIL_LENGTH,
            TextField::FirstName | TextField::LastName => MAX_PERSON_NAME_LENGTH,
            TextField::Message => MAX_MESSAGE_LENGTH,
        }
    }

    fn required(&self) -> bool {
        matches!(
            self,
            TextField::Name | TextField::Username | TextField::Message
        )
    }

    fn multiline(&self) -> bool {
        matches!(self, TextField::Description | TextField::Message)
    }
}

/// Validate a free-text value for the given field.
///
/// Single-line fields are trimmed; multi-line fields keep their content but
/// may contain newlines and tabs. Returns the value to store.
///
/// # Examples
///
/// ```
/// use wld::validation::{validate, TextField, ValidationError};
///
/// assert_eq!(validate(TextField::Name, "  General  ").unwrap(), "General");
/// assert_eq!(
///     validate(TextField::Name, "   "),
///     Err(ValidationError::Empty("name"))
/// );
/// ```
pub fn validate(field: TextField, text: &str) -> Result<String, ValidationError> {
    let value = if field.multiline() { text } else { text.trim() };
    let label = field.label();

    if field.required() && value.trim().is_empty() {
        return Err(ValidationError::Empty(label));
    }

    if value.chars().count() > field.max_length() {
        return Err(ValidationError::TooLong {
            field: label,
            max: field.max_length(),
        });
    }

    let allowed = |c: char| field.multiline() && matches!(c, '\n' | '\r' | '\t');
    if value.chars().any(|c| c.is_control() && !allowed(c)) {
        return Err(ValidationError::InvalidChars(label));
    }

    match field {
        TextField::Username if value.chars().any(char::is_whitespace) => {
            return Err(ValidationError::InvalidChars(label));
        }
        TextField::Email => validate_email(value)?,
        _ => {}
    }

    Ok(value.to_string())
}

/// Validate an optional email address.
///
/// Empty is accepted; otherwise the address needs one `@` with a dotted domain.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Ok(());
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(ValidationError::EmailInvalidFormat)?;

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if domain.split('.').any(str::is_empty) {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}
