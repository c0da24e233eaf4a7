//! User model for WLD.

use crate::validation::{validate, TextField};
use crate::Result;

/// A registered forum user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Email address (may be empty).
    pub email: String,
    /// Given name (may be empty).
    pub first_name: String,
    /// Surname (may be empty).
    pub last_name: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Surname.
    pub last_name: String,
}

impl NewUser {
    /// Create a new user with only a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the first and last name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Run every field through the validator.
    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            username: validate(TextField::Username, &self.username)?,
            email: validate(TextField::Email, &self.email)?,
            first_name: validate(TextField::FirstName, &self.first_name)?,
            last_name: validate(TextField::LastName, &self.last_name)?,
        })
    }
}
