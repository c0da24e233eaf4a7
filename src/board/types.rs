//! Board model for WLD.

use crate::validation::{validate, TextField};
use crate::Result;

/// A discussion category. Owns threads; may require permission tags to view.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name (unique).
    pub name: String,
    /// What the board's threads are about.
    pub description: String,
    /// Board creation timestamp.
    pub created_at: String,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Names of permission tags required to view the board.
    pub perms: Vec<String>,
}

impl NewBoard {
    /// Create a new public board with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            perms: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Require a permission tag (by name) to view the board.
    pub fn with_perm(mut self, perm_name: impl Into<String>) -> Self {
        self.perms.push(perm_name.into());
        self
    }

    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: validate(TextField::Name, &self.name)?,
            description: validate(TextField::Description, &self.description)?,
            perms: self.perms.clone(),
        })
    }
}

/// Data for updating an existing board.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl BoardUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set new description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: self
                .name
                .as_deref()
                .map(|n| validate(TextField::Name, n))
                .transpose()?,
            description: self
                .description
                .as_deref()
                .map(|d| validate(TextField::Description, d))
                .transpose()?,
        })
    }
}
