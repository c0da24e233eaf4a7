//! Permission tag model for WLD.

use crate::validation::{validate, TextField};
use crate::Result;

/// A named permission tag. A user "has" it; a board "requires" it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BoardPerm {
    /// Unique tag ID.
    pub id: i64,
    /// Tag name (unique, the lookup key for link operations).
    pub name: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new permission tag.
#[derive(Debug, Clone)]
pub struct NewBoardPerm {
    /// Tag name.
    pub name: String,
}

impl NewBoardPerm {
    /// Create a new tag with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: validate(TextField::Name, &self.name)?,
        })
    }
}
