//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ApplianceError`] via `From`, so use-cases only ever deal with one enum.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum ApplianceError {
    /// One or more input fields failed validation.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A unique field collides with an existing record.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// An update request carried no recognised field.
    #[error("no fields to update")]
    NoChanges,

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Per-field validation failures, keyed by field name.
///
/// Serializes as a flat JSON object: `{"price": "must be >= 0"}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    /// Record a failure for `field`, replacing any previous message.
    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// `Ok(())` when nothing was recorded, the collected errors otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A write collided with a unique constraint.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with {field} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub field: &'static str,
}
