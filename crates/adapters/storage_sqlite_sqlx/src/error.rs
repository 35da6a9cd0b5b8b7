//! Storage-specific error type wrapping sqlx errors.

use appliances_domain::error::{ApplianceError, ConflictError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the failure is a unique index violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }
}

impl From<StorageError> for ApplianceError {
    fn from(err: StorageError) -> Self {
        // `sku` carries the only unique index on the table.
        if err.is_unique_violation() {
            return ConflictError {
                entity: "Appliance",
                field: "sku",
            }
            .into();
        }
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_non_unique_database_error_to_storage() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(matches!(ApplianceError::from(err), ApplianceError::Storage(_)));
    }

    #[test]
    fn should_include_cause_in_display() {
        let err = StorageError::from(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("database error: "));
    }
}
