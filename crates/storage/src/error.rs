use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Report a unique-key violation raised by a write as
    /// `ConstraintViolation` carrying `message`; other errors pass through.
    pub(crate) fn on_unique_violation(self, message: impl Into<String>) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(message.into())
        } else {
            self
        }
    }

    /// Same as [`Self::on_unique_violation`] for foreign-key violations
    pub(crate) fn on_foreign_key_violation(self, message: impl Into<String>) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(message.into())
        } else {
            self
        }
    }
}

/// Database errors carrying a PostgreSQL SQLSTATE, for exercising the
/// constraint mapping without a server
#[cfg(test)]
pub(crate) mod testing {
    use super::StorageError;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    struct PgCodeError(&'static str);

    impl fmt::Display for PgCodeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "SQLSTATE {}", self.0)
        }
    }

    impl std::error::Error for PgCodeError {}

    impl DatabaseError for PgCodeError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    pub(crate) fn pg_error(code: &'static str) -> StorageError {
        StorageError::Database(sqlx::Error::Database(Box::new(PgCodeError(code))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::pg_error;

    #[test]
    fn test_non_database_errors_are_not_constraint_violations() {
        let error = StorageError::Database(sqlx::Error::RowNotFound);
        assert!(!error.is_unique_violation());
        assert!(!error.is_foreign_key_violation());
    }

    fn message_of(error: StorageError) -> String {
        match error {
            StorageError::ConstraintViolation(message) => message,
            other => panic!("expected a constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn test_violation_mapping_keeps_unrelated_errors() {
        let error = StorageError::Database(sqlx::Error::PoolClosed)
            .on_unique_violation("duplicate")
            .on_foreign_key_violation("dangling");
        assert!(matches!(error, StorageError::Database(sqlx::Error::PoolClosed)));
    }

    #[test]
    fn test_unique_and_foreign_key_violations_get_their_own_message() {
        let map = |error: StorageError| {
            error
                .on_unique_violation("duplicate")
                .on_foreign_key_violation("dangling")
        };

        assert_eq!(message_of(map(pg_error("23505"))), "duplicate");
        assert_eq!(message_of(map(pg_error("23503"))), "dangling");
    }
}
