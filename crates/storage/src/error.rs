use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    /// A unique constraint rejected the write; the transaction was rolled back.
    #[error("Unique constraint violation")]
    UniqueViolation,

    /// A referenced row does not exist.
    #[error("Foreign key violation")]
    ForeignKeyViolation,
}

pub type Result<T> = std::result::Result<T, StorageError>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::UniqueViolation => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some(UNIQUE_VIOLATION)
            }
            _ => false,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            StorageError::ForeignKeyViolation => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
            }
            _ => false,
        }
    }

    /// Folds constraint failures reported by Postgres into the dedicated
    /// variants so callers never have to look at SQLSTATE codes.
    pub fn classify(self) -> Self {
        if matches!(self, StorageError::Database(_)) {
            if self.is_unique_violation() {
                return StorageError::UniqueViolation;
            }
            if self.is_foreign_key_violation() {
                return StorageError::ForeignKeyViolation;
            }
        }
        self
    }
}

/// Write failures from sqlx are classified on the way in.
pub(crate) fn write_error(e: sqlx::Error) -> StorageError {
    StorageError::from(e).classify()
}
