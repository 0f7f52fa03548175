//! Database error types for syl-db.

use thiserror::Error;

/// Errors from catalog database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned an unusable value.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored row violates a catalog invariant.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
