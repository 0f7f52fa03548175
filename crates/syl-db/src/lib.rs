//! # syl-db
//!
//! libSQL catalog store for Syllabus.
//!
//! Holds one row per installed course version and one row per indexed task.
//! The catalog is derived state: everything in it can be rebuilt from the
//! durable content root by a reconciliation scan.
//!
//! Uses the `libsql` crate (v0.9.29), either on a local file or `:memory:`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for the course catalog.
pub struct CatalogDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CatalogDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let catalog = Self { db, conn };
        catalog.run_migrations().await?;
        tracing::debug!(path, "catalog database opened");
        Ok(catalog)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
