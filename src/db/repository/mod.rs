//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Multi-row invariants
//! (attribute + values as one unit, cascade deletes, bulk variant commit)
//! run inside explicit `BEGIN TRANSACTION ... COMMIT TRANSACTION` blocks so
//! that either every row change is visible or none is.

pub mod attribute;
pub mod catalog_item;
pub mod variant;

pub use attribute::AttributeRepository;
pub use catalog_item::CatalogItemRepository;
pub use variant::VariantRepository;

use crate::utils::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "index ... already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "table:key" strings across the whole stack
// =============================================================================
//
// Entity ids travel as "table:key" strings (API, reference fields, bindings).
// Record keys are generated in Rust (UUID v4, simple form) so that a new
// record's id is known before the transaction that creates it.

/// Generate a fresh record key
///
/// Prefixed with a letter so the key is always a bare identifier: the
/// string form of the record id must never need bracket escaping, since
/// reference fields store and compare that string.
pub fn new_key() -> String {
    format!("r{}", uuid::Uuid::new_v4().simple())
}

/// Extract the bare key from an id that may carry a "table:" prefix
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    }
}

/// Canonical "table:key" form of an id that may or may not carry the prefix
pub fn canonical_id(table: &str, id: &str) -> String {
    format!("{table}:{}", strip_table_prefix(table, id))
}

/// RecordId for an id that may or may not carry the "table:" prefix
pub fn record_id(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, strip_table_prefix(table, id))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_table_prefix_handles_both_forms() {
        assert_eq!(strip_table_prefix("item", "item:abc"), "abc");
        assert_eq!(strip_table_prefix("item", "abc"), "abc");
        // Foreign prefix is left alone rather than misread as a key
        assert_eq!(strip_table_prefix("item", "variant:abc"), "variant:abc");
    }

    #[test]
    fn canonical_id_is_idempotent() {
        assert_eq!(canonical_id("item", "abc"), "item:abc");
        assert_eq!(canonical_id("item", "item:abc"), "item:abc");
    }
}
