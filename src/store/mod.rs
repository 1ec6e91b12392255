//! Persisted verification results.
//!
//! The finder consumes this narrow interface: an exact-match read used to
//! short-circuit verification, a substring search by domain, and an
//! all-or-nothing batch write of newly confirmed addresses.

#[cfg(feature = "with-store")]
mod sqlite;
#[cfg(feature = "with-store")]
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::candidates::Person;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub trait ResultStore {
    /// Addresses previously confirmed for exactly this (person, domain) key.
    /// The key uses the caller's spelling verbatim; no normalization.
    fn find_exact(&mut self, person: &Person, domain: &str) -> Result<Vec<String>, StoreError>;

    /// Distinct stored addresses whose domain contains `fragment`,
    /// case-sensitively.
    fn search_domain(&mut self, fragment: &str) -> Result<Vec<String>, StoreError>;

    /// Persist a batch of confirmed addresses for one identity. Either every
    /// row is committed or none.
    fn insert_batch(
        &mut self,
        person: &Person,
        domain: &str,
        emails: &[String],
    ) -> Result<(), StoreError>;
}
