//! SQLite-backed [`ResultStore`].

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use crate::candidates::Person;
use crate::store::{ResultStore, StoreError};

/// SQLite-backed cache of confirmed addresses.
///
/// Rows are append-only with server-assigned timestamps. There is no
/// uniqueness constraint: re-verifying an identity inserts additional rows,
/// and reads return them all.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Database(format!("cannot open cache at {}: {e}", path.display())))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store; nothing survives the process.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Database(format!("cannot open in-memory cache: {e}")))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS email_cache (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    domain TEXT NOT NULL,
                    email TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );
                CREATE INDEX IF NOT EXISTS idx_email_cache_identity
                    ON email_cache(first_name, last_name, domain);
                CREATE INDEX IF NOT EXISTS idx_email_cache_domain
                    ON email_cache(domain);",
            )
            .map_err(|e| StoreError::Database(format!("init schema: {e}")))
    }

    fn collect_emails(
        &self,
        sql: &str,
        bind: &[&dyn rusqlite::ToSql],
        op: &str,
    ) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| StoreError::Database(format!("{op}: {e}")))?;
        let rows = stmt
            .query_map(bind, |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Database(format!("{op}: {e}")))?;
        let mut emails = Vec::new();
        for row in rows {
            emails.push(row.map_err(|e| StoreError::Database(format!("{op}: {e}")))?);
        }
        Ok(emails)
    }
}

impl ResultStore for SqliteStore {
    fn find_exact(&mut self, person: &Person, domain: &str) -> Result<Vec<String>, StoreError> {
        let emails = self.collect_emails(
            "SELECT email FROM email_cache
             WHERE first_name = ?1 AND last_name = ?2 AND domain = ?3
             ORDER BY id",
            &[&person.first_name, &person.last_name, &domain],
            "find_exact",
        )?;
        debug!(count = emails.len(), "cache lookup");
        Ok(emails)
    }

    fn search_domain(&mut self, fragment: &str) -> Result<Vec<String>, StoreError> {
        // LIKE is case-insensitive for ASCII in SQLite; instr keeps the
        // substring match case-sensitive.
        self.collect_emails(
            "SELECT DISTINCT email FROM email_cache
             WHERE instr(domain, ?1) > 0
             ORDER BY email",
            &[&fragment],
            "search_domain",
        )
    }

    fn insert_batch(
        &mut self,
        person: &Person,
        domain: &str,
        emails: &[String],
    ) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError::Database(format!("insert_batch: {e}")))?;
        for email in emails {
            tx.execute(
                "INSERT INTO email_cache (first_name, last_name, domain, email)
                 VALUES (?1, ?2, ?3, ?4)",
                params![person.first_name, person.last_name, domain, email],
            )
            .map_err(|e| StoreError::Database(format!("insert_batch: {e}")))?;
        }
        tx.commit()
            .map_err(|e| StoreError::Database(format!("insert_batch: {e}")))?;
        debug!(count = emails.len(), "verified addresses cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::in_memory().expect("in-memory store")
    }

    fn person(first: &str, last: &str) -> Person {
        Person::new(first, last)
    }

    #[test]
    fn exact_key_round_trip() {
        let mut store = store();
        let john = person("John", "Doe");
        let emails = vec![
            "john@example.com".to_string(),
            "john.doe@example.com".to_string(),
        ];
        store
            .insert_batch(&john, "example.com", &emails)
            .expect("insert");

        let cached = store.find_exact(&john, "example.com").expect("read");
        assert_eq!(cached, emails);
    }

    #[test]
    fn exact_match_uses_the_callers_spelling() {
        let mut store = store();
        let john = person("John", "Doe");
        store
            .insert_batch(&john, "example.com", &["john@example.com".to_string()])
            .expect("insert");

        let lowercased = store
            .find_exact(&person("john", "doe"), "example.com")
            .expect("read");
        assert!(lowercased.is_empty());
    }

    #[test]
    fn duplicate_rows_are_preserved() {
        let mut store = store();
        let john = person("John", "Doe");
        let emails = vec!["john@example.com".to_string()];
        store.insert_batch(&john, "example.com", &emails).expect("insert");
        store.insert_batch(&john, "example.com", &emails).expect("insert");

        let cached = store.find_exact(&john, "example.com").expect("read");
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn search_domain_matches_substrings_case_sensitively() {
        let mut store = store();
        store
            .insert_batch(&person("A", "B"), "example.com", &["a@example.com".to_string()])
            .expect("insert");
        store
            .insert_batch(&person("C", "D"), "sub.example.org", &["c@sub.example.org".to_string()])
            .expect("insert");
        store
            .insert_batch(&person("E", "F"), "other.net", &["e@other.net".to_string()])
            .expect("insert");

        let hits = store.search_domain("example").expect("search");
        assert_eq!(hits, vec!["a@example.com", "c@sub.example.org"]);

        let none = store.search_domain("EXAMPLE").expect("search");
        assert!(none.is_empty());
    }

    #[test]
    fn search_domain_deduplicates_emails() {
        let mut store = store();
        let john = person("John", "Doe");
        let emails = vec!["john@example.com".to_string()];
        store.insert_batch(&john, "example.com", &emails).expect("insert");
        store.insert_batch(&john, "example.com", &emails).expect("insert");

        let hits = store.search_domain("example.com").expect("search");
        assert_eq!(hits, vec!["john@example.com"]);
    }
}
