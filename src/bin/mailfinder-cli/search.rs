use anyhow::Result;

use mailfinder_lib::{FinderError, SqliteStore, search_domain};

use crate::output;

pub fn run(store: &mut SqliteStore, fragment: &str, format: &str) -> Result<bool> {
    match search_domain(store, fragment) {
        Ok(emails) => {
            output::print(&emails, format)?;
            Ok(true)
        }
        Err(FinderError::NotFound) => {
            eprintln!("no cached addresses match '{fragment}'");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}
