//! Top-level discovery operations.
//!
//! [`find_email`] is the cache-first pipeline: exact-match read, then
//! generate-and-verify on a miss, then a best-effort write-back. Internal
//! network failures are never surfaced distinctly — a caller only ever sees
//! addresses, [`FinderError::NotFound`], or its own bad input.

use thiserror::Error;
use tracing::{info, warn};

use crate::candidates::{self, CandidateError, Person};
use crate::engine::{Engine, EngineOptions, VerifiedAddress};
use crate::store::{ResultStore, StoreError};

#[derive(Debug, Error)]
pub enum FinderError {
    /// The request failed validation; nothing was probed.
    #[error(transparent)]
    InvalidInput(#[from] CandidateError),
    /// No deliverable address was found or cached for the request.
    #[error("no deliverable address found")]
    NotFound,
    /// The store failed serving a read that cannot fail open.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Find likely work addresses for `person` at `domain`.
///
/// The store is consulted first; a hit returns the cached set without any
/// network traffic. On a miss, candidates are generated and verified, and a
/// non-empty accepted set is written back best-effort before being returned.
pub fn find_email<S: ResultStore>(
    store: &mut S,
    options: EngineOptions,
    person: &Person,
    domain: &str,
) -> Result<Vec<String>, FinderError> {
    find_email_with(store, &Engine::new(options), person, domain)
}

/// All cached addresses whose stored domain contains `fragment`.
pub fn search_domain<S: ResultStore>(
    store: &mut S,
    fragment: &str,
) -> Result<Vec<String>, FinderError> {
    let emails = store.search_domain(fragment)?;
    if emails.is_empty() {
        return Err(FinderError::NotFound);
    }
    Ok(emails)
}

pub(crate) fn find_email_with<S, V>(
    store: &mut S,
    verifier: &V,
    person: &Person,
    domain: &str,
) -> Result<Vec<String>, FinderError>
where
    S: ResultStore,
    V: VerifyCandidates,
{
    // Validates the request as a side effect; bad input aborts before any
    // store or network activity.
    let candidates = candidates::generate_candidates(person, domain)?;

    match store.find_exact(person, domain) {
        Ok(cached) if !cached.is_empty() => {
            info!(domain = %domain, count = cached.len(), "cache hit");
            return Ok(cached);
        }
        Ok(_) => {}
        Err(err) => {
            // Fail open: a broken cache read degrades to live verification.
            warn!(error = %err, "cache read failed, falling through to verification");
        }
    }

    let verified = verifier.verify(domain, candidates);
    if verified.is_empty() {
        info!(domain = %domain, "no deliverable address found");
        return Err(FinderError::NotFound);
    }

    let emails: Vec<String> = verified.into_iter().map(|v| v.email).collect();
    if let Err(err) = store.insert_batch(person, domain, &emails) {
        // Persistence is best-effort; the caller still gets the result.
        warn!(error = %err, "failed to persist verified addresses");
    }
    Ok(emails)
}

/// Seam between the finder and the verification engine, so the cache-first
/// short-circuit is instrumentable in tests.
pub(crate) trait VerifyCandidates {
    fn verify(&self, domain: &str, candidates: Vec<String>) -> Vec<VerifiedAddress>;
}

impl VerifyCandidates for Engine {
    fn verify(&self, domain: &str, candidates: Vec<String>) -> Vec<VerifiedAddress> {
        Engine::verify(self, domain, candidates)
    }
}
