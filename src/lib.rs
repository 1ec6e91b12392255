#![forbid(unsafe_code)]
//! mailfinder_lib — work-email discovery by candidate generation and SMTP probing.
//!
//! Given a person's name and a company domain, [`find_email`] generates the
//! plausible local-part permutations, resolves the domain's mail exchangers
//! and asks the preferred exchanger — with a recipient check, never an actual
//! message — which of them it would accept. Confirmed addresses are cached in
//! a [`store::ResultStore`] so repeat queries skip the network entirely.

pub mod candidates;
pub mod engine;
pub mod finder;
pub mod mx;
pub mod smtp_probe;
pub mod store;

pub use candidates::{CandidateError, Person, generate_candidates};
pub use engine::{Engine, EngineOptions, VerifiedAddress};
pub use finder::{FinderError, find_email, search_domain};
pub use mx::{MxError, MxRecord, MxStatus, resolve_mx};
pub use smtp_probe::{
    ProbeError, ProbeOptions, ProbeReport, RcptOutcome, SmtpProber, SoftFailRule,
};
#[cfg(feature = "with-store")]
pub use store::SqliteStore;
pub use store::{ResultStore, StoreError};
