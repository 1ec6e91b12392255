//! Candidate address generation.
//!
//! The public entry point is [`generate_candidates`], a pure function mapping
//! a person and a domain to the fixed, ordered set of local-part permutations
//! worth probing. Same inputs always produce the same addresses in the same
//! order; nothing here touches the network.

mod error;
mod patterns;
mod types;

pub use error::CandidateError;
pub use types::Person;

use patterns::{PATTERNS, Pattern, Token};

/// Generate the ordered candidate addresses for `person` at `domain`.
///
/// Names and domain are lowercased first; initials are the first *character*
/// of each lowercased name. Empty (after trimming) inputs fail with
/// [`CandidateError`] before any address is built.
pub fn generate_candidates(person: &Person, domain: &str) -> Result<Vec<String>, CandidateError> {
    let first = person.first_name.trim().to_lowercase();
    let last = person.last_name.trim().to_lowercase();
    let domain = domain.trim().to_lowercase();

    if first.is_empty() {
        return Err(CandidateError::EmptyFirstName);
    }
    if last.is_empty() {
        return Err(CandidateError::EmptyLastName);
    }
    if domain.is_empty() {
        return Err(CandidateError::EmptyDomain);
    }

    let first_initial: String = first.chars().take(1).collect();
    let last_initial: String = last.chars().take(1).collect();

    let text = |token: Token| match token {
        Token::First => first.as_str(),
        Token::Last => last.as_str(),
        Token::FirstInitial => first_initial.as_str(),
        Token::LastInitial => last_initial.as_str(),
    };

    let mut out = Vec::with_capacity(PATTERNS.len());
    for pattern in PATTERNS {
        let local = match pattern {
            Pattern::Single(token) => text(token).to_string(),
            Pattern::Pair(a, sep, b) => format!("{}{}{}", text(a), sep.as_str(), text(b)),
        };
        out.push(format!("{local}@{domain}"));
    }
    Ok(out)
}
