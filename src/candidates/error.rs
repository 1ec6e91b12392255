use thiserror::Error;

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("first name is empty")]
    EmptyFirstName,
    #[error("last name is empty")]
    EmptyLastName,
    #[error("domain is empty")]
    EmptyDomain,
}
