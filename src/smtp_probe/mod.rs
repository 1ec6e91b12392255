//! SMTP mailbox-existence probing.
//!
//! [`SmtpProber`] runs a minimal dialogue against a mail exchanger — banner,
//! EHLO/HELO, MAIL FROM, RCPT TO — and classifies the recipient-check reply.
//! No message is ever queued; the connection is torn down after RCPT
//! regardless of outcome. The whole dialogue runs under one deadline so a
//! stalled server cannot pin a probe indefinitely.

mod classify;
mod error;
mod options;
mod probe;
mod session;
mod types;

pub use classify::SoftFailRule;
pub use error::ProbeError;
pub use options::ProbeOptions;
pub use probe::SmtpProber;
pub use session::SmtpReply;
pub use types::{ProbeReport, RcptOutcome};
