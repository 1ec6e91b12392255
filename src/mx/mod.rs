//! DNS MX resolution.
//!
//! The public entry point is [`resolve_mx`], which performs a synchronous
//! lookup using the system resolver and returns a [`MxStatus`] describing the
//! outcome. Only the preferred (lowest-preference) exchange is ever probed;
//! a multi-MX domain gets exactly one shot.

mod error;
mod resolver;
mod types;

pub use error::MxError;
pub use resolver::resolve_mx;
pub use types::{MxRecord, MxStatus};
