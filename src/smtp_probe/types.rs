/// Classification of the recipient-check reply for one candidate.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcptOutcome {
    /// The server accepted the recipient outright.
    Accepted,
    /// The server answered with one of the configured transient codes.
    /// Counted as evidence the mailbox exists — a server reluctant to give a
    /// hard rejection usually knows the address. Best-effort only; providers
    /// differ in how they use these codes.
    SoftAccepted,
    /// Definitive rejection.
    Rejected,
}

impl RcptOutcome {
    /// Whether this outcome counts as "the mailbox exists".
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Accepted | Self::SoftAccepted)
    }
}

/// Result of probing one candidate against one exchanger.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub outcome: RcptOutcome,
    /// Status code of the RCPT TO reply.
    pub rcpt_code: u16,
    /// Client/server dialogue, for diagnostics.
    pub transcript: Vec<String>,
}
