use std::time::Duration;

use crate::smtp_probe::classify::SoftFailRule;

/// Configuration knobs for a single mailbox probe.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Name announced in EHLO/HELO.
    pub helo_name: String,
    /// Synthetic envelope sender declared before the recipient check.
    pub mail_from: String,
    /// SMTP port. 25 against real exchangers; overridable for tests.
    pub port: u16,
    /// TCP connect timeout, milliseconds.
    pub connect_timeout_ms: u64,
    /// Overall budget for the dialogue after connect, banner through QUIT,
    /// milliseconds.
    pub deadline_ms: u64,
    /// Transient replies treated as weak evidence that the mailbox exists.
    pub soft_fail_rules: Vec<SoftFailRule>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            helo_name: "example.com".to_string(),
            mail_from: "test@example.com".to_string(),
            port: 25,
            connect_timeout_ms: 10_000,
            deadline_ms: 20_000,
            soft_fail_rules: SoftFailRule::defaults(),
        }
    }
}

impl ProbeOptions {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}
