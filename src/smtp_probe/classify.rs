//! Recipient-check reply classification.
//!
//! The soft-fail table maps specific transient replies to a positive verdict.
//! Matching is structural — reply code plus RFC 3463 enhanced status code —
//! never on the server's free-form text.

use crate::smtp_probe::session::SmtpReply;
use crate::smtp_probe::types::RcptOutcome;

/// One transient reply treated as weak evidence of an existing mailbox.
/// Both fields must match the server's reply.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFailRule {
    /// SMTP reply code, e.g. `450`.
    pub code: u16,
    /// Enhanced status code, e.g. `"4.2.1"`.
    pub enhanced: String,
}

impl SoftFailRule {
    pub fn new(code: u16, enhanced: impl Into<String>) -> Self {
        Self {
            code,
            enhanced: enhanced.into(),
        }
    }

    /// The default table: mailbox busy (450 4.2.1), over quota (452 4.2.2),
    /// mail system overload (451 4.4.1), service unavailable (421 4.7.0) and
    /// temporary policy rejection (450 4.7.1).
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(450, "4.2.1"),
            Self::new(452, "4.2.2"),
            Self::new(451, "4.4.1"),
            Self::new(421, "4.7.0"),
            Self::new(450, "4.7.1"),
        ]
    }
}

pub(crate) fn classify_rcpt(reply: &SmtpReply, rules: &[SoftFailRule]) -> RcptOutcome {
    if reply.is_positive_completion() {
        return RcptOutcome::Accepted;
    }
    if let Some(enhanced) = enhanced_status(reply.first_line()) {
        if rules
            .iter()
            .any(|rule| rule.code == reply.code && rule.enhanced == enhanced)
        {
            return RcptOutcome::SoftAccepted;
        }
    }
    RcptOutcome::Rejected
}

/// Extract the enhanced status code leading the reply text, if present.
fn enhanced_status(text: &str) -> Option<&str> {
    let token = text.split_whitespace().next()?;
    let mut parts = token.split('.');
    for _ in 0..3 {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if parts.next().is_some() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16, text: &str) -> SmtpReply {
        SmtpReply {
            code,
            lines: vec![text.to_string()],
        }
    }

    #[test]
    fn positive_completion_is_accepted() {
        let outcome = classify_rcpt(&reply(250, "2.1.5 Ok"), &SoftFailRule::defaults());
        assert_eq!(outcome, RcptOutcome::Accepted);
    }

    #[test]
    fn hard_rejection_is_rejected() {
        let outcome = classify_rcpt(
            &reply(550, "5.1.1 no such user"),
            &SoftFailRule::defaults(),
        );
        assert_eq!(outcome, RcptOutcome::Rejected);
    }

    #[test]
    fn every_default_soft_fail_pair_is_soft_accepted() {
        for rule in SoftFailRule::defaults() {
            let text = format!("{} try again later", rule.enhanced);
            let outcome = classify_rcpt(&reply(rule.code, &text), &SoftFailRule::defaults());
            assert_eq!(outcome, RcptOutcome::SoftAccepted, "rule {rule:?}");
        }
    }

    #[test]
    fn transient_code_without_matching_enhanced_status_is_rejected() {
        let rules = SoftFailRule::defaults();
        // Code in the table, enhanced code not paired with it.
        assert_eq!(
            classify_rcpt(&reply(450, "4.2.2 over quota"), &rules),
            RcptOutcome::Rejected
        );
        // No enhanced code at all.
        assert_eq!(
            classify_rcpt(&reply(450, "mailbox busy"), &rules),
            RcptOutcome::Rejected
        );
    }

    #[test]
    fn enhanced_status_parsing() {
        assert_eq!(enhanced_status("4.2.1 mailbox busy"), Some("4.2.1"));
        assert_eq!(enhanced_status("4.10.22 odd but valid"), Some("4.10.22"));
        assert_eq!(enhanced_status("busy"), None);
        assert_eq!(enhanced_status("4.2 too short"), None);
        assert_eq!(enhanced_status("4.2.1.9 too long"), None);
        assert_eq!(enhanced_status(""), None);
    }

    #[test]
    fn custom_rule_table_is_honored() {
        let rules = vec![SoftFailRule::new(471, "4.7.9")];
        assert_eq!(
            classify_rcpt(&reply(471, "4.7.9 greylisted"), &rules),
            RcptOutcome::SoftAccepted
        );
        // The defaults no longer apply once replaced.
        assert_eq!(
            classify_rcpt(&reply(450, "4.2.1 mailbox busy"), &rules),
            RcptOutcome::Rejected
        );
    }
}
