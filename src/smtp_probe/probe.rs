use tracing::{debug, trace};

use crate::smtp_probe::classify::classify_rcpt;
use crate::smtp_probe::error::ProbeError;
use crate::smtp_probe::options::ProbeOptions;
use crate::smtp_probe::session::{Deadline, SmtpSession};
use crate::smtp_probe::types::{ProbeReport, RcptOutcome};

/// Probes mailbox existence with a minimal SMTP dialogue.
#[derive(Debug, Clone)]
pub struct SmtpProber {
    options: ProbeOptions,
}

impl SmtpProber {
    pub fn new(options: ProbeOptions) -> Self {
        Self { options }
    }

    /// Run the recipient check for `email` against the exchanger `host`.
    ///
    /// Errors cover everything up to and including the handshake — refused
    /// connection, stalled server, rejected greeting or sender. Once the
    /// RCPT TO reply is in, the result is a classified [`ProbeReport`].
    pub fn probe(&self, email: &str, host: &str) -> Result<ProbeReport, ProbeError> {
        let deadline = Deadline::new(self.options.deadline());
        let mut session = SmtpSession::connect(
            host,
            self.options.port,
            self.options.connect_timeout(),
            deadline,
        )?;

        let result = self.dialogue(&mut session, email);
        session.quit();
        let transcript = session.take_transcript();

        let (outcome, rcpt_code) = result?;
        debug!(email = %email, host = %host, outcome = ?outcome, code = rcpt_code, "probe finished");
        Ok(ProbeReport {
            outcome,
            rcpt_code,
            transcript,
        })
    }

    fn dialogue(
        &self,
        session: &mut SmtpSession,
        email: &str,
    ) -> Result<(RcptOutcome, u16), ProbeError> {
        let banner = session.read_reply()?;
        if !banner.is_positive_completion() {
            return Err(session.handshake_failure("banner", banner.code));
        }

        let ehlo = session.command(&format!("EHLO {}", self.options.helo_name))?;
        if !ehlo.is_positive_completion() {
            // Older servers reject EHLO outright; fall back to HELO.
            let helo = session.command(&format!("HELO {}", self.options.helo_name))?;
            if !helo.is_positive_completion() {
                return Err(session.handshake_failure("HELO", helo.code));
            }
        }

        let mail = session.command(&format!("MAIL FROM:<{}>", self.options.mail_from))?;
        if !mail.is_positive_completion() {
            return Err(session.handshake_failure("MAIL FROM", mail.code));
        }

        let rcpt = session.command(&format!("RCPT TO:<{email}>"))?;
        trace!(email = %email, code = rcpt.code, reply = rcpt.first_line(), "RCPT reply");
        Ok((
            classify_rcpt(&rcpt, &self.options.soft_fail_rules),
            rcpt.code,
        ))
    }
}
