//! Concurrent candidate verification.
//!
//! The engine resolves a domain's exchangers once, fans the candidate set out
//! to concurrent probes against the preferred exchanger, and joins every
//! outcome before reporting. Resolution and per-candidate failures never
//! abort a run; they only shrink the result set.

use std::sync::Mutex;
use std::thread;

use tracing::{debug, warn};

use crate::mx;
use crate::smtp_probe::{ProbeError, ProbeOptions, ProbeReport, RcptOutcome, SmtpProber};

/// An address the exchanger vouched for, with the strength of the evidence.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAddress {
    pub email: String,
    pub outcome: RcptOutcome,
}

/// Tuning for the verification fan-out.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub probe: ProbeOptions,
    /// Upper bound on simultaneous SMTP sessions per request.
    pub max_concurrency: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            probe: ProbeOptions::default(),
            max_concurrency: 16,
        }
    }
}

/// Fans candidates out to concurrent probes and joins all outcomes.
#[derive(Debug, Clone)]
pub struct Engine {
    prober: SmtpProber,
    max_concurrency: usize,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            prober: SmtpProber::new(options.probe),
            max_concurrency: options.max_concurrency.max(1),
        }
    }

    /// Verify `candidates` against `domain`'s preferred mail exchanger.
    ///
    /// An empty result means "no deliverable address found", never an error:
    /// a domain without MX records, a failed resolution, or a wall of
    /// rejections all land here the same way. Result order follows probe
    /// completion, not candidate order.
    pub fn verify(&self, domain: &str, candidates: Vec<String>) -> Vec<VerifiedAddress> {
        let status = match mx::resolve_mx(domain) {
            Ok(status) => status,
            Err(err) => {
                warn!(domain = %domain, error = %err, "MX resolution failed");
                return Vec::new();
            }
        };
        let Some(exchange) = status.first_exchange() else {
            warn!(domain = %domain, "no MX records, nothing to probe");
            return Vec::new();
        };
        fan_out(&self.prober, exchange, candidates, self.max_concurrency)
    }
}

/// Run every candidate through `prober` against `exchange`, at most
/// `max_concurrency` sessions at a time, and collect the positive outcomes.
///
/// Workers pull candidates from a shared queue; the scope's join point
/// guarantees every probe has finished before the results are read.
pub(crate) fn fan_out<P>(
    prober: &P,
    exchange: &str,
    candidates: Vec<String>,
    max_concurrency: usize,
) -> Vec<VerifiedAddress>
where
    P: CandidateProber + Sync,
{
    let workers = max_concurrency.max(1).min(candidates.len());
    let queue = Mutex::new(candidates.into_iter());
    let verified = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                while let Some(email) = next_candidate(&queue) {
                    match prober.probe(&email, exchange) {
                        Ok(report) if report.outcome.is_positive() => {
                            debug!(email = %email, outcome = ?report.outcome, "candidate verified");
                            verified
                                .lock()
                                .expect("result lock poisoned")
                                .push(VerifiedAddress {
                                    email,
                                    outcome: report.outcome,
                                });
                        }
                        Ok(report) => {
                            debug!(email = %email, code = report.rcpt_code, "candidate rejected");
                        }
                        Err(err) => {
                            warn!(email = %email, exchange = %exchange, error = %err, "probe failed");
                        }
                    }
                }
            });
        }
    });

    verified.into_inner().expect("result lock poisoned")
}

fn next_candidate(queue: &Mutex<std::vec::IntoIter<String>>) -> Option<String> {
    queue.lock().expect("candidate lock poisoned").next()
}

/// Seam between the engine and the network, so aggregation is testable
/// without live SMTP sessions.
pub(crate) trait CandidateProber {
    fn probe(&self, email: &str, exchange: &str) -> Result<ProbeReport, ProbeError>;
}

impl CandidateProber for SmtpProber {
    fn probe(&self, email: &str, exchange: &str) -> Result<ProbeReport, ProbeError> {
        SmtpProber::probe(self, email, exchange)
    }
}

#[cfg(test)]
mod tests;
