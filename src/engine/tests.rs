use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::{CandidateProber, fan_out};
use crate::smtp_probe::{ProbeError, ProbeReport, RcptOutcome};

fn report(outcome: RcptOutcome, code: u16) -> ProbeReport {
    ProbeReport {
        outcome,
        rcpt_code: code,
        transcript: Vec::new(),
    }
}

/// Decides each probe by the candidate's local-part prefix.
struct ScriptedProber {
    calls: AtomicUsize,
}

impl ScriptedProber {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl CandidateProber for ScriptedProber {
    fn probe(&self, email: &str, _exchange: &str) -> Result<ProbeReport, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if email.starts_with("slow") {
            thread::sleep(Duration::from_millis(100));
            return Ok(report(RcptOutcome::Accepted, 250));
        }
        if email.starts_with("ok") {
            return Ok(report(RcptOutcome::Accepted, 250));
        }
        if email.starts_with("soft") {
            return Ok(report(RcptOutcome::SoftAccepted, 452));
        }
        if email.starts_with("err") {
            return Err(ProbeError::Protocol {
                host: "mx.test".to_string(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(report(RcptOutcome::Rejected, 550))
    }
}

fn emails(verified: &[super::VerifiedAddress]) -> Vec<&str> {
    let mut out: Vec<&str> = verified.iter().map(|v| v.email.as_str()).collect();
    out.sort_unstable();
    out
}

#[test]
fn collects_only_positive_outcomes() {
    let prober = ScriptedProber::new();
    let candidates = vec![
        "ok.a@x.test".to_string(),
        "no.b@x.test".to_string(),
        "soft.c@x.test".to_string(),
        "err.d@x.test".to_string(),
    ];

    let verified = fan_out(&prober, "mx.test", candidates, 4);

    assert_eq!(emails(&verified), vec!["ok.a@x.test", "soft.c@x.test"]);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 4);
}

#[test]
fn probe_failures_do_not_abort_siblings() {
    let prober = ScriptedProber::new();
    let candidates = vec![
        "err.a@x.test".to_string(),
        "err.b@x.test".to_string(),
        "ok.c@x.test".to_string(),
    ];

    let verified = fan_out(&prober, "mx.test", candidates, 2);

    assert_eq!(emails(&verified), vec!["ok.c@x.test"]);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn join_waits_for_slow_probes() {
    let prober = ScriptedProber::new();
    let candidates = vec![
        "ok.a@x.test".to_string(),
        "slow.b@x.test".to_string(),
        "ok.c@x.test".to_string(),
    ];

    let verified = fan_out(&prober, "mx.test", candidates, 3);

    // The slow probe's result is present: nothing was read before the join.
    assert_eq!(
        emails(&verified),
        vec!["ok.a@x.test", "ok.c@x.test", "slow.b@x.test"]
    );
}

#[test]
fn all_rejected_yields_an_empty_set_not_an_error() {
    let prober = ScriptedProber::new();
    let candidates = vec!["no.a@x.test".to_string(), "no.b@x.test".to_string()];

    let verified = fan_out(&prober, "mx.test", candidates, 8);

    assert!(verified.is_empty());
}

#[test]
fn no_candidates_spawns_nothing() {
    let prober = ScriptedProber::new();
    let verified = fan_out(&prober, "mx.test", Vec::new(), 8);
    assert!(verified.is_empty());
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
}

/// Tracks how many probes are in flight at once.
struct GaugedProber {
    in_flight: AtomicUsize,
    peak: Mutex<usize>,
}

impl GaugedProber {
    fn new() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: Mutex::new(0),
        }
    }
}

impl CandidateProber for GaugedProber {
    fn probe(&self, _email: &str, _exchange: &str) -> Result<ProbeReport, ProbeError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut peak = self.peak.lock().expect("peak lock");
            if current > *peak {
                *peak = current;
            }
        }
        thread::sleep(Duration::from_millis(20));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(report(RcptOutcome::Accepted, 250))
    }
}

#[test]
fn fan_out_respects_the_concurrency_bound() {
    let prober = GaugedProber::new();
    let candidates: Vec<String> = (0..12).map(|i| format!("c{i}@x.test")).collect();

    let verified = fan_out(&prober, "mx.test", candidates, 3);

    assert_eq!(verified.len(), 12);
    assert!(*prober.peak.lock().expect("peak lock") <= 3);
}
