use anyhow::Result;

use mailfinder_lib::{
    EngineOptions, FinderError, Person, ProbeOptions, SqliteStore, find_email,
};

use crate::output;

pub struct FindConfig<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub domain: &'a str,
    pub helo: Option<&'a str>,
    pub mail_from: Option<&'a str>,
    pub port: u16,
    pub connect_timeout_ms: u64,
    pub probe_deadline_ms: u64,
    pub max_concurrency: usize,
    pub format: &'a str,
}

pub fn run(store: &mut SqliteStore, cfg: FindConfig<'_>) -> Result<bool> {
    let mut probe = ProbeOptions::default();
    if let Some(helo) = cfg.helo {
        probe.helo_name = helo.to_string();
    }
    if let Some(mail_from) = cfg.mail_from {
        probe.mail_from = mail_from.to_string();
    }
    probe.port = cfg.port;
    probe.connect_timeout_ms = cfg.connect_timeout_ms;
    probe.deadline_ms = cfg.probe_deadline_ms;

    let options = EngineOptions {
        probe,
        max_concurrency: cfg.max_concurrency,
    };

    let person = Person::new(cfg.first_name, cfg.last_name);
    match find_email(store, options, &person, cfg.domain) {
        Ok(emails) => {
            output::print(&emails, cfg.format)?;
            Ok(true)
        }
        Err(FinderError::NotFound) => {
            eprintln!(
                "no deliverable address found for {} {} at {}",
                cfg.first_name, cfg.last_name, cfg.domain
            );
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}
