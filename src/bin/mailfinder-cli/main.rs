use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mailfinder_lib::SqliteStore;

mod find;
mod output;
mod search;

#[derive(Parser)]
#[command(
    name = "mailfinder-cli",
    about = "Guess a person's work email address and verify it over SMTP without sending mail"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// SQLite cache path; verification results are kept in memory only when
    /// omitted
    #[arg(long, global = true)]
    cache: Option<std::path::PathBuf>,

    /// format: human|json
    #[arg(long, default_value = "human", global = true)]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find likely addresses for a person at a domain
    Find {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        domain: String,
        /// name announced in EHLO/HELO
        #[arg(long)]
        helo: Option<String>,
        /// synthetic envelope sender declared before the recipient check
        #[arg(long)]
        mail_from: Option<String>,
        #[arg(long, default_value_t = 25)]
        port: u16,
        #[arg(long, default_value_t = 10_000)]
        connect_timeout_ms: u64,
        #[arg(long, default_value_t = 20_000)]
        probe_deadline_ms: u64,
        /// upper bound on simultaneous SMTP sessions
        #[arg(long, default_value_t = 16)]
        max_concurrency: usize,
    },
    /// List cached addresses whose domain contains the given fragment
    Search {
        #[arg(long)]
        domain: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = match cli.cache.as_deref() {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::in_memory()?,
    };

    let found = match cli.cmd {
        Commands::Find {
            first_name,
            last_name,
            domain,
            helo,
            mail_from,
            port,
            connect_timeout_ms,
            probe_deadline_ms,
            max_concurrency,
        } => find::run(
            &mut store,
            find::FindConfig {
                first_name: &first_name,
                last_name: &last_name,
                domain: &domain,
                helo: helo.as_deref(),
                mail_from: mail_from.as_deref(),
                port,
                connect_timeout_ms,
                probe_deadline_ms,
                max_concurrency,
                format: &cli.format,
            },
        )?,
        Commands::Search { domain } => search::run(&mut store, &domain, &cli.format)?,
    };

    // exit codes: 0 found, 2 nothing found, 1 fatal
    if !found {
        std::process::exit(2);
    }
    Ok(())
}
