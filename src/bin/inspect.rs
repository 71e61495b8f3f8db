//! memsession Inspector
//!
//! Bootstraps an in-memory storage from a session string and reports what
//! was restored. Key material is never printed, only its CRC32.

use std::io::Read;

use clap::Parser;
use memsession::{Config, MemoryStorage, OpenOutcome, PerformanceMode, SessionError};
use tracing_subscriber::{fmt, EnvFilter};

/// memsession Inspector
#[derive(Parser, Debug)]
#[command(name = "memsession-inspect")]
#[command(about = "Inspect a session string without persisting anything")]
#[command(version)]
struct Args {
    /// Session string (read from stdin when omitted)
    session_string: Option<String>,

    /// Storage name used in log output
    #[arg(short, long, default_value = "inspect")]
    name: String,

    /// Do not request the in-memory performance knobs
    #[arg(long)]
    no_tuning: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memsession=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("memsession inspector v{}", memsession::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("Inspection failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> memsession::Result<()> {
    let session_string = match args.session_string {
        Some(s) => s,
        None => read_stdin()?,
    };
    if session_string.trim().is_empty() {
        return Err(SessionError::Config("no session string supplied".to_string()));
    }

    let performance = if args.no_tuning {
        PerformanceMode::disabled()
    } else {
        PerformanceMode::default()
    };

    // Build config from args
    let config = Config::builder()
        .name(args.name)
        .session_string(session_string)
        .performance(performance)
        .build();

    let mut storage = MemoryStorage::new(config);
    let outcome = storage.open();

    let result = outcome.and_then(|outcome| {
        report(&outcome);
        if outcome.is_restored() {
            let row = storage.state()?;
            println!("dc_id:     {}", row.dc_id);
            println!("api_id:    {}", display_opt(row.api_id));
            println!("test_mode: {}", display_opt(row.test_mode));
            println!("user_id:   {}", display_opt(row.user_id));
            println!("is_bot:    {}", display_opt(row.is_bot));
            if let Some(key) = &row.auth_key {
                println!("auth_key:  crc32={:08x}", key.checksum());
            }
        }
        Ok(())
    });

    storage.delete();
    result
}

fn report(outcome: &OpenOutcome) {
    match outcome {
        OpenOutcome::Empty => println!("format:    none"),
        OpenOutcome::Restored => println!("format:    current"),
        OpenOutcome::LegacyFormat(layout) => {
            println!("format:    {} (outdated, re-export required)", layout)
        }
        OpenOutcome::InvalidLength { actual, expected } => {
            println!("format:    invalid ({} bytes, expected {})", actual, expected)
        }
    }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn read_stdin() -> memsession::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| SessionError::Config(format!("failed to read stdin: {}", e)))?;
    Ok(input)
}
