//! Event seeder command line driver
//!
//! Replays a job description through a [`SeedAllocator`] the way a
//! framework's event loop would, printing one JSON line per event.
//!
//! ```text
//! event-seeder run <job.json>
//! event-seeder verify <job.json> <seeds.jsonl>
//! ```
//!
//! Job file format:
//!
//! ```json
//! {
//!   "random_seed": 1234567890,
//!   "processors": ["digitizer", "smearing"],
//!   "events": [{"run": 7, "event": 42}, {"run": 7, "event": 43}]
//! }
//! ```

use clap::Parser;
use event_seeder_core::seeder::{EventSeeds, ProcessorId, SeedAllocator, SeedRegistrar};
use event_seeder_core::SeederConfig;
use serde::Deserialize;
use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "event-seeder",
    version,
    about = "Deterministic per-processor event seeds"
)]
enum SeederCli {
    /// Seed every event of a job and print one JSON line per event
    #[command(name = "run")]
    Run {
        /// Job description (JSON)
        job: PathBuf,
    },

    /// Check recorded event seeds (JSON lines) against a job
    #[command(name = "verify")]
    Verify {
        /// Job description (JSON)
        job: PathBuf,
        /// Output of a previous `run`
        seeds: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct JobConfig {
    #[serde(flatten)]
    seeder: SeederConfig,
    processors: Vec<String>,
    #[serde(default)]
    events: Vec<EventRef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct EventRef {
    run: u32,
    event: u32,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_file(path: &Path) -> CliResult<String> {
    Ok(std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?)
}

fn parse_job(json: &str) -> CliResult<JobConfig> {
    Ok(serde_json::from_str(json)?)
}

/// Build the allocator and let every processor register, in job order.
fn setup(job: &JobConfig) -> CliResult<SeedAllocator> {
    let mut seeder = SeedAllocator::from_config(&job.seeder)?;
    for name in &job.processors {
        seeder.register_processor(&ProcessorId::new(name.as_str()))?;
    }
    Ok(seeder)
}

/// Seed each job event in order and write its snapshot as one JSON line.
fn write_event_seeds(
    job: &JobConfig,
    seeder: &mut SeedAllocator,
    out: &mut impl Write,
) -> CliResult<usize> {
    let mut written = 0;
    for event in &job.events {
        seeder.refresh_seeds(event.event, event.run);
        if let Some(snapshot) = seeder.snapshot() {
            writeln!(out, "{}", snapshot.to_json()?)?;
            written += 1;
        }
    }
    Ok(written)
}

/// Check every non-empty line of a recording; errors carry the line number.
fn verify_recorded(seeder: &SeedAllocator, recording: &str) -> CliResult<usize> {
    let mut checked = 0;
    for (line_no, line) in recording.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        EventSeeds::from_json(line)
            .and_then(|recorded| seeder.verify(&recorded))
            .map_err(|e| format!("line {}: {}", line_no + 1, e))?;
        checked += 1;
    }
    Ok(checked)
}

fn execute(cli: SeederCli) -> CliResult<()> {
    match cli {
        SeederCli::Run { job } => {
            let job = parse_job(&read_file(&job)?)?;
            let mut seeder = setup(&job)?;

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let events = write_event_seeds(&job, &mut seeder, &mut out)?;
            out.flush()?;

            tracing::info!(
                events,
                processors = job.processors.len(),
                "Seeded all events"
            );
        }
        SeederCli::Verify { job, seeds } => {
            let job = parse_job(&read_file(&job)?)?;
            let seeder = setup(&job)?;
            let events = verify_recorded(&seeder, &read_file(&seeds)?)?;

            tracing::info!(events, "All recorded event seeds reproduced");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();

    match execute(SeederCli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
