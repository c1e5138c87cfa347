use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use supportbrain_ai::TriageEngine;
use supportbrain_core::{SharedThresholds, Thresholds, TicketInput};
use supportbrain_store::{CsvLog, HistoryEntry, LogRow, LogStats, TriageLog, now_at, utc_offset};
use supportbrain_sync::{ArtifactClient, DEFAULT_BASE_URL, DEFAULT_REPO};
use tracing::{info, warn};

mod batch;
mod display;

/// Support ticket auto-triage: type → priority → queue.
#[derive(Parser, Debug)]
#[command(name = "supportbrain", version, about)]
struct Cli {
    /// Directory holding the three classifier artifacts
    #[arg(long, env = "SUPPORTBRAIN_MODELS", default_value = "models", global = true)]
    models: PathBuf,

    /// Prediction log (CSV)
    #[arg(
        long,
        env = "SUPPORTBRAIN_LOG",
        default_value = "data/prediction_log.csv",
        global = true
    )]
    log: PathBuf,

    /// Hours east of UTC for log timestamps
    #[arg(
        long,
        env = "SUPPORTBRAIN_UTC_OFFSET",
        default_value_t = 1,
        allow_negative_numbers = true,
        global = true
    )]
    utc_offset: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ThresholdArgs {
    /// Minimum priority confidence to auto-set priority [0.5, 1.0]
    #[arg(long, env = "SUPPORTBRAIN_PRIORITY_THRESHOLD", default_value_t = Thresholds::DEFAULT_PRIORITY)]
    priority_threshold: f32,

    /// Minimum queue confidence to auto-route [0.5, 1.0]
    #[arg(long, env = "SUPPORTBRAIN_QUEUE_THRESHOLD", default_value_t = Thresholds::DEFAULT_QUEUE)]
    queue_threshold: f32,
}

impl ThresholdArgs {
    fn resolve(&self) -> Result<Thresholds> {
        Thresholds::new(self.priority_threshold, self.queue_threshold)
            .context("invalid thresholds")
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Triage a single ticket
    Triage {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        /// Queue the ticket currently sits in
        #[arg(long)]
        queue: Option<String>,
        #[command(flatten)]
        thresholds: ThresholdArgs,
        /// Do not append to the prediction log
        #[arg(long)]
        no_log: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Triage tickets from a JSON-lines file
    Batch {
        input: PathBuf,
        #[command(flatten)]
        thresholds: ThresholdArgs,
        #[arg(long)]
        no_log: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show the prediction log and all-time statistics
    History {
        /// Only the most recent N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Wipe the prediction log, recording the clear first
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
    /// Download classifier artifacts into the model directory
    Fetch {
        #[arg(long, env = "SUPPORTBRAIN_HUB_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, env = "SUPPORTBRAIN_MODEL_REPO", default_value = DEFAULT_REPO)]
        repo: String,
        /// Re-download artifacts that already exist
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    info!("supportbrain v{}", env!("CARGO_PKG_VERSION"));

    let offset = utc_offset(cli.utc_offset)?;
    let log = CsvLog::new(&cli.log);

    match cli.command {
        Command::Triage {
            subject,
            body,
            queue,
            thresholds,
            no_log,
            json,
        } => {
            let thresholds = thresholds.resolve()?;
            let ticket = TicketInput {
                subject,
                body,
                queue_hint: queue,
            };
            if !ticket.is_complete() {
                warn!("rejected ticket without subject or body");
                bail!("both subject and body are required");
            }

            let engine = load_engine(&cli.models)?;
            let result = engine.run(&ticket, thresholds)?;
            let now = now_at(offset);

            if !no_log {
                log.append(&LogRow::from_result(&ticket.subject, &result, now))
                    .context("failed to write prediction log")?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", display::format_result_card(&ticket.subject, &result));
            }
        }

        Command::Batch {
            input,
            thresholds,
            no_log,
            json,
        } => {
            let thresholds = SharedThresholds::new(thresholds.resolve()?);
            let tickets = batch::read_tickets(&input)?;
            let engine = Arc::new(load_engine(&cli.models)?);
            let results = batch::triage_all(engine, tickets, &thresholds).await?;

            let now = now_at(offset);
            let mut session = Vec::with_capacity(results.len());
            for (numbered, result) in &results {
                let subject = &numbered.ticket.subject;
                if !no_log {
                    log.append(&LogRow::from_result(subject, result, now))
                        .context("failed to write prediction log")?;
                }
                if json {
                    println!("{}", serde_json::to_string(result)?);
                }
                session.push(HistoryEntry::new(subject, result, now));
            }

            if !json {
                print!("{}", display::format_history(&session));
                let stats = LogStats::from_batch(&log.read()?)?;
                print!("{}", display::format_stats(&stats, Some(session.len())));
            }
        }

        Command::History { limit } => {
            let batch = log.read().context("failed to read prediction log")?;
            print!("{}", display::format_log(&batch, limit)?);
            print!("{}", display::format_stats(&LogStats::from_batch(&batch)?, None));
        }

        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to clear {} without --yes", cli.log.display());
            }
            let row = log.clear(now_at(offset))?;
            println!(
                "All data cleared, logged at {} (UTC{:+})",
                row.timestamp, cli.utc_offset
            );
        }

        Command::Fetch {
            base_url,
            repo,
            force,
        } => {
            let client = ArtifactClient::new(&base_url, &repo);
            let report = client.fetch_all(&cli.models, force).await?;
            for path in &report.downloaded {
                println!("downloaded {}", path.display());
            }
            for path in &report.skipped {
                println!("present    {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_engine(models: &std::path::Path) -> Result<TriageEngine> {
    TriageEngine::load(models).with_context(|| {
        format!(
            "classifiers unavailable in {} (run `supportbrain fetch`?)",
            models.display()
        )
    })
}
