//! Command-line driver: runs one batch and writes the outputs to a results file.
//!
//! ```bash
//! # 4 workers, 10 tasks of 1 second each, results in ./results.txt
//! taskhive
//!
//! # 8 workers, 100 quick tasks, debug-level progress
//! taskhive --workers 8 --tasks 100 --task-cost-ms 10 --idle-timeout-ms 500 -vv
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use taskhive::pool::{Batch, Builder, Pool, PoolError};
use taskhive::sink::LineSink;
use tracing_subscriber::EnvFilter;

/// Run a batch of tasks on a fixed pool of workers
#[derive(Parser, Debug)]
#[command(name = "taskhive")]
#[command(version)]
struct Cli {
    /// Number of worker threads (defaults to 4)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Number of tasks in the batch (defaults to 10)
    #[arg(short, long)]
    tasks: Option<usize>,

    /// Simulated processing time of each task, in milliseconds (defaults to 1000)
    #[arg(long)]
    task_cost_ms: Option<u64>,

    /// Time a worker waits for a task before exiting, in milliseconds (defaults to 2000)
    #[arg(long)]
    idle_timeout_ms: Option<u64>,

    /// Results file
    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn builder(&self) -> Builder {
        let mut builder = Builder::default();
        if let Some(workers) = self.workers {
            builder = builder.num_workers(workers);
        }
        if let Some(tasks) = self.tasks {
            builder = builder.num_tasks(tasks);
        }
        if let Some(ms) = self.task_cost_ms {
            builder = builder.task_cost(Duration::from_millis(ms));
        }
        if let Some(ms) = self.idle_timeout_ms {
            builder = builder.idle_timeout(Duration::from_millis(ms));
        }
        builder
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs one batch. A worker panic is a bug, so it is resumed on the main thread rather than
/// reported as an error.
fn run_batch(pool: &Pool) -> Result<Batch> {
    match pool.run() {
        Ok(batch) => Ok(batch),
        Err(PoolError::WorkerPanicked(panic)) => panic.resume(),
        Err(PoolError::Spawn { worker_id, source }) => Err(anyhow::Error::new(source)
            .context(format!("Failed to spawn thread for worker {worker_id}"))),
        Err(PoolError::Enqueue(err)) => {
            Err(anyhow::Error::new(err).context("batch did not complete"))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pool = cli.builder().build();
    let batch = run_batch(&pool)?;
    tracing::info!(
        results = batch.results.len(),
        drained = batch.num_drained(),
        timed_out = batch.num_timed_out(),
        "all workers stopped"
    );

    let mut sink = LineSink::create(&cli.output)?;
    let report = sink
        .write_lines(&batch.results)
        .with_context(|| format!("error writing results to {}", cli.output.display()))?;
    if report.failed > 0 {
        tracing::warn!(failed = report.failed, "some results could not be written");
    }
    tracing::info!("Results written to {}", cli.output.display());
    Ok(())
}
