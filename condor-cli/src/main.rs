//! CondorLab CLI — daily iron-condor decision commands.
//!
//! Commands:
//! - `evaluate`: produce today's decision from a snapshot (JSON, or CSV chain + flags)
//! - `synthetic`: write a seeded synthetic snapshot for dry runs
//! - `history`: print recent recorded decisions
//! - `config`: write the default configuration file

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use condor_core::synthetic::SyntheticMarket;
use condor_runner::report::{render_decision, render_history, render_system_error};
use condor_runner::snapshot_loader::write_snapshot_json;
use condor_runner::{
    run_daily, AppendOutcome, DecisionHistory, RunOptions, RunnerConfig, SnapshotHeader,
    SnapshotSource,
};

const DEFAULT_LOG_FILTER: &str = "condorlab=info,condor_runner=info,condor_core=warn";

#[derive(Parser)]
#[command(
    name = "condorlab",
    about = "CondorLab CLI: rule-based 0DTE iron condor signal engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce one decision for one trade date and record it.
    Evaluate {
        /// Runner config (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Complete market snapshot (JSON).
        #[arg(long, conflicts_with = "chain", required_unless_present = "chain")]
        snapshot: Option<PathBuf>,

        /// Option chain (CSV); requires --spot, --vix and --iv-percentile.
        #[arg(long, requires_all = ["spot", "vix", "iv_percentile"])]
        chain: Option<PathBuf>,

        /// Underlying price (with --chain).
        #[arg(long)]
        spot: Option<f64>,

        /// Volatility index level (with --chain).
        #[arg(long)]
        vix: Option<f64>,

        /// Implied-volatility percentile, 0-100 (with --chain).
        #[arg(long)]
        iv_percentile: Option<f64>,

        /// Trade date (YYYY-MM-DD, with --chain). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Underlying symbol (with --chain). Defaults to the config's symbol.
        #[arg(long)]
        symbol: Option<String>,

        /// Evaluate only; do not write to the decision history.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Print the decision as JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a seeded synthetic snapshot.
    Synthetic {
        #[arg(long)]
        spot: f64,

        #[arg(long)]
        vix: f64,

        #[arg(long)]
        iv_percentile: f64,

        /// Trade date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "SPY")]
        symbol: String,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print recent decisions, newest first.
    History {
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of entries. Defaults to the config's display limit.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the default configuration file.
    Config {
        #[arg(long, default_value = "condorlab.toml")]
        out: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(error = %format!("{err:#}"), "run failed");
        eprint!("{}", render_system_error(None, &format!("{err:#}")));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate {
            config,
            snapshot,
            chain,
            spot,
            vix,
            iv_percentile,
            date,
            symbol,
            dry_run,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let source = match (snapshot, chain) {
                (Some(path), None) => SnapshotSource::Json(path),
                (None, Some(path)) => {
                    let (Some(spot), Some(vix), Some(iv_percentile)) = (spot, vix, iv_percentile)
                    else {
                        bail!("--chain requires --spot, --vix and --iv-percentile");
                    };
                    let header = SnapshotHeader {
                        symbol: symbol.unwrap_or_else(|| config.signal.symbol.clone()),
                        trade_date: parse_date(date.as_deref())?,
                        spot,
                        vix,
                        iv_percentile,
                    };
                    SnapshotSource::Csv { path, header }
                }
                _ => bail!("exactly one of --snapshot or --chain is required"),
            };
            run_evaluate(&config, source, dry_run, json)
        }
        Commands::Synthetic {
            spot,
            vix,
            iv_percentile,
            date,
            symbol,
            seed,
            out,
        } => {
            let trade_date = parse_date(date.as_deref())?;
            let mut market = SyntheticMarket::new(trade_date, spot, vix, iv_percentile);
            market.symbol = symbol;
            let snapshot = market.generate(seed);
            match out {
                Some(path) => {
                    write_snapshot_json(&path, &snapshot)?;
                    println!(
                        "Synthetic snapshot ({} contracts) written to {}",
                        snapshot.chain.len(),
                        path.display()
                    );
                }
                None => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            }
            Ok(())
        }
        Commands::History { config, limit } => {
            let config = load_config(config.as_deref())?;
            let limit = limit.unwrap_or(config.history.display_limit);
            let history = DecisionHistory::new(&config.history.path);
            let entries = history
                .recent(limit)
                .with_context(|| format!("reading {}", history.path().display()))?;
            print!("{}", render_history(&entries));
            Ok(())
        }
        Commands::Config { out, force } => {
            if out.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", out.display());
            }
            std::fs::write(&out, RunnerConfig::default().to_toml()?)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Default configuration written to {}", out.display());
            Ok(())
        }
    }
}

fn run_evaluate(
    config: &RunnerConfig,
    source: SnapshotSource,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    let run = run_daily(config, source, RunOptions { dry_run }, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run.decision)?);
    } else {
        print!(
            "{}",
            render_decision(&run.snapshot.symbol, run.snapshot.trade_date, &run.decision)
        );
        match run.recorded {
            Some(AppendOutcome::Written) => {
                println!("\nRecorded in {}", config.history.path.display())
            }
            Some(AppendOutcome::Duplicate) => {
                println!("\nAlready recorded (fingerprint {})", run.fingerprint.short())
            }
            None => {}
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    match path {
        Some(path) => Ok(RunnerConfig::from_file(path)?),
        None => Ok(RunnerConfig::default()),
    }
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
