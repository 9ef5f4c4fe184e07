//! Equity Graph CLI
//!
//! Builds an ownership graph from a CSV or JSON export and reports on it.
//!
//! ## Commands
//!
//! - `build` - Build the graph and print node/edge counts with build statistics
//! - `rank` - Counts plus the most-owned entities and the largest shareholders
//! - `export` - Write the graph (nodes, edges, counts) as JSON

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use equity_graph::{BuildReport, GraphBuilder};
use equity_loader::load_records;
use std::path::{Path, PathBuf};

mod config;
mod report;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "equity-graph")]
#[command(author, version, about = "Equity ownership graph builder")]
struct Cli {
    /// TOML file with [build] and [load] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the graph and print a summary
    Build(InputArgs),
    /// Print degree rankings
    Rank {
        #[command(flatten)]
        input: InputArgs,
        /// Entries per ranking
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Export the graph as JSON
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// CSV or JSON file with ownership records
    input: PathBuf,
}

fn build(input: &Path, config: &AppConfig) -> Result<BuildReport> {
    let records = load_records(input, &config.load)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    let builder = GraphBuilder::new(config.build)?;
    Ok(builder.build(&records))
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries command output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Build(args) => {
            let report = build(&args.input, &config)?;
            print!("{}", report::render_summary(&report.graph, &report.stats));
        }
        Command::Rank { input, top } => {
            let report = build(&input.input, &config)?;
            let graph = &report.graph;
            print!("{}", report::render_summary(graph, &report.stats));
            println!();
            print!(
                "{}",
                report::render_ranking(
                    "Most-owned entities",
                    "shareholders",
                    &graph.in_degree_ranking(top)
                )
            );
            println!();
            print!(
                "{}",
                report::render_ranking(
                    "Largest shareholders",
                    "holdings",
                    &graph.out_degree_ranking(top)
                )
            );
        }
        Command::Export { input, output } => {
            let report = build(&input.input, &config)?;
            let json = report.graph.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote graph to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
