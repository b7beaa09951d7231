use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use schedsim::Policy;

/// Simulate CPU scheduling policies over a task list.
#[derive(Parser, Debug)]
#[command(name = "schedsim", author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a task list and print the plan.
    Run(RunArgs),
    /// Check every NAME.in case in a directory against its NAME.out.
    Check {
        /// Directory holding the cases.
        dir: PathBuf,
    },
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Task list to simulate. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Policy to use instead of the selector in the input
    /// (1-5, fcfs, sjf, srtf, rr, priority).
    #[arg(short, long, env = "SCHEDSIM_POLICY")]
    pub policy: Option<Policy>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Print per-task statistics to stderr.
    #[arg(long)]
    pub stats: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// index/task/start/end/priority lines.
    Plain,
    /// JSON document with tasks and records.
    Json,
    /// Mermaid gantt chart.
    Gantt,
}
