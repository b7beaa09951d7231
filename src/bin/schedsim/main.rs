//! schedsim: run scheduling simulations from the command line.

mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use schedsim::{
    check_dir, read_input, render_gantt, write_json, write_plan, CheckResult, Input, PlanStats,
    SimFormat,
};

use cli::{Cli, Commands, OutputFormat, RunArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Check { dir } => check(&dir),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    let input = load_input(args)?;
    let plan = input.policy.simulate(&input.catalog);

    let stats = args
        .stats
        .then(|| PlanStats::compute(&input.catalog, &plan));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Plain => write_plan(&plan, &mut out)?,
        OutputFormat::Json => {
            write_json(input.policy, &input.catalog, &plan, stats.as_ref(), &mut out)?
        }
        OutputFormat::Gantt => out.write_all(render_gantt(&input.catalog, &plan).as_bytes())?,
    }
    out.flush().context("failed to write plan")?;

    // JSON output already carries the stats.
    if let Some(stats) = stats.filter(|_| args.format != OutputFormat::Json) {
        eprint!("{stats}");
    }
    Ok(())
}

fn load_input(args: &RunArgs) -> Result<Input> {
    let input = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            read_input(file).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => read_input(io::stdin().lock()).context("failed to parse stdin")?,
    };

    let input = match args.policy {
        Some(policy) if policy != input.policy => {
            info!(from = %input.policy, to = %policy, "overriding input policy");
            input.with_policy(policy)?
        }
        _ => input,
    };
    Ok(input)
}

fn check(dir: &Path) -> Result<()> {
    let cases = check_dir(dir)?;
    let mut failed = 0;

    for case in &cases {
        match &case.result {
            CheckResult::Accepted => println!("{}: ok", case.name()),
            CheckResult::WrongAnswer { expected, actual } => {
                failed += 1;
                println!("{}: wrong answer", case.name());
                println!("  expected:\n{expected}\n  actual:\n{actual}");
            }
            CheckResult::MissingExpected => {
                failed += 1;
                println!("{}: missing expected output", case.name());
            }
            CheckResult::Rejected(reason) => {
                failed += 1;
                println!("{}: rejected input: {reason}", case.name());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} cases failed", cases.len());
    }
    println!("{} cases passed", cases.len());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .event_format(SimFormat)
        .try_init();
}
