//! colexpr - Main Entry Point
//!
//! Compiles computed-column expressions given as arguments (or one per line
//! on stdin) and prints the resulting config list as JSON.

use anyhow::{bail, Context};
use clap::Parser;
use colexpr::{ColexprConfig, ComputedColumnSet, ExpressionCompiler};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compile computed-column expressions into JSON config lists.
///
/// Every EXPRESSION (or every non-empty line of stdin when none are given)
/// is compiled as one batch.
#[derive(Debug, Parser)]
#[command(name = "colexpr", version)]
struct Args {
    /// Read settings from FILE instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print the expressions alongside the configs
    #[arg(short = 'e', long = "expressions")]
    include_expressions: bool,

    /// Expressions to compile
    #[arg(value_name = "EXPRESSION")]
    expressions: Vec<String>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ColexprConfig::load(path)?,
        None => ColexprConfig::load_or_default(),
    };
    config.output.pretty |= args.pretty;
    config.output.include_expressions |= args.include_expressions;

    let expressions = if args.expressions.is_empty() {
        read_expressions(std::io::stdin().lock())?
    } else {
        args.expressions
    };

    if expressions.is_empty() {
        bail!("no expressions given (pass them as arguments or on stdin)");
    }

    tracing::info!("Compiling {} expressions", expressions.len());

    let compiler = ExpressionCompiler::with_settings(config.parser.clone());
    let set = ComputedColumnSet::from_expressions(&compiler, expressions)?;

    let json = match (config.output.include_expressions, config.output.pretty) {
        (true, true) => set.to_json_pretty()?,
        (true, false) => set.to_json()?,
        (false, true) => serde_json::to_string_pretty(&set.parsed)?,
        (false, false) => serde_json::to_string(&set.parsed)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write output")?;
    Ok(())
}

/// Read one expression per non-empty line.
fn read_expressions(input: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut expressions = Vec::new();
    for line in input.lines() {
        let line = line.context("Failed to read stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            expressions.push(trimmed.to_string());
        }
    }
    Ok(expressions)
}
