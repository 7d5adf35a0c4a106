//! dissect command-line entry point

use clap::Parser;
use dissect_cli::commands::Commands;

/// Split log lines into fields using dissect tokenizers
#[derive(Debug, Parser)]
#[command(name = "dissect", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
