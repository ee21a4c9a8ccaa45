//! dtr CLI - replay scripted date/time range picker sessions.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dtr-cli",
    version,
    about = "Date/time range picker session toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: dtr_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    dtr_cmd::run(cli.command)
}
