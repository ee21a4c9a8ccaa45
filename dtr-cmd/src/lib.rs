//! Command implementations for the dtr CLI.
//!
//! Provides subcommands for replaying scripted picker sessions and for
//! one-off date merges.

use clap::Subcommand;

pub mod merge;
pub mod replay;

#[derive(Subcommand)]
pub enum Command {
    /// Replay a CSV script of UI events against a picker and print each step as JSON
    Replay {
        /// Path to the event script (one event per row, `#` starts a comment)
        #[arg(short = 's', long)]
        script: String,

        /// Optional JSON picker configuration
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Initial value: empty, one instant, or `from,to`
        #[arg(short = 'v', long, default_value = "")]
        value: String,
    },

    /// Merge a picked date into a previous instant, keeping its time of day
    Merge {
        /// Previously held instant (omit when the side was empty)
        #[arg(short = 'p', long)]
        previous: Option<String>,

        /// Newly picked date or instant
        #[arg(short = 'n', long)]
        next: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Replay {
            script,
            config,
            value,
        } => replay::run_replay(&script, config.as_deref(), &value),
        Command::Merge { previous, next } => merge::run_merge(previous.as_deref(), &next),
    }
}
