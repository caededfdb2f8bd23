use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    count::{self, CountArgs},
    expand::{self, ExpandArgs},
    show::{self, ShowArgs},
};

mod commands;
mod plan;

#[derive(Parser, Debug)]
#[command(name = "jobgrid", about = "Parameter sweep expansion and job argv tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a sweep plan into one shell command line per job.
    Expand(ExpandArgs),
    /// Summarize the size of a sweep plan's job space.
    Count(CountArgs),
    /// Decode job argv tokens and print the job they describe.
    Show(ShowArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Expand(args) => expand::run(&args),
        Command::Count(args) => count::run(&args),
        Command::Show(args) => show::run(&args),
    }
}
