use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "czl",
    about = "Compose conventional commit messages with Linear issue keys",
    version,
    after_help = "Any arguments after `czl` (without a subcommand) are forwarded to `git commit`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the composed message instead of running `git commit`
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the preview and final confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Read answers from a JSON file instead of asking
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Use this branch name instead of asking git
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Extra arguments forwarded to `git commit`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration
    Config {
        /// Write the built-in defaults to the global config file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing global config file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
    /// List the selectable commit types
    Types,
}

pub fn parse() -> Cli {
    Cli::parse()
}
