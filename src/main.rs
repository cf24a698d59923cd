use anyhow::{Context, Result};
use colored::Colorize;

use cz_linear::answers::AnswerSet;
use cz_linear::cli::{self, Cli};
use cz_linear::commit_type::type_choices;
use cz_linear::config::{global_config_path, Config};
use cz_linear::session::{self, Mode, Outcome};
use cz_linear::ui::{self, InquirePrompter};
use cz_linear::{context, git, questions};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("CZL_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::parse();

    match cli.command {
        Some(cli::Command::Config { init, force }) => {
            if init {
                let path = Config::default().save_global(force)?;
                println!("Wrote {}", path.display().to_string().green());
            } else {
                let cfg = Config::load()?;
                if let Some(path) = global_config_path() {
                    println!("# global config: {}", path.display());
                }
                print!("{}", cfg.to_toml()?);
            }
        }
        Some(cli::Command::Types) => {
            let cfg = Config::load()?;
            ui::print_type_choices(&type_choices(&cfg.types))?;
        }
        None => compose_and_commit(&cli)?,
    }

    Ok(())
}

fn compose_and_commit(cli: &Cli) -> Result<()> {
    let cfg = Config::load()?;
    let mode = if cli.yes { Mode::Direct } else { Mode::Confirm };
    let commit = |message: &str| -> Result<()> {
        if cli.dry_run {
            println!("{message}");
            return Ok(());
        }
        git::run_commit(message, &cli.extra_args).context("git commit failed")
    };

    let mut prompter = InquirePrompter;
    let outcome = match &cli.answers {
        Some(path) => {
            let answers = AnswerSet::from_json_file(path)?;
            let answers = questions::normalize(&answers, &cfg)
                .with_context(|| format!("Invalid answers in {}", path.display()))?;
            session::finish(&mut prompter, &cfg, &answers, mode, commit)?
        }
        None => {
            let branch = match &cli.branch {
                Some(branch) => branch.clone(),
                None => git::current_branch().unwrap_or_else(|e| {
                    tracing::warn!(error = %format!("{e:#}"), "could not read current branch");
                    String::new()
                }),
            };
            let ctx = context::derive(&branch);
            session::run(&mut prompter, &cfg, &ctx, mode, commit)?
        }
    };

    if let Outcome::Declined(_) = outcome {
        println!("{}", "Commit cancelled.".yellow());
    }

    Ok(())
}
