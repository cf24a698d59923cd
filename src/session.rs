use anyhow::Result;

use crate::answers::AnswerSet;
use crate::compose::compose;
use crate::config::Config;
use crate::context::BranchContext;
use crate::error::PromptError;
use crate::questions::{ask_all, Prompter};

/// How the composed message reaches the commit callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Preview, then ask for a final yes/no.
    Confirm,
    /// Hand the message straight to the callback.
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(String),
    /// The user said no at the final confirmation, or cancelled it.
    /// Nothing was committed.
    Declined(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Committed(message) | Outcome::Declined(message) => message,
        }
    }
}

/// Ask the questions, compose the message and pass it to `commit`.
/// Errors from `commit` are returned unchanged.
pub fn run<P, C>(
    prompter: &mut P,
    cfg: &Config,
    ctx: &BranchContext,
    mode: Mode,
    commit: C,
) -> Result<Outcome>
where
    P: Prompter + ?Sized,
    C: FnOnce(&str) -> Result<()>,
{
    let answers = ask_all(prompter, cfg, ctx)?;
    finish(prompter, cfg, &answers, mode, commit)
}

/// Compose from already collected answers, then preview/confirm per `mode`.
/// A prompt failure at the confirmation other than a cancel is returned and
/// nothing is committed.
pub fn finish<P, C>(
    prompter: &mut P,
    cfg: &Config,
    answers: &AnswerSet,
    mode: Mode,
    commit: C,
) -> Result<Outcome>
where
    P: Prompter + ?Sized,
    C: FnOnce(&str) -> Result<()>,
{
    let message = compose(answers, cfg).to_string();

    if mode == Mode::Confirm {
        prompter.preview(&message);
        let confirmed = match prompter.confirm(CONFIRM_COMMIT, true) {
            Ok(answer) => answer,
            Err(err) if is_cancel(&err) => false,
            Err(err) => return Err(err),
        };
        if !confirmed {
            tracing::info!("commit declined at confirmation");
            return Ok(Outcome::Declined(message));
        }
    }

    commit(&message)?;
    Ok(Outcome::Committed(message))
}

const CONFIRM_COMMIT: &str = "Are you sure that you want to commit?";

fn is_cancel(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    )
}
