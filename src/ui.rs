use anyhow::{Context, Result};
use colored::Colorize;
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError, Select, Text};

use crate::commit_type::TypeChoice;
use crate::error::{PromptError, ValidationError};
use crate::questions::{Field, Prompter, Rule};

/// Replacement for `inquire::Confirm` that presents a Select with "Yes" / "No"
/// choices, the default first. Esc/Ctrl-C yields [`PromptError::Cancelled`].
pub fn confirm(prompt: &str, default_val: bool) -> Result<bool> {
    let choices = if default_val {
        vec!["Yes", "No"]
    } else {
        vec!["No", "Yes"]
    };
    Select::new(prompt, choices)
        .prompt()
        .map(|choice| choice == "Yes")
        .map_err(cancelled)
}

/// Draw `text` inside a rounded box with one column/row of padding and a
/// one-line margin above and below.
pub fn boxed(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let inner = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = Vec::with_capacity(lines.len() + 6);
    out.push(String::new());
    out.push(format!(" \u{256D}{}\u{256E}", "\u{2500}".repeat(inner)));
    out.push(format!(" \u{2502}{}\u{2502}", " ".repeat(inner)));
    for line in &lines {
        let pad = inner - 1 - line.chars().count();
        out.push(format!(" \u{2502} {}{}\u{2502}", line, " ".repeat(pad)));
    }
    out.push(format!(" \u{2502}{}\u{2502}", " ".repeat(inner)));
    out.push(format!(" \u{2570}{}\u{256F}", "\u{2500}".repeat(inner)));
    out.push(String::new());
    out.join("\n")
}

/// Terminal prompter backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(
        &mut self,
        message: &str,
        choices: &[TypeChoice],
        starting_cursor: usize,
    ) -> Result<String> {
        let choice = Select::new(message, choices.to_vec())
            .with_starting_cursor(starting_cursor)
            .with_page_size(choices.len().min(12))
            .prompt()
            .map_err(cancelled)?;
        Ok(choice.value)
    }

    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        help: Option<&str>,
        rule: &Rule,
    ) -> Result<String> {
        let rule = rule.clone();
        let fallback = default.unwrap_or_default().to_string();
        let validator = move |input: &str| -> Result<Validation, CustomUserError> {
            let candidate = if input.is_empty() {
                fallback.as_str()
            } else {
                input
            };
            Ok(match rule.apply(candidate) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        };
        let mut prompt = Text::new(message).with_validator(validator);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(cancelled)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        confirm(message, default)
    }

    fn rejected(&mut self, field: Field, error: &ValidationError) {
        eprintln!("{} {}: {}", "invalid".red().bold(), field.name(), error);
    }

    fn preview(&mut self, message: &str) {
        println!();
        println!("{}", "Commit preview:".underline());
        println!("{}", boxed(message).green());
    }
}

fn cancelled(err: InquireError) -> anyhow::Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            PromptError::Cancelled.into()
        }
        other => anyhow::Error::new(other).context("Prompt failed"),
    }
}

/// Print the type choice labels, one per line.
pub fn print_type_choices(choices: &[TypeChoice]) -> Result<()> {
    use std::io::Write;
    let mut stdout = std::io::stdout().lock();
    for choice in choices {
        writeln!(stdout, "{choice}").context("Failed to write to stdout")?;
    }
    Ok(())
}
