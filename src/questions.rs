//! The question sequence: field rules, visibility, and the loop that asks
//! each question in order against a [`Prompter`].

use std::sync::LazyLock;

use anyhow::Result;
use regex_lite::Regex;

use crate::answers::{optional, AnswerSet};
use crate::commit_type::{type_choices, TypeChoice};
use crate::config::Config;
use crate::context::BranchContext;
use crate::error::ValidationError;

/// The prompt engine. Implemented over `inquire` for the terminal and by
/// scripted prompters in tests.
pub trait Prompter {
    /// Pick one of `choices`, returning its value.
    fn select(
        &mut self,
        message: &str,
        choices: &[TypeChoice],
        starting_cursor: usize,
    ) -> Result<String>;

    /// Free-text input. An empty answer means "take the default".
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        help: Option<&str>,
        rule: &Rule,
    ) -> Result<String>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Called when an answer fails its rule, before the question is repeated.
    fn rejected(&mut self, _field: Field, _error: &ValidationError) {}

    /// Show the composed message before the final confirmation.
    fn preview(&mut self, message: &str);
}

/// Validation plus post-processing for one free-text field. The filter runs
/// first and validation sees the filtered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Accept,
    /// Trim and lowercase.
    Scope,
    /// Uppercase; empty is accepted, anything else must look like `STO-123`.
    IssueKey,
    /// Trim, drop trailing periods, then bound the length.
    Subject { min: usize, max: usize },
    /// Any non-blank text.
    Required,
}

impl Rule {
    pub fn apply(&self, raw: &str) -> Result<String, ValidationError> {
        match self {
            Rule::Accept => Ok(raw.to_string()),
            Rule::Scope => Ok(raw.trim().to_lowercase()),
            Rule::IssueKey => {
                let key = raw.trim().to_uppercase();
                if key.is_empty() || is_issue_key(&key) {
                    Ok(key)
                } else {
                    Err(ValidationError::InvalidIssueKey(raw.to_string()))
                }
            }
            Rule::Subject { min, max } => {
                let subject = filter_subject(raw);
                let len = subject.chars().count();
                if len < *min {
                    Err(ValidationError::SubjectTooShort { min: *min })
                } else if len > *max {
                    Err(ValidationError::SubjectTooLong { max: *max })
                } else {
                    Ok(subject)
                }
            }
            Rule::Required => {
                if raw.trim().is_empty() {
                    Err(ValidationError::MissingBreakingDescription)
                } else {
                    Ok(raw.to_string())
                }
            }
        }
    }
}

/// `ABC-123`, `MY-TEAM-7`. A bare prefix such as `ABC` or `ABC-` is rejected.
pub fn is_issue_key(value: &str) -> bool {
    ISSUE_KEY.is_match(value)
}

static ISSUE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*-[0-9]+$").unwrap());

/// Trim and strip trailing periods. Idempotent.
pub fn filter_subject(subject: &str) -> String {
    subject
        .trim()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Header prefix shown while the subject is typed, e.g. `fix(parser): ABC-1`.
pub fn leading_label(answers: &AnswerSet) -> String {
    let linear = answers
        .linear
        .as_deref()
        .map(|linear| format!(" {linear}"))
        .unwrap_or_default();
    let scope = match answers.scope.as_deref() {
        Some(scope) if scope != "none" => format!("({scope})"),
        _ => String::new(),
    };
    format!("{}{}:{}", answers.commit_type, scope, linear)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Linear,
    Scope,
    Subject,
    Body,
    IsBreaking,
    ConfirmBreaking,
    BreakingBody,
    Breaking,
    IsIssueAffected,
    IssuesBody,
    Issues,
}

/// Declared question order. Later defaults and visibility depend on earlier
/// answers, so this is also the evaluation order.
pub const QUESTION_ORDER: [Field; 12] = [
    Field::Type,
    Field::Linear,
    Field::Scope,
    Field::Subject,
    Field::Body,
    Field::IsBreaking,
    Field::ConfirmBreaking,
    Field::BreakingBody,
    Field::Breaking,
    Field::IsIssueAffected,
    Field::IssuesBody,
    Field::Issues,
];

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Linear => "linear",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Body => "body",
            Field::IsBreaking | Field::ConfirmBreaking => "isBreaking",
            Field::BreakingBody => "breakingBody",
            Field::Breaking => "breaking",
            Field::IsIssueAffected => "isIssueAffected",
            Field::IssuesBody => "issuesBody",
            Field::Issues => "issues",
        }
    }

    /// Whether the question is asked, given the answers so far.
    pub fn is_visible(self, answers: &AnswerSet) -> bool {
        match self {
            Field::ConfirmBreaking | Field::Breaking => answers.is_breaking,
            Field::BreakingBody => answers.is_breaking && !answers.has_body(),
            Field::IssuesBody => {
                answers.is_issue_affected
                    && !answers.has_body()
                    && answers.breaking_body.is_none()
                    && answers.breaking_text().is_none()
            }
            Field::Issues => answers.is_issue_affected,
            _ => true,
        }
    }

    /// Rule for free-text fields; `None` for select and confirm questions.
    pub fn rule(self, cfg: &Config) -> Option<Rule> {
        match self {
            Field::Linear => Some(Rule::IssueKey),
            Field::Scope => Some(Rule::Scope),
            Field::Subject => Some(Rule::Subject {
                min: cfg.min_header_width,
                max: cfg.subject_max_len(),
            }),
            Field::Breaking => Some(Rule::Required),
            Field::Body | Field::BreakingBody | Field::IssuesBody | Field::Issues => {
                Some(Rule::Accept)
            }
            Field::Type | Field::IsBreaking | Field::ConfirmBreaking | Field::IsIssueAffected => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Select {
        choices: Vec<TypeChoice>,
        starting_cursor: usize,
    },
    Text {
        default: Option<String>,
        help: Option<String>,
        rule: Rule,
    },
    Confirm {
        default: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub field: Field,
    pub message: String,
    pub kind: Kind,
}

/// Build the question for `field` as it should be presented now.
pub fn question(
    field: Field,
    cfg: &Config,
    ctx: &BranchContext,
    answers: &AnswerSet,
) -> Question {
    let text = |message: &str, default: Option<String>, help: Option<String>| Question {
        field,
        message: message.to_string(),
        kind: Kind::Text {
            default,
            help,
            rule: field.rule(cfg).unwrap_or(Rule::Accept),
        },
    };
    let confirm = |message: &str| Question {
        field,
        message: message.to_string(),
        kind: Kind::Confirm { default: false },
    };

    match field {
        Field::Type => Question {
            field,
            message: "Select the type of change that you're committing:".into(),
            kind: Kind::Select {
                choices: type_choices(&cfg.types),
                starting_cursor: cfg
                    .default_type
                    .as_ref()
                    .and_then(|key| cfg.types.iter().position(|ty| &ty.key == key))
                    .unwrap_or(0),
            },
        },
        // A branch key that would fail its own rule is not offered, so an
        // empty answer can still skip the question.
        Field::Linear => text(
            "Enter Linear issue (e.g. sto-123): (press enter to skip)",
            ctx.issue_key_upper().filter(|key| is_issue_key(key)),
            None,
        ),
        Field::Scope => text(
            "What is the scope of this change (e.g. component or file name): (press enter to skip)",
            cfg.default_scope.clone(),
            None,
        ),
        Field::Subject => text(
            "Write a short, imperative tense description of the change:",
            ctx.issue_description
                .clone()
                .or_else(|| cfg.default_subject.clone()),
            Some(format!(
                "{} ... ({}-{} characters)",
                leading_label(answers),
                cfg.min_header_width,
                cfg.subject_max_len()
            )),
        ),
        Field::Body => text(
            "Provide a longer description of the change: (press enter to skip)",
            cfg.default_body.clone(),
            None,
        ),
        Field::IsBreaking => confirm("Are there any breaking changes?"),
        Field::ConfirmBreaking => {
            confirm("You do know that this will bump the major version, are you sure?")
        }
        Field::BreakingBody => text(
            "A BREAKING CHANGE commit requires a body. Please enter a longer description of the commit itself:",
            None,
            None,
        ),
        Field::Breaking => text("Describe the breaking changes:", None, None),
        Field::IsIssueAffected => confirm("Does this change affect any open issues?"),
        Field::IssuesBody => text(
            "If issues are closed, the commit requires a body. Please enter a longer description of the commit itself:",
            Some("-".into()),
            None,
        ),
        Field::Issues => text(
            "Add issue references (e.g. \"fix #123\", \"re #123\".):",
            cfg.default_issues.clone(),
            None,
        ),
    }
}

/// Ask every visible question in order and return the filtered answers.
/// Rejected answers are reported to the prompter and asked again.
pub fn ask_all<P: Prompter + ?Sized>(
    prompter: &mut P,
    cfg: &Config,
    ctx: &BranchContext,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::default();

    for field in QUESTION_ORDER {
        if !field.is_visible(&answers) {
            continue;
        }
        let q = question(field, cfg, ctx, &answers);
        match q.kind {
            Kind::Select {
                choices,
                starting_cursor,
            } => loop {
                let value = prompter.select(&q.message, &choices, starting_cursor)?;
                match check_type(cfg, &value) {
                    Ok(value) => {
                        answers.commit_type = value;
                        break;
                    }
                    Err(e) => reject(prompter, field, &e),
                }
            },
            Kind::Confirm { default } => {
                let value = prompter.confirm(&q.message, default)?;
                record_flag(&mut answers, field, value);
            }
            Kind::Text {
                default,
                help,
                rule,
            } => loop {
                let raw = prompter.text(&q.message, default.as_deref(), help.as_deref(), &rule)?;
                let raw = if raw.is_empty() {
                    default.clone().unwrap_or_default()
                } else {
                    raw
                };
                match rule.apply(&raw) {
                    Ok(value) => {
                        record_text(&mut answers, field, value);
                        break;
                    }
                    Err(e) => reject(prompter, field, &e),
                }
            },
        }
    }

    Ok(answers)
}

fn reject<P: Prompter + ?Sized>(prompter: &mut P, field: Field, error: &ValidationError) {
    tracing::debug!(field = field.name(), %error, "answer rejected");
    prompter.rejected(field, error);
}

/// Run pre-filled answers through the same visibility and rules as the
/// interactive sequence. Hidden fields are dropped.
pub fn normalize(answers: &AnswerSet, cfg: &Config) -> Result<AnswerSet, ValidationError> {
    let mut out = AnswerSet::default();

    for field in QUESTION_ORDER {
        if !field.is_visible(&out) {
            continue;
        }
        match field {
            Field::Type => out.commit_type = check_type(cfg, &answers.commit_type)?,
            Field::IsBreaking | Field::ConfirmBreaking => out.is_breaking = answers.is_breaking,
            Field::IsIssueAffected => out.is_issue_affected = answers.is_issue_affected,
            _ => {
                let rule = field.rule(cfg).unwrap_or(Rule::Accept);
                let value = rule.apply(text_value(answers, field))?;
                record_text(&mut out, field, value);
            }
        }
    }

    Ok(out)
}

fn check_type(cfg: &Config, value: &str) -> Result<String, ValidationError> {
    if cfg.types.iter().any(|ty| ty.key == value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::UnknownType(value.to_string()))
    }
}

fn text_value(answers: &AnswerSet, field: Field) -> &str {
    let value = match field {
        Field::Type => return &answers.commit_type,
        Field::Subject => return &answers.subject,
        Field::Linear => &answers.linear,
        Field::Scope => &answers.scope,
        Field::Body => &answers.body,
        Field::BreakingBody => &answers.breaking_body,
        Field::Breaking => &answers.breaking,
        Field::IssuesBody => &answers.issues_body,
        Field::Issues => &answers.issues,
        Field::IsBreaking | Field::ConfirmBreaking | Field::IsIssueAffected => return "",
    };
    value.as_deref().unwrap_or("")
}

fn record_text(answers: &mut AnswerSet, field: Field, value: String) {
    match field {
        Field::Type => answers.commit_type = value,
        Field::Subject => answers.subject = value,
        Field::Linear => answers.linear = optional(value),
        Field::Scope => answers.scope = optional(value),
        Field::Body => answers.body = optional(value),
        Field::BreakingBody => answers.breaking_body = optional(value),
        Field::Breaking => answers.breaking = optional(value),
        Field::IssuesBody => answers.issues_body = optional(value),
        Field::Issues => answers.issues = optional(value),
        Field::IsBreaking | Field::ConfirmBreaking | Field::IsIssueAffected => {}
    }
}

fn record_flag(answers: &mut AnswerSet, field: Field, value: bool) {
    match field {
        Field::IsBreaking | Field::ConfirmBreaking => answers.is_breaking = value,
        Field::IsIssueAffected => answers.is_issue_affected = value,
        _ => {}
    }
}
