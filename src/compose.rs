use std::fmt;

use crate::answers::AnswerSet;
use crate::config::Config;
use crate::wrap::wrap;

pub const BREAKING_PREFIX: &str = "BREAKING CHANGE: ";

/// A composed commit message: header plus the paragraphs that are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub header: String,
    pub body: Option<String>,
    pub breaking: Option<String>,
    pub issues: Option<String>,
}

impl ComposedMessage {
    /// Header followed by the present paragraphs, blank-line separated.
    pub fn paragraphs(&self) -> Vec<&str> {
        std::iter::once(self.header.as_str())
            .chain(self.body.as_deref())
            .chain(self.breaking.as_deref())
            .chain(self.issues.as_deref())
            .collect()
    }
}

impl fmt::Display for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paragraphs().join("\n\n"))
    }
}

/// `type(scope)!: [KEY] subject`
pub fn header(answers: &AnswerSet, cfg: &Config) -> String {
    let mut scope = answers
        .scope
        .as_deref()
        .filter(|scope| !scope.is_empty())
        .map(|scope| format!("({scope})"))
        .unwrap_or_default();
    if cfg.exclamation_mark && answers.breaking_text().is_some() {
        scope.push('!');
    }

    let linear = answers
        .linear
        .as_deref()
        .filter(|linear| !linear.is_empty())
        .map(|linear| format!("[{linear}] "))
        .unwrap_or_default();

    format!(
        "{}{}: {}{}",
        answers.commit_type, scope, linear, answers.subject
    )
}

/// `BREAKING CHANGE: <text>`, without doubling a prefix the user already typed.
pub fn breaking_paragraph(breaking: &str, width: usize) -> Option<String> {
    let breaking = breaking.trim();
    if breaking.is_empty() {
        return None;
    }
    let breaking = breaking.strip_prefix(BREAKING_PREFIX).unwrap_or(breaking);
    Some(wrap(&format!("{BREAKING_PREFIX}{breaking}"), width))
}

/// Turn a completed answer set into the final message.
///
/// The subject length was bounded when it was asked; the decorated header is
/// not re-validated here. A header that ends up wider than
/// `max_header_width` is logged and kept as is.
pub fn compose(answers: &AnswerSet, cfg: &Config) -> ComposedMessage {
    let header = header(answers, cfg);
    let header_len = header.chars().count();
    if header_len > cfg.max_header_width {
        tracing::warn!(
            header_len,
            max = cfg.max_header_width,
            "commit header is wider than max_header_width"
        );
    }

    let width = cfg.max_line_width;
    ComposedMessage {
        header,
        body: answers.body_text().map(|body| wrap(body, width)),
        breaking: answers
            .breaking_text()
            .and_then(|breaking| breaking_paragraph(breaking, width)),
        issues: answers.issues_text().map(|issues| wrap(issues, width)),
    }
}
