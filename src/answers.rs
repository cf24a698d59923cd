use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Answers collected from the user, in question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerSet {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub linear: Option<String>,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub is_breaking: bool,
    pub breaking_body: Option<String>,
    pub breaking: Option<String>,
    pub is_issue_affected: bool,
    pub issues_body: Option<String>,
    pub issues: Option<String>,
}

impl AnswerSet {
    /// Text for the body paragraph. The breaking and issue follow-up prompts
    /// only exist to supply a body, so they fill in when `body` is empty.
    pub fn body_text(&self) -> Option<&str> {
        present(&self.body)
            .or_else(|| present(&self.breaking_body))
            .or_else(|| present(&self.issues_body))
    }

    pub fn has_body(&self) -> bool {
        present(&self.body).is_some()
    }

    pub fn breaking_text(&self) -> Option<&str> {
        present(&self.breaking)
    }

    pub fn issues_text(&self) -> Option<&str> {
        present(&self.issues)
    }

    /// Read a JSON answer file, e.g. `{"type": "fix", "subject": "handle it"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Empty answers are stored as absent.
pub(crate) fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
