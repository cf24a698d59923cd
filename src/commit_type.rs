use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One entry of the type catalog, e.g. `feat` / "A new feature".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitType {
    pub key: String,
    pub description: String,
}

impl CommitType {
    pub fn new(key: &str, description: &str) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("feat", "A new feature"),
    ("fix", "A bug fix"),
    ("docs", "Documentation only changes"),
    (
        "style",
        "Changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons, etc)",
    ),
    (
        "refactor",
        "A code change that neither fixes a bug nor adds a feature",
    ),
    ("perf", "A code change that improves performance"),
    ("test", "Adding missing tests or correcting existing tests"),
    (
        "build",
        "Changes that affect the build system or external dependencies (example scopes: gulp, broccoli, npm)",
    ),
    (
        "ci",
        "Changes to our CI configuration files and scripts (example scopes: Travis, Circle, BrowserStack, SauceLabs)",
    ),
    ("chore", "Other changes that don't modify src or test files"),
    ("revert", "Reverts a previous commit"),
];

/// The conventional commit types offered when no catalog is configured.
pub fn builtin_types() -> Vec<CommitType> {
    BUILTIN_TYPES
        .iter()
        .map(|(key, description)| CommitType::new(key, description))
        .collect()
}

/// Catalog must be non-empty and keys unique; iteration order is display order.
pub fn validate_catalog(types: &[CommitType]) -> Result<(), ConfigError> {
    if types.is_empty() {
        return Err(ConfigError::EmptyTypes);
    }
    let mut seen = HashSet::new();
    for ty in types {
        if !seen.insert(ty.key.as_str()) {
            return Err(ConfigError::DuplicateType(ty.key.clone()));
        }
    }
    Ok(())
}

/// Width of the `"<key>:"` column: longest key plus the colon.
pub fn label_width(types: &[CommitType]) -> usize {
    types
        .iter()
        .map(|ty| ty.key.chars().count())
        .max()
        .unwrap_or(0)
        + 1
}

/// A selectable entry in the type question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChoice {
    pub label: String,
    pub value: String,
}

impl fmt::Display for TypeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Build the type choices in catalog order, with the key column padded so
/// descriptions line up.
pub fn type_choices(types: &[CommitType]) -> Vec<TypeChoice> {
    let width = label_width(types);
    types
        .iter()
        .map(|ty| TypeChoice {
            label: format!("{:<width$} {}", format!("{}:", ty.key), ty.description),
            value: ty.key.clone(),
        })
        .collect()
}
