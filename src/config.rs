use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::commit_type::{builtin_types, validate_catalog, CommitType};
use crate::error::ConfigError;

pub const DEFAULT_MAX_HEADER_WIDTH: usize = 72;
pub const DEFAULT_MIN_HEADER_WIDTH: usize = 2;
pub const DEFAULT_MAX_LINE_WIDTH: usize = 100;

/// Name of the repository-local TOML layer.
pub const LOCAL_CONFIG_FILE: &str = ".czl.toml";

/// Effective configuration: every option resolved to a concrete value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub max_header_width: usize,
    pub min_header_width: usize,
    pub max_line_width: usize,
    pub exclamation_mark: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_issues: Option<String>,
    pub types: Vec<CommitType>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_header_width: DEFAULT_MAX_HEADER_WIDTH,
            min_header_width: DEFAULT_MIN_HEADER_WIDTH,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            exclamation_mark: true,
            default_type: None,
            default_scope: None,
            default_subject: None,
            default_body: None,
            default_issues: None,
            types: builtin_types(),
        }
    }
}

/// Caller-supplied options. Anything left `None` falls back to the layer
/// below it and finally to [`Config::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub max_header_width: Option<usize>,
    pub min_header_width: Option<usize>,
    pub max_line_width: Option<usize>,
    pub exclamation_mark: Option<bool>,
    pub default_type: Option<String>,
    pub default_scope: Option<String>,
    pub default_subject: Option<String>,
    pub default_body: Option<String>,
    pub default_issues: Option<String>,
    pub types: Option<Vec<CommitType>>,
}

/// Map of CZL_ env var suffix → field name
const ENV_FIELD_MAP: &[(&str, &str)] = &[
    ("MAX_HEADER_WIDTH", "max_header_width"),
    ("MIN_HEADER_WIDTH", "min_header_width"),
    ("MAX_LINE_WIDTH", "max_line_width"),
    ("EXCLAMATION_MARK", "exclamation_mark"),
    ("DEFAULT_TYPE", "default_type"),
    ("DEFAULT_SCOPE", "default_scope"),
    ("DEFAULT_SUBJECT", "default_subject"),
    ("DEFAULT_BODY", "default_body"),
    ("DEFAULT_ISSUES", "default_issues"),
];

impl ConfigOverrides {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(&mut self, other: ConfigOverrides) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            max_header_width,
            min_header_width,
            max_line_width,
            exclamation_mark,
            default_type,
            default_scope,
            default_subject,
            default_body,
            default_issues,
            types
        );
    }

    /// Read the `CZL_*` keys of an env-style map.
    pub fn from_env_map(map: &HashMap<String, String>) -> Self {
        let mut out = Self::default();
        for (suffix, field) in ENV_FIELD_MAP {
            let key = format!("CZL_{suffix}");
            let Some(val) = map.get(&key) else {
                continue;
            };
            match *suffix {
                "MAX_HEADER_WIDTH" => out.max_header_width = parse_width(&key, val),
                "MIN_HEADER_WIDTH" => out.min_header_width = parse_width(&key, val),
                "MAX_LINE_WIDTH" => out.max_line_width = parse_width(&key, val),
                "EXCLAMATION_MARK" => {
                    out.exclamation_mark = Some(val == "1" || val.eq_ignore_ascii_case("true"))
                }
                "DEFAULT_TYPE" => out.default_type = Some(val.clone()),
                "DEFAULT_SCOPE" => out.default_scope = Some(val.clone()),
                "DEFAULT_SUBJECT" => out.default_subject = Some(val.clone()),
                "DEFAULT_BODY" => out.default_body = Some(val.clone()),
                "DEFAULT_ISSUES" => out.default_issues = Some(val.clone()),
                _ => tracing::debug!(field, "unhandled env field"),
            }
        }
        out
    }

    /// Read a TOML layer from disk.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn parse_width(key: &str, val: &str) -> Option<usize> {
    match val.trim().parse::<usize>() {
        Ok(width) => Some(width),
        Err(_) => {
            tracing::warn!(key, value = val, "ignoring non-numeric width");
            None
        }
    }
}

impl Config {
    /// Resolve overrides on top of the built-in defaults and check that the
    /// result is usable.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cfg = Self {
            max_header_width: overrides
                .max_header_width
                .unwrap_or(defaults.max_header_width),
            min_header_width: overrides
                .min_header_width
                .unwrap_or(defaults.min_header_width),
            max_line_width: overrides.max_line_width.unwrap_or(defaults.max_line_width),
            exclamation_mark: overrides
                .exclamation_mark
                .unwrap_or(defaults.exclamation_mark),
            default_type: non_empty(overrides.default_type),
            default_scope: non_empty(overrides.default_scope),
            default_subject: non_empty(overrides.default_subject),
            default_body: non_empty(overrides.default_body),
            default_issues: non_empty(overrides.default_issues),
            types: overrides.types.unwrap_or(defaults.types),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.types)?;
        if self.min_header_width > self.max_header_width {
            return Err(ConfigError::HeaderWidths {
                min: self.min_header_width,
                max: self.max_header_width,
            });
        }
        if self.max_line_width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        if let Some(default_type) = &self.default_type {
            if !self.types.iter().any(|ty| &ty.key == default_type) {
                return Err(ConfigError::UnknownDefaultType(default_type.clone()));
            }
        }
        Ok(())
    }

    /// Longest accepted subject. One column is kept free for the `!` marker
    /// when exclamation mode is on.
    pub fn subject_max_len(&self) -> usize {
        if self.exclamation_mark {
            self.max_header_width.saturating_sub(1)
        } else {
            self.max_header_width
        }
    }

    /// Load config with layered resolution:
    /// defaults → global TOML → local `.czl.toml` → local `.env` → env vars
    pub fn load() -> Result<Self> {
        let mut overrides = ConfigOverrides::default();

        // Layer 1: Global TOML
        if let Some(path) = global_config_path() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading global config");
                overrides.overlay(ConfigOverrides::from_toml_file(&path)?);
            }
        }

        if let Ok(root) = crate::git::find_repo_root() {
            let root = PathBuf::from(root);

            // Layer 2: Local TOML
            let toml_path = root.join(LOCAL_CONFIG_FILE);
            if toml_path.exists() {
                tracing::debug!(path = %toml_path.display(), "loading local config");
                overrides.overlay(ConfigOverrides::from_toml_file(&toml_path)?);
            }

            // Layer 3: Local .env
            let env_path = root.join(".env");
            if env_path.exists() {
                tracing::debug!(path = %env_path.display(), "loading local .env");
                let env_map = parse_dotenv(&env_path)?;
                overrides.overlay(ConfigOverrides::from_env_map(&env_map));
            }
        }

        // Layer 4: Actual environment variables
        let mut env_map = HashMap::new();
        for (suffix, _) in ENV_FIELD_MAP {
            let key = format!("CZL_{suffix}");
            if let Ok(val) = std::env::var(&key) {
                env_map.insert(key, val);
            }
        }
        overrides.overlay(ConfigOverrides::from_env_map(&env_map));

        Ok(Self::resolve(overrides)?)
    }

    /// Render as TOML, in the same shape the config file is read in.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write to the global TOML config file. Refuses to replace an existing
    /// file unless `force` is set.
    pub fn save_global(&self, force: bool) -> Result<PathBuf> {
        let path = global_config_path().context("Could not determine global config directory")?;
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (pass --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Global config file path
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(override_dir) = std::env::var_os("CZL_CONFIG_HOME") {
        let override_path = PathBuf::from(override_dir);
        if !override_path.as_os_str().is_empty() {
            return Some(override_path.join("czl").join("config.toml"));
        }
    }
    dirs::config_dir().map(|d| d.join("czl").join("config.toml"))
}

fn parse_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut map = HashMap::new();
    for item in iter {
        let (key, val) = item.with_context(|| format!("Failed to parse {}", path.display()))?;
        map.insert(key, val);
    }
    Ok(map)
}
