#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use cz_linear::commit_type::TypeChoice;
use cz_linear::error::{PromptError, ValidationError};
use cz_linear::questions::{Field, Prompter, Rule};
use tempfile::TempDir;

pub struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    pub fn enter(path: &Path) -> Self {
        let original = std::env::current_dir().expect("failed to read current directory");
        std::env::set_current_dir(path).expect("failed to change current directory");
        Self { original }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub struct EnvGuard {
    previous: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(pairs: &[(&str, &str)]) -> Self {
        let mut previous = HashMap::new();
        for (key, value) in pairs {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }
        Self { previous }
    }

    pub fn clear(keys: &[&str]) -> Self {
        let mut previous = HashMap::new();
        for key in keys {
            previous.insert((*key).to_string(), std::env::var(key).ok());
            std::env::remove_var(key);
        }
        Self { previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            if let Some(value) = value {
                std::env::set_var(key, value);
            } else {
                std::env::remove_var(key);
            }
        }
    }
}

/// One scripted reply, consumed in question order.
#[derive(Debug, Clone)]
pub enum Reply {
    Select(&'static str),
    Text(&'static str),
    Confirm(bool),
    /// Esc/Ctrl-C at whichever prompt comes next.
    Cancel,
    /// The prompt itself fails, e.g. stdin is not a terminal.
    Fail(&'static str),
}

/// A prompter that answers from a script and records what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub asked: Vec<String>,
    pub text_defaults: Vec<(String, Option<String>)>,
    pub help: Vec<Option<String>>,
    pub starting_cursors: Vec<usize>,
    pub rejections: Vec<(Field, ValidationError)>,
    pub previews: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next(&mut self, message: &str) -> Reply {
        self.asked.push(message.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {message:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        message: &str,
        _choices: &[TypeChoice],
        starting_cursor: usize,
    ) -> Result<String> {
        self.starting_cursors.push(starting_cursor);
        match self.next(message) {
            Reply::Select(value) => Ok(value.to_string()),
            Reply::Cancel => Err(PromptError::Cancelled.into()),
            Reply::Fail(reason) => Err(anyhow::anyhow!(reason)),
            other => panic!("expected select reply for {message:?}, got {other:?}"),
        }
    }

    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        help: Option<&str>,
        _rule: &Rule,
    ) -> Result<String> {
        self.text_defaults
            .push((message.to_string(), default.map(str::to_string)));
        self.help.push(help.map(str::to_string));
        match self.next(message) {
            Reply::Text(value) => Ok(value.to_string()),
            Reply::Cancel => Err(PromptError::Cancelled.into()),
            Reply::Fail(reason) => Err(anyhow::anyhow!(reason)),
            other => panic!("expected text reply for {message:?}, got {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message) {
            Reply::Confirm(value) => Ok(value),
            Reply::Cancel => Err(PromptError::Cancelled.into()),
            Reply::Fail(reason) => Err(anyhow::anyhow!(reason)),
            other => panic!("expected confirm reply for {message:?}, got {other:?}"),
        }
    }

    fn rejected(&mut self, field: Field, error: &ValidationError) {
        self.rejections.push((field, error.clone()));
    }

    fn preview(&mut self, message: &str) {
        self.previews.push(message.to_string());
    }
}

pub fn init_git_repo() -> TempDir {
    let repo = TempDir::new().expect("failed to create temp dir");
    git_ok(repo.path(), ["init"]);
    git_ok(repo.path(), ["config", "user.name", "Test User"]);
    git_ok(repo.path(), ["config", "user.email", "test@example.com"]);
    git_ok(repo.path(), ["config", "commit.gpgsign", "false"]);
    repo
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write file");
}

pub fn git_ok<const N: usize>(cwd: &Path, args: [&str; N]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn git_stdout<const N: usize>(cwd: &Path, args: [&str; N]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn commit_file(repo_path: &Path, rel_path: &str, content: &str, message: &str) -> String {
    let full_path = repo_path.join(rel_path);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent directories");
    }
    write_file(&full_path, content);
    git_ok(repo_path, ["add", rel_path]);
    git_ok(repo_path, ["commit", "-m", message]);
    git_stdout(repo_path, ["rev-parse", "HEAD"])
}
