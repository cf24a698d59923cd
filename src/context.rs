use std::sync::LazyLock;

use regex_lite::Regex;

/// Defaults derived from the branch name, e.g. `user/sto-123-fix-login`
/// gives key `sto-123` and description `fix login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchContext {
    pub issue_key: Option<String>,
    pub issue_description: Option<String>,
}

impl BranchContext {
    /// Uppercased issue key, as offered for the linear question.
    pub fn issue_key_upper(&self) -> Option<String> {
        self.issue_key.as_ref().map(|key| key.to_uppercase())
    }
}

static BRANCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+/(?P<key>[a-z0-9-]{1,10})-(?P<description>.+)").unwrap()
});

/// Match `<prefix>/<key>-<description>`. The key takes the longest run of at
/// most 10 `[a-z0-9-]` characters that is still followed by `-` and some text,
/// so `sto-123-fix` yields `sto-123` rather than `sto`.
pub fn derive(branch: &str) -> BranchContext {
    let Some(caps) = BRANCH_PATTERN.captures(branch.trim()) else {
        tracing::debug!(branch, "branch name carries no issue key");
        return BranchContext::default();
    };

    BranchContext {
        issue_key: caps.name("key").map(|m| m.as_str().to_string()),
        issue_description: caps
            .name("description")
            .map(|m| m.as_str().replace('-', " ")),
    }
}
