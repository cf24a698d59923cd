use cz_linear::answers::AnswerSet;
use cz_linear::compose::{breaking_paragraph, compose, header};
use cz_linear::config::Config;
use cz_linear::questions::Rule;

fn parser_fix() -> AnswerSet {
    AnswerSet {
        commit_type: "fix".into(),
        linear: Some("ABC-123".into()),
        scope: Some("parser".into()),
        subject: "handle empty input".into(),
        ..AnswerSet::default()
    }
}

#[test]
fn header_only_message_for_plain_fix() {
    let cfg = Config::default();
    let message = compose(&parser_fix(), &cfg);

    assert_eq!(message.header, "fix(parser): [ABC-123] handle empty input");
    assert_eq!(message.to_string(), "fix(parser): [ABC-123] handle empty input");
}

#[test]
fn breaking_change_adds_bang_and_footer_paragraph() {
    let cfg = Config::default();
    let answers = AnswerSet {
        is_breaking: true,
        breaking: Some("drop legacy flag".into()),
        ..parser_fix()
    };

    assert_eq!(
        compose(&answers, &cfg).to_string(),
        "fix(parser)!: [ABC-123] handle empty input\n\nBREAKING CHANGE: drop legacy flag"
    );
}

#[test]
fn bang_is_omitted_when_exclamation_mark_is_disabled() {
    let cfg = Config {
        exclamation_mark: false,
        ..Config::default()
    };
    let answers = AnswerSet {
        is_breaking: true,
        breaking: Some("drop legacy flag".into()),
        ..parser_fix()
    };

    let message = compose(&answers, &cfg);
    assert_eq!(message.header, "fix(parser): [ABC-123] handle empty input");
    assert_eq!(
        message.breaking.as_deref(),
        Some("BREAKING CHANGE: drop legacy flag")
    );
}

#[test]
fn bang_sits_before_colon_without_scope() {
    let cfg = Config::default();
    let answers = AnswerSet {
        commit_type: "feat".into(),
        subject: "new api".into(),
        is_breaking: true,
        breaking: Some("old api removed".into()),
        ..AnswerSet::default()
    };

    assert_eq!(header(&answers, &cfg), "feat!: new api");
}

#[test]
fn header_without_scope_or_issue() {
    let cfg = Config::default();
    let answers = AnswerSet {
        commit_type: "docs".into(),
        subject: "explain setup".into(),
        ..AnswerSet::default()
    };

    assert_eq!(header(&answers, &cfg), "docs: explain setup");
}

#[test]
fn omitted_paragraphs_leave_no_blank_lines() {
    let cfg = Config::default();
    let answers = AnswerSet {
        body: Some(String::new()),
        breaking: Some("   ".into()),
        issues: None,
        ..parser_fix()
    };

    let message = compose(&answers, &cfg).to_string();
    assert_eq!(message, "fix(parser): [ABC-123] handle empty input");
    assert!(!message.ends_with('\n'));
}

#[test]
fn breaking_prefix_is_not_duplicated() {
    let cfg = Config::default();
    let plain = AnswerSet {
        breaking: Some("x".into()),
        ..parser_fix()
    };
    let prefixed = AnswerSet {
        breaking: Some("BREAKING CHANGE: x".into()),
        ..parser_fix()
    };

    assert_eq!(
        compose(&plain, &cfg).breaking,
        compose(&prefixed, &cfg).breaking
    );
    assert_eq!(
        breaking_paragraph("  BREAKING CHANGE: x  ", 100).as_deref(),
        Some("BREAKING CHANGE: x")
    );
}

#[test]
fn breaking_prefix_match_is_case_sensitive() {
    assert_eq!(
        breaking_paragraph("breaking change: x", 100).as_deref(),
        Some("BREAKING CHANGE: breaking change: x")
    );
}

#[test]
fn issues_paragraph_is_last_and_unchanged_under_width() {
    let cfg = Config::default();
    let answers = AnswerSet {
        body: Some("Some context.".into()),
        breaking: Some("gone".into()),
        issues: Some("fix #42, re #43".into()),
        ..parser_fix()
    };

    let message = compose(&answers, &cfg);
    assert_eq!(message.issues.as_deref(), Some("fix #42, re #43"));
    assert_eq!(
        message.paragraphs(),
        vec![
            "fix(parser)!: [ABC-123] handle empty input",
            "Some context.",
            "BREAKING CHANGE: gone",
            "fix #42, re #43",
        ]
    );
    assert!(message.to_string().ends_with("\n\nfix #42, re #43"));
}

#[test]
fn long_paragraphs_are_wrapped_at_max_line_width() {
    let cfg = Config {
        max_line_width: 20,
        ..Config::default()
    };
    let answers = AnswerSet {
        body: Some("the quick brown fox jumps over the lazy dog again and again".into()),
        breaking: Some("configuration keys were renamed everywhere".into()),
        ..parser_fix()
    };

    let message = compose(&answers, &cfg);
    for paragraph in [&message.body, &message.breaking] {
        let paragraph = paragraph.as_deref().expect("paragraph present");
        assert!(paragraph.lines().count() > 1);
        for line in paragraph.lines() {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
    }
    assert!(message
        .breaking
        .as_deref()
        .expect("breaking present")
        .starts_with("BREAKING CHANGE:"));
}

#[test]
fn body_keeps_its_blank_lines() {
    let cfg = Config::default();
    let answers = AnswerSet {
        body: Some("first paragraph\n\nsecond paragraph".into()),
        ..parser_fix()
    };

    assert_eq!(
        compose(&answers, &cfg).to_string(),
        "fix(parser): [ABC-123] handle empty input\n\nfirst paragraph\n\nsecond paragraph"
    );
}

#[test]
fn follow_up_bodies_fill_in_for_an_empty_body() {
    let cfg = Config::default();
    let answers = AnswerSet {
        is_breaking: true,
        breaking_body: Some("why it had to change".into()),
        breaking: Some("removed".into()),
        ..parser_fix()
    };
    assert_eq!(
        compose(&answers, &cfg).body.as_deref(),
        Some("why it had to change")
    );

    let answers = AnswerSet {
        is_issue_affected: true,
        issues_body: Some("-".into()),
        issues: Some("closes #7".into()),
        ..parser_fix()
    };
    assert_eq!(
        compose(&answers, &cfg).to_string(),
        "fix(parser): [ABC-123] handle empty input\n\n-\n\ncloses #7"
    );
}

#[test]
fn boundary_subject_with_bang_fits_header_width_budget() {
    let cfg = Config::default();
    let max = cfg.subject_max_len();
    assert_eq!(max, cfg.max_header_width - 1);

    let raw = "s".repeat(max);
    let subject = Rule::Subject {
        min: cfg.min_header_width,
        max,
    }
    .apply(&raw)
    .expect("subject at the ceiling is accepted");

    // Subject plus the `!` marker stays within max_header_width.
    assert!(subject.chars().count() + 1 <= cfg.max_header_width);
}

#[test]
fn decorated_header_is_kept_as_is() {
    let cfg = Config::default();
    let subject = "s".repeat(cfg.subject_max_len());
    let answers = AnswerSet {
        commit_type: "fix".into(),
        subject: subject.clone(),
        ..AnswerSet::default()
    };

    // Only the raw subject is bounded; decorations are added on top.
    let message = compose(&answers, &cfg);
    assert_eq!(message.header, format!("fix: {subject}"));
    assert!(message.header.chars().count() > cfg.max_header_width);
}
