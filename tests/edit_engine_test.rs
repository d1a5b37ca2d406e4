//! Behavioral tests for the matcher cascade.
//!
//! Exercises `oa_edit::replace` / `oa_edit::apply` end to end, without file I/O.

use std::time::{Duration, Instant};

use oa_edit::edit::matchers;
use oa_edit::{apply, replace, EditError, EditRequest, InvalidEditReason, Strategy};
use proptest::prelude::*;

#[test]
fn test_exact_unique_replacement() {
    let content = "def foo():\n    pass\n\ndef bar():\n    pass";
    let result = replace(content, "def foo():\n    pass", "def foo():\n    return 42", false);
    assert_eq!(
        result,
        Ok("def foo():\n    return 42\n\ndef bar():\n    pass".to_owned())
    );
}

#[test]
fn test_trailing_whitespace_tolerance_keeps_on_disk_span() {
    let content = "import os\ndef f():   \n    return 1   \nprint(f())\n";
    let applied = apply(
        content,
        &EditRequest::new("def f():\n    return 1", "def f():\n    return 2"),
    )
    .expect("should match");

    assert_eq!(applied.strategy, Strategy::LineTrimmed);
    // The whole on-disk span, trailing spaces included, was substituted.
    assert_eq!(applied.content, "import os\ndef f():\n    return 2\nprint(f())\n");
}

#[test]
fn test_indentation_tolerance_leaves_class_header() {
    let content = "class Foo:\n    def bar(self):\n        pass\n\nx = 1\n";
    let result = replace(
        content,
        "def bar(self):\n    pass",
        "    def bar(self):\n        return 42",
        false,
    )
    .expect("should match");

    assert_eq!(result, "class Foo:\n    def bar(self):\n        return 42\n\nx = 1\n");
}

#[test]
fn test_indentation_flexible_matcher_finds_nested_block() {
    let content = "class Foo:\n    def bar(self):\n        pass\n";
    let found = matchers::indentation_flexible(content, "def bar(self):\n    pass");
    assert_eq!(found, vec!["    def bar(self):\n        pass"]);
}

#[test]
fn test_ambiguity_versus_replace_all() {
    assert_eq!(replace("aXbXc", "X", "Y", false), Err(EditError::AmbiguousMatch));
    assert_eq!(replace("aXbXc", "X", "Y", true), Ok("aYbYc".to_owned()));
}

#[test]
fn test_anchor_fallback_with_edited_interior_line() {
    let content = "import math\n\ndef calc():\n    x = compute_value()\n    return x\n";
    let applied = apply(
        content,
        &EditRequest::new(
            "def calc():\n    x = compute()\n    return x",
            "def calc():\n    return 42",
        ),
    )
    .expect("anchor match");

    assert_eq!(applied.strategy, Strategy::BlockAnchor);
    assert_eq!(applied.content, "import math\n\ndef calc():\n    return 42\n");
}

#[test]
fn test_anchor_fallback_with_paraphrased_comment_block() {
    let content = "def process():\n    # Setup\n    data = load()\n    # Process\n    \
                   result = transform(data)\n    # Return\n    return result";
    let find = "def process():\n    # Setup\n    data = fetch()\n    # Process\n    \
                result = transform(data)\n    # Return\n    return result";
    let result = replace(content, find, "def process():\n    return None", false);
    assert_eq!(result, Ok("def process():\n    return None".to_owned()));
}

#[test]
fn test_block_anchor_needs_three_lines() {
    let content = "first\nsecond\nthird\n";
    assert!(matchers::block_anchor(content, "first\nthird").is_empty());
    assert!(matchers::block_anchor(content, "first\nthird\n").is_empty());
}

#[test]
fn test_not_found() {
    assert_eq!(
        replace("hello world", "foo bar", "baz", false),
        Err(EditError::NotFound)
    );
}

#[test]
fn test_invalid_edits() {
    assert_eq!(
        replace("hello", "hello", "hello", false),
        Err(EditError::InvalidEdit {
            reason: InvalidEditReason::NoOp
        })
    );
    assert_eq!(
        replace("hello", "", "x", true),
        Err(EditError::InvalidEdit {
            reason: InvalidEditReason::EmptyOldText
        })
    );
}

#[test]
fn test_markdown_status_update() {
    let content = "# Plan\n\n## Task 1\n- [x] Done\n\n## Task 2: Split Schema Tests\n\
                   - [ ] IN PROGRESS\n\n## Summary\n50% complete\n";
    let result = replace(
        content,
        "## Task 2: Split Schema Tests\n- [ ] IN PROGRESS",
        "## Task 2: Split Schema Tests\n- [x] COMPLETED",
        false,
    )
    .expect("exact match");
    assert!(result.contains("- [x] COMPLETED"));
    assert!(result.contains("## Task 1\n- [x] Done"));
}

#[test]
fn test_crlf_content_with_lf_pattern() {
    let content = "fn a() {\r\n    one();  \r\n}\r\n";
    let result = replace(content, "fn a() {\n    one();", "fn a() {\r\n    two();", false);
    assert_eq!(result, Ok("fn a() {\r\n    two();\r\n}\r\n".to_owned()));
}

#[test]
fn test_ambiguous_exact_then_unique_fuzzy() {
    // "x = 1" occurs twice literally; the padded line is the only unique span.
    let content = "x = 1\nfoo\n  x = 1  \n";
    let applied = apply(content, &EditRequest::new("x = 1", "y = 2"));
    let applied = applied.expect("line-trimmed match");
    assert_eq!(applied.strategy, Strategy::LineTrimmed);
    assert_eq!(applied.content, "x = 1\nfoo\ny = 2\n");
}

#[test]
fn test_line_trimmed_matches_whole_block() {
    let content = "def a():\n    x = 1\n\ndef b():\n  x = 1\n  return x\n";
    let find = "def b():\n    x = 1\n    return x";
    let result = replace(content, find, "def b():\n  return 1", false);
    assert_eq!(
        result,
        Ok("def a():\n    x = 1\n\ndef b():\n  return 1\n".to_owned())
    );
}

#[test]
fn test_absent_pattern_fails_fast_on_large_file() {
    let lines: Vec<String> = (0..5000).map(|i| format!("    x{i} = {i}")).collect();
    let content = format!("class Config:\n{}\n", lines.join("\n"));

    let start = Instant::now();
    let result = replace(&content, "def nonexistent():\n    pass\n    return None", "x", false);
    let elapsed = start.elapsed();

    assert_eq!(result, Err(EditError::NotFound));
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}

#[test]
fn test_many_anchor_starts_stay_linear() {
    // Every line is a start anchor and there is no end anchor anywhere.
    let content = "{\n".repeat(20_000);

    let start = Instant::now();
    let result = replace(&content, "{\n    body\n}", "x", false);
    let elapsed = start.elapsed();

    assert_eq!(result, Err(EditError::NotFound));
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}

#[test]
fn test_many_anchor_pairs_below_threshold() {
    let content = "open\naaaaaaaa\nclose\n".repeat(3000);

    let start = Instant::now();
    let result = replace(&content, "open\nzzzzzzzz\nclose", "x", false);
    let elapsed = start.elapsed();

    assert_eq!(result, Err(EditError::NotFound));
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}

#[test]
fn test_concurrent_calls_share_nothing() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let content = format!("value = {i}\nother = 0\n");
                replace(&content, &format!("value = {i}"), "value = 99", false)
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("thread");
        assert_eq!(result, Ok("value = 99\nother = 0\n".to_owned()));
    }
}

proptest! {
    #[test]
    fn prop_unique_literal_is_substituted_exactly(
        prefix in "[a-c \n]{0,40}",
        needle in "[d-z]{1,8}",
        suffix in "[a-c \n]{0,40}",
        new in "[a-z \n]{0,12}",
    ) {
        prop_assume!(new != needle);
        let content = format!("{prefix}{needle}{suffix}");

        let applied = apply(&content, &EditRequest::new(&needle, &new));
        let applied = applied.expect("unique literal must match");

        prop_assert_eq!(applied.strategy, Strategy::Simple);
        prop_assert_eq!(applied.replacements, 1);
        prop_assert_eq!(applied.content, format!("{prefix}{new}{suffix}"));
    }

    #[test]
    fn prop_noop_edit_is_always_invalid(content in "(?s).{0,60}", old in "(?s).{0,20}") {
        let result = replace(&content, &old, &old, false);
        prop_assert!(
            matches!(result, Err(EditError::InvalidEdit { .. })),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn prop_single_edit_touches_one_region(
        content in "[a-c \n]{0,60}",
        old in "[a-c \n]{1,10}",
    ) {
        // Without replace_all exactly one span is substituted.
        if let Ok(new_content) = replace(&content, &old, "#", false) {
            prop_assert_eq!(new_content.matches('#').count(), 1);
        }
    }
}
