//! End-to-end behaviour of the character and line diff entry points.
//!
//! Every case checks the round-trip property: dropping insertions gives back
//! the old text, dropping deletions gives the new one.

use std::time::{Duration, Instant};

use text_diff::{
    diff_chars, diff_lines, diff_main, rehydrate, source_text, target_text,
    tokenize_lines, Deadline, Diff, DiffOptions, Operation,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert the script is canonical and reconstructs both texts.
fn verify_script(old: &str, new: &str, diffs: &[Diff]) {
    assert_eq!(source_text(diffs), old, "script does not rebuild the old text");
    assert_eq!(target_text(diffs), new, "script does not rebuild the new text");
    for pair in diffs.windows(2) {
        assert_ne!(pair[0].op, pair[1].op, "adjacent runs share a kind: {:?}", pair);
    }
    for diff in diffs {
        assert!(!diff.text.is_empty(), "empty run in {:?}", diffs);
    }
}

/// Number of code points deleted or inserted.
fn changed(diffs: &[Diff]) -> usize {
    diffs
        .iter()
        .filter(|d| d.op != Operation::Equal)
        .map(|d| d.text.chars().count())
        .sum()
}

fn check_all(old: &str, new: &str) {
    init_logging();
    let never = Deadline::never();
    verify_script(old, new, &diff_chars(old, new, &never));
    verify_script(old, new, &diff_main(old, new, &DiffOptions::default()));
    verify_script(
        old,
        new,
        &diff_main(
            old,
            new,
            &DiffOptions {
                check_lines: false,
                ..DiffOptions::default()
            },
        ),
    );
    verify_script(old, new, &diff_lines(old, new, &DiffOptions::default()));
}

#[test]
fn empty_to_empty() {
    check_all("", "");
    assert!(diff_chars("", "", &Deadline::never()).is_empty());
}

#[test]
fn empty_to_content() {
    check_all("", "hello\nworld\n");
}

#[test]
fn content_to_empty() {
    check_all("hello\nworld\n", "");
}

#[test]
fn identical_content() {
    let content = "line1\nline2\nline3\n";
    check_all(content, content);
    assert_eq!(
        diff_chars(content, content, &Deadline::never()),
        vec![Diff::equal(content)]
    );
}

#[test]
fn disjoint_inputs() {
    assert_eq!(
        diff_chars("abc", "xyz", &Deadline::never()),
        vec![Diff::delete("abc"), Diff::insert("xyz")]
    );
}

#[test]
fn containment_speedup() {
    assert_eq!(
        diff_chars("abc", "xabcy", &Deadline::never()),
        vec![Diff::insert("x"), Diff::equal("abc"), Diff::insert("y")]
    );
}

#[test]
fn simple_insertion() {
    assert_eq!(
        diff_chars("abc", "ab123c", &Deadline::never()),
        vec![Diff::equal("ab"), Diff::insert("123"), Diff::equal("c")]
    );
}

#[test]
fn simple_deletion() {
    assert_eq!(
        diff_chars("a123bc", "abc", &Deadline::never()),
        vec![Diff::equal("a"), Diff::delete("123"), Diff::equal("bc")]
    );
}

#[test]
fn two_insertions() {
    assert_eq!(
        diff_chars("abc", "a123b456c", &Deadline::never()),
        vec![
            Diff::equal("a"),
            Diff::insert("123"),
            Diff::equal("b"),
            Diff::insert("456"),
            Diff::equal("c"),
        ]
    );
}

#[test]
fn two_deletions() {
    assert_eq!(
        diff_chars("a123b456c", "abc", &Deadline::never()),
        vec![
            Diff::equal("a"),
            Diff::delete("123"),
            Diff::equal("b"),
            Diff::delete("456"),
            Diff::equal("c"),
        ]
    );
}

#[test]
fn single_character_replacement() {
    assert_eq!(
        diff_chars("a", "b", &Deadline::never()),
        vec![Diff::delete("a"), Diff::insert("b")]
    );
}

#[test]
fn interleaved_changes_are_minimal() {
    let old = "Apples are a fruit.";
    let new = "Bananas are also fruit.";
    let diffs = diff_chars(old, new, &Deadline::never());
    verify_script(old, new, &diffs);
    // The longest common subsequence is "s are a fruit." (14 code points).
    assert_eq!(changed(&diffs), 19 + 23 - 2 * 14);
}

#[test]
fn overlapping_prefix_and_suffix() {
    let old = "1ayb2";
    let new = "abxab";
    let diffs = diff_chars(old, new, &Deadline::never());
    verify_script(old, new, &diffs);
    assert_eq!(changed(&diffs), 6);
}

#[test]
fn non_ascii_code_points() {
    check_all("日本語のテキスト", "日本のテキストです");
    check_all("a\u{0680}x\u{0000}", "\u{0680}x\t\u{0000}");
}

#[test]
fn insert_in_middle_lines() {
    check_all("a\nc\n", "a\nb\nc\n");
}

#[test]
fn delete_from_end_lines() {
    check_all("a\nb\nc\n", "a\nb\n");
}

#[test]
fn no_trailing_newline() {
    check_all("hello", "hello\n");
    check_all("hello\n", "hello");
    check_all("hello", "world");
}

#[test]
fn duplicate_lines() {
    check_all("a\na\na\nb\nb\nb\n", "a\na\nc\nb\nb\n");
}

#[test]
fn large_insert() {
    let old: String = (0..10).map(|i| format!("line{}\n", i)).collect();
    let mut new = String::new();
    for i in 0..10 {
        new.push_str(&format!("line{}\n", i));
        if i == 5 {
            for j in 0..20 {
                new.push_str(&format!("inserted{}\n", j));
            }
        }
    }
    check_all(&old, &new);
}

#[test]
fn line_diff_of_edited_file() {
    let old = "fn main() {\n    println!(\"hi\");\n}\n";
    let new = "fn main() {\n    let x = 1;\n    println!(\"{}\", x);\n}\n";
    let diffs = diff_lines(old, new, &DiffOptions::default());
    assert_eq!(
        diffs,
        vec![
            Diff::equal("fn main() {\n"),
            Diff::delete("    println!(\"hi\");\n"),
            Diff::insert("    let x = 1;\n    println!(\"{}\", x);\n"),
            Diff::equal("}\n"),
        ]
    );
}

#[test]
fn tokenize_diff_rehydrate_pipeline() {
    let old = "alpha\nbeta\ngamma\nbeta\n";
    let new = "beta\ngamma\ndelta\nbeta\n";
    let (ids_old, ids_new, table) = tokenize_lines(old, new);
    let edits = text_diff::diff(&ids_old, &ids_new, &Deadline::never());
    let diffs = rehydrate(&edits, &table);
    verify_script(old, new, &diffs);
    assert_eq!(
        diffs,
        vec![
            Diff::delete("alpha\n"),
            Diff::equal("beta\ngamma\n"),
            Diff::insert("delta\n"),
            Diff::equal("beta\n"),
        ]
    );
}

#[test]
fn line_mode_matches_char_mode_on_disjoint_lines() {
    let old = "1234567890\n".repeat(13);
    let new = "abcdefghij\n".repeat(13);
    let lines = DiffOptions::default();
    let chars = DiffOptions {
        check_lines: false,
        ..DiffOptions::default()
    };
    assert_eq!(diff_main(&old, &new, &lines), diff_main(&old, &new, &chars));
}

#[test]
fn line_mode_single_long_line() {
    let old = "1234567890".repeat(13);
    let new = "abcdefghij".repeat(13);
    let lines = DiffOptions::default();
    let chars = DiffOptions {
        check_lines: false,
        ..DiffOptions::default()
    };
    assert_eq!(diff_main(&old, &new, &lines), diff_main(&old, &new, &chars));
}

#[test]
fn line_mode_overlap_round_trips() {
    let old = "1234567890\n".repeat(13);
    let new = format!(
        "abcdefghij\n1234567890\n1234567890\n1234567890\nabcdefghij\n{}",
        "1234567890\n".repeat(7) + "abcdefghij\n"
    );
    check_all(&old, &new);
}

#[test]
fn expired_deadline_still_round_trips() {
    init_logging();
    let old = "`Twas brillig, and the slithy toves\nDid gyre and gimble in the wabe:\n\
               All mimsy were the borogoves,\nAnd the mome raths outgrabe.\n"
        .repeat(64);
    let new = "I am the very model of a modern major general,\n\
               I've information vegetable, animal, and mineral,\n\
               I know the kings of England, and I quote the fights historical,\n\
               From Marathon to Waterloo, in order categorical.\n"
        .repeat(64);
    let past = Deadline::at(Instant::now() - Duration::from_secs(1));

    let start = Instant::now();
    let diffs = diff_chars(&old, &new, &past);
    assert!(start.elapsed() < Duration::from_secs(5));
    verify_script(&old, &new, &diffs);
    // Only the shared ".\n" suffix survives; the rest is replaced wholesale.
    assert_eq!(
        diffs,
        vec![
            Diff::delete(&old[..old.len() - 2]),
            Diff::insert(&new[..new.len() - 2]),
            Diff::equal(".\n"),
        ]
    );
}

#[test]
fn zero_timeout_option() {
    let opts = DiffOptions {
        timeout: Some(Duration::ZERO),
        check_lines: false,
        ..DiffOptions::default()
    };
    let old = "the quick brown fox jumps over the lazy dog";
    let new = "a quick brown cat leaps over a lazy dog";
    verify_script(old, new, &diff_main(old, new, &opts));
}

#[test]
fn operations_serialize() {
    let diffs = diff_chars("abc", "abd", &Deadline::never());
    let json = serde_json::to_string(&diffs).unwrap();
    assert_eq!(
        json,
        r#"[{"op":"Equal","text":"ab"},{"op":"Delete","text":"c"},{"op":"Insert","text":"d"}]"#
    );
    let back: Vec<Diff> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, diffs);
    assert_eq!(back[1].op, Operation::Delete);
}
