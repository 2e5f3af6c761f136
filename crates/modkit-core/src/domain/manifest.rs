//! Settings-manifest merge.
//!
//! The manifest is treated as a set of `include("...")` directives embedded
//! in otherwise opaque text. Merging removes every directive line, unions the
//! entries, and appends them sorted as one block after the untouched content.
//! A line is a directive when, after trimming, it starts with
//! `include("<path>")`; anything after the closing parenthesis (typically a
//! comment) is dropped with the line.
//!
//! I/O is the caller's job; everything here is a pure string transform.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Start of a directive line, after trimming: `include("<path>")`.
static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^include\(\s*"([^"]+)"\s*\)"#).expect("include pattern is a valid regex")
});

fn directive_entry(line: &str) -> Option<&str> {
    INCLUDE_DIRECTIVE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn directive(entry: &str) -> String {
    format!("include(\"{entry}\")")
}

/// Whether `entry` survives a write and re-read as the same directive.
fn round_trips(entry: &str) -> bool {
    !entry.contains(['\n', '\r']) && directive_entry(&directive(entry)) == Some(entry)
}

fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Entries declared by the directive lines of `text`, sorted and deduplicated.
pub fn parse_entries(text: &str) -> BTreeSet<String> {
    text.lines()
        .filter_map(directive_entry)
        .map(str::to_string)
        .collect()
}

/// Merge `new_entries` into the manifest `text`.
///
/// Non-directive lines keep their content and relative order. Trailing blank
/// lines of that content collapse to exactly one blank line before the
/// directive block, and the result ends with a single line terminator in the
/// manifest's own line-ending style.
///
/// New entries that could not be read back from the written directive (empty,
/// containing quotes or line breaks) are skipped.
///
/// Idempotent: merging the same entries into the output again is a no-op.
pub fn merge_entries<I, S>(text: &str, new_entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let eol = line_ending(text);

    let mut entries = BTreeSet::new();
    let mut kept: Vec<&str> = Vec::new();
    for line in text.lines() {
        match directive_entry(line) {
            Some(entry) => {
                entries.insert(entry.to_string());
            }
            None => kept.push(line),
        }
    }
    entries.extend(
        new_entries
            .into_iter()
            .filter(|e| round_trips(e.as_ref()))
            .map(|e| e.as_ref().to_string()),
    );

    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }

    let mut out = String::with_capacity(text.len() + entries.len() * 32);
    for line in &kept {
        out.push_str(line);
        out.push_str(eol);
    }
    if !kept.is_empty() && !entries.is_empty() {
        out.push_str(eol);
    }
    for entry in &entries {
        out.push_str(&directive(entry));
        out.push_str(eol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"rootProject.name = "shop"

pluginManagement {
    repositories { gradlePluginPortal() }
}
include(":core:public")

// keep me
include(":app")
"#;

    #[test]
    fn parse_finds_directives_only() {
        let entries = parse_entries(SETTINGS);
        assert_eq!(
            entries.into_iter().collect::<Vec<_>>(),
            vec![":app".to_string(), ":core:public".to_string()]
        );
    }

    #[test]
    fn directive_tolerates_whitespace() {
        assert_eq!(directive_entry("   include( \":a\" )  "), Some(":a"));
        assert_eq!(directive_entry("include(\":a\", \":b\")"), None);
        assert_eq!(directive_entry("// include(\":a\")"), None);
        assert_eq!(directive_entry("include(\"\")"), None);
    }

    #[test]
    fn merge_appends_sorted_union_after_content() {
        let out = merge_entries(SETTINGS, [":payments:public", ":app"]);
        assert_eq!(
            out,
            r#"rootProject.name = "shop"

pluginManagement {
    repositories { gradlePluginPortal() }
}

// keep me

include(":app")
include(":core:public")
include(":payments:public")
"#
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let entries = [":payments:public", ":payments:impl"];
        let once = merge_entries(SETTINGS, entries);
        let twice = merge_entries(&once, entries);
        assert_eq!(once, twice);
    }

    #[test]
    fn union_has_no_duplicates_regardless_of_order() {
        let a = merge_entries("include(\":b\")\n", [":c", ":a", ":b", ":a"]);
        let b = merge_entries("include(\":b\")\n", [":a", ":b", ":c"]);
        assert_eq!(a, b);
        assert_eq!(a, "include(\":a\")\ninclude(\":b\")\ninclude(\":c\")\n");
    }

    #[test]
    fn non_directive_lines_preserved_in_order() {
        let text = "b = 2\ninclude(\":x\")\n  a = 1  \n\tinclude(\":y\", \":z\")\n";
        let out = merge_entries(text, [":w"]);
        let kept: Vec<_> = out.lines().filter(|l| directive_entry(l).is_none()).collect();
        assert_eq!(kept, vec!["b = 2", "  a = 1  ", "\tinclude(\":y\", \":z\")", ""]);
    }

    #[test]
    fn empty_manifest_gets_only_directives() {
        assert_eq!(merge_entries("", [":a"]), "include(\":a\")\n");
        assert_eq!(merge_entries("\n\n  \n", [":a"]), "include(\":a\")\n");
    }

    #[test]
    fn trailing_blank_lines_collapse() {
        let out = merge_entries("x = 1\n\n\n\n", [":a"]);
        assert_eq!(out, "x = 1\n\ninclude(\":a\")\n");
    }

    #[test]
    fn missing_final_newline_still_separated() {
        let out = merge_entries("x = 1", [":a"]);
        assert_eq!(out, "x = 1\n\ninclude(\":a\")\n");
    }

    #[test]
    fn crlf_is_preserved() {
        let out = merge_entries("x = 1\r\ninclude(\":b\")\r\n", [":a"]);
        assert_eq!(out, "x = 1\r\n\r\ninclude(\":a\")\r\ninclude(\":b\")\r\n");
    }

    #[test]
    fn no_entries_leaves_content_with_single_terminator() {
        assert_eq!(merge_entries::<_, &str>("x = 1\n\n", []), "x = 1\n");
    }

    #[test]
    fn trailing_comment_directive_is_recognized() {
        let text = "rootProject.name = \"shop\"\ninclude(\":app\") // main app\n";
        assert_eq!(
            parse_entries(text).into_iter().collect::<Vec<_>>(),
            vec![":app".to_string()]
        );
        assert_eq!(
            merge_entries(text, [":app"]),
            "rootProject.name = \"shop\"\n\ninclude(\":app\")\n"
        );
    }

    #[test]
    fn entries_that_cannot_be_read_back_are_skipped() {
        let out = merge_entries("x = 1\n", [":pay\"ments:public", "", ":a\n:b", ":ok"]);
        assert_eq!(out, "x = 1\n\ninclude(\":ok\")\n");
    }

    fn directive_lines(text: &str) -> Vec<&str> {
        text.lines().filter_map(directive_entry).collect()
    }

    #[test]
    fn merge_is_idempotent_and_duplicate_free() {
        let manifests = [
            "",
            SETTINGS,
            "include(\":app\") // main app\ninclude(\":app\")\n",
            "a = 1\r\ninclude(\":b\")\nc = 2\n",
            "include( \":z\" )\n\tinclude(\":y\", \":x\")\n\n\n",
            "x = 1\r\n\r\n\r\n",
        ];
        let new_entries: [&[&str]; 4] = [
            &[],
            &[":app"],
            &[":feature:payments:public", ":app", ":feature:payments:impl"],
            &[":pay\"ments:public", "", ":b"],
        ];

        for text in manifests {
            for entries in new_entries {
                let once = merge_entries(text, entries.iter().copied());
                let twice = merge_entries(&once, entries.iter().copied());
                assert_eq!(once, twice, "not idempotent for {text:?} + {entries:?}");

                let found = directive_lines(&once);
                let mut unique = found.clone();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(found, unique, "duplicate or unsorted entries in {once:?}");

                let mut expected = parse_entries(text);
                expected.extend(
                    entries
                        .iter()
                        .filter(|e| round_trips(e))
                        .map(|e| e.to_string()),
                );
                assert_eq!(parse_entries(&once), expected);
            }
        }
    }
}
