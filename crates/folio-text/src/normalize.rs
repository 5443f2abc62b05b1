// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paragraph normalization — whitespace, sentence spacing, dialogue quotes,
// dashes, and ellipses.
//
// `normalize` is total and idempotent: applying it to its own output returns
// the same string.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of any whitespace, including newlines.
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sentence-terminal punctuation glued to the next sentence's capital.
static MISSING_SENTENCE_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").unwrap());

/// Two quote marks separated by nothing but whitespace.
static ADJACENT_QUOTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""\s*""#).unwrap());

const EM_DASH: &str = "\u{2014}";
const ELLIPSIS: &str = "\u{2026}";

/// Normalize a paragraph of manuscript text.
///
/// In order: collapse whitespace runs to one space, separate `.`/`!`/`?` from
/// a following capital, space adjacent quote marks as `" "`, turn `--` into an
/// em dash and `...` into an ellipsis, then trim.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN_RE.replace_all(text, " ");
    let spaced = fix_sentence_spacing(&collapsed);
    let quoted = fix_dialogue_spacing(&spaced);
    let typographic = quoted.replace("--", EM_DASH).replace("...", ELLIPSIS);
    typographic.trim().to_string()
}

/// Insert a space between sentence-ending punctuation and a following capital.
pub fn fix_sentence_spacing(text: &str) -> String {
    MISSING_SENTENCE_SPACE_RE
        .replace_all(text, "$1 $2")
        .into_owned()
}

/// Rewrite adjacent dialogue quotes (`""`, `"  "`) as `" "`.
pub fn fix_dialogue_spacing(text: &str) -> String {
    ADJACENT_QUOTES_RE.replace_all(text, r#"" ""#).into_owned()
}
