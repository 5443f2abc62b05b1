// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chapter segmentation — split raw manuscript text into ordered chapters.
//
// Each non-blank line is classified against an ordered list of heading rules;
// the first rule that matches wins. Heading lines open a new chapter, every
// other line is content of the chapter currently open.

use std::sync::LazyLock;

use folio_core::Chapter;
use folio_core::error::{FolioError, Result};
use regex::Regex;
use tracing::{debug, instrument, trace};

/// Title given to content that appears before any heading.
pub const IMPLICIT_CHAPTER_TITLE: &str = "Chapter 1";

static CHAPTER_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^chapter\s+\d+").unwrap());

static CHAPTER_UPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CHAPTER\s+\d+").unwrap());

static NUMBERED_PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// A heading pattern. Variants are listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingRule {
    /// `Chapter 12`, `chapter 3`, `CHAPTER 7: The Storm` (any case).
    ChapterWord,
    /// `CHAPTER 7` (upper case only).
    ChapterUpper,
    /// `12. The Storm` (number and period at line start).
    NumberedPeriod,
}

impl HeadingRule {
    /// Default evaluation order; the first match wins.
    pub const PRIORITY: [HeadingRule; 3] = [
        HeadingRule::ChapterWord,
        HeadingRule::ChapterUpper,
        HeadingRule::NumberedPeriod,
    ];

    /// Whether `line` (already trimmed) is a heading under this rule.
    pub fn matches(&self, line: &str) -> bool {
        let pattern = match self {
            Self::ChapterWord => &CHAPTER_WORD_RE,
            Self::ChapterUpper => &CHAPTER_UPPER_RE,
            Self::NumberedPeriod => &NUMBERED_PERIOD_RE,
        };
        pattern.is_match(line)
    }
}

/// Classification of one trimmed, non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(HeadingRule),
    Content,
}

/// Splits raw text into chapters using an ordered rule list.
#[derive(Debug, Clone)]
pub struct ChapterSegmenter {
    rules: Vec<HeadingRule>,
}

impl Default for ChapterSegmenter {
    fn default() -> Self {
        Self {
            rules: HeadingRule::PRIORITY.to_vec(),
        }
    }
}

impl ChapterSegmenter {
    /// Segmenter with a custom rule order (first match wins).
    pub fn with_rules(rules: Vec<HeadingRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HeadingRule] {
        &self.rules
    }

    /// Classify a trimmed line.
    pub fn classify(&self, line: &str) -> LineKind {
        self.rules
            .iter()
            .copied()
            .find(|rule| rule.matches(line))
            .map_or(LineKind::Content, LineKind::Heading)
    }

    /// Split `text` into chapters in encounter order.
    ///
    /// Blank lines are dropped and every kept line is trimmed. Content seen
    /// before the first heading lands in an implicit `"Chapter 1"`. Fails with
    /// `EmptyInput` when `text` has no non-blank line.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn segment(&self, text: &str) -> Result<Vec<Chapter>> {
        let mut chapters: Vec<Chapter> = Vec::new();
        let mut open: Option<Chapter> = None;
        let mut saw_line = false;

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            saw_line = true;
            match self.classify(line) {
                LineKind::Heading(rule) => {
                    trace!(?rule, line, "heading matched");
                    if let Some(done) = open.replace(Chapter::titled(line)) {
                        chapters.push(done);
                    }
                }
                LineKind::Content => open
                    .get_or_insert_with(|| Chapter::titled(IMPLICIT_CHAPTER_TITLE))
                    .content
                    .push(line.to_string()),
            }
        }

        if !saw_line {
            return Err(FolioError::EmptyInput);
        }

        // Flush the trailing chapter.
        chapters.extend(open);

        debug!(chapters = chapters.len(), "segmentation complete");
        Ok(chapters)
    }
}

/// Segment `text` with the default rule order.
pub fn segment(text: &str) -> Result<Vec<Chapter>> {
    ChapterSegmenter::default().segment(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, content: &[&str]) -> Chapter {
        Chapter::new(title, content.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn two_chapters() {
        let chapters = segment("Chapter 1\nHello world.\nChapter 2\nGoodbye.").unwrap();
        assert_eq!(
            chapters,
            vec![
                chapter("Chapter 1", &["Hello world."]),
                chapter("Chapter 2", &["Goodbye."]),
            ]
        );
    }

    #[test]
    fn no_heading_becomes_implicit_chapter() {
        let chapters = segment("Just some text.").unwrap();
        assert_eq!(chapters, vec![chapter("Chapter 1", &["Just some text."])]);
    }

    #[test]
    fn preamble_before_first_heading() {
        let chapters = segment("Dedication.\n\nChapter 1\nBody.").unwrap();
        assert_eq!(
            chapters,
            vec![
                chapter("Chapter 1", &["Dedication."]),
                chapter("Chapter 1", &["Body."]),
            ]
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(segment(""), Err(FolioError::EmptyInput)));
        assert!(matches!(segment("  \n\t\n  "), Err(FolioError::EmptyInput)));
    }

    #[test]
    fn lines_are_trimmed_and_blanks_dropped() {
        let chapters = segment("  Chapter 3  \n\n   First line.  \r\n\n  Second line.\n").unwrap();
        assert_eq!(
            chapters,
            vec![chapter("Chapter 3", &["First line.", "Second line."])]
        );
    }

    #[test]
    fn consecutive_headings_leave_empty_content() {
        let chapters = segment("Chapter 1\nChapter 2\nText.\nChapter 3").unwrap();
        assert_eq!(chapters.len(), 3);
        assert!(chapters[0].is_empty());
        assert_eq!(chapters[1].content, vec!["Text."]);
        assert!(chapters[2].is_empty());
    }

    #[test]
    fn heading_count_matches_chapter_count() {
        let text = "CHAPTER 1\na\nchapter 2\nb\n3. Three\nc\nChapter 4: The End\nd";
        let chapters = segment(text).unwrap();
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["CHAPTER 1", "chapter 2", "3. Three", "Chapter 4: The End"]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let segmenter = ChapterSegmenter::default();
        assert_eq!(
            segmenter.classify("CHAPTER 9"),
            LineKind::Heading(HeadingRule::ChapterWord)
        );
        assert_eq!(
            segmenter.classify("12. Storm"),
            LineKind::Heading(HeadingRule::NumberedPeriod)
        );
        assert_eq!(segmenter.classify("Chapter one"), LineKind::Content);
        assert_eq!(segmenter.classify("Chapters 1"), LineKind::Content);
        assert_eq!(segmenter.classify("12 monkeys"), LineKind::Content);
        assert_eq!(segmenter.classify("In chapter 3 we"), LineKind::Content);
    }

    #[test]
    fn custom_rule_order_changes_tie_break() {
        let segmenter =
            ChapterSegmenter::with_rules(vec![HeadingRule::ChapterUpper, HeadingRule::ChapterWord]);
        assert_eq!(
            segmenter.classify("CHAPTER 9"),
            LineKind::Heading(HeadingRule::ChapterUpper)
        );
        assert_eq!(
            segmenter.classify("Chapter 9"),
            LineKind::Heading(HeadingRule::ChapterWord)
        );
        // Numbered headings are not recognised without their rule.
        assert_eq!(segmenter.classify("1. One"), LineKind::Content);
    }
}
