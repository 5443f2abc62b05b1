// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text rendering of detected chapters, for export and preview panes.

use std::fmt::Write as _;

use folio_core::Chapter;

/// Width of the rule printed between exported chapters.
pub const SEPARATOR_WIDTH: usize = 50;

/// Render every chapter as title, blank line, content, blank line, a dashed
/// rule, and a blank line.
pub fn chapters_to_text(chapters: &[Chapter]) -> String {
    let rule = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    for chapter in chapters {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{}\n\n{}\n\n{rule}\n\n",
            chapter.title,
            chapter.content.join("\n")
        );
    }
    out
}

/// A single chapter as shown when it is selected: title, blank line, content.
pub fn chapter_preview(chapter: &Chapter) -> String {
    format!("{}\n\n{}", chapter.title, chapter.content.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_layout() {
        let chapters = vec![
            Chapter::new("Chapter 1", vec!["Hello.".into(), "World.".into()]),
            Chapter::titled("Chapter 2"),
        ];
        let rule = "-".repeat(50);
        assert_eq!(
            chapters_to_text(&chapters),
            format!("Chapter 1\n\nHello.\nWorld.\n\n{rule}\n\nChapter 2\n\n\n\n{rule}\n\n")
        );
    }

    #[test]
    fn export_of_nothing_is_empty() {
        assert_eq!(chapters_to_text(&[]), "");
    }

    #[test]
    fn preview_has_no_rule() {
        let chapter = Chapter::new("3. Storm", vec!["Rain.".into()]);
        assert_eq!(chapter_preview(&chapter), "3. Storm\n\nRain.");
    }
}
