// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform reflow — reshape chapter paragraphs for a target platform.
//
// E-reader targets get one short paragraph per sentence; print keeps the
// sentences together and marks each paragraph for a first-line indent.
// Reflow never mutates its input, so callers always reflow from the chapters
// produced by segmentation rather than from a previous reflow.

use folio_core::error::Result;
use folio_core::{Chapter, Platform, preset};
use tracing::{debug, instrument};

use crate::normalize::normalize;

/// Leading marker on print paragraphs. Renderers with native first-line
/// indentation replace it with `Preset::first_line_indent`.
pub const INDENT_MARKER: &str = "    ";

/// Reflow `chapters` for the platform named by `platform_id`.
///
/// The platform is resolved before any paragraph is touched, so an unknown id
/// fails with `UnknownPlatform` and produces no output at all.
pub fn reflow(chapters: &[Chapter], platform_id: &str) -> Result<Vec<Chapter>> {
    let preset = preset::lookup(platform_id)?;
    Ok(reflow_for(chapters, preset.platform))
}

/// Reflow `chapters` for an already-validated platform.
#[instrument(skip(chapters), fields(chapters = chapters.len()))]
pub fn reflow_for(chapters: &[Chapter], platform: Platform) -> Vec<Chapter> {
    let reflowed: Vec<Chapter> = chapters
        .iter()
        .map(|chapter| Chapter {
            title: chapter.title.clone(),
            content: chapter
                .content
                .iter()
                .flat_map(|paragraph| reflow_paragraph(paragraph, platform))
                .collect(),
        })
        .collect();

    debug!(
        paragraphs = reflowed.iter().map(|c| c.content.len()).sum::<usize>(),
        "reflow complete"
    );
    reflowed
}

/// Normalize one paragraph and apply the platform transform.
fn reflow_paragraph(paragraph: &str, platform: Platform) -> Vec<String> {
    let normalized = normalize(paragraph);
    if normalized.is_empty() {
        return Vec::new();
    }

    match platform {
        Platform::Kindle | Platform::GoogleBooks => split_sentences(&normalized),
        Platform::Print => vec![format!("{INDENT_MARKER}{normalized}")],
    }
}

/// Break after every `. `, `! ` and `? `; the space is consumed by the break.
///
/// Abbreviations ("Mr. Smith") and similar are broken too.
fn split_sentences(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;

    for i in 0..bytes.len().saturating_sub(1) {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes[i + 1] == b' ' {
            pieces.push(&text[start..=i]);
            start = i + 2;
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
