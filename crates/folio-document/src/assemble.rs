// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly — chapters, preset, and optional cover in, ordered block
// list out.
//
// The block order is the contract with the renderer:
//
//   [CoverImage, PageBreak]?  TocEntry+  PageBreak  (ChapterHeading Paragraph* Spacer)+

use folio_core::error::{FolioError, Result};
use folio_core::{Chapter, CoverImage, DocumentBlock, FolioConfig, Preset};
use folio_text::INDENT_MARKER;
use folio_text::normalize::{fix_dialogue_spacing, fix_sentence_spacing, normalize};
use tracing::{debug, instrument};

use crate::cover::fit_to_page;

/// Builds the renderer-facing block list.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    /// Size of the `Spacer` closing each chapter, in points.
    chapter_spacing: f32,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(&FolioConfig::default())
    }
}

impl DocumentAssembler {
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            chapter_spacing: config.chapter_spacing,
        }
    }

    /// Assemble `chapters` for `preset`, with an optional cover page first.
    ///
    /// Fails with `AssemblyFailure` when there are no chapters.
    #[instrument(skip_all, fields(chapters = chapters.len(), platform = %preset.platform, cover = cover.is_some()))]
    pub fn assemble(
        &self,
        chapters: &[Chapter],
        preset: &Preset,
        cover: Option<&CoverImage>,
    ) -> Result<Vec<DocumentBlock>> {
        if chapters.is_empty() {
            return Err(FolioError::AssemblyFailure(
                "no chapters to assemble".into(),
            ));
        }

        let paragraph_count: usize = chapters.iter().map(|c| c.content.len()).sum();
        let mut blocks = Vec::with_capacity(3 + chapters.len() * 3 + paragraph_count);

        // -- Cover page -------------------------------------------------------
        if let Some(cover) = cover {
            let (width, height) = fit_to_page(cover, preset.page_size);
            debug!(width, height, "cover scaled to page");
            blocks.push(DocumentBlock::CoverImage { width, height });
            blocks.push(DocumentBlock::PageBreak);
        }

        // -- Table of contents ------------------------------------------------
        blocks.extend(chapters.iter().map(|chapter| DocumentBlock::TocEntry {
            title: chapter.title.clone(),
        }));
        blocks.push(DocumentBlock::PageBreak);

        // -- Chapters ---------------------------------------------------------
        for chapter in chapters {
            blocks.push(DocumentBlock::ChapterHeading {
                title: chapter.title.clone(),
            });
            blocks.extend(
                chapter
                    .content
                    .iter()
                    .map(|paragraph| finish_paragraph(paragraph))
                    .filter(|text| !text.is_empty())
                    .map(|text| DocumentBlock::Paragraph { text }),
            );
            blocks.push(DocumentBlock::Spacer {
                size: self.chapter_spacing,
            });
        }

        debug!(blocks = blocks.len(), "assembly complete");
        Ok(blocks)
    }
}

/// Assemble with the default chapter spacing.
pub fn assemble(
    chapters: &[Chapter],
    preset: &Preset,
    cover: Option<&CoverImage>,
) -> Result<Vec<DocumentBlock>> {
    DocumentAssembler::default().assemble(chapters, preset, cover)
}

/// Final text cleanup for a paragraph block. A leading print indent marker
/// survives so the renderer can apply the preset's first-line indent.
fn finish_paragraph(paragraph: &str) -> String {
    let (indent, body) = match paragraph.strip_prefix(INDENT_MARKER) {
        Some(rest) => (INDENT_MARKER, rest),
        None => ("", paragraph),
    };

    let cleaned = fix_sentence_spacing(&fix_dialogue_spacing(&normalize(body)));
    if cleaned.is_empty() {
        return cleaned;
    }
    format!("{indent}{cleaned}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::preset::preset_for;
    use folio_core::{PageSize, Platform};

    fn chapter(title: &str, content: &[&str]) -> Chapter {
        Chapter::new(title, content.iter().map(|s| s.to_string()).collect())
    }

    fn toc(title: &str) -> DocumentBlock {
        DocumentBlock::TocEntry {
            title: title.into(),
        }
    }

    fn heading(title: &str) -> DocumentBlock {
        DocumentBlock::ChapterHeading {
            title: title.into(),
        }
    }

    fn para(text: &str) -> DocumentBlock {
        DocumentBlock::Paragraph { text: text.into() }
    }

    fn spacer() -> DocumentBlock {
        DocumentBlock::Spacer { size: 24.0 }
    }

    #[test]
    fn blocks_without_cover_are_in_contract_order() {
        let chapters = vec![
            chapter("A", &["First.", "Second."]),
            chapter("B", &["Third."]),
        ];
        let blocks = assemble(&chapters, preset_for(Platform::Kindle), None).unwrap();
        assert_eq!(
            blocks,
            vec![
                toc("A"),
                toc("B"),
                DocumentBlock::PageBreak,
                heading("A"),
                para("First."),
                para("Second."),
                spacer(),
                heading("B"),
                para("Third."),
                spacer(),
            ]
        );
    }

    #[test]
    fn cover_comes_first_and_fits_the_page() {
        let preset = Preset {
            page_size: PageSize {
                width: 600.0,
                height: 800.0,
            },
            ..preset_for(Platform::Print).clone()
        };
        let cover = CoverImage::new("cover.jpg", 2000, 1000).unwrap();
        let blocks = assemble(&[chapter("A", &["x"])], &preset, Some(&cover)).unwrap();

        match &blocks[0] {
            DocumentBlock::CoverImage { width, height } => {
                assert!((width - 600.0).abs() < 1e-3);
                assert!((height - 300.0).abs() < 1e-3);
                assert!(*width <= 600.0 && *height <= 800.0);
            }
            other => panic!("expected cover block, got {other:?}"),
        }
        assert_eq!(blocks[1], DocumentBlock::PageBreak);
        assert_eq!(blocks[2], toc("A"));
        assert_eq!(blocks[3], DocumentBlock::PageBreak);
    }

    #[test]
    fn empty_chapter_list_fails() {
        let err = assemble(&[], preset_for(Platform::Kindle), None).unwrap_err();
        assert!(matches!(err, FolioError::AssemblyFailure(_)));
    }

    #[test]
    fn chapter_without_content_still_gets_heading_and_spacer() {
        let blocks = assemble(&[chapter("Lonely", &[])], preset_for(Platform::Kindle), None)
            .unwrap();
        assert_eq!(
            blocks,
            vec![toc("Lonely"), DocumentBlock::PageBreak, heading("Lonely"), spacer()]
        );
    }

    #[test]
    fn paragraphs_are_cleaned() {
        let blocks = assemble(
            &[chapter("A", &["He said.\"Go.\"\"Now!\"  Then--silence..."])],
            preset_for(Platform::Kindle),
            None,
        )
        .unwrap();
        assert_eq!(
            blocks[3],
            para("He said.\"Go.\" \"Now!\" Then\u{2014}silence\u{2026}")
        );
    }

    #[test]
    fn print_indent_marker_survives_cleanup() {
        let blocks = assemble(
            &[chapter("A", &["    It was late.He left."])],
            preset_for(Platform::Print),
            None,
        )
        .unwrap();
        assert_eq!(blocks[3], para("    It was late. He left."));
    }

    #[test]
    fn spacer_size_follows_config() {
        let assembler = DocumentAssembler::new(&FolioConfig {
            chapter_spacing: 48.0,
            ..Default::default()
        });
        let blocks = assembler
            .assemble(&[chapter("A", &[])], preset_for(Platform::Kindle), None)
            .unwrap();
        assert_eq!(blocks.last(), Some(&DocumentBlock::Spacer { size: 48.0 }));
    }
}
