// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Folio manuscript formatter.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FolioError;

/// Unique identifier for a document instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target publishing platforms. This set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Kindle,
    GoogleBooks,
    Print,
}

impl Platform {
    /// Every supported platform, in registry order.
    pub const ALL: [Platform; 3] = [Platform::Kindle, Platform::GoogleBooks, Platform::Print];

    /// Stable identifier accepted by [`Platform::from_str`].
    pub fn id(&self) -> &'static str {
        match self {
            Self::Kindle => "Kindle",
            Self::GoogleBooks => "GoogleBooks",
            Self::Print => "Print",
        }
    }

    /// Display label for a platform picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kindle => "Kindle",
            Self::GoogleBooks => "Google Books",
            Self::Print => "Print",
        }
    }

    /// Whether the platform is a reflowable e-reader target.
    pub fn is_ereader(&self) -> bool {
        matches!(self, Self::Kindle | Self::GoogleBooks)
    }
}

impl FromStr for Platform {
    type Err = FolioError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.id() == id)
            .ok_or_else(|| FolioError::UnknownPlatform(id.to_string()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A title-plus-content unit detected in the manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// The heading line, verbatim (or the synthetic `"Chapter 1"`).
    pub title: String,
    /// Non-empty trimmed lines, in source order.
    pub content: Vec<String>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// A chapter with a title and no content yet.
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Decoded cover image: where it came from and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl CoverImage {
    /// Build a descriptor from already-decoded dimensions.
    ///
    /// A zero-sized image cannot be scaled onto a page and is rejected.
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Result<Self, FolioError> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(FolioError::ImageLoadFailure(format!(
                "{} has zero-sized dimensions {width}x{height}",
                path.display()
            )));
        }
        Ok(Self {
            path,
            width,
            height,
        })
    }
}

/// One element of the assembled, renderer-agnostic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentBlock {
    /// Cover image scaled to fit the page, in points.
    CoverImage { width: f32, height: f32 },
    PageBreak,
    TocEntry { title: String },
    ChapterHeading { title: String },
    Paragraph { text: String },
    /// Vertical space in points.
    Spacer { size: f32 },
}

impl DocumentBlock {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CoverImage { .. } => "cover_image",
            Self::PageBreak => "page_break",
            Self::TocEntry { .. } => "toc_entry",
            Self::ChapterHeading { .. } => "chapter_heading",
            Self::Paragraph { .. } => "paragraph",
            Self::Spacer { .. } => "spacer",
        }
    }
}

/// Lifecycle states of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentState {
    /// Nothing segmented yet.
    Empty,
    /// Chapters detected from the source text.
    Segmented,
    /// Chapters reflowed for a platform.
    Reflowed,
    /// Block list built; terminal for the core.
    Assembled,
}

impl DocumentState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Segmented => "segmented",
            Self::Reflowed => "reflowed",
            Self::Assembled => "assembled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_ids_parse_exactly() {
        for platform in Platform::ALL {
            assert_eq!(platform.id().parse::<Platform>().unwrap(), platform);
        }
        assert!(matches!(
            "Nook".parse::<Platform>(),
            Err(FolioError::UnknownPlatform(id)) if id == "Nook"
        ));
        // Labels are for display only.
        assert!("Google Books".parse::<Platform>().is_err());
        assert!("kindle".parse::<Platform>().is_err());
    }

    #[test]
    fn default_platform_is_kindle() {
        assert_eq!(Platform::default(), Platform::Kindle);
        assert!(Platform::Kindle.is_ereader());
        assert!(!Platform::Print.is_ereader());
    }

    #[test]
    fn zero_sized_cover_is_rejected() {
        assert!(matches!(
            CoverImage::new("cover.png", 0, 100),
            Err(FolioError::ImageLoadFailure(_))
        ));
        let cover = CoverImage::new("cover.png", 10, 20).unwrap();
        assert_eq!((cover.width, cover.height), (10, 20));
    }

    #[test]
    fn blocks_serialize_with_kind_tag() {
        let json = serde_json::to_string(&DocumentBlock::TocEntry {
            title: "Chapter 1".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"toc_entry","title":"Chapter 1"}"#);

        let json = serde_json::to_string(&DocumentBlock::PageBreak).unwrap();
        assert_eq!(json, r#"{"kind":"page_break"}"#);
    }
}
