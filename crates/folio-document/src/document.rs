// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The document lifecycle: Empty -> Segmented -> Reflowed -> Assembled.
//
// A `Document` is an immutable value. Every transition borrows the current
// value and returns a new one; the chapter list is always replaced as a whole.
// Shared payloads sit behind `Arc`, so cloning a document or handing it to
// another thread is cheap.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::error::{FolioError, Result};
use folio_core::preset::{self, preset_for};
use folio_core::{
    Chapter, CoverImage, DocumentBlock, DocumentId, DocumentState, FolioConfig, Platform, Preset,
};
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::assemble::DocumentAssembler;

/// A manuscript moving through the formatting pipeline.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    created_at: DateTime<Utc>,
    state: DocumentState,
    source: Arc<str>,
    fingerprint: String,
    /// Chapters as segmented. Reflow always starts from here.
    original: Arc<[Chapter]>,
    /// Chapters for the current state (segmented or reflowed).
    chapters: Arc<[Chapter]>,
    platform: Option<Platform>,
    cover: Option<CoverImage>,
    blocks: Arc<[DocumentBlock]>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with a fresh id.
    pub fn new() -> Self {
        let no_chapters: Arc<[Chapter]> = Arc::from(Vec::new());
        Self {
            id: DocumentId::new(),
            created_at: Utc::now(),
            state: DocumentState::Empty,
            source: Arc::from(""),
            fingerprint: fingerprint(""),
            original: Arc::clone(&no_chapters),
            chapters: no_chapters,
            platform: None,
            cover: None,
            blocks: Arc::from(Vec::new()),
        }
    }

    /// Create a document and segment `text` in one step.
    pub fn from_source(text: &str) -> Result<Self> {
        Self::new().segment(text)
    }

    // -- Transitions ---------------------------------------------------------

    /// Detect chapters in `text`.
    ///
    /// Allowed from every state except `Assembled`. Re-segmenting replaces the
    /// source and discards any reflow; the cover is kept.
    #[instrument(skip_all, fields(document = %self.id, text_len = text.len()))]
    pub fn segment(&self, text: &str) -> Result<Self> {
        self.ensure_not_assembled("segment")?;

        let chapters: Arc<[Chapter]> = folio_text::segment(text)?.into();
        let next = Self {
            state: DocumentState::Segmented,
            source: Arc::from(text),
            fingerprint: fingerprint(text),
            original: Arc::clone(&chapters),
            chapters,
            platform: None,
            blocks: Arc::from(Vec::new()),
            ..self.clone()
        };
        next.log_transition(self.state);
        Ok(next)
    }

    /// Reflow the segmented chapters for `platform_id`.
    ///
    /// Always computed from the chapters produced by segmentation, so
    /// reflowing twice never compounds. Fails with `InvalidState` from
    /// `Empty` or `Assembled`, and with `UnknownPlatform` for an unknown id.
    #[instrument(skip_all, fields(document = %self.id, platform_id = %platform_id))]
    pub fn reflow(&self, platform_id: &str) -> Result<Self> {
        match self.state {
            DocumentState::Segmented | DocumentState::Reflowed => {}
            DocumentState::Empty | DocumentState::Assembled => {
                return Err(self.invalid("reflow"));
            }
        }

        let preset = preset::lookup(platform_id)?;
        let chapters = folio_text::reflow_for(&self.original, preset.platform);
        let next = Self {
            state: DocumentState::Reflowed,
            chapters: chapters.into(),
            platform: Some(preset.platform),
            ..self.clone()
        };
        next.log_transition(self.state);
        Ok(next)
    }

    /// Attach or clear the cover. Does not change the state.
    pub fn with_cover(&self, cover: Option<CoverImage>) -> Result<Self> {
        self.ensure_not_assembled("set cover")?;
        Ok(Self {
            cover,
            ..self.clone()
        })
    }

    /// Build the block list.
    ///
    /// A reflowed document is assembled for its platform; a merely segmented
    /// one uses `config.default_platform` with the chapters as segmented.
    #[instrument(skip_all, fields(document = %self.id))]
    pub fn assemble(&self, config: &FolioConfig) -> Result<Self> {
        let platform = match (self.state, self.platform) {
            (DocumentState::Reflowed, Some(platform)) => platform,
            (DocumentState::Segmented, _) => config.default_platform,
            _ => return Err(self.invalid("assemble")),
        };

        let blocks = DocumentAssembler::new(config).assemble(
            &self.chapters,
            preset_for(platform),
            self.cover.as_ref(),
        )?;
        let next = Self {
            state: DocumentState::Assembled,
            platform: Some(platform),
            blocks: blocks.into(),
            ..self.clone()
        };
        next.log_transition(self.state);
        Ok(next)
    }

    // -- Accessors -----------------------------------------------------------

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// The text last segmented.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// SHA-256 of [`Document::source`], lowercase hex.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Chapters for the current state.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Chapters as segmented, before any reflow.
    pub fn original_chapters(&self) -> &[Chapter] {
        &self.original
    }

    /// Platform whose preset applies: the reflow target, or the configured
    /// default once a segmented document is assembled. It does not by itself
    /// mean the chapters were reflowed; check [`Document::was_reflowed`].
    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Whether the current chapters came from a reflow rather than straight
    /// from segmentation.
    pub fn was_reflowed(&self) -> bool {
        !Arc::ptr_eq(&self.chapters, &self.original)
    }

    /// Layout preset for the chosen platform, once one is chosen.
    pub fn preset(&self) -> Option<&'static Preset> {
        self.platform.map(preset_for)
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        self.cover.as_ref()
    }

    /// Assembled blocks; empty before `Assembled`.
    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }

    // -- Internals -----------------------------------------------------------

    fn invalid(&self, operation: &'static str) -> FolioError {
        FolioError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }

    fn ensure_not_assembled(&self, operation: &'static str) -> Result<()> {
        if self.state == DocumentState::Assembled {
            return Err(self.invalid(operation));
        }
        Ok(())
    }

    fn log_transition(&self, from: DocumentState) {
        info!(
            document = %self.id,
            from = from.name(),
            to = self.state.name(),
            chapters = self.chapters.len(),
            platform = self.platform.map(|p| p.id()),
            "document transition"
        );
    }
}

/// SHA-256 of `text` as lowercase hex.
fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
