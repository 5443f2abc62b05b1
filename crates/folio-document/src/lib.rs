// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document — Document assembly for the Folio manuscript formatter.
//
// Provides cover loading and page fitting, the block assembler that turns
// chapters into a renderer-agnostic block list, the `Document` lifecycle value,
// and plain-text export of detected chapters.

pub mod assemble;
pub mod cover;
pub mod document;
pub mod export;

// Re-export the primary items so callers can use `folio_document::Document` etc.
pub use assemble::{DocumentAssembler, assemble};
pub use cover::{fit_to_page, load_cover};
pub use document::Document;
pub use export::{chapter_preview, chapters_to_text};
