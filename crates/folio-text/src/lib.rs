// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-text — Text processing for the Folio manuscript formatter.
//
// Provides paragraph normalization (whitespace, punctuation spacing, quotes,
// dashes, ellipses), heading-rule chapter segmentation, platform-specific
// reflow, and simple text statistics. Every function here is pure: inputs are
// borrowed and new values are returned.

pub mod normalize;
pub mod reflow;
pub mod segment;
pub mod stats;

pub use normalize::normalize;
pub use reflow::{INDENT_MARKER, reflow, reflow_for};
pub use segment::{ChapterSegmenter, HeadingRule, LineKind, segment};
pub use stats::TextStats;
