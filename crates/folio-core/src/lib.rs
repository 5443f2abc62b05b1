// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — Core types, layout presets, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod preset;
pub mod types;

pub use config::FolioConfig;
pub use error::FolioError;
pub use preset::{Margins, PageSize, Preset, StylePresetRegistry};
pub use types::*;
