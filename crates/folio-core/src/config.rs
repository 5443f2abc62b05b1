// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Formatter configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::Platform;

/// Persistent formatter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Platform used when a document is assembled without an explicit reflow.
    pub default_platform: Platform,
    /// Vertical space (points) emitted after each chapter's last paragraph.
    pub chapter_spacing: f32,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            default_platform: Platform::Kindle,
            chapter_spacing: 24.0,
        }
    }
}

impl FolioConfig {
    /// Reject values no renderer could honour.
    pub fn validate(&self) -> Result<()> {
        if !self.chapter_spacing.is_finite() || self.chapter_spacing < 0.0 {
            return Err(FolioError::Config(format!(
                "chapter_spacing must be a non-negative number, got {}",
                self.chapter_spacing
            )));
        }
        Ok(())
    }
}
