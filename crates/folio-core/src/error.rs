// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use thiserror::Error;

/// Top-level error type for all Folio operations.
///
/// Every variant is recoverable: the caller corrects its input and calls again.
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Pipeline errors --
    #[error("no text to segment: input is empty or whitespace-only")]
    EmptyInput,

    #[error("unknown platform: {0:?} (expected Kindle, GoogleBooks, or Print)")]
    UnknownPlatform(String),

    #[error("cover image could not be loaded: {0}")]
    ImageLoadFailure(String),

    #[error("document assembly failed: {0}")]
    AssemblyFailure(String),

    #[error("cannot {operation} a document in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    // -- Host-side configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;
