// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the status/notification collaborator.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the host presents it (status line vs. dialog).

use crate::error::FolioError;

/// Severity of an error from the author's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Retrying the same action may succeed (disk hiccup, busy worker).
    Transient,
    /// The author must change the input (add text, pick a platform or image).
    ActionRequired,
    /// Retrying without a code or install change will not help.
    Permanent,
}

impl Severity {
    /// Status-line category used by the host (`warning` or `error`).
    pub fn status_kind(&self) -> &'static str {
        match self {
            Self::Transient | Self::ActionRequired => "warning",
            Self::Permanent => "error",
        }
    }
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the author should try (shown as body text).
    pub suggestion: String,
    /// Whether the host may simply re-run the action.
    pub retriable: bool,
    /// Severity level (drives status colour in the host).
    pub severity: Severity,
}

/// Convert a `FolioError` into a `HumanError` an author can act on.
pub fn humanize_error(err: &FolioError) -> HumanError {
    match err {
        // -- Pipeline errors --
        FolioError::EmptyInput => HumanError {
            message: "There's no text to work with.".into(),
            suggestion: "Type or paste your manuscript, or import a text file, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::UnknownPlatform(id) => HumanError {
            message: format!("\"{id}\" isn't a platform we can format for."),
            suggestion: "Choose Kindle, Google Books, or Print.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::ImageLoadFailure(_) => HumanError {
            message: "The cover image couldn't be loaded.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG, or export without a cover.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::AssemblyFailure(_) => HumanError {
            message: "There are no chapters to export.".into(),
            suggestion: "Run chapter detection on your manuscript first, then export again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::InvalidState { operation, .. } => HumanError {
            message: format!("That step can't {operation} the document right now."),
            suggestion: "Detect chapters again to start over from your original text.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Host --
        FolioError::Config(detail) => HumanError {
            message: "Your formatter settings aren't valid.".into(),
            suggestion: format!("Correct the setting and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FolioError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "That manuscript or image file doesn't exist.".into(),
                suggestion: "Check the path; the file may have been renamed or moved.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Folio isn't allowed to open that file.".into(),
                suggestion: "Check the file's permissions, or copy it somewhere you own.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::InvalidData => HumanError {
                message: "The manuscript isn't plain UTF-8 text.".into(),
                suggestion: "Save it as a .txt file with UTF-8 encoding and try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "A file couldn't be read or written.".into(),
                suggestion: "Try again; if it keeps failing, check free disk space.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        FolioError::Serialization(_) => HumanError {
            message: "Folio had an internal data problem.".into(),
            suggestion: "Run the command again; if it fails the same way, file a bug with the input.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
