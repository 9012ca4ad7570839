// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-English messages for the errors that can stop a scanning session
// before it starts.

use crate::error::DocscanError;

/// A human-readable error with a heading and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
}

/// Convert a `DocscanError` into something the person holding the phone can act on.
pub fn humanize_error(err: &DocscanError) -> HumanError {
    match err {
        DocscanError::License(detail) => HumanError {
            message: "The scanner is not licensed on this device.".into(),
            suggestion: format!("Check that a valid license file is installed. ({detail})"),
        },
        DocscanError::SessionClosed => HumanError {
            message: "The scanning screen was closed.".into(),
            suggestion: "Tap Scan to start again.".into(),
        },
        DocscanError::DialogFailed => HumanError {
            message: "The scan result could not be shown.".into(),
            suggestion: "Tap Scan to try again.".into(),
        },
        DocscanError::Bridge(detail) => HumanError {
            message: "The camera scanner had a problem.".into(),
            suggestion: format!("Close the app and try again. ({detail})"),
        },
        DocscanError::PlatformUnavailable => HumanError {
            message: "Document scanning isn't available here.".into(),
            suggestion: "Use a phone with a camera, or configure recorded scans for testing.".into(),
        },
        DocscanError::InvalidArgument(detail) => HumanError {
            message: "That option isn't recognised.".into(),
            suggestion: format!("Run docscan with \"default\" or \"custom\". ({detail})"),
        },
        DocscanError::Fixture(detail) => HumanError {
            message: "The recorded scans could not be loaded.".into(),
            suggestion: format!("Check the replay file. ({detail})"),
        },
        DocscanError::Io(e) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check that the file exists and is readable. ({e})"),
        },
        DocscanError::Serialization(e) => HumanError {
            message: "A settings file is damaged.".into(),
            suggestion: format!("Delete it to restore the defaults. ({e})"),
        },
    }
}
