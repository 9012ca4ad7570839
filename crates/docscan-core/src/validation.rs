// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-scan validation of a recognition result.
//
// Two checks run against a `Valid` result:
//
// 1. Cross-field matching: the personal ID number printed on the front
//    (dashes removed) must equal OPT1 from the MRZ on the back.
// 2. Character set: the full name must be present and consist only of
//    ASCII letters, hyphen, space and newline.
//
// Both checks are pure and total. They run in that order: a result that
// fails matching reports `Mismatch` whatever its name looks like.

use crate::types::ScanResult;

/// Title of both retry dialogs.
pub const UNSUCCESSFUL_TITLE: &str = "Scan unsuccessful";
/// Title of the acceptance dialog.
pub const SUCCESS_TITLE: &str = "Success";
pub const MISMATCH_MESSAGE: &str = "Cannot match data from the front and the back";
pub const INVALID_CHARACTERS_MESSAGE: &str = "Cannot validate the data";

/// Verdict for one `Valid` scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Both checks passed.
    Success,
    /// Front and back disagree on the personal ID number.
    Mismatch,
    /// Full name missing or containing characters outside the allowed set.
    InvalidCharacters,
}

/// What the primary dialog button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRole {
    /// Dismiss the dialog and keep scanning.
    Retry,
    /// Dismiss the dialog and close the scanning session.
    Accept,
}

impl ActionRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Retry => "Retry",
            Self::Accept => "OK",
        }
    }
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Success => SUCCESS_TITLE,
            Self::Mismatch | Self::InvalidCharacters => UNSUCCESSFUL_TITLE,
        }
    }

    /// Dialog body. The success dialog shows the result itself.
    pub fn message(&self, result: &ScanResult) -> String {
        match self {
            Self::Success => result.to_string(),
            Self::Mismatch => MISMATCH_MESSAGE.to_string(),
            Self::InvalidCharacters => INVALID_CHARACTERS_MESSAGE.to_string(),
        }
    }

    pub fn action(&self) -> ActionRole {
        match self {
            Self::Success => ActionRole::Accept,
            Self::Mismatch | Self::InvalidCharacters => ActionRole::Retry,
        }
    }
}

/// Whether the front-side personal ID number matches MRZ OPT1.
///
/// An absent field on either side never matches.
pub fn is_data_matching(result: &ScanResult) -> bool {
    match (result.personal_id_number.as_deref(), result.mrz_opt1()) {
        (Some(pin), Some(opt1)) => pin.replace('-', "") == opt1,
        _ => false,
    }
}

/// Characters a full name may contain.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '-' | ' ' | '\n')
}

/// Whether the full name is present and made of allowed characters only.
pub fn is_data_valid(result: &ScanResult) -> bool {
    result
        .full_name
        .as_deref()
        .is_some_and(|name| name.chars().all(is_name_char))
}

/// Run both checks and pick the outcome.
pub fn validate(result: &ScanResult) -> ValidationOutcome {
    if !is_data_matching(result) {
        ValidationOutcome::Mismatch
    } else if !is_data_valid(result) {
        ValidationOutcome::InvalidCharacters
    } else {
        ValidationOutcome::Success
    }
}
