// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: what the recognition engine hands back after a scan
// attempt, and the settings an attempt is started with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confidence classification the recognition engine attaches to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerResultState {
    /// Nothing was read.
    #[default]
    Empty,
    /// Something was read but not with enough confidence.
    Uncertain,
    /// One side of a two-sided document was read; the other is still missing.
    StageValid,
    /// All required fields were read with confidence.
    Valid,
}

impl RecognizerResultState {
    /// Only fully valid results are handed to validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Fields decoded from the machine-readable zone on the back of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MrzResult {
    /// First optional data field. Carries the personal ID number on most
    /// national ID cards.
    pub opt1: Option<String>,
    pub opt2: Option<String>,
    pub document_number: Option<String>,
    /// Raw MRZ lines, newline separated.
    pub raw_text: Option<String>,
}

/// Result of one completed scan attempt, read from both sides of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResult {
    pub state: RecognizerResultState,
    /// Personal ID number as printed on the front. May contain dashes.
    pub personal_id_number: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub document_number: Option<String>,
    pub sex: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_expiry: Option<NaiveDate>,
    pub mrz: MrzResult,
}

impl ScanResult {
    /// OPT1 from the MRZ, the back-side counterpart of `personal_id_number`.
    pub fn mrz_opt1(&self) -> Option<&str> {
        self.mrz.opt1.as_deref()
    }
}

/// Textual dump shown to the user when a scan is accepted.
impl std::fmt::Display for ScanResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text_fields = [
            ("Full name", &self.full_name),
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Personal ID number", &self.personal_id_number),
            ("Document number", &self.document_number),
            ("Sex", &self.sex),
            ("Nationality", &self.nationality),
        ];
        for (label, value) in text_fields {
            if let Some(value) = value {
                writeln!(f, "{label}: {value}")?;
            }
        }
        if let Some(date) = self.date_of_birth {
            writeln!(f, "Date of birth: {}", date.format("%d.%m.%Y"))?;
        }
        if let Some(date) = self.date_of_expiry {
            writeln!(f, "Date of expiry: {}", date.format("%d.%m.%Y"))?;
        }
        if let Some(ref opt1) = self.mrz.opt1 {
            writeln!(f, "MRZ optional data 1: {opt1}")?;
        }
        if let Some(ref opt2) = self.mrz.opt2 {
            writeln!(f, "MRZ optional data 2: {opt2}")?;
        }
        if let Some(ref raw) = self.mrz.raw_text {
            writeln!(f, "MRZ:\n{raw}")?;
        }
        Ok(())
    }
}

/// Which camera overlay the scanning screen is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// The SDK's built-in document overlay.
    #[default]
    Default,
    /// An application-provided overlay.
    Custom,
}

/// Recognizer configuration for one scan attempt.
///
/// A new value is built for every attempt and replaces the previous one;
/// it is never mutated after the attempt has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognizer {
    pub attempt: AttemptId,
    pub overlay: OverlayKind,
    /// Ask the engine to return a crop of the full document alongside the fields.
    pub return_full_document_image: bool,
}

impl Recognizer {
    /// Build the recognizer for a new attempt.
    ///
    /// The built-in overlay always asks for the full document image; the
    /// custom overlay only when `full_document_image` is set.
    pub fn new(overlay: OverlayKind, full_document_image: bool) -> Self {
        Self {
            attempt: AttemptId::new(),
            overlay,
            return_full_document_image: full_document_image
                || overlay == OverlayKind::Default,
        }
    }
}
