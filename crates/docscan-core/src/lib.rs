// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — Core types, validation rules and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;
pub mod validation;

pub use config::AppConfig;
pub use error::DocscanError;
pub use types::*;
pub use validation::{ValidationOutcome, validate};
