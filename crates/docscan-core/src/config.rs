// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::OverlayKind;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// License file handed to the recognition SDK at startup.
    pub license_path: PathBuf,
    /// Overlay used when no overlay is chosen explicitly.
    pub default_overlay: OverlayKind,
    /// Request the full document image with the custom overlay too.
    pub return_full_document_image: bool,
    /// Recorded scan results to replay instead of a live camera.
    pub replay_fixture: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            license_path: PathBuf::from("docscan-license.txt"),
            default_overlay: OverlayKind::Default,
            return_full_document_image: false,
            replay_fixture: None,
        }
    }
}
