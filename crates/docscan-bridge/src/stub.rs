// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where no recognition SDK is linked.
//
// Every trait method returns `PlatformUnavailable`.

use docscan_core::error::{DocscanError, Result};
use docscan_core::types::Recognizer;

use crate::traits::*;

/// No-op bridge returned when neither a device SDK nor recorded scans exist.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl RecognizerRunner for StubBridge {
    fn start_scan<'a>(&'a self, _recognizer: &'a Recognizer) -> BridgeFuture<'a, Result<ScanEvent>> {
        tracing::warn!("RecognizerRunner::start_scan called on stub bridge");
        Box::pin(async { Err(DocscanError::PlatformUnavailable) })
    }

    fn pause_scanning(&self) -> Result<()> {
        Err(DocscanError::PlatformUnavailable)
    }

    fn resume_scanning(&self) -> Result<()> {
        Err(DocscanError::PlatformUnavailable)
    }

    fn close(&self) -> Result<()> {
        Err(DocscanError::PlatformUnavailable)
    }
}

impl AlertPresenter for StubBridge {
    fn present_alert(&self, alert: Alert) -> Result<()> {
        tracing::warn!(title = %alert.title, "AlertPresenter::present_alert called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }
}

impl LicenseActivator for StubBridge {
    fn activate(&self, _license: &[u8]) -> Result<()> {
        tracing::warn!("LicenseActivator::activate called on stub bridge");
        Err(DocscanError::PlatformUnavailable)
    }
}
