// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic contracts for the services the scan flow consumes.
//
// The recognition SDK delivers results through a delegate callback; here that
// is modelled as a single-shot future per finished attempt.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use docscan_core::error::Result;
use docscan_core::types::{Recognizer, ScanResult};

/// Boxed future returned by the object-safe async trait methods.
pub type BridgeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Unified bridge that groups every external capability the flow needs.
pub trait PlatformBridge: RecognizerRunner + AlertPresenter + LicenseActivator {
    /// Human-readable platform name (e.g. "iOS 17", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// What the scanning screen reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// The engine finished an attempt. The result may still be Empty or Uncertain.
    Finished(ScanResult),
    /// The user tapped Close on the scanning screen.
    Closed,
}

/// The document recognition engine and its camera overlay.
pub trait RecognizerRunner: Send + Sync {
    /// Present the scanning screen for `recognizer` (or keep the one already
    /// shown) and wait for the next finished attempt or a Close tap.
    fn start_scan<'a>(&'a self, recognizer: &'a Recognizer) -> BridgeFuture<'a, Result<ScanEvent>>;

    /// Stop capturing frames while the user reads a dialog.
    fn pause_scanning(&self) -> Result<()>;

    /// Resume capturing after a pause.
    fn resume_scanning(&self) -> Result<()>;

    /// Dismiss the scanning screen.
    fn close(&self) -> Result<()>;
}

/// One button on an alert dialog.
pub struct AlertAction {
    pub label: String,
    handler: Box<dyn FnOnce() + Send>,
}

impl AlertAction {
    pub fn new(label: impl Into<String>, handler: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label: label.into(),
            handler: Box::new(handler),
        }
    }

    /// Run the continuation attached to this button. Consumes the action, so
    /// a button can only ever fire once.
    pub fn tap(self) {
        (self.handler)()
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A modal dialog request.
#[derive(Debug)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

/// The OS modal dialog mechanism.
///
/// Must only be called from the UI foreground queue. Implementations return
/// once the dialog is on screen and fire the tapped action's continuation
/// later.
pub trait AlertPresenter: Send + Sync {
    fn present_alert(&self, alert: Alert) -> Result<()>;
}

/// One-time SDK license activation.
pub trait LicenseActivator: Send + Sync {
    /// Hand the license file contents to the SDK. Must succeed before any scan.
    fn activate(&self, license: &[u8]) -> Result<()>;
}
