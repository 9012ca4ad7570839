// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Replay bridge: serves recorded scan events instead of a live camera.
//
// The fixture is a JSON array of events:
//
//     [
//       { "event": "finished", "result": { "state": "uncertain" } },
//       { "event": "finished", "result": { "state": "valid", "full_name": "Jane Doe", ... } },
//       { "event": "closed" }
//     ]
//
// Once the recording runs out the runner reports a Close tap. Dialogs are
// shown on the terminal through `ConsolePresenter`.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use docscan_core::error::{DocscanError, Result};
use docscan_core::types::{Recognizer, ScanResult};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::console::ConsolePresenter;
use crate::traits::*;

/// One recorded event as stored on disk.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum FixtureEvent {
    Finished { result: ScanResult },
    Closed,
}

impl From<FixtureEvent> for ScanEvent {
    fn from(event: FixtureEvent) -> Self {
        match event {
            FixtureEvent::Finished { result } => ScanEvent::Finished(result),
            FixtureEvent::Closed => ScanEvent::Closed,
        }
    }
}

/// Scanning screen state as the replay runner tracks it.
#[derive(Debug, Default)]
struct ScreenState {
    presented: bool,
    paused: bool,
}

/// Bridge that replays a fixed sequence of scan events.
pub struct ReplayBridge {
    events: Mutex<VecDeque<ScanEvent>>,
    screen: Mutex<ScreenState>,
    presenter: ConsolePresenter,
}

impl ReplayBridge {
    pub fn new(events: Vec<ScanEvent>) -> Self {
        Self {
            events: Mutex::new(events.into()),
            screen: Mutex::new(ScreenState::default()),
            presenter: ConsolePresenter,
        }
    }

    /// Load a recording from a JSON fixture file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let events: Vec<FixtureEvent> = serde_json::from_str(&data)
            .map_err(|e| DocscanError::Fixture(format!("{}: {e}", path.display())))?;
        info!(events = events.len(), "loaded scan recording");
        Ok(Self::new(events.into_iter().map(ScanEvent::from).collect()))
    }

    /// Recorded events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.lock().expect("events lock poisoned").len()
    }

    pub fn is_paused(&self) -> bool {
        self.screen.lock().expect("screen lock poisoned").paused
    }

    pub fn is_presented(&self) -> bool {
        self.screen.lock().expect("screen lock poisoned").presented
    }

    fn next_event(&self, recognizer: &Recognizer) -> Result<ScanEvent> {
        let mut screen = self.screen.lock().expect("screen lock poisoned");
        if screen.paused {
            return Err(DocscanError::Bridge("scan requested while scanning is paused".into()));
        }
        if !screen.presented {
            debug!(attempt = %recognizer.attempt, overlay = ?recognizer.overlay, "presenting scanning screen");
            screen.presented = true;
        }
        drop(screen);

        let event = self
            .events
            .lock()
            .expect("events lock poisoned")
            .pop_front()
            .unwrap_or(ScanEvent::Closed);
        Ok(event)
    }
}

impl PlatformBridge for ReplayBridge {
    fn platform_name(&self) -> &str {
        "Replay"
    }
}

impl RecognizerRunner for ReplayBridge {
    fn start_scan<'a>(&'a self, recognizer: &'a Recognizer) -> BridgeFuture<'a, Result<ScanEvent>> {
        Box::pin(async move {
            // Let queued UI work run before the next frame arrives.
            tokio::task::yield_now().await;
            self.next_event(recognizer)
        })
    }

    fn pause_scanning(&self) -> Result<()> {
        let mut screen = self.screen.lock().expect("screen lock poisoned");
        if !screen.presented {
            return Err(DocscanError::Bridge("no scanning screen to pause".into()));
        }
        screen.paused = true;
        Ok(())
    }

    fn resume_scanning(&self) -> Result<()> {
        let mut screen = self.screen.lock().expect("screen lock poisoned");
        if !screen.presented {
            return Err(DocscanError::Bridge("no scanning screen to resume".into()));
        }
        screen.paused = false;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        *self.screen.lock().expect("screen lock poisoned") = ScreenState::default();
        Ok(())
    }
}

impl AlertPresenter for ReplayBridge {
    fn present_alert(&self, alert: Alert) -> Result<()> {
        self.presenter.present_alert(alert)
    }
}

impl LicenseActivator for ReplayBridge {
    fn activate(&self, license: &[u8]) -> Result<()> {
        if license.iter().all(u8::is_ascii_whitespace) {
            return Err(DocscanError::License("license file is empty".into()));
        }
        Ok(())
    }
}
