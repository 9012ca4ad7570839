// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads configuration, picks the platform bridge,
// activates the SDK license and creates scanning sessions.
//
// The bridge is passed explicitly into every session rather than reached
// through a global, so a session can run against any `PlatformBridge`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use docscan_bridge::traits::PlatformBridge;
use docscan_core::AppConfig;
use docscan_core::error::{DocscanError, Result};
use docscan_core::types::OverlayKind;
use tracing::{info, instrument, warn};

use super::data_dir;
use crate::flow::FlowController;
use crate::ui_queue::UiQueue;

const CONFIG_FILE: &str = "config.json";

/// Shared application services.
///
/// Cheaply cloneable; every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppServices {
    bridge: Arc<dyn PlatformBridge>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    licensed: Arc<AtomicBool>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    ///
    /// A license that cannot be activated is logged, not fatal: the app still
    /// starts, but every attempt to open a scanning session fails with
    /// `DocscanError::License`.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let mut bridge_config = config.clone();
        bridge_config.replay_fixture = config
            .replay_fixture
            .as_deref()
            .map(|path| data_dir::resolve(&dir, path));
        let bridge: Arc<dyn PlatformBridge> =
            Arc::from(docscan_bridge::platform_bridge(&bridge_config)?);
        info!(platform = bridge.platform_name(), "platform bridge selected");

        let svc = Self::with_bridge(bridge, config, dir);
        if let Err(e) = svc.activate_license() {
            warn!(error = %e, "license activation failed, scanning disabled");
        }
        Ok(svc)
    }

    /// Build the services around an explicit bridge without touching the license.
    pub fn with_bridge(bridge: Arc<dyn PlatformBridge>, config: AppConfig, data_dir: PathBuf) -> Self {
        Self {
            bridge,
            data_dir,
            config: Arc::new(Mutex::new(config)),
            licensed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    // -- License -------------------------------------------------------------

    /// Read the configured license file and hand it to the SDK.
    #[instrument(skip_all)]
    pub fn activate_license(&self) -> Result<()> {
        let path = data_dir::resolve(&self.data_dir, &self.config().license_path);
        let license = std::fs::read(&path)
            .map_err(|e| DocscanError::License(format!("{}: {e}", path.display())))?;

        self.bridge.activate(&license).map_err(|e| match e {
            DocscanError::License(_) => e,
            other => DocscanError::License(other.to_string()),
        })?;

        self.licensed.store(true, Ordering::SeqCst);
        info!(path = %path.display(), "license activated");
        Ok(())
    }

    pub fn is_licensed(&self) -> bool {
        self.licensed.load(Ordering::SeqCst)
    }

    // -- Sessions ------------------------------------------------------------

    /// Create a flow controller for one scanning session.
    ///
    /// `overlay` overrides the configured default overlay.
    pub fn new_session(&self, ui: UiQueue, overlay: Option<OverlayKind>) -> Result<FlowController> {
        if !self.is_licensed() {
            return Err(DocscanError::License("SDK license has not been activated".into()));
        }
        let config = self.config();
        Ok(FlowController::new(
            Arc::clone(&self.bridge),
            ui,
            overlay.unwrap_or(config.default_overlay),
            config.return_full_document_image,
        ))
    }

    // -- Config --------------------------------------------------------------

    /// Return a snapshot of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Persist a new config to disk.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().expect("config lock poisoned") = config.clone();
        persist_config(&self.data_dir, config)
    }
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
