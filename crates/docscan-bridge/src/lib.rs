// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! docscan — bridges to the external collaborators of the scan flow.
//!
//! The recognition engine, its camera overlay, license activation and the
//! OS alert dialog are all consumed through the traits in [`traits`]. The
//! flow controller only ever sees a `dyn PlatformBridge`, so it runs the same
//! against a device SDK, recorded scans or a test double.

pub mod console;
pub mod replay;
pub mod stub;
pub mod traits;

use docscan_core::AppConfig;
use docscan_core::error::Result;

/// Select the bridge implementation for this build and configuration.
///
/// RETURNS: the replay bridge when recorded scans are configured, otherwise
/// the stub bridge, which reports every capability as unavailable.
pub fn platform_bridge(config: &AppConfig) -> Result<Box<dyn traits::PlatformBridge>> {
    match config.replay_fixture {
        Some(ref path) => Ok(Box::new(replay::ReplayBridge::from_file(path)?)),
        None => Ok(Box::new(stub::StubBridge)),
    }
}
