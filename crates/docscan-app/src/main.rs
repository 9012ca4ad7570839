// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — scan an identity document, validate the result, tell the user.
//
// Entry point. Initialises logging and backend services, starts the UI queue
// and runs one scanning session.
//
// Usage: docscan [default|custom]

use docscan_app::{AppServices, SessionEnd, UiQueue};
use docscan_core::error::{DocscanError, Result};
use docscan_core::human_errors::humanize_error;
use docscan_core::types::OverlayKind;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("docscan starting");

    if let Err(e) = run().await {
        tracing::error!(error = %e, "scanning session failed");
        let human = humanize_error(&e);
        eprintln!("{}\n{}", human.message, human.suggestion);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let overlay = parse_overlay(std::env::args().nth(1).as_deref())?;
    let svc = AppServices::init()?;
    let (ui, ui_task) = UiQueue::spawn();

    let mut session = svc.new_session(ui, overlay)?;
    match session.run().await? {
        SessionEnd::Accepted(result) => {
            tracing::info!(full_name = ?result.full_name, "document accepted");
        }
        SessionEnd::Cancelled => tracing::info!("scan cancelled"),
    }

    drop(session);
    if let Err(e) = ui_task.await {
        tracing::warn!(error = %e, "ui queue task ended abnormally");
    }
    Ok(())
}

fn parse_overlay(arg: Option<&str>) -> Result<Option<OverlayKind>> {
    match arg {
        None => Ok(None),
        Some("default") => Ok(Some(OverlayKind::Default)),
        Some("custom") => Ok(Some(OverlayKind::Custom)),
        Some(other) => Err(DocscanError::InvalidArgument(format!(
            "unknown overlay {other:?}, expected \"default\" or \"custom\""
        ))),
    }
}
