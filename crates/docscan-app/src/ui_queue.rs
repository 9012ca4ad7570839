// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The UI foreground queue.
//
// Everything that touches the screen (presenting a dialog in particular) is
// pushed onto one unbounded channel and run by a single consumer task, in
// order. Two jobs never run at the same time.

use docscan_core::error::{DocscanError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Handle for scheduling work on the UI queue. Cheap to clone.
#[derive(Clone)]
pub struct UiQueue {
    tx: mpsc::UnboundedSender<UiJob>,
}

impl UiQueue {
    /// Start the consumer task. It stops once every handle has been dropped
    /// and the queue has drained.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiJob>();
        let handle = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job();
            }
            debug!("ui queue stopped");
        });
        (Self { tx }, handle)
    }

    /// Schedule `job` after everything already queued.
    pub fn dispatch(&self, job: impl FnOnce() + Send + 'static) -> Result<()> {
        self.tx
            .send(Box::new(job))
            .map_err(|_| DocscanError::Bridge("ui queue has stopped".into()))
    }

    /// Wait until every job dispatched before this call has run.
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.dispatch(move || {
            let _ = done_tx.send(());
        })?;
        done_rx
            .await
            .map_err(|_| DocscanError::Bridge("ui queue has stopped".into()))
    }
}
