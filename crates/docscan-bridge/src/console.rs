// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal stand-in for the OS alert dialog.
//
// The alert is printed to stdout and the button is picked by reading a line
// from stdin on the blocking pool. An empty line taps the first button.
//
// The reader runs detached and cannot be cancelled: a dialog that is still
// open when the process wants to exit keeps one blocking thread parked on
// stdin. The flow controller only ends a session after a dialog has been
// answered or dropped, so this is limited to the terminal front-end being
// killed mid-dialog.

use std::io::BufRead;

use docscan_core::error::Result;
use tracing::{debug, warn};

use crate::traits::{Alert, AlertAction, AlertPresenter};

/// Presents alerts on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePresenter;

impl AlertPresenter for ConsolePresenter {
    fn present_alert(&self, alert: Alert) -> Result<()> {
        print!("{}", render_alert(&alert));
        let actions = alert.actions;
        tokio::task::spawn_blocking(move || answer_from(std::io::stdin().lock(), actions));
        Ok(())
    }
}

/// Read one answer from `input` and tap the chosen button.
///
/// A read error or end of input taps the first button, so the dialog is
/// never left without an answer while its reader is alive.
pub fn answer_from(mut input: impl BufRead, mut actions: Vec<AlertAction>) {
    let mut line = String::new();
    if let Err(e) = input.read_line(&mut line) {
        warn!(error = %e, "could not read dialog answer, tapping first button");
    }
    let index = pick_action(&line, actions.len());
    if index < actions.len() {
        let action = actions.swap_remove(index);
        debug!(label = %action.label, "dialog button tapped");
        action.tap();
    }
}

/// Text rendering of a dialog, buttons numbered from 1.
pub fn render_alert(alert: &Alert) -> String {
    let mut out = format!("\n== {} ==\n{}\n", alert.title, alert.message.trim_end());
    for (i, action) in alert.actions.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, action.label));
    }
    out
}

/// Map a typed answer to a button index. Anything unparsable picks the first.
pub fn pick_action(input: &str, count: usize) -> usize {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => n - 1,
        _ => 0,
    }
}
