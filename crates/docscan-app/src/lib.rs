// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — scan flow controller, UI queue and service layer.

pub mod flow;
pub mod services;
pub mod ui_queue;

pub use flow::{FlowController, Handling, SessionEnd};
pub use services::app_services::AppServices;
pub use ui_queue::UiQueue;
