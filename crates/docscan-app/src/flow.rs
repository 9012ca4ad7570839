// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result validator and flow controller.
//
// One scanning session is "scan -> validate -> branch":
//
// - a result that is not `Valid` is ignored and scanning continues;
// - a `Valid` result pauses scanning, is validated, and the matching dialog
//   is dispatched on the UI queue;
// - Retry resumes scanning with a fresh recognizer, OK closes the session
//   with the accepted result, Close on the scanning screen cancels it.
//
// While a dialog is open scanning is paused, so any further result that
// still reaches the controller is dropped.
//
// Each dialog gets its own oneshot channel. The sender lives only inside the
// dialog's buttons, so a dialog that is thrown away without a tap (the
// presenter failed, the UI queue stopped) closes the channel and the session
// ends with `DialogFailed` instead of waiting forever.

use std::sync::{Arc, Mutex};

use docscan_bridge::traits::{Alert, AlertAction, PlatformBridge, ScanEvent};
use docscan_core::error::{DocscanError, Result};
use docscan_core::types::{OverlayKind, Recognizer, ScanResult};
use docscan_core::validation::{ActionRole, ValidationOutcome, validate};
use tokio::sync::oneshot;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::ui_queue::UiQueue;

/// What `handle_result` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Not a `Valid` result; scanning carries on untouched.
    KeepScanning,
    /// Scanning was paused and a dialog for this outcome was dispatched.
    Presented(ValidationOutcome),
    /// A dialog is already open (or the session is over); the result was ignored.
    Dropped,
}

/// How a scanning session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// The user confirmed the success dialog.
    Accepted(ScanResult),
    /// The user closed the scanning screen.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Scanning,
    AwaitingUser,
    Closed,
}

/// Shared by every button of one dialog; the first tap wins.
type DialogAnswer = Arc<Mutex<Option<oneshot::Sender<ActionRole>>>>;

/// Drives one scanning session against an injected platform bridge.
pub struct FlowController {
    bridge: Arc<dyn PlatformBridge>,
    ui: UiQueue,
    overlay: OverlayKind,
    full_document_image: bool,
    /// Recognizer for the current attempt. Replaced, never mutated.
    recognizer: Option<Recognizer>,
    /// Result shown in the open dialog.
    pending: Option<ScanResult>,
    /// Answer of the open dialog.
    dialog: Option<oneshot::Receiver<ActionRole>>,
    phase: Phase,
}

impl FlowController {
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        ui: UiQueue,
        overlay: OverlayKind,
        full_document_image: bool,
    ) -> Self {
        Self {
            bridge,
            ui,
            overlay,
            full_document_image,
            recognizer: None,
            pending: None,
            dialog: None,
            phase: Phase::Idle,
        }
    }

    /// Recognizer of the attempt in progress, if any.
    pub fn recognizer(&self) -> Option<&Recognizer> {
        self.recognizer.as_ref()
    }

    pub fn is_awaiting_user(&self) -> bool {
        self.phase == Phase::AwaitingUser
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Start a new attempt with a fresh recognizer.
    pub fn begin_attempt(&mut self) -> Result<&Recognizer> {
        if self.phase == Phase::Closed {
            return Err(DocscanError::SessionClosed);
        }
        let recognizer = Recognizer::new(self.overlay, self.full_document_image);
        debug!(attempt = %recognizer.attempt, overlay = ?recognizer.overlay, "scan attempt started");
        self.pending = None;
        self.dialog = None;
        self.phase = Phase::Scanning;
        Ok(&*self.recognizer.insert(recognizer))
    }

    /// Decide what to do with a finished scan attempt.
    ///
    /// If the dialog cannot be queued the scanning screen is closed and
    /// `DialogFailed` is returned.
    pub fn handle_result(&mut self, result: ScanResult) -> Result<Handling> {
        if !result.state.is_valid() {
            debug!(state = ?result.state, "result not valid, continuing to scan");
            return Ok(Handling::KeepScanning);
        }
        if self.phase != Phase::Scanning {
            warn!(phase = ?self.phase, "valid result while not scanning, dropped");
            return Ok(Handling::Dropped);
        }

        self.bridge.pause_scanning()?;
        self.phase = Phase::AwaitingUser;

        let outcome = validate(&result);
        info!(outcome = ?outcome, "scan result validated");
        match self.present(outcome, &result) {
            Ok(answer) => {
                self.dialog = Some(answer);
                self.pending = Some(result);
                Ok(Handling::Presented(outcome))
            }
            Err(e) => {
                warn!(error = %e, "could not queue outcome dialog");
                Err(self.abandon())
            }
        }
    }

    /// React to a dialog button.
    ///
    /// Returns the session end once OK has been tapped on the success dialog.
    pub fn handle_action(&mut self, action: ActionRole) -> Result<Option<SessionEnd>> {
        if self.phase != Phase::AwaitingUser {
            warn!(action = ?action, phase = ?self.phase, "stale dialog action ignored");
            return Ok(None);
        }
        self.dialog = None;
        match action {
            ActionRole::Retry => {
                self.bridge.resume_scanning()?;
                self.begin_attempt()?;
                Ok(None)
            }
            ActionRole::Accept => {
                let result = self.pending.take().ok_or(DocscanError::SessionClosed)?;
                self.bridge.close()?;
                self.recognizer = None;
                self.phase = Phase::Closed;
                info!("scan accepted, session closed");
                Ok(Some(SessionEnd::Accepted(result)))
            }
        }
    }

    /// The user tapped Close on the scanning screen. No validation runs.
    pub fn handle_close(&mut self) -> Result<SessionEnd> {
        self.bridge.close()?;
        self.reset_closed();
        info!("scanning screen closed by user");
        Ok(SessionEnd::Cancelled)
    }

    /// Run one scanning session to completion.
    pub async fn run(&mut self) -> Result<SessionEnd> {
        let attempt = self.begin_attempt()?.attempt;
        let span = info_span!("scan_session", first_attempt = %attempt, overlay = ?self.overlay);
        self.drive().instrument(span).await
    }

    async fn drive(&mut self) -> Result<SessionEnd> {
        loop {
            match self.phase {
                Phase::Scanning => {
                    let recognizer = self.recognizer.clone().ok_or(DocscanError::SessionClosed)?;
                    let bridge = Arc::clone(&self.bridge);
                    match bridge.start_scan(&recognizer).await? {
                        ScanEvent::Closed => return self.handle_close(),
                        ScanEvent::Finished(result) => {
                            self.handle_result(result)?;
                        }
                    }
                }
                Phase::AwaitingUser => {
                    let answer = self.dialog.take().ok_or(DocscanError::SessionClosed)?;
                    match answer.await {
                        Ok(action) => {
                            if let Some(end) = self.handle_action(action)? {
                                return Ok(end);
                            }
                        }
                        Err(_) => {
                            warn!("outcome dialog went away without an answer");
                            return Err(self.abandon());
                        }
                    }
                }
                Phase::Idle | Phase::Closed => return Err(DocscanError::SessionClosed),
            }
        }
    }

    /// Close the scanning screen after the outcome dialog could not be shown.
    fn abandon(&mut self) -> DocscanError {
        if let Err(e) = self.bridge.close() {
            warn!(error = %e, "could not close scanning screen");
        }
        self.reset_closed();
        DocscanError::DialogFailed
    }

    fn reset_closed(&mut self) {
        self.recognizer = None;
        self.pending = None;
        self.dialog = None;
        self.phase = Phase::Closed;
    }

    /// Dispatch the outcome dialog onto the UI queue and return its answer.
    fn present(
        &self,
        outcome: ValidationOutcome,
        result: &ScanResult,
    ) -> Result<oneshot::Receiver<ActionRole>> {
        let role = outcome.action();
        let (answer_tx, answer_rx) = oneshot::channel();
        let answer: DialogAnswer = Arc::new(Mutex::new(Some(answer_tx)));
        let alert = Alert {
            title: outcome.title().to_string(),
            message: outcome.message(result),
            actions: vec![AlertAction::new(role.label(), move || {
                let sender = answer.lock().expect("dialog answer lock poisoned").take();
                let delivered = sender.is_some_and(|tx| tx.send(role).is_ok());
                if !delivered {
                    debug!(action = ?role, "dialog tapped after session ended");
                }
            })],
        };
        let bridge = Arc::clone(&self.bridge);
        self.ui.dispatch(move || {
            if let Err(e) = bridge.present_alert(alert) {
                warn!(error = %e, "could not present dialog");
            }
        })?;
        Ok(answer_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_bridge::traits::{
        AlertPresenter, BridgeFuture, LicenseActivator, RecognizerRunner,
    };
    use docscan_core::types::{MrzResult, RecognizerResultState};
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Bridge double that replays events and records every call, dialog
    /// presentation included, in one ordered log.
    ///
    /// With `auto_tap` set, each dialog's first button is tapped as soon as
    /// the dialog is presented. With `fail_present` set, presenting a dialog
    /// fails and the dialog is dropped.
    #[derive(Default)]
    struct RecordingBridge {
        events: Mutex<VecDeque<ScanEvent>>,
        calls: Mutex<Vec<String>>,
        alerts: Mutex<Vec<(String, String, Vec<String>)>>,
        auto_tap: bool,
        fail_present: bool,
    }

    impl RecordingBridge {
        fn new(events: Vec<ScanEvent>, auto_tap: bool) -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(events.into()),
                auto_tap,
                ..Default::default()
            })
        }

        fn failing_presenter(events: Vec<ScanEvent>) -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(events.into()),
                fail_present: true,
                ..Default::default()
            })
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.calls().iter().filter(|c| *c == name).count()
        }

        fn alerts(&self) -> Vec<(String, String, Vec<String>)> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl PlatformBridge for RecordingBridge {
        fn platform_name(&self) -> &str {
            "Recording"
        }
    }

    impl RecognizerRunner for RecordingBridge {
        fn start_scan<'a>(&'a self, _recognizer: &'a Recognizer) -> BridgeFuture<'a, Result<ScanEvent>> {
            Box::pin(async move {
                tokio::task::yield_now().await;
                self.record("start_scan");
                Ok(self.events.lock().unwrap().pop_front().unwrap_or(ScanEvent::Closed))
            })
        }

        fn pause_scanning(&self) -> Result<()> {
            self.record("pause");
            Ok(())
        }

        fn resume_scanning(&self) -> Result<()> {
            self.record("resume");
            Ok(())
        }

        fn close(&self) -> Result<()> {
            self.record("close");
            Ok(())
        }
    }

    impl AlertPresenter for RecordingBridge {
        fn present_alert(&self, alert: Alert) -> Result<()> {
            self.record("present_alert");
            if self.fail_present {
                return Err(DocscanError::PlatformUnavailable);
            }
            let labels = alert.actions.iter().map(|a| a.label.clone()).collect();
            self.alerts
                .lock()
                .unwrap()
                .push((alert.title.clone(), alert.message.clone(), labels));
            if self.auto_tap {
                if let Some(action) = alert.actions.into_iter().next() {
                    action.tap();
                }
            }
            Ok(())
        }
    }

    impl LicenseActivator for RecordingBridge {
        fn activate(&self, _license: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn scan(state: RecognizerResultState, pin: &str, opt1: &str, name: Option<&str>) -> ScanResult {
        ScanResult {
            state,
            personal_id_number: Some(pin.into()),
            full_name: name.map(Into::into),
            mrz: MrzResult {
                opt1: Some(opt1.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn valid(pin: &str, opt1: &str, name: Option<&str>) -> ScanResult {
        scan(RecognizerResultState::Valid, pin, opt1, name)
    }

    fn controller(bridge: &Arc<RecordingBridge>, ui: &UiQueue) -> FlowController {
        let bridge: Arc<dyn PlatformBridge> = bridge.clone();
        FlowController::new(bridge, ui.clone(), OverlayKind::Default, false)
    }

    #[tokio::test]
    async fn non_valid_results_keep_scanning() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");

        for state in [
            RecognizerResultState::Empty,
            RecognizerResultState::Uncertain,
            RecognizerResultState::StageValid,
        ] {
            let handling = flow
                .handle_result(scan(state, "12-345", "12345", Some("Jane Doe")))
                .expect("handle");
            assert_eq!(handling, Handling::KeepScanning);
        }
        ui.flush().await.expect("flush");
        assert!(bridge.calls().is_empty());
        assert!(bridge.alerts().is_empty());
        assert!(!flow.is_awaiting_user());
    }

    #[tokio::test]
    async fn mismatch_pauses_before_offering_retry() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");

        let handling = flow
            .handle_result(valid("12-345", "99999", Some("Jane Doe")))
            .expect("handle");
        assert_eq!(handling, Handling::Presented(ValidationOutcome::Mismatch));
        ui.flush().await.expect("flush");

        assert_eq!(bridge.calls(), vec!["pause", "present_alert"]);
        assert_eq!(
            bridge.alerts(),
            vec![(
                "Scan unsuccessful".to_string(),
                "Cannot match data from the front and the back".to_string(),
                vec!["Retry".to_string()],
            )]
        );
    }

    #[tokio::test]
    async fn invalid_name_offers_retry() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");

        let handling = flow
            .handle_result(valid("12-345", "12345", Some("John O'Brien")))
            .expect("handle");
        assert_eq!(handling, Handling::Presented(ValidationOutcome::InvalidCharacters));
        ui.flush().await.expect("flush");
        let alerts = bridge.alerts();
        assert_eq!(alerts[0].1, "Cannot validate the data");
        assert_eq!(alerts[0].2, vec!["Retry".to_string()]);
    }

    #[tokio::test]
    async fn second_result_while_dialog_open_is_dropped() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");

        let result = valid("12-345", "12345", Some("Jane Doe"));
        let first = flow.handle_result(result.clone()).expect("first");
        let second = flow.handle_result(result).expect("second");
        assert_eq!(first, Handling::Presented(ValidationOutcome::Success));
        assert_eq!(second, Handling::Dropped);

        ui.flush().await.expect("flush");
        assert_eq!(bridge.count("pause"), 1);
        assert_eq!(bridge.alerts().len(), 1);
    }

    #[tokio::test]
    async fn retry_resumes_with_fresh_recognizer() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        let first = flow.begin_attempt().expect("begin").attempt;

        flow.handle_result(valid("1", "2", Some("Jane Doe"))).expect("handle");
        ui.flush().await.expect("flush");
        assert!(flow.handle_action(ActionRole::Retry).expect("retry").is_none());

        assert_eq!(bridge.calls(), vec!["pause", "present_alert", "resume"]);
        assert!(!flow.is_awaiting_user());
        assert_ne!(flow.recognizer().expect("recognizer").attempt, first);
    }

    #[tokio::test]
    async fn stale_action_is_ignored() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");
        assert!(flow.handle_action(ActionRole::Accept).expect("action").is_none());
        assert!(bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn success_then_ok_closes_session() {
        let accepted = valid("12-345", "12345", Some("Jane Doe"));
        let bridge = RecordingBridge::new(vec![ScanEvent::Finished(accepted.clone())], true);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);

        let end = flow.run().await.expect("session");
        assert_eq!(end, SessionEnd::Accepted(accepted.clone()));
        assert!(flow.is_closed());
        assert!(flow.recognizer().is_none());
        assert_eq!(bridge.calls(), vec!["start_scan", "pause", "present_alert", "close"]);

        let alerts = bridge.alerts();
        assert_eq!(alerts[0].0, "Success");
        assert_eq!(alerts[0].1, accepted.to_string());
        assert_eq!(alerts[0].2, vec!["OK".to_string()]);
    }

    #[tokio::test]
    async fn retry_loops_until_valid_scan() {
        let bridge = RecordingBridge::new(
            vec![
                ScanEvent::Finished(scan(RecognizerResultState::Uncertain, "", "", None)),
                ScanEvent::Finished(valid("12-345", "99999", Some("Jane Doe"))),
                ScanEvent::Finished(valid("12-345", "12345", None)),
                ScanEvent::Finished(valid("12-345", "12345", Some("Jane Doe"))),
            ],
            true,
        );
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);

        let end = flow.run().await.expect("session");
        assert!(matches!(end, SessionEnd::Accepted(ref r) if r.full_name.as_deref() == Some("Jane Doe")));
        assert_eq!(bridge.count("pause"), 3);
        assert_eq!(bridge.count("present_alert"), 3);
        assert_eq!(bridge.count("resume"), 2);
        assert_eq!(bridge.count("close"), 1);

        let messages: Vec<_> = bridge.alerts().into_iter().map(|a| a.1).collect();
        assert_eq!(messages[0], "Cannot match data from the front and the back");
        assert_eq!(messages[1], "Cannot validate the data");
        assert!(messages[2].contains("Jane Doe"));
    }

    #[tokio::test]
    async fn close_cancels_without_validation() {
        let bridge = RecordingBridge::new(vec![ScanEvent::Closed], true);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);

        assert_eq!(flow.run().await.expect("session"), SessionEnd::Cancelled);
        assert_eq!(bridge.calls(), vec!["start_scan", "close"]);
        assert!(bridge.alerts().is_empty());
        assert!(matches!(flow.run().await, Err(DocscanError::SessionClosed)));
    }

    #[tokio::test]
    async fn failed_presentation_ends_session() {
        let bridge = RecordingBridge::failing_presenter(vec![ScanEvent::Finished(valid(
            "12-345",
            "12345",
            Some("Jane Doe"),
        ))]);
        let (ui, _h) = UiQueue::spawn();
        let mut flow = controller(&bridge, &ui);

        let outcome = tokio::time::timeout(Duration::from_secs(2), flow.run())
            .await
            .expect("session must end when the dialog cannot be shown");
        assert!(matches!(outcome, Err(DocscanError::DialogFailed)));
        assert_eq!(bridge.calls(), vec!["start_scan", "pause", "present_alert", "close"]);
        assert!(flow.is_closed());
        assert!(!flow.is_awaiting_user());
    }

    #[tokio::test]
    async fn stopped_ui_queue_closes_scanning_screen() {
        let bridge = RecordingBridge::new(Vec::new(), false);
        let (ui, handle) = UiQueue::spawn();
        handle.abort();
        let _ = handle.await;
        let mut flow = controller(&bridge, &ui);
        flow.begin_attempt().expect("begin");

        let outcome = flow.handle_result(valid("12-345", "12345", Some("Jane Doe")));
        assert!(matches!(outcome, Err(DocscanError::DialogFailed)));
        assert_eq!(bridge.calls(), vec!["pause", "close"]);
        assert!(flow.is_closed());
    }
}
