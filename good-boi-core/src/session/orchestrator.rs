use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::classification::ClassificationResult;
use crate::models::config::SessionConfiguration;
use crate::models::device::PreviewSurface;
use crate::models::diagnostics::SessionDiagnostics;
use crate::models::error::{
    CaptureError, ClassificationError, ConfigError, LifecycleError, SessionError,
};
use crate::models::frame::Frame;
use crate::models::state::SessionLifecycleState;
use crate::runtime::dispatcher::{main_queue, Dispatcher, EventQueue, SessionEvent};
use crate::runtime::executor::Executor;
use crate::session::capture::CaptureSession;
use crate::session::classifier::Classifier;
use crate::traits::camera_device::CameraDevice;
use crate::traits::inference_model::InferenceModel;
use crate::traits::session_delegate::SessionDelegate;

/// Drives the repeating capture → classify cycle.
///
/// Single-threaded by construction: the owner calls the public methods and
/// feeds completions back through `handle_event` (or `pump` / `run_for`).
/// Background work only ever posts events, so lifecycle and capture status
/// are never touched concurrently.
///
/// ```text
/// tick ──(ready?)──→ CaptureSession::initiate_capture
///                         │ FrameProduced
///                         ▼
///                    Classifier::classify ──ClassificationFinished──→ delegate
/// ```
pub struct SessionOrchestrator<C: CameraDevice, M: InferenceModel> {
    capture: CaptureSession<C>,
    classifier: Classifier<M>,
    executor: Arc<dyn Executor>,
    dispatcher: Dispatcher,
    events: EventQueue,
    delegate: Option<Arc<dyn SessionDelegate>>,
    state: SessionLifecycleState,
    capture_interval: Duration,
    // At most one pending timer, so there is never more than one tick loop.
    tick_scheduled: bool,
    classification_pending: bool,
    diagnostics: SessionDiagnostics,
}

impl<C: CameraDevice, M: InferenceModel> SessionOrchestrator<C, M> {
    pub fn new(
        camera: C,
        model: M,
        executor: Arc<dyn Executor>,
        config: SessionConfiguration,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let (dispatcher, events) = main_queue();
        let capture = CaptureSession::new(camera, dispatcher.clone(), &config);
        let classifier = Classifier::new(
            model,
            Arc::clone(&executor),
            dispatcher.clone(),
            config.crop_mode,
        );

        Ok(Self {
            capture,
            classifier,
            executor,
            dispatcher,
            events,
            delegate: None,
            state: SessionLifecycleState::NotStarted,
            capture_interval: config.capture_interval(),
            tick_scheduled: false,
            classification_pending: false,
            diagnostics: SessionDiagnostics::new(),
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> SessionLifecycleState {
        self.state
    }

    pub fn capture_session(&self) -> &CaptureSession<C> {
        &self.capture
    }

    pub fn classifier(&self) -> &Classifier<M> {
        &self.classifier
    }

    pub fn diagnostics(&self) -> &SessionDiagnostics {
        &self.diagnostics
    }

    /// Bind the camera and show its preview on `surface`.
    pub fn setup_preview(&mut self, surface: PreviewSurface) {
        if let Err(e) = self.capture.request_preview(surface) {
            self.capture_failed(e);
        }
    }

    /// Transitions: not_started/paused → in_progress. Idempotent while running.
    pub fn start_session(&mut self) -> Result<(), LifecycleError> {
        self.transition(SessionLifecycleState::InProgress)?;
        if self.diagnostics.started_at.is_none() {
            self.diagnostics.started_at = Some(chrono::Utc::now());
            log::info!("session {} started", self.diagnostics.session_id);
        }
        // A timer still pending from before a pause keeps the existing loop alive.
        if !self.tick_scheduled {
            self.capture_cycle();
        }
        Ok(())
    }

    /// Transitions: in_progress → paused. The pending tick halts on its own.
    pub fn pause_session(&mut self) -> Result<(), LifecycleError> {
        self.transition(SessionLifecycleState::Paused)
    }

    /// Transitions: any → ended. Terminal.
    pub fn end_session(&mut self) {
        self.set_state(SessionLifecycleState::Ended);
    }

    /// Process every event already queued, without blocking.
    /// Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.try_next() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Block on the event queue for `duration`, handling events as they arrive.
    pub fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            if let Some(event) = self.events.next_timeout(deadline - now) {
                self.handle_event(event);
            }
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick => {
                self.tick_scheduled = false;
                self.capture_cycle();
            }
            SessionEvent::AccessResolved { surface, granted } => {
                if self.state.is_terminal() {
                    log::debug!("session ended; not binding the camera after permission answer");
                    return;
                }
                if let Err(e) = self.capture.handle_access_resolved(surface, granted) {
                    self.capture_failed(e);
                }
            }
            SessionEvent::FrameProduced(frame) => match self.capture.handle_frame(frame) {
                Ok(frame) => self.frame_captured(frame),
                Err(e) => self.capture_failed(e),
            },
            SessionEvent::ClassificationFinished(outcome) => self.classification_finished(outcome),
        }
    }

    // --- Internal helpers ---

    /// One tick: halt unless in progress, capture if nothing is in flight,
    /// then schedule the next tick.
    fn capture_cycle(&mut self) {
        if !self.state.is_in_progress() {
            log::debug!("capture cycle halted in state {:?}", self.state);
            return;
        }

        self.diagnostics.ticks += 1;
        if self.capture.is_ready() && !self.classification_pending {
            self.diagnostics.captures_requested += 1;
            if let Err(e) = self.capture.initiate_capture() {
                self.capture_failed(e);
            }
        } else {
            self.diagnostics.skipped_ticks += 1;
        }

        if self.state.is_in_progress() {
            self.schedule_tick();
        }
    }

    fn schedule_tick(&mut self) {
        let dispatcher = self.dispatcher.clone();
        self.executor.execute_after(
            self.capture_interval,
            Box::new(move || dispatcher.post(SessionEvent::Tick)),
        );
        self.tick_scheduled = true;
    }

    fn frame_captured(&mut self, frame: Frame) {
        if self.state.is_terminal() {
            log::debug!("session ended; discarding {:?}", frame);
            return;
        }
        self.diagnostics.frames_captured += 1;
        self.classification_pending = true;
        self.classifier.classify(frame);
    }

    fn classification_finished(
        &mut self,
        outcome: Result<ClassificationResult, ClassificationError>,
    ) {
        self.classification_pending = false;
        match outcome {
            Ok(result) => {
                self.diagnostics.classifications += 1;
                if result.is_dog() {
                    self.diagnostics.dogs_detected += 1;
                }
                log::debug!("classified frame as {}", result);
                if let Some(ref delegate) = self.delegate {
                    delegate.did_classify(result);
                }
            }
            Err(e) => {
                self.diagnostics.classification_failures += 1;
                log::warn!("classification failed: {}", e);
                self.notify_failure(SessionError::Classification(e));
            }
        }
    }

    fn capture_failed(&mut self, error: CaptureError) {
        self.diagnostics.capture_failures += 1;
        if error.is_recoverable() {
            log::warn!("capture failed: {}", error);
        } else {
            log::error!("camera failure ends session: {}", error);
            self.set_state(SessionLifecycleState::Ended);
        }
        self.notify_failure(SessionError::Camera(error));
    }

    fn notify_failure(&self, error: SessionError) {
        if let Some(ref delegate) = self.delegate {
            delegate.failed(&error);
        }
    }

    fn transition(&mut self, next: SessionLifecycleState) -> Result<(), LifecycleError> {
        if !self.state.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.set_state(next);
        Ok(())
    }

    fn set_state(&mut self, next: SessionLifecycleState) {
        if self.state == next {
            return;
        }
        log::info!("session state {:?} → {:?}", self.state, next);
        self.state = next;
        if next.is_terminal() {
            self.diagnostics.ended_at = Some(chrono::Utc::now());
        }
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(next);
        }
    }
}
