use crate::models::config::SessionConfiguration;
use crate::models::device::{
    CaptureDeviceType, DeviceInfo, DevicePosition, PreviewSurface, VideoGravity,
};
use crate::models::error::CaptureError;
use crate::models::frame::Frame;
use crate::models::state::{AuthorizationState, CaptureStatus, PreviewState};
use crate::runtime::dispatcher::{Dispatcher, SessionEvent};
use crate::traits::camera_device::CameraDevice;

/// Camera binding and single-frame capture.
///
/// Setup sequence for `request_preview`:
/// ```text
/// authorization → discovery → default device → input → session → preview → running
/// ```
/// Asynchronous completions (permission answers, frames) are posted to the
/// owner thread through the `Dispatcher` and fed back in with
/// `handle_access_resolved` / `handle_frame`.
pub struct CaptureSession<C: CameraDevice> {
    camera: C,
    dispatcher: Dispatcher,
    device_types: Vec<CaptureDeviceType>,
    position: DevicePosition,
    gravity: VideoGravity,
    preview: PreviewState,
    status: CaptureStatus,
    device: Option<DeviceInfo>,
}

impl<C: CameraDevice> CaptureSession<C> {
    pub fn new(camera: C, dispatcher: Dispatcher, config: &SessionConfiguration) -> Self {
        Self {
            camera,
            dispatcher,
            device_types: config.device_types.clone(),
            position: config.position,
            gravity: config.video_gravity,
            preview: PreviewState::Unconfigured,
            status: CaptureStatus::Idle,
            device: None,
        }
    }

    pub fn status(&self) -> CaptureStatus {
        self.status
    }

    pub fn preview_state(&self) -> PreviewState {
        self.preview
    }

    pub fn authorization_state(&self) -> AuthorizationState {
        self.camera.authorization_state()
    }

    /// The device bound by the last successful setup.
    pub fn device(&self) -> Option<&DeviceInfo> {
        self.device.as_ref()
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Whether a new capture may be triggered right now.
    pub fn is_ready(&self) -> bool {
        self.preview.is_running() && self.status.is_idle()
    }

    /// Bind the rear camera and show its live feed on `surface`.
    ///
    /// With an undetermined permission this only asks for access; the answer
    /// comes back as `SessionEvent::AccessResolved`.
    pub fn request_preview(&mut self, surface: PreviewSurface) -> Result<(), CaptureError> {
        match self.preview {
            PreviewState::Running => {
                log::warn!("preview already running; ignoring setup for surface {}", surface.id);
                return Ok(());
            }
            PreviewState::AwaitingPermission => {
                log::debug!("permission prompt already pending");
                return Ok(());
            }
            PreviewState::Unconfigured | PreviewState::Failed => {}
        }

        match self.camera.authorization_state() {
            AuthorizationState::Undetermined => {
                self.preview = PreviewState::AwaitingPermission;
                let dispatcher = self.dispatcher.clone();
                self.camera.request_access(Box::new(move |granted| {
                    dispatcher.post(SessionEvent::AccessResolved { surface, granted });
                }));
                log::info!("requested camera access");
                return Ok(());
            }
            AuthorizationState::Denied => return self.fail(CaptureError::DeviceNotAccessible),
            AuthorizationState::Authorized => {}
        }

        self.bind(surface)
    }

    /// Continue setup after the permission prompt was answered.
    pub fn handle_access_resolved(
        &mut self,
        surface: PreviewSurface,
        granted: bool,
    ) -> Result<(), CaptureError> {
        // Clear the pending marker so request_preview runs again.
        self.preview = PreviewState::Unconfigured;
        if granted {
            log::info!("camera access granted");
            self.request_preview(surface)
        } else {
            self.fail(CaptureError::DeviceNotAccessible)
        }
    }

    fn bind(&mut self, surface: PreviewSurface) -> Result<(), CaptureError> {
        if self
            .camera
            .discover_devices(&self.device_types, self.position)
            .is_empty()
        {
            return self.fail(CaptureError::NoDeviceAvailable);
        }

        let Some(device) = self.camera.default_video_device() else {
            return self.fail(CaptureError::CaptureDeviceFailure);
        };

        if let Err(e) = self.camera.open_input(&device) {
            log::warn!("failed to open input on {}: {}", device.name, e);
            return self.fail(CaptureError::DeviceInputFailure);
        }

        if let Err(e) = self.camera.create_session() {
            log::warn!("failed to create capture session: {}", e);
            return self.fail(CaptureError::SessionFailure);
        }

        if let Err(e) = self.camera.attach_preview(&surface, self.gravity) {
            log::warn!("failed to attach preview to surface {}: {}", surface.id, e);
            return self.fail(CaptureError::PreviewLayerFailure);
        }

        self.camera.start_running();
        log::info!("preview running on {} ({:?})", device.name, device.device_type);
        self.device = Some(device);
        self.preview = PreviewState::Running;
        Ok(())
    }

    fn fail(&mut self, error: CaptureError) -> Result<(), CaptureError> {
        log::error!("camera setup failed: {}", error);
        self.preview = PreviewState::Failed;
        Err(error)
    }

    /// Request one frame. A no-op while a previous request is outstanding.
    pub fn initiate_capture(&mut self) -> Result<(), CaptureError> {
        if !self.status.is_idle() {
            log::debug!("capture already in flight");
            return Ok(());
        }
        if !self.preview.is_running() || !self.camera.is_running() {
            return Err(CaptureError::PhotoCaptureFailure);
        }

        self.status = CaptureStatus::Processing;
        let dispatcher = self.dispatcher.clone();
        self.camera.capture_frame(Box::new(move |frame| {
            dispatcher.post(SessionEvent::FrameProduced(frame));
        }));
        Ok(())
    }

    /// Finish the outstanding capture. Status is idle again either way.
    pub fn handle_frame(&mut self, frame: Option<Frame>) -> Result<Frame, CaptureError> {
        self.status = CaptureStatus::Idle;
        frame.ok_or(CaptureError::PhotoCaptureFailure)
    }

    /// Stop the camera and forget the binding.
    pub fn stop_preview(&mut self) {
        if self.camera.is_running() {
            self.camera.stop_running();
            log::info!("preview stopped");
        }
        self.preview = PreviewState::Unconfigured;
        self.device = None;
    }
}

impl<C: CameraDevice> Drop for CaptureSession<C> {
    fn drop(&mut self) {
        self.stop_preview();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::PixelFormat;
    use crate::runtime::dispatcher::{main_queue, EventQueue};
    use crate::sim::camera::{AccessResponse, SimulatedCamera};

    fn surface() -> PreviewSurface {
        PreviewSurface::new(7, 390, 844)
    }

    fn session(camera: &SimulatedCamera) -> (CaptureSession<SimulatedCamera>, EventQueue) {
        let (dispatcher, queue) = main_queue();
        let session = CaptureSession::new(
            camera.clone(),
            dispatcher,
            &SessionConfiguration::default(),
        );
        (session, queue)
    }

    /// Feed queued permission answers back into the session, as the owner loop would.
    fn deliver_access(
        session: &mut CaptureSession<SimulatedCamera>,
        queue: &EventQueue,
    ) -> Vec<Result<(), CaptureError>> {
        let mut results = Vec::new();
        while let Some(event) = queue.try_next() {
            if let SessionEvent::AccessResolved { surface, granted } = event {
                results.push(session.handle_access_resolved(surface, granted));
            }
        }
        results
    }

    #[test]
    fn authorized_setup_binds_and_runs() {
        let camera = SimulatedCamera::new();
        let (mut session, _queue) = session(&camera);

        session.request_preview(surface()).unwrap();

        assert_eq!(session.preview_state(), PreviewState::Running);
        assert!(session.is_ready());
        assert!(camera.is_running());
        assert_eq!(camera.attached_surfaces(), vec![surface()]);
        assert_eq!(session.device().map(|d| d.id.as_str()), Some("sim-wide-angle"));
    }

    #[test]
    fn undetermined_then_granted_replays_setup_once() {
        let camera = SimulatedCamera::new()
            .with_authorization(AuthorizationState::Undetermined)
            .with_access_response(AccessResponse::Grant);
        let (mut session, queue) = session(&camera);

        session.request_preview(surface()).unwrap();
        assert_eq!(session.preview_state(), PreviewState::AwaitingPermission);
        assert_eq!(camera.bind_attempts(), 0);

        let results = deliver_access(&mut session, &queue);
        assert_eq!(results, vec![Ok(())]);
        assert_eq!(camera.access_requests(), 1);
        assert_eq!(camera.bind_attempts(), 1);
        assert_eq!(camera.attached_surfaces(), vec![surface()]);
        assert!(session.preview_state().is_running());
    }

    #[test]
    fn undetermined_then_denied_fails_without_binding() {
        let camera = SimulatedCamera::new()
            .with_authorization(AuthorizationState::Undetermined)
            .with_access_response(AccessResponse::Deny);
        let (mut session, queue) = session(&camera);

        session.request_preview(surface()).unwrap();
        let results = deliver_access(&mut session, &queue);

        assert_eq!(results, vec![Err(CaptureError::DeviceNotAccessible)]);
        assert_eq!(camera.access_requests(), 1);
        assert_eq!(camera.bind_attempts(), 0);
        assert!(camera.attached_surfaces().is_empty());
        assert_eq!(session.preview_state(), PreviewState::Failed);
    }

    #[test]
    fn pending_prompt_is_not_repeated() {
        let camera = SimulatedCamera::new()
            .with_authorization(AuthorizationState::Undetermined)
            .with_access_response(AccessResponse::Hold);
        let (mut session, _queue) = session(&camera);

        session.request_preview(surface()).unwrap();
        session.request_preview(surface()).unwrap();

        assert_eq!(camera.access_requests(), 1);
    }

    #[test]
    fn denied_fails_immediately() {
        let camera = SimulatedCamera::new().with_authorization(AuthorizationState::Denied);
        let (mut session, _queue) = session(&camera);

        assert_eq!(
            session.request_preview(surface()),
            Err(CaptureError::DeviceNotAccessible)
        );
        assert_eq!(camera.access_requests(), 0);
        assert_eq!(camera.bind_attempts(), 0);
    }

    #[test]
    fn no_rear_camera() {
        let camera = SimulatedCamera::new().without_devices();
        let (mut session, _queue) = session(&camera);

        assert_eq!(
            session.request_preview(surface()),
            Err(CaptureError::NoDeviceAvailable)
        );
    }

    #[test]
    fn each_setup_step_maps_to_its_error() {
        let cases = [
            (SimulatedCamera::new().without_default_device(), CaptureError::CaptureDeviceFailure),
            (SimulatedCamera::new().failing_input("busy"), CaptureError::DeviceInputFailure),
            (SimulatedCamera::new().failing_session("no memory"), CaptureError::SessionFailure),
            (SimulatedCamera::new().failing_preview("no layer"), CaptureError::PreviewLayerFailure),
        ];

        for (camera, expected) in cases {
            let (mut session, _queue) = session(&camera);
            assert_eq!(session.request_preview(surface()), Err(expected));
            assert_eq!(session.preview_state(), PreviewState::Failed);
            assert!(!camera.is_running());
        }
    }

    #[test]
    fn capture_without_session_fails() {
        let camera = SimulatedCamera::new();
        let (mut session, _queue) = session(&camera);

        assert_eq!(session.initiate_capture(), Err(CaptureError::PhotoCaptureFailure));
        assert!(session.status().is_idle());
        assert_eq!(camera.capture_requests(), 0);
    }

    #[test]
    fn capture_cycles_status() {
        let camera = SimulatedCamera::new().holding_frames();
        let (mut session, queue) = session(&camera);
        session.request_preview(surface()).unwrap();

        session.initiate_capture().unwrap();
        assert_eq!(session.status(), CaptureStatus::Processing);

        // Second trigger while processing does nothing.
        session.initiate_capture().unwrap();
        assert_eq!(camera.capture_requests(), 1);

        assert!(camera.complete_next_capture(None));
        let Some(SessionEvent::FrameProduced(frame)) = queue.try_next() else {
            panic!("expected a frame event");
        };
        assert_eq!(session.handle_frame(frame), Err(CaptureError::PhotoCaptureFailure));
        assert!(session.status().is_idle());

        session.initiate_capture().unwrap();
        assert!(camera.complete_next_capture(Some(Frame::filled(2, 2, PixelFormat::Gray8, 1))));
        let Some(SessionEvent::FrameProduced(frame)) = queue.try_next() else {
            panic!("expected a frame event");
        };
        let frame = session.handle_frame(frame).unwrap();
        assert_eq!(frame.width(), 2);
        assert!(session.status().is_idle());
        assert_eq!(camera.max_outstanding_captures(), 1);
    }

    #[test]
    fn stopped_camera_cannot_capture() {
        let camera = SimulatedCamera::new();
        let (mut session, _queue) = session(&camera);
        session.request_preview(surface()).unwrap();

        camera.set_running(false);
        assert_eq!(session.initiate_capture(), Err(CaptureError::PhotoCaptureFailure));
    }

    #[test]
    fn drop_stops_camera() {
        let camera = SimulatedCamera::new();
        {
            let (mut session, _queue) = session(&camera);
            session.request_preview(surface()).unwrap();
            assert!(camera.is_running());
        }
        assert!(!camera.is_running());
    }
}
