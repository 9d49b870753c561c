use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::device::{
    CaptureDeviceType, DeviceInfo, DevicePosition, PreviewSurface, VideoGravity,
};
use crate::models::frame::{Frame, PixelFormat};
use crate::models::state::AuthorizationState;
use crate::traits::camera_device::{AccessCallback, CameraDevice, FrameCallback};

/// How the simulated permission prompt answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResponse {
    Grant,
    Deny,
    /// Keep the prompt open until `resolve_access` is called.
    Hold,
}

struct SimState {
    authorization: AuthorizationState,
    access_response: AccessResponse,
    pending_access: Option<AccessCallback>,
    devices: Vec<DeviceInfo>,
    default_device: Option<DeviceInfo>,
    input_error: Option<String>,
    session_error: Option<String>,
    preview_error: Option<String>,
    running: bool,
    auto_deliver: bool,
    queued_frames: VecDeque<Option<Frame>>,
    pending_captures: VecDeque<FrameCallback>,
    surfaces: Vec<PreviewSurface>,
    access_requests: usize,
    bind_attempts: usize,
    capture_requests: usize,
    max_outstanding: usize,
}

/// In-process camera with scriptable permission, inventory and failures.
///
/// Clones share state, so a test can keep a handle after moving the camera
/// into a session. By default the camera is authorized, exposes one rear
/// wide-angle device and answers every capture immediately with a gray frame.
#[derive(Clone)]
pub struct SimulatedCamera {
    state: Arc<Mutex<SimState>>,
}

fn wide_angle() -> DeviceInfo {
    DeviceInfo {
        id: "sim-wide-angle".into(),
        name: "Simulated Back Camera".into(),
        device_type: CaptureDeviceType::WideAngle,
        position: DevicePosition::Back,
    }
}

fn gray_frame() -> Frame {
    Frame::filled(64, 48, PixelFormat::Bgra8, 0x80)
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                authorization: AuthorizationState::Authorized,
                access_response: AccessResponse::Grant,
                pending_access: None,
                devices: vec![wide_angle()],
                default_device: Some(wide_angle()),
                input_error: None,
                session_error: None,
                preview_error: None,
                running: false,
                auto_deliver: true,
                queued_frames: VecDeque::new(),
                pending_captures: VecDeque::new(),
                surfaces: Vec::new(),
                access_requests: 0,
                bind_attempts: 0,
                capture_requests: 0,
                max_outstanding: 0,
            })),
        }
    }

    pub fn with_authorization(self, authorization: AuthorizationState) -> Self {
        self.state.lock().authorization = authorization;
        self
    }

    pub fn with_access_response(self, response: AccessResponse) -> Self {
        self.state.lock().access_response = response;
        self
    }

    /// No camera matches discovery.
    pub fn without_devices(self) -> Self {
        self.state.lock().devices.clear();
        self
    }

    /// Discovery succeeds but the default device cannot be acquired.
    pub fn without_default_device(self) -> Self {
        self.state.lock().default_device = None;
        self
    }

    pub fn failing_input(self, reason: &str) -> Self {
        self.state.lock().input_error = Some(reason.into());
        self
    }

    pub fn failing_session(self, reason: &str) -> Self {
        self.state.lock().session_error = Some(reason.into());
        self
    }

    pub fn failing_preview(self, reason: &str) -> Self {
        self.state.lock().preview_error = Some(reason.into());
        self
    }

    /// Keep capture requests outstanding until `complete_next_capture`.
    pub fn holding_frames(self) -> Self {
        self.state.lock().auto_deliver = false;
        self
    }

    /// Frame handed out by the next automatic delivery.
    pub fn queue_frame(&self, frame: Option<Frame>) {
        self.state.lock().queued_frames.push_back(frame);
    }

    /// Answer the oldest outstanding capture. Returns `false` if none is pending.
    pub fn complete_next_capture(&self, frame: Option<Frame>) -> bool {
        let callback = self.state.lock().pending_captures.pop_front();
        match callback {
            Some(callback) => {
                callback(frame);
                true
            }
            None => false,
        }
    }

    /// Answer a held permission prompt. Returns `false` if none is pending.
    pub fn resolve_access(&self, granted: bool) -> bool {
        let callback = {
            let mut state = self.state.lock();
            let callback = state.pending_access.take();
            if callback.is_some() {
                state.authorization = if granted {
                    AuthorizationState::Authorized
                } else {
                    AuthorizationState::Denied
                };
            }
            callback
        };
        match callback {
            Some(callback) => {
                callback(granted);
                true
            }
            None => false,
        }
    }

    /// Simulate an interruption (or recovery) of the running session.
    pub fn set_running(&self, running: bool) {
        self.state.lock().running = running;
    }

    pub fn access_requests(&self) -> usize {
        self.state.lock().access_requests
    }

    /// How many times an input was opened on a device.
    pub fn bind_attempts(&self) -> usize {
        self.state.lock().bind_attempts
    }

    pub fn capture_requests(&self) -> usize {
        self.state.lock().capture_requests
    }

    pub fn outstanding_captures(&self) -> usize {
        self.state.lock().pending_captures.len()
    }

    /// Highest number of captures that were outstanding at once.
    pub fn max_outstanding_captures(&self) -> usize {
        self.state.lock().max_outstanding
    }

    pub fn attached_surfaces(&self) -> Vec<PreviewSurface> {
        self.state.lock().surfaces.clone()
    }
}

impl Default for SimulatedCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for SimulatedCamera {
    fn authorization_state(&self) -> AuthorizationState {
        self.state.lock().authorization
    }

    fn request_access(&mut self, callback: AccessCallback) {
        let answer = {
            let mut state = self.state.lock();
            state.access_requests += 1;
            match state.access_response {
                AccessResponse::Grant => {
                    state.authorization = AuthorizationState::Authorized;
                    Some(true)
                }
                AccessResponse::Deny => {
                    state.authorization = AuthorizationState::Denied;
                    Some(false)
                }
                AccessResponse::Hold => None,
            }
        };
        match answer {
            Some(granted) => callback(granted),
            None => self.state.lock().pending_access = Some(callback),
        }
    }

    fn discover_devices(
        &self,
        device_types: &[CaptureDeviceType],
        position: DevicePosition,
    ) -> Vec<DeviceInfo> {
        self.state
            .lock()
            .devices
            .iter()
            .filter(|d| d.position == position && device_types.contains(&d.device_type))
            .cloned()
            .collect()
    }

    fn default_video_device(&self) -> Option<DeviceInfo> {
        self.state.lock().default_device.clone()
    }

    fn open_input(&mut self, _device: &DeviceInfo) -> Result<(), String> {
        let mut state = self.state.lock();
        state.bind_attempts += 1;
        match &state.input_error {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn create_session(&mut self) -> Result<(), String> {
        match &self.state.lock().session_error {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn attach_preview(
        &mut self,
        surface: &PreviewSurface,
        _gravity: VideoGravity,
    ) -> Result<(), String> {
        let mut state = self.state.lock();
        if let Some(reason) = &state.preview_error {
            return Err(reason.clone());
        }
        state.surfaces.push(*surface);
        Ok(())
    }

    fn start_running(&mut self) {
        self.state.lock().running = true;
    }

    fn stop_running(&mut self) {
        self.state.lock().running = false;
    }

    fn is_running(&self) -> bool {
        self.state.lock().running
    }

    fn capture_frame(&mut self, callback: FrameCallback) {
        let delivery = {
            let mut state = self.state.lock();
            state.capture_requests += 1;
            if state.auto_deliver {
                Some(state.queued_frames.pop_front().unwrap_or_else(|| Some(gray_frame())))
            } else {
                None
            }
        };
        match delivery {
            Some(frame) => callback(frame),
            None => {
                let mut state = self.state.lock();
                state.pending_captures.push_back(callback);
                state.max_outstanding = state.max_outstanding.max(state.pending_captures.len());
            }
        }
    }
}
