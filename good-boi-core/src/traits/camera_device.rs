use crate::models::device::{
    CaptureDeviceType, DeviceInfo, DevicePosition, PreviewSurface, VideoGravity,
};
use crate::models::frame::Frame;
use crate::models::state::AuthorizationState;

/// Callback invoked once with the user's answer to the camera permission prompt.
pub type AccessCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Callback invoked once with a captured frame, or `None` when the platform
/// could not produce one.
pub type FrameCallback = Box<dyn FnOnce(Option<Frame>) + Send + 'static>;

/// Interface for the platform camera and its permission layer.
///
/// Implemented by:
/// - `SimulatedCamera` (in-process, scriptable)
/// - platform backends living in their host applications
///
/// Callbacks may fire on any thread, including synchronously inside the
/// call that registered them. The capture session forwards them to the
/// owner thread before acting on them.
pub trait CameraDevice: Send {
    /// Current permission for video capture.
    fn authorization_state(&self) -> AuthorizationState;

    /// Show the permission prompt. `callback` receives `true` when granted.
    fn request_access(&mut self, callback: AccessCallback);

    /// Cameras matching any of `device_types` at `position`.
    fn discover_devices(
        &self,
        device_types: &[CaptureDeviceType],
        position: DevicePosition,
    ) -> Vec<DeviceInfo>;

    /// The platform's default video device, if it can be acquired.
    fn default_video_device(&self) -> Option<DeviceInfo>;

    /// Open an input on `device`.
    fn open_input(&mut self, device: &DeviceInfo) -> Result<(), String>;

    /// Create the capture session the input feeds into.
    fn create_session(&mut self) -> Result<(), String>;

    /// Attach a live preview of the session to `surface`.
    fn attach_preview(
        &mut self,
        surface: &PreviewSurface,
        gravity: VideoGravity,
    ) -> Result<(), String>;

    fn start_running(&mut self);

    fn stop_running(&mut self);

    fn is_running(&self) -> bool;

    /// Grab a single frame and hand it to `callback`.
    fn capture_frame(&mut self, callback: FrameCallback);
}
