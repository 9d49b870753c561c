//! # good-boi-core
//!
//! Platform-agnostic camera capture and dog classification core.
//!
//! Runs a repeating capture cycle: on every tick one frame is pulled from the
//! rear camera, classified as `dog` / `not_dog` by an opaque model, and the
//! label is handed to a `SessionDelegate`. Platform camera backends implement
//! `CameraDevice`; models implement `InferenceModel`.
//!
//! ## Architecture
//!
//! ```text
//! good-boi-core (this crate)
//! ├── traits/    ← CameraDevice, InferenceModel, SessionDelegate
//! ├── models/    ← CaptureError, ClassificationResult, Frame, SessionConfiguration, etc.
//! ├── runtime/   ← Executor, ThreadExecutor, ManualExecutor, Dispatcher / EventQueue
//! ├── session/   ← CaptureSession, Classifier, SessionOrchestrator
//! └── sim/       ← SimulatedCamera, ScriptedModel
//! ```

pub mod models;
pub mod runtime;
pub mod session;
pub mod sim;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::classification::{ClassificationResult, Observation};
pub use models::config::SessionConfiguration;
pub use models::device::{
    CaptureDeviceType, CropMode, DeviceInfo, DevicePosition, PreviewSurface, VideoGravity,
};
pub use models::diagnostics::SessionDiagnostics;
pub use models::error::{
    CaptureError, ClassificationError, ConfigError, ErrorRemedy, LifecycleError, SessionError,
};
pub use models::frame::{Frame, PixelFormat};
pub use models::state::{AuthorizationState, CaptureStatus, PreviewState, SessionLifecycleState};
pub use runtime::executor::{Executor, ThreadExecutor};
pub use runtime::manual::ManualExecutor;
pub use session::capture::CaptureSession;
pub use session::classifier::Classifier;
pub use session::orchestrator::SessionOrchestrator;
pub use traits::camera_device::CameraDevice;
pub use traits::inference_model::{InferenceModel, InferenceOutcome};
pub use traits::session_delegate::{ChannelDelegate, SessionDelegate, SessionNotification};
