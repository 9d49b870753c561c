use thiserror::Error;

use super::state::SessionLifecycleState;

/// Errors raised while binding the camera or pulling a frame from it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureError {
    #[error("capture device failed to initialize")]
    CaptureDeviceFailure,

    #[error("capture device input failed to initialize")]
    DeviceInputFailure,

    #[error("capture session failed to initialize")]
    SessionFailure,

    #[error("preview layer failed to initialize")]
    PreviewLayerFailure,

    #[error("photo capture failed")]
    PhotoCaptureFailure,

    #[error("camera access has been denied")]
    DeviceNotAccessible,

    #[error("no rear camera available")]
    NoDeviceAvailable,
}

/// What the presentation layer can offer the user for a camera error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorRemedy {
    /// Show the error and let the user dismiss it.
    Dismiss,
    /// Send the user to the system settings to grant camera access.
    OpenSettings,
    /// Nothing the user can do on this device.
    Unresolvable,
}

impl CaptureError {
    /// Only a failed frame grab leaves the session usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PhotoCaptureFailure)
    }

    pub fn remedy(&self) -> ErrorRemedy {
        match self {
            Self::DeviceNotAccessible => ErrorRemedy::OpenSettings,
            Self::NoDeviceAvailable => ErrorRemedy::Unresolvable,
            _ => ErrorRemedy::Dismiss,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DeviceNotAccessible => "We don't have access to your camera",
            Self::NoDeviceAvailable => "It looks like this device doesn't have a camera",
            _ => "Something went wrong with the camera",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::DeviceNotAccessible => {
                "Go to settings and enable camera access so we can help you find good bois"
            }
            Self::NoDeviceAvailable => {
                "The camera is an important part of the experience of this app. \
                 Please use a device with a camera."
            }
            _ => "Please try again!",
        }
    }
}

/// Errors raised while turning a frame into a label.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum ClassificationError {
    /// The model finished without producing a classification result set.
    #[error("model returned no classification results")]
    NoModelResult,

    /// The result set was empty.
    #[error("model returned no observations")]
    NoObservations,

    /// The top observation's label is not one we know.
    #[error("unrecognized classification label: {0:?}")]
    UnknownLabel(String),

    /// The inference call itself failed.
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// Every failure the orchestrator reports to its delegate.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum SessionError {
    #[error("camera: {0}")]
    Camera(#[from] CaptureError),

    #[error("classification: {0}")]
    Classification(#[from] ClassificationError),
}

impl SessionError {
    /// Whether this error ends the session.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Camera(e) => !e.is_recoverable(),
            Self::Classification(_) => false,
        }
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot move session from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionLifecycleState,
        to: SessionLifecycleState,
    },
}

/// Errors loading or validating a `SessionConfiguration`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
