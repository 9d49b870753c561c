use serde::{Deserialize, Serialize};

/// Kind of built-in camera module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureDeviceType {
    Telephoto,
    Dual,
    TrueDepth,
    WideAngle,
}

impl CaptureDeviceType {
    /// Every rear camera type the session will accept.
    pub const REAR: [CaptureDeviceType; 4] = [
        Self::Telephoto,
        Self::Dual,
        Self::TrueDepth,
        Self::WideAngle,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePosition {
    #[default]
    Back,
    Front,
}

/// How the live preview fills its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoGravity {
    Resize,
    ResizeAspect,
    #[default]
    ResizeAspectFill,
}

/// How a frame is fitted to the model's input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    #[default]
    CenterCrop,
    ScaleFit,
    ScaleFill,
}

/// A camera found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub device_type: CaptureDeviceType,
    pub position: DevicePosition,
}

/// Display area the live preview is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSurface {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

impl PreviewSurface {
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}
