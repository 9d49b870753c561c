use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::device::{CaptureDeviceType, CropMode, DevicePosition, VideoGravity};
use super::error::ConfigError;

/// Configuration for a capture/classification session.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfiguration {
    /// Delay between capture ticks in milliseconds (default: 500).
    pub capture_interval_ms: u64,

    /// Camera types accepted during discovery (default: all rear types).
    pub device_types: Vec<CaptureDeviceType>,

    /// Which side of the device to use (default: back).
    pub position: DevicePosition,

    /// How the preview fills its surface (default: aspect fill).
    pub video_gravity: VideoGravity,

    /// How frames are fitted to the model input (default: center crop).
    pub crop_mode: CropMode,
}

impl SessionConfiguration {
    pub fn capture_interval(&self) -> Duration {
        Duration::from_millis(self.capture_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.capture_interval_ms == 0 {
            return Err("capture interval must be positive".into());
        }
        if self.device_types.is_empty() {
            return Err("at least one device type is required".into());
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            capture_interval_ms: 500,
            device_types: CaptureDeviceType::REAR.to_vec(),
            position: DevicePosition::Back,
            video_gravity: VideoGravity::ResizeAspectFill,
            crop_mode: CropMode::CenterCrop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cadence() {
        let config = SessionConfiguration::default();
        assert_eq!(config.capture_interval(), Duration::from_millis(500));
        assert_eq!(config.device_types.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfiguration::from_json(r#"{ "capture_interval_ms": 250 }"#).unwrap();
        assert_eq!(config.capture_interval_ms, 250);
        assert_eq!(config.crop_mode, CropMode::CenterCrop);
        assert_eq!(config.position, DevicePosition::Back);
    }

    #[test]
    fn parses_enum_values() {
        let config = SessionConfiguration::from_json(
            r#"{ "device_types": ["wide_angle", "true_depth"], "video_gravity": "resize_aspect" }"#,
        )
        .unwrap();
        assert_eq!(
            config.device_types,
            vec![CaptureDeviceType::WideAngle, CaptureDeviceType::TrueDepth]
        );
        assert_eq!(config.video_gravity, VideoGravity::ResizeAspect);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = SessionConfiguration::from_json(r#"{ "capture_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_empty_device_types() {
        let err = SessionConfiguration::from_json(r#"{ "device_types": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SessionConfiguration::from_json("{ capture_interval_ms: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join("good_boi_config_test.json");
        fs::write(&path, r#"{ "crop_mode": "scale_fit" }"#).unwrap();

        let config = SessionConfiguration::load(&path).unwrap();
        assert_eq!(config.crop_mode, CropMode::ScaleFit);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("good_boi_config_missing.json");
        assert!(matches!(
            SessionConfiguration::load(&path),
            Err(ConfigError::Io(_))
        ));
    }
}
