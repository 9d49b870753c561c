use crate::models::classification::Observation;
use crate::models::device::CropMode;
use crate::models::frame::Frame;

/// Result of one inference call.
///
/// - `Ok(Some(list))`: ranked observations, highest confidence first.
/// - `Ok(None)`: the model finished but produced no classification result set.
/// - `Err(reason)`: the inference call itself failed.
pub type InferenceOutcome = Result<Option<Vec<Observation>>, String>;

/// Opaque on-device image classifier.
///
/// Called from a background worker, never from the owner thread.
pub trait InferenceModel: Send + Sync + 'static {
    fn infer(&self, frame: &Frame, crop_mode: CropMode) -> InferenceOutcome;
}
