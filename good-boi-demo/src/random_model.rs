use rand::Rng;

use good_boi_core::{CropMode, Frame, InferenceModel, InferenceOutcome, Observation};

/// Stand-in model that guesses.
///
/// Produces a ranked `dog` / `not_dog` list whose confidences sum to 1, and
/// now and then a label outside the known set.
pub struct RandomModel {
    dog_rate: f64,
    unknown_rate: f64,
}

impl RandomModel {
    pub fn new(dog_rate: f64, unknown_rate: f64) -> Self {
        Self {
            dog_rate: dog_rate.clamp(0.0, 1.0),
            unknown_rate: unknown_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomModel {
    fn default() -> Self {
        Self::new(0.3, 0.05)
    }
}

impl InferenceModel for RandomModel {
    fn infer(&self, frame: &Frame, _crop_mode: CropMode) -> InferenceOutcome {
        let mut rng = rand::rng();

        if rng.random_bool(self.unknown_rate) {
            log::trace!("guessing an unknown label for {:?}", frame);
            return Ok(Some(vec![Observation::new("cat", rng.random_range(0.5..1.0))]));
        }

        let top: f32 = rng.random_range(0.5..1.0);
        let (first, second) = if rng.random_bool(self.dog_rate) {
            ("dog", "not_dog")
        } else {
            ("not_dog", "dog")
        };
        Ok(Some(vec![
            Observation::new(first, top),
            Observation::new(second, 1.0 - top),
        ]))
    }
}
