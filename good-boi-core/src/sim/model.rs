use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::models::classification::Observation;
use crate::models::device::CropMode;
use crate::models::frame::Frame;
use crate::traits::inference_model::{InferenceModel, InferenceOutcome};

/// Inference model that replays queued outcomes, then a fallback.
pub struct ScriptedModel {
    script: Mutex<VecDeque<InferenceOutcome>>,
    fallback: InferenceOutcome,
    last_crop_mode: Mutex<Option<CropMode>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    /// Model whose fallback is `label` at 0.9 confidence.
    pub fn always(label: &str) -> Self {
        Self::with_fallback(Ok(Some(vec![Observation::new(label, 0.9)])))
    }

    pub fn with_fallback(fallback: InferenceOutcome) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            last_crop_mode: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue one raw outcome.
    pub fn push_outcome(&self, outcome: InferenceOutcome) {
        self.script.lock().push_back(outcome);
    }

    /// Queue a ranked observation list.
    pub fn push_labels(&self, labels: &[(&str, f32)]) {
        let observations = labels
            .iter()
            .map(|(label, confidence)| Observation::new(*label, *confidence))
            .collect();
        self.push_outcome(Ok(Some(observations)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_crop_mode(&self) -> Option<CropMode> {
        *self.last_crop_mode.lock()
    }
}

impl InferenceModel for ScriptedModel {
    fn infer(&self, _frame: &Frame, crop_mode: CropMode) -> InferenceOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_crop_mode.lock() = Some(crop_mode);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
