use std::sync::Arc;

use crate::models::classification::{resolve_top_label, ClassificationResult};
use crate::models::device::CropMode;
use crate::models::error::ClassificationError;
use crate::models::frame::Frame;
use crate::runtime::dispatcher::{Dispatcher, SessionEvent};
use crate::runtime::executor::Executor;
use crate::traits::inference_model::InferenceModel;

/// Turns one frame into one label using an opaque model.
///
/// Stateless across calls. Inference runs on the executor; the outcome is
/// posted back to the owner thread as `SessionEvent::ClassificationFinished`.
pub struct Classifier<M: InferenceModel> {
    model: Arc<M>,
    executor: Arc<dyn Executor>,
    dispatcher: Dispatcher,
    crop_mode: CropMode,
}

impl<M: InferenceModel> Classifier<M> {
    pub fn new(
        model: M,
        executor: Arc<dyn Executor>,
        dispatcher: Dispatcher,
        crop_mode: CropMode,
    ) -> Self {
        Self {
            model: Arc::new(model),
            executor,
            dispatcher,
            crop_mode,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Classify `frame` in the background. The frame is dropped once
    /// inference returns.
    pub fn classify(&self, frame: Frame) {
        let model = Arc::clone(&self.model);
        let dispatcher = self.dispatcher.clone();
        let crop_mode = self.crop_mode;

        self.executor.execute(Box::new(move || {
            let outcome = run_inference(&*model, &frame, crop_mode);
            dispatcher.post(SessionEvent::ClassificationFinished(outcome));
        }));
    }
}

/// One synchronous inference pass mapped onto the label set.
pub fn run_inference<M: InferenceModel + ?Sized>(
    model: &M,
    frame: &Frame,
    crop_mode: CropMode,
) -> Result<ClassificationResult, ClassificationError> {
    let observations = model
        .infer(frame, crop_mode)
        .map_err(ClassificationError::InferenceFailed)?;
    resolve_top_label(observations.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classification::Observation;
    use crate::models::frame::PixelFormat;
    use crate::runtime::dispatcher::main_queue;
    use crate::runtime::manual::ManualExecutor;
    use crate::sim::model::ScriptedModel;

    fn frame() -> Frame {
        Frame::filled(8, 8, PixelFormat::Bgra8, 0)
    }

    #[test]
    fn maps_every_failure_point() {
        let model = ScriptedModel::always("dog");
        model.push_outcome(Ok(None));
        model.push_outcome(Ok(Some(vec![])));
        model.push_labels(&[("wolf", 0.7)]);
        model.push_outcome(Err("model crashed".into()));

        let crop = CropMode::CenterCrop;
        assert_eq!(
            run_inference(&model, &frame(), crop),
            Err(ClassificationError::NoModelResult)
        );
        assert_eq!(
            run_inference(&model, &frame(), crop),
            Err(ClassificationError::NoObservations)
        );
        assert_eq!(
            run_inference(&model, &frame(), crop),
            Err(ClassificationError::UnknownLabel("wolf".into()))
        );
        assert_eq!(
            run_inference(&model, &frame(), crop),
            Err(ClassificationError::InferenceFailed("model crashed".into()))
        );
        assert_eq!(
            run_inference(&model, &frame(), crop),
            Ok(ClassificationResult::Dog)
        );
    }

    #[test]
    fn classify_posts_outcome_from_executor() {
        let executor = Arc::new(ManualExecutor::new());
        let (dispatcher, queue) = main_queue();
        let model = ScriptedModel::always("not_dog");
        model.push_outcome(Ok(Some(vec![
            Observation::new("dog", 0.6),
            Observation::new("not_dog", 0.4),
        ])));
        let classifier = Classifier::new(model, executor.clone(), dispatcher, CropMode::CenterCrop);

        classifier.classify(frame());
        classifier.classify(frame());

        // Nothing happens until the background context runs.
        assert!(queue.try_next().is_none());
        assert_eq!(executor.run_ready(), 2);

        let outcomes: Vec<_> = std::iter::from_fn(|| queue.try_next())
            .map(|event| match event {
                SessionEvent::ClassificationFinished(outcome) => outcome,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![Ok(ClassificationResult::Dog), Ok(ClassificationResult::NotDog)]
        );
        assert_eq!(classifier.model().calls(), 2);
        assert_eq!(classifier.model().last_crop_mode(), Some(CropMode::CenterCrop));
    }
}
