use parking_lot::Mutex;

use good_boi_core::{
    ClassificationResult, ErrorRemedy, SessionDelegate, SessionError, SessionLifecycleState,
};

/// What the screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TailWaggerView {
    /// The tail wags while we are still looking for a dog.
    pub wagging: bool,
    /// "Good boi detected" badge.
    pub badge_visible: bool,
    /// Camera error currently on screen, if any.
    pub alert: Option<Alert>,
    pub dogs_seen: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub remedy: ErrorRemedy,
}

/// SessionDelegate that drives the tail-wagger screen.
#[derive(Default)]
pub struct TailWagger {
    view: Mutex<TailWaggerView>,
}

impl TailWagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> TailWaggerView {
        self.view.lock().clone()
    }

    fn show(&self, result: ClassificationResult) {
        let mut view = self.view.lock();
        match result {
            ClassificationResult::Dog => {
                if !view.badge_visible {
                    log::info!("good boi detected");
                }
                view.wagging = false;
                view.badge_visible = true;
                view.dogs_seen += 1;
            }
            ClassificationResult::NotDog => {
                view.wagging = true;
                view.badge_visible = false;
            }
        }
    }
}

impl SessionDelegate for TailWagger {
    fn did_classify(&self, result: ClassificationResult) {
        self.show(result);
    }

    fn failed(&self, error: &SessionError) {
        match error {
            // A bad guess from the model reads as "no dog".
            SessionError::Classification(e) => {
                log::debug!("treating classification failure as not_dog: {}", e);
                self.show(ClassificationResult::NotDog);
            }
            SessionError::Camera(e) if e.is_recoverable() => {
                log::warn!("{}; trying again on the next tick", e);
            }
            SessionError::Camera(e) => {
                log::error!("{}: {} ({:?})", e.title(), e.message(), e.remedy());
                let mut view = self.view.lock();
                view.wagging = false;
                view.alert = Some(Alert {
                    title: e.title().to_string(),
                    message: e.message().to_string(),
                    remedy: e.remedy(),
                });
            }
        }
    }

    fn on_state_changed(&self, state: SessionLifecycleState) {
        let mut view = self.view.lock();
        match state {
            SessionLifecycleState::InProgress => view.wagging = true,
            SessionLifecycleState::Paused | SessionLifecycleState::Ended => view.wagging = false,
            SessionLifecycleState::NotStarted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_boi_core::{CaptureError, ClassificationError};

    #[test]
    fn dog_stops_wagging_and_shows_badge() {
        let wagger = TailWagger::new();
        wagger.on_state_changed(SessionLifecycleState::InProgress);
        assert!(wagger.view().wagging);

        wagger.did_classify(ClassificationResult::Dog);
        let view = wagger.view();
        assert!(!view.wagging);
        assert!(view.badge_visible);
        assert_eq!(view.dogs_seen, 1);

        wagger.did_classify(ClassificationResult::NotDog);
        let view = wagger.view();
        assert!(view.wagging);
        assert!(!view.badge_visible);
    }

    #[test]
    fn classification_failure_hides_badge() {
        let wagger = TailWagger::new();
        wagger.did_classify(ClassificationResult::Dog);
        wagger.failed(&SessionError::Classification(ClassificationError::NoObservations));

        let view = wagger.view();
        assert!(!view.badge_visible);
        assert!(view.wagging);
        assert!(view.alert.is_none());
    }

    #[test]
    fn photo_failure_shows_no_alert() {
        let wagger = TailWagger::new();
        wagger.failed(&SessionError::Camera(CaptureError::PhotoCaptureFailure));
        assert!(wagger.view().alert.is_none());
    }

    #[test]
    fn denied_camera_offers_settings() {
        let wagger = TailWagger::new();
        wagger.failed(&SessionError::Camera(CaptureError::DeviceNotAccessible));

        let alert = wagger.view().alert.unwrap();
        assert_eq!(alert.remedy, ErrorRemedy::OpenSettings);
        assert_eq!(alert.title, "We don't have access to your camera");
    }
}
