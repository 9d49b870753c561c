use std::sync::mpsc::Sender;

use crate::models::classification::ClassificationResult;
use crate::models::error::SessionError;
use crate::models::state::SessionLifecycleState;

/// Event delegate for orchestrator notifications.
///
/// All methods are called on the thread that drives the orchestrator, once
/// per occurrence.
pub trait SessionDelegate: Send + Sync {
    /// Called when a frame has been classified.
    fn did_classify(&self, result: ClassificationResult);

    /// Called when capture or classification fails.
    fn failed(&self, error: &SessionError);

    /// Called when the lifecycle state changes.
    fn on_state_changed(&self, _state: SessionLifecycleState) {}
}

/// A delegate callback as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotification {
    Classified(ClassificationResult),
    Failed(SessionError),
    StateChanged(SessionLifecycleState),
}

/// Delegate that forwards every callback over a channel.
pub struct ChannelDelegate {
    sender: Sender<SessionNotification>,
}

impl ChannelDelegate {
    pub fn new(sender: Sender<SessionNotification>) -> Self {
        Self { sender }
    }

    fn send(&self, notification: SessionNotification) {
        if self.sender.send(notification).is_err() {
            log::debug!("session notification receiver dropped");
        }
    }
}

impl SessionDelegate for ChannelDelegate {
    fn did_classify(&self, result: ClassificationResult) {
        self.send(SessionNotification::Classified(result));
    }

    fn failed(&self, error: &SessionError) {
        self.send(SessionNotification::Failed(error.clone()));
    }

    fn on_state_changed(&self, state: SessionLifecycleState) {
        self.send(SessionNotification::StateChanged(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::CaptureError;
    use std::sync::mpsc;

    #[test]
    fn forwards_in_order() {
        let (tx, rx) = mpsc::channel();
        let delegate = ChannelDelegate::new(tx);

        delegate.on_state_changed(SessionLifecycleState::InProgress);
        delegate.did_classify(ClassificationResult::Dog);
        delegate.failed(&SessionError::Camera(CaptureError::PhotoCaptureFailure));

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                SessionNotification::StateChanged(SessionLifecycleState::InProgress),
                SessionNotification::Classified(ClassificationResult::Dog),
                SessionNotification::Failed(SessionError::Camera(
                    CaptureError::PhotoCaptureFailure
                )),
            ]
        );
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ChannelDelegate::new(tx).did_classify(ClassificationResult::NotDog);
    }
}
