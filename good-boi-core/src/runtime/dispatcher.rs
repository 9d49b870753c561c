use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::models::classification::ClassificationResult;
use crate::models::device::PreviewSurface;
use crate::models::error::ClassificationError;
use crate::models::frame::Frame;

/// Completions delivered to the owner thread.
#[derive(Debug)]
pub enum SessionEvent {
    /// The user answered the camera permission prompt for `surface`.
    AccessResolved { surface: PreviewSurface, granted: bool },
    /// A requested frame arrived, or `None` if the camera could not produce one.
    FrameProduced(Option<Frame>),
    /// Inference finished for the last frame handed to the classifier.
    ClassificationFinished(Result<ClassificationResult, ClassificationError>),
    /// The capture cycle's timer fired.
    Tick,
}

/// Handle for posting events to the owner thread from any context.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: Sender<SessionEvent>,
}

impl Dispatcher {
    pub fn post(&self, event: SessionEvent) {
        if let Err(e) = self.sender.send(event) {
            log::debug!("owner queue closed; dropping {:?}", e.0);
        }
    }
}

/// Receiving end of the owner thread's queue.
#[derive(Debug)]
pub struct EventQueue {
    receiver: Receiver<SessionEvent>,
}

impl EventQueue {
    pub fn try_next(&self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<SessionEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

/// Create the owner thread's event queue.
pub fn main_queue() -> (Dispatcher, EventQueue) {
    let (sender, receiver) = mpsc::channel();
    (Dispatcher { sender }, EventQueue { receiver })
}
