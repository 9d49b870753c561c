use serde::{Deserialize, Serialize};

/// Camera permission as reported by the platform.
///
/// Only the platform's permission prompt moves this value; the session
/// never writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    Undetermined,
    Authorized,
    Denied,
}

/// Whether a frame request is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureStatus {
    #[default]
    Idle,
    Processing,
}

impl CaptureStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Progress of binding the camera to a preview surface.
///
/// ```text
/// unconfigured → awaiting_permission → running
///       ↓                ↓
///     failed ←───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreviewState {
    #[default]
    Unconfigured,
    AwaitingPermission,
    Running,
    Failed,
}

impl PreviewState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Orchestrator lifecycle.
///
/// State transitions:
/// ```text
/// not_started → in_progress ↔ paused
///      ↓             ↓          ↓
///      └──────────→ ended ←─────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionLifecycleState {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    Ended,
}

impl SessionLifecycleState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Whether `next` is reachable from this state. Staying put always is,
    /// so repeated calls are idempotent.
    pub fn can_transition_to(&self, next: SessionLifecycleState) -> bool {
        use SessionLifecycleState::*;

        if *self == next {
            return true;
        }
        match (self, next) {
            (Ended, _) | (_, NotStarted) => false,
            (NotStarted, Paused) => false,
            _ => true,
        }
    }
}
