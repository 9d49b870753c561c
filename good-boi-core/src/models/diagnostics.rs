use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Counters for debugging a session, exported as JSON by hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDiagnostics {
    pub session_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub ticks: u64,
    pub skipped_ticks: u64,
    pub captures_requested: u64,
    pub frames_captured: u64,
    pub capture_failures: u64,
    pub classifications: u64,
    pub dogs_detected: u64,
    pub classification_failures: u64,
}

impl SessionDiagnostics {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: None,
            ended_at: None,
            ticks: 0,
            skipped_ticks: 0,
            captures_requested: 0,
            frames_captured: 0,
            capture_failures: 0,
            classifications: 0,
            dogs_detected: 0,
            classification_failures: 0,
        }
    }
}

impl Default for SessionDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}
