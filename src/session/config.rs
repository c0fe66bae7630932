use crate::media::CaptureConstraints;
use serde::{Deserialize, Serialize};

/// Configuration for a live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "vision-2026-08-24-demo")
    pub session_id: String,

    /// What to request from the capture device
    pub capture: CaptureConstraints,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("vision-{}", uuid::Uuid::new_v4()),
            capture: CaptureConstraints::default(), // audio + video
        }
    }
}
