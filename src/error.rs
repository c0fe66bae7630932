use crate::session::SessionStatus;
use thiserror::Error;

/// Errors surfaced by the live session core.
///
/// Every variant is terminal for the current session except `AlreadyRunning`,
/// which is rejected synchronously without touching session state. Recovery
/// is always a fresh, explicit `start_session()` call; the core never retries
/// on its own.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Capture device missing or permission denied.
    #[error("capture device unavailable: {reason}")]
    DeviceUnavailable { reason: String },

    /// Realtime backend handshake or mid-session failure.
    #[error("realtime channel failure: {message}")]
    Channel { message: String },

    /// `start_session()` called while a session is already connecting or
    /// active. Caller error; no state change, no second acquire.
    #[error("session already running (status: {status:?})")]
    AlreadyRunning { status: SessionStatus },
}

impl SessionError {
    pub fn device_unavailable(reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            reason: reason.into(),
        }
    }

    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}
