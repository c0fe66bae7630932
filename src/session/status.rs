use serde::{Deserialize, Serialize};

/// Connection status of a live session.
///
/// Transitions: `Idle -> Connecting -> Active -> Idle` on the normal path,
/// `Connecting|Active -> Error -> Idle` on failure. `Error` is left only by
/// an explicit retry (`start_session`) or dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No stream, no channel. Entry and terminal point.
    #[default]
    Idle,
    /// Stream acquisition and channel handshake in flight
    Connecting,
    /// Stream bound, channel open, fragments may arrive at any time
    Active,
    /// Terminal for the current session until the user retries or dismisses
    Error,
}
