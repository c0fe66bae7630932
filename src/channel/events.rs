use crate::transcript::SpeakerRole;
use serde::{Deserialize, Serialize};

/// Push events delivered by the realtime channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChannelEvent {
    /// Handshake completed; the session may enter `Active`
    Connected,

    /// One role-tagged utterance fragment.
    ///
    /// Fragments arrive pre-concatenated by the backend; each one becomes
    /// exactly one transcript entry, in arrival order.
    Fragment { role: SpeakerRole, text: String },

    /// Handshake or mid-session backend failure
    Error { message: String },

    /// The backend closed the connection
    Disconnected,
}
