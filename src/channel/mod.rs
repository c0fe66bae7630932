//! Realtime channel boundary
//!
//! The bidirectional connection to the conversational backend is an external
//! collaborator. This module defines the narrow contract the session core
//! needs from it: open a channel against a bound capture stream, receive a
//! push stream of events, close it. Wire format, auth, and transport belong
//! to the implementation behind the trait.

mod events;
mod replay;

pub use events::ChannelEvent;
pub use replay::ReplayChannel;

use crate::error::SessionError;
use crate::media::StreamHandle;
use anyhow::Result;
use tokio::sync::mpsc;

/// Realtime conversational backend trait
#[async_trait::async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Open a channel against an already-bound capture stream.
    ///
    /// Returns a receiver that delivers `ChannelEvent`s in arrival order for
    /// the lifetime of the channel. Handshake completion is signaled by
    /// `ChannelEvent::Connected` on the receiver, not by this call returning.
    async fn open(&self, stream: &StreamHandle) -> Result<mpsc::Receiver<ChannelEvent>, SessionError>;

    /// Close the channel.
    ///
    /// Must be safe to call when no channel is open (the controller closes
    /// unconditionally on teardown, including cancellation mid-handshake).
    async fn close(&self) -> Result<()>;
}
