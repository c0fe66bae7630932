use super::events::ChannelEvent;
use super::RealtimeChannel;
use crate::error::SessionError;
use crate::media::StreamHandle;
use crate::transcript::SpeakerRole;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Channel implementation that replays a scripted event sequence.
///
/// A deterministic stand-in for the live backend, used by the demo binary
/// and by tests that only need a fixed conversation.
pub struct ReplayChannel {
    script: Vec<ChannelEvent>,
    pacing: Duration,
    closed: Arc<AtomicBool>,
}

impl ReplayChannel {
    pub fn new(script: Vec<ChannelEvent>) -> Self {
        Self {
            script,
            pacing: Duration::from_millis(10),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Delay inserted before each replayed event
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Script a complete conversation: `Connected`, then one fragment per
    /// turn. The session stays active afterwards until the caller ends it.
    pub fn conversation(turns: &[(SpeakerRole, &str)]) -> Self {
        let mut script = vec![ChannelEvent::Connected];
        script.extend(turns.iter().map(|(role, text)| ChannelEvent::Fragment {
            role: *role,
            text: (*text).to_string(),
        }));
        Self::new(script)
    }
}

#[async_trait::async_trait]
impl RealtimeChannel for ReplayChannel {
    async fn open(&self, stream: &StreamHandle) -> Result<mpsc::Receiver<ChannelEvent>, SessionError> {
        info!(
            "Replay channel opened for stream {} ({} scripted events)",
            stream.id(),
            self.script.len()
        );

        self.closed.store(false, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(32);
        let script = self.script.clone();
        let pacing = self.pacing;
        let closed = Arc::clone(&self.closed);

        tokio::spawn(async move {
            for event in script {
                tokio::time::sleep(pacing).await;

                if closed.load(Ordering::SeqCst) {
                    break;
                }

                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        info!("Replay channel closed");
        Ok(())
    }
}
