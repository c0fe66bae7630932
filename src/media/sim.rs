use super::device::{CaptureConstraints, CaptureDevice, StreamHandle};
use crate::error::SessionError;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::info;

/// In-memory capture device for demos and tests.
///
/// Grants every request with a fresh handle id unless `deny()` has been
/// called, and counts acquire/stop calls so tests can assert the
/// one-release-per-acquire contract.
#[derive(Default)]
pub struct SimulatedCaptureDevice {
    next_id: AtomicU64,
    acquires: AtomicUsize,
    stops: AtomicUsize,
    denied: AtomicBool,
}

impl SimulatedCaptureDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `request_capture` calls fail as if the user denied
    /// camera/microphone permission.
    pub fn deny(&self) {
        self.denied.store(true, Ordering::SeqCst);
    }

    /// Grant subsequent `request_capture` calls again
    pub fn allow(&self) {
        self.denied.store(false, Ordering::SeqCst);
    }

    pub fn acquire_count(&self) -> usize {
        self.acquires.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CaptureDevice for SimulatedCaptureDevice {
    async fn request_capture(
        &self,
        constraints: CaptureConstraints,
    ) -> Result<StreamHandle, SessionError> {
        if self.denied.load(Ordering::SeqCst) {
            return Err(SessionError::device_unavailable(
                "capture permission denied",
            ));
        }

        self.acquires.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            "Simulated capture stream {} granted (audio={}, video={})",
            id, constraints.audio, constraints.video
        );

        Ok(StreamHandle::new(id))
    }

    async fn stop_capture(&self, handle: StreamHandle) -> anyhow::Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        info!("Simulated capture stream {} stopped", handle.id());
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
