use super::device::{CaptureConstraints, CaptureDevice, StreamHandle};
use crate::error::SessionError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Output surface for local preview of a live capture stream.
///
/// Implemented by the rendering layer; the binder only hands the stream
/// over and tells the surface whether local playback must stay muted.
pub trait RenderSurface: Send + Sync {
    /// Attach a live stream for local preview
    fn attach(&self, handle: &StreamHandle, muted: bool);

    /// Detach whatever stream is currently shown
    fn detach(&self);
}

/// Acquires capture streams and guarantees each one is released exactly once.
///
/// The binder tracks the ids of streams it has handed out; `release` only
/// forwards to the device while the id is still live, so releasing an
/// already-released handle is a no-op. Every exit path from a session goes
/// through `release`, including error paths.
pub struct MediaStreamBinder {
    device: Arc<dyn CaptureDevice>,
    constraints: CaptureConstraints,
    live: Mutex<HashSet<u64>>,
}

impl MediaStreamBinder {
    pub fn new(device: Arc<dyn CaptureDevice>, constraints: CaptureConstraints) -> Self {
        Self {
            device,
            constraints,
            live: Mutex::new(HashSet::new()),
        }
    }

    /// Request a capture stream from the host device
    pub async fn acquire(&self) -> Result<StreamHandle, SessionError> {
        let handle = self
            .device
            .request_capture(self.constraints)
            .await?;

        info!(
            "Acquired capture stream {} from {} (audio={}, video={})",
            handle.id(),
            self.device.name(),
            self.constraints.audio,
            self.constraints.video
        );

        self.lock_live().insert(handle.id());

        Ok(handle)
    }

    /// Attach a live stream to an output surface for local preview.
    ///
    /// Local playback is always muted: the platform's autoplay rules require
    /// it, independent of whether remote audio is produced elsewhere.
    pub fn bind_to_output(&self, handle: &StreamHandle, surface: &dyn RenderSurface) {
        debug!("Binding stream {} to output surface", handle.id());
        surface.attach(handle, true);
    }

    /// Release a capture stream.
    ///
    /// Idempotent: releasing a handle that was never acquired here, or was
    /// already released, does nothing.
    pub async fn release(&self, handle: &StreamHandle) {
        let was_live = self.lock_live().remove(&handle.id());

        if !was_live {
            debug!("Ignoring release of non-live stream {}", handle.id());
            return;
        }

        if let Err(e) = self.device.stop_capture(handle.clone()).await {
            error!("Failed to stop capture stream {}: {}", handle.id(), e);
        } else {
            info!("Released capture stream {}", handle.id());
        }
    }

    /// Number of streams acquired but not yet released
    pub fn live_count(&self) -> usize {
        self.lock_live().len()
    }

    fn lock_live(&self) -> std::sync::MutexGuard<'_, HashSet<u64>> {
        match self.live.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
