use crate::error::SessionError;

/// Opaque handle to a live audio/video capture stream.
///
/// Handles are compared by id only; the underlying platform resource is
/// owned by the `CaptureDevice` that issued the handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamHandle {
    id: u64,
}

impl StreamHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// What to request from the host capture device
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptureConstraints {
    /// Capture microphone audio
    pub audio: bool,
    /// Capture camera video
    pub video: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        // Vision mode wants both tracks
        Self {
            audio: true,
            video: true,
        }
    }
}

impl From<&crate::config::CaptureSettings> for CaptureConstraints {
    fn from(settings: &crate::config::CaptureSettings) -> Self {
        Self {
            audio: settings.audio,
            video: settings.video,
        }
    }
}

/// Host capture device trait
///
/// Platform-specific implementations live outside this crate (browser
/// getUserMedia, AVFoundation, etc.). `SimulatedCaptureDevice` provides an
/// in-memory implementation for demos and tests.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request a combined capture stream matching `constraints`
    ///
    /// Fails with `SessionError::DeviceUnavailable` when the user denies
    /// permission or no capture device exists.
    async fn request_capture(
        &self,
        constraints: CaptureConstraints,
    ) -> Result<StreamHandle, SessionError>;

    /// Stop a previously issued capture stream
    async fn stop_capture(&self, handle: StreamHandle) -> anyhow::Result<()>;

    /// Get device name for logging
    fn name(&self) -> &str;
}
