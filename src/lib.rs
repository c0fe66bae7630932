pub mod channel;
pub mod config;
pub mod error;
pub mod media;
pub mod session;
pub mod transcript;

pub use channel::{ChannelEvent, RealtimeChannel, ReplayChannel};
pub use config::Config;
pub use error::SessionError;
pub use media::{
    CaptureConstraints, CaptureDevice, MediaStreamBinder, RenderSurface, SimulatedCaptureDevice,
    StreamHandle,
};
pub use session::{SessionConfig, SessionController, SessionStatus};
pub use transcript::{SpeakerRole, TranscriptAccumulator, TranscriptEntry};
