//! Media stream acquisition and lifetime management
//!
//! This module owns the capture side of a live session:
//! - `CaptureDevice`: host camera/microphone abstraction (platform collaborator)
//! - `MediaStreamBinder`: acquire/bind/release with idempotent release tracking
//! - `RenderSurface`: local-preview output the binder attaches streams to
//! - `SimulatedCaptureDevice`: in-memory device for demos and tests

mod binder;
mod device;
mod sim;

pub use binder::{MediaStreamBinder, RenderSurface};
pub use device::{CaptureConstraints, CaptureDevice, StreamHandle};
pub use sim::SimulatedCaptureDevice;
