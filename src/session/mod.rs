//! Live session management
//!
//! This module provides the `SessionController` abstraction that manages:
//! - The idle/connecting/active/error connection-status state machine
//! - Capture stream acquisition and guaranteed release on every exit path
//! - The realtime channel lifecycle against the conversational backend
//! - Forwarding transcript fragments into the accumulator in arrival order
//! - Status change notification for the rendering layer

mod config;
mod controller;
mod status;

pub use config::SessionConfig;
pub use controller::SessionController;
pub use status::SessionStatus;
