use super::config::SessionConfig;
use super::status::SessionStatus;
use crate::channel::{ChannelEvent, RealtimeChannel};
use crate::error::SessionError;
use crate::media::{CaptureDevice, MediaStreamBinder, RenderSurface, StreamHandle};
use crate::transcript::{TranscriptAccumulator, TranscriptEntry};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Mutable session state, guarded by one lock.
///
/// `epoch` identifies the current session attempt: `end_session` and failure
/// teardown bump it, and any work that was in flight when that happened
/// (a pending stream acquisition, a late channel event) checks it before
/// applying results. A stream that settles after its epoch was invalidated
/// is released immediately instead of leaking.
struct Inner {
    status: SessionStatus,
    stream: Option<StreamHandle>,
    epoch: u64,
    event_task: Option<JoinHandle<()>>,
    last_error: Option<String>,
}

struct Shared {
    config: SessionConfig,
    binder: MediaStreamBinder,
    channel: Arc<dyn RealtimeChannel>,
    surface: Arc<dyn RenderSurface>,
    transcript: TranscriptAccumulator,
    status_tx: watch::Sender<SessionStatus>,
    inner: Mutex<Inner>,
}

/// A live session that manages capture stream lifetime, the realtime channel
/// to the conversational backend, and transcript collection.
///
/// Cheap to clone; all clones drive the same session. At most one session is
/// in flight at a time: `start_session` while connecting or active is a
/// caller error and does not touch the running session.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    pub fn new(
        config: SessionConfig,
        device: Arc<dyn CaptureDevice>,
        channel: Arc<dyn RealtimeChannel>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        let binder = MediaStreamBinder::new(device, config.capture);
        let (status_tx, _) = watch::channel(SessionStatus::Idle);

        Self {
            shared: Arc::new(Shared {
                config,
                binder,
                channel,
                surface,
                transcript: TranscriptAccumulator::new(),
                status_tx,
                inner: Mutex::new(Inner {
                    status: SessionStatus::Idle,
                    stream: None,
                    epoch: 0,
                    event_task: None,
                    last_error: None,
                }),
            }),
        }
    }

    /// Current connection status
    pub fn status(&self) -> SessionStatus {
        *self.shared.status_tx.borrow()
    }

    /// Observe status transitions. The rendering layer subscribes here
    /// instead of polling.
    pub fn subscribe_status(&self) -> watch::Receiver<SessionStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Message of the failure that put the session into `Error`, if any
    pub async fn last_error(&self) -> Option<String> {
        self.shared.inner.lock().await.last_error.clone()
    }

    /// The transcript of the current session
    pub fn transcript(&self) -> &TranscriptAccumulator {
        &self.shared.transcript
    }

    /// Start a live session.
    ///
    /// Valid from `Idle`, and from `Error` as the explicit retry. Fails
    /// synchronously with `SessionError::AlreadyRunning` while connecting or
    /// active; no second stream or channel is ever requested.
    ///
    /// Sequence: transition to `Connecting`, reset the transcript, acquire
    /// the capture stream, bind it (muted) to the render surface, then open
    /// the realtime channel. `Active` is entered only when the channel
    /// reports `Connected`.
    pub async fn start_session(&self) -> Result<(), SessionError> {
        let epoch = {
            let mut inner = self.shared.inner.lock().await;
            match inner.status {
                SessionStatus::Connecting | SessionStatus::Active => {
                    return Err(SessionError::AlreadyRunning {
                        status: inner.status,
                    });
                }
                SessionStatus::Idle | SessionStatus::Error => {}
            }

            inner.last_error = None;
            inner.epoch += 1;
            self.apply_status(&mut inner, SessionStatus::Connecting);
            inner.epoch
        };

        info!("Starting live session: {}", self.shared.config.session_id);
        self.shared.transcript.reset();

        let stream = match self.shared.binder.acquire().await {
            Ok(stream) => stream,
            Err(e) => {
                // Nothing was acquired; there is nothing to release.
                self.fail_session(epoch, e.to_string(), false).await;
                return Err(e);
            }
        };

        // The acquisition may have settled after end_session cancelled this
        // attempt. Release the stream instead of leaking it.
        {
            let mut inner = self.shared.inner.lock().await;
            if inner.epoch != epoch {
                drop(inner);
                debug!("Session cancelled while acquiring; releasing stream");
                self.shared.binder.release(&stream).await;
                return Ok(());
            }
            inner.stream = Some(stream.clone());
        }

        // Bind before opening the channel: channel setup that consumes the
        // stream must not race ahead of binding.
        self.shared
            .binder
            .bind_to_output(&stream, self.shared.surface.as_ref());

        let events = match self.shared.channel.open(&stream).await {
            Ok(events) => events,
            Err(e) => {
                self.fail_session(epoch, e.to_string(), false).await;
                return Err(e);
            }
        };

        let mut inner = self.shared.inner.lock().await;
        if inner.epoch != epoch {
            drop(inner);
            debug!("Session cancelled during handshake; tearing down");
            if let Err(e) = self.shared.channel.close().await {
                warn!("Failed to close realtime channel: {}", e);
            }
            self.shared.binder.release(&stream).await;
            self.shared.surface.detach();
            return Ok(());
        }

        let controller = self.clone();
        inner.event_task = Some(tokio::spawn(controller.run_event_loop(epoch, events)));

        Ok(())
    }

    /// End the current session.
    ///
    /// Valid from any state; a no-op when already `Idle`. Always closes the
    /// channel and releases the stream, including when called while still
    /// `Connecting` (a pending acquisition is released once it settles).
    pub async fn end_session(&self) {
        let (stream, task) = {
            let mut inner = self.shared.inner.lock().await;
            if inner.status == SessionStatus::Idle {
                debug!("end_session with no session in progress");
                return;
            }

            inner.epoch += 1;
            inner.last_error = None;
            let stream = inner.stream.take();
            let task = inner.event_task.take();
            self.apply_status(&mut inner, SessionStatus::Idle);
            (stream, task)
        };

        if let Some(task) = task {
            task.abort();
        }

        if let Err(e) = self.shared.channel.close().await {
            warn!("Failed to close realtime channel: {}", e);
        }

        if let Some(stream) = stream {
            self.shared.binder.release(&stream).await;
            self.shared.surface.detach();
        }

        info!("Live session ended: {}", self.shared.config.session_id);
    }

    /// Dismiss a failure without retrying: `Error -> Idle`
    pub async fn dismiss_error(&self) {
        let mut inner = self.shared.inner.lock().await;
        if inner.status == SessionStatus::Error {
            inner.last_error = None;
            self.apply_status(&mut inner, SessionStatus::Idle);
        }
    }

    /// Forward channel events into session state, in arrival order.
    ///
    /// One task per session attempt; a bumped epoch makes it stop applying
    /// events even if the channel keeps producing them.
    async fn run_event_loop(self, epoch: u64, mut events: mpsc::Receiver<ChannelEvent>) {
        debug!("Channel event loop started");

        while let Some(event) = events.recv().await {
            match event {
                ChannelEvent::Connected => {
                    let mut inner = self.shared.inner.lock().await;
                    if inner.epoch == epoch && inner.status == SessionStatus::Connecting {
                        self.apply_status(&mut inner, SessionStatus::Active);
                    }
                }
                ChannelEvent::Fragment { role, text } => {
                    let inner = self.shared.inner.lock().await;
                    if inner.epoch == epoch {
                        self.shared.transcript.append(TranscriptEntry::new(role, text));
                    }
                }
                ChannelEvent::Error { message } => {
                    self.fail_session(epoch, message, true).await;
                    break;
                }
                ChannelEvent::Disconnected => {
                    self.fail_session(epoch, "realtime channel disconnected".into(), true)
                        .await;
                    break;
                }
            }
        }

        debug!("Channel event loop stopped");
    }

    /// Transition the current session attempt to `Error` and tear it down.
    ///
    /// The stream is released on every failure path, channel-originated or
    /// not. Does nothing if `epoch` is no longer the current attempt.
    async fn fail_session(&self, epoch: u64, message: String, close_channel: bool) {
        let stream = {
            let mut inner = self.shared.inner.lock().await;
            if inner.epoch != epoch {
                return;
            }

            inner.epoch += 1;
            inner.last_error = Some(message.clone());
            inner.event_task.take();
            let stream = inner.stream.take();
            self.apply_status(&mut inner, SessionStatus::Error);
            stream
        };

        error!("Live session failed: {}", message);

        if close_channel {
            if let Err(e) = self.shared.channel.close().await {
                warn!("Failed to close realtime channel: {}", e);
            }
        }

        if let Some(stream) = stream {
            self.shared.binder.release(&stream).await;
            self.shared.surface.detach();
        }
    }

    fn apply_status(&self, inner: &mut Inner, status: SessionStatus) {
        if inner.status != status {
            info!("Session status: {:?} -> {:?}", inner.status, status);
        }
        inner.status = status;
        self.shared.status_tx.send_replace(status);
    }
}
