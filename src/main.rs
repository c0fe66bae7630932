use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use vision_live::{
    CaptureConstraints, Config, RenderSurface, ReplayChannel, SessionConfig, SessionController,
    SessionStatus, SimulatedCaptureDevice, SpeakerRole, StreamHandle,
};

/// Run one scripted live session end to end and print the transcript
#[derive(Parser)]
#[command(name = "vision-live", version)]
struct Args {
    /// Config file name (without extension); defaults apply when omitted
    #[arg(long)]
    config: Option<String>,

    /// Print the final transcript as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

/// Local-preview surface that just logs what the binder does with it
struct LoggingSurface;

impl RenderSurface for LoggingSurface {
    fn attach(&self, handle: &StreamHandle, muted: bool) {
        info!("Preview attached to stream {} (muted={})", handle.id(), muted);
    }

    fn detach(&self) {
        info!("Preview detached");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let capture = match &args.config {
        Some(path) => {
            let cfg = Config::load(path)?;
            info!("Loaded config: backend {} ({})", cfg.backend.url, cfg.backend.model);
            CaptureConstraints::from(&cfg.capture)
        }
        None => CaptureConstraints::default(),
    };

    let session_config = SessionConfig {
        capture,
        ..SessionConfig::default()
    };
    info!("Session id: {}", session_config.session_id);

    // A scripted conversation stands in for the live backend, the same way
    // a fixture file stands in for a microphone.
    let channel = ReplayChannel::conversation(&[
        (SpeakerRole::User, "hello, can you see me?"),
        (SpeakerRole::Model, "Yes, I can see and hear you clearly."),
        (SpeakerRole::User, "what's on my desk?"),
        (SpeakerRole::Model, "A coffee mug and a very patient cat."),
    ])
    .with_pacing(Duration::from_millis(50));

    let controller = SessionController::new(
        session_config,
        Arc::new(SimulatedCaptureDevice::new()),
        Arc::new(channel),
        Arc::new(LoggingSurface),
    );

    // Log new entries as they arrive, the way a UI would autoscroll.
    let observer = {
        let controller = controller.clone();
        let mut changes = controller.transcript().subscribe();
        tokio::spawn(async move {
            let mut seen = 0usize;
            while changes.changed().await.is_ok() {
                let entries = controller.transcript().current_sequence();
                seen = seen.min(entries.len());
                for entry in &entries[seen..] {
                    info!("{:>5}: {}", role_label(entry.role), entry.text);
                }
                seen = entries.len();
            }
        })
    };

    controller.start_session().await?;

    // Wait for the handshake, then let the scripted conversation play out.
    let mut status_rx = controller.subscribe_status();
    tokio::time::timeout(Duration::from_secs(5), async {
        while *status_rx.borrow() != SessionStatus::Active {
            if status_rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await
    .ok();

    if controller.status() != SessionStatus::Active {
        warn!("Session never became active: {:?}", controller.last_error().await);
    }

    tokio::time::sleep(Duration::from_millis(500)).await;

    let transcript = controller.transcript().current_sequence();
    controller.end_session().await;
    observer.abort();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else {
        println!("--- transcript ({} entries) ---", transcript.len());
        for entry in &transcript {
            println!("{:>5}: {}", role_label(entry.role), entry.text);
        }
    }

    Ok(())
}

fn role_label(role: SpeakerRole) -> &'static str {
    match role {
        SpeakerRole::User => "user",
        SpeakerRole::Model => "model",
    }
}
