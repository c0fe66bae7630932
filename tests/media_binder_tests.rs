// Tests for the media stream binder's acquire/release bookkeeping.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vision_live::{
    CaptureConstraints, MediaStreamBinder, RenderSurface, SessionError, SimulatedCaptureDevice,
    StreamHandle,
};

#[derive(Default)]
struct FakeSurface {
    attached: Mutex<Vec<(u64, bool)>>,
    detaches: AtomicUsize,
}

impl RenderSurface for FakeSurface {
    fn attach(&self, handle: &StreamHandle, muted: bool) {
        self.attached.lock().unwrap().push((handle.id(), muted));
    }

    fn detach(&self) {
        self.detaches.fetch_add(1, Ordering::SeqCst);
    }
}

fn binder_with_device() -> (Arc<SimulatedCaptureDevice>, MediaStreamBinder) {
    let device = Arc::new(SimulatedCaptureDevice::new());
    let binder = MediaStreamBinder::new(device.clone(), CaptureConstraints::default());
    (device, binder)
}

#[tokio::test]
async fn test_acquire_then_release_stops_capture_once() {
    let (device, binder) = binder_with_device();

    let handle = binder.acquire().await.unwrap();
    assert_eq!(binder.live_count(), 1);

    binder.release(&handle).await;

    assert_eq!(binder.live_count(), 0);
    assert_eq!(device.acquire_count(), 1);
    assert_eq!(device.stop_count(), 1);
}

#[tokio::test]
async fn test_double_release_is_a_no_op() {
    let (device, binder) = binder_with_device();

    let handle = binder.acquire().await.unwrap();
    binder.release(&handle).await;
    binder.release(&handle).await;
    binder.release(&handle).await;

    assert_eq!(device.stop_count(), 1);
}

#[tokio::test]
async fn test_releasing_unknown_handle_does_nothing() {
    let (device, binder) = binder_with_device();

    binder.release(&StreamHandle::new(999)).await;

    assert_eq!(device.stop_count(), 0);
    assert_eq!(binder.live_count(), 0);
}

#[tokio::test]
async fn test_denied_acquire_surfaces_device_unavailable() {
    let (device, binder) = binder_with_device();
    device.deny();

    let err = binder.acquire().await.unwrap_err();
    assert!(matches!(err, SessionError::DeviceUnavailable { .. }));
    assert_eq!(binder.live_count(), 0);
}

#[tokio::test]
async fn test_bind_to_output_always_mutes_local_playback() {
    let (_device, binder) = binder_with_device();
    let surface = FakeSurface::default();

    let handle = binder.acquire().await.unwrap();
    binder.bind_to_output(&handle, &surface);

    let attached = surface.attached.lock().unwrap();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].0, handle.id());
    assert!(attached[0].1, "local preview must be muted for autoplay");
}

#[tokio::test]
async fn test_each_acquire_gets_a_distinct_handle() {
    let (_device, binder) = binder_with_device();

    let first = binder.acquire().await.unwrap();
    let second = binder.acquire().await.unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(binder.live_count(), 2);

    binder.release(&first).await;
    binder.release(&second).await;
    assert_eq!(binder.live_count(), 0);
}
