//! Webcam nose-tracking input service
//!
//! A background thread continuously reads camera frames, mirrors them, runs a
//! face-landmark estimator, and publishes the nose-tip position in pixel
//! coordinates. The game loop polls the latest position without blocking;
//! there is no queue, the most recent detection wins.
//!
//! The capture device and the estimation model are external collaborators
//! behind trait seams. The device is owned by the tracker thread and released
//! exactly once when the thread exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use glam::Vec2;
use thiserror::Error;

/// Camera failures surfaced by a capture device
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device is gone; the tracking loop exits
    #[error("capture device disconnected")]
    Disconnected,
    /// Transient failure; the tracking loop skips the iteration and retries
    #[error("frame read failed: {0}")]
    ReadFailed(String),
}

/// One captured camera frame, tightly packed row-major pixels
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Bytes per pixel
    pub channels: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * channels) as usize);
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Mirror the frame in place so on-screen motion matches head motion
    pub fn flip_horizontal(&mut self) {
        let px = self.channels as usize;
        let row_len = self.width as usize * px;
        for row in self.data.chunks_exact_mut(row_len) {
            let mut left = 0;
            let mut right = self.width as usize - 1;
            while left < right {
                for c in 0..px {
                    row.swap(left * px + c, right * px + c);
                }
                left += 1;
                right -= 1;
            }
        }
    }
}

/// Owns the camera handle; dropping it releases the device
pub trait CaptureDevice: Send {
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// Black-box face-landmark model
pub trait LandmarkEstimator: Send {
    /// Nose-tip position in normalized [0, 1] frame coordinates, or `None`
    /// when no face is visible
    fn nose_tip(&mut self, frame: &Frame) -> Option<Vec2>;
}

/// Most recent published detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoint {
    /// Nose tip in pixel coordinates of the (mirrored) frame
    pub pos: Vec2,
    /// Resolution of the frame the detection came from
    pub frame_size: Vec2,
}

/// Background nose-tracking service
///
/// Single producer (the tracker thread) writing one mutex-guarded slot; the
/// consumer polls [`NoseTracker::position`] without blocking. [`NoseTracker::stop`]
/// is idempotent and joins the thread before returning, which guarantees the
/// capture device has been released.
pub struct NoseTracker {
    running: Arc<AtomicBool>,
    latest: Arc<Mutex<Option<TrackedPoint>>>,
    handle: Option<JoinHandle<()>>,
}

impl NoseTracker {
    /// Start the background capture-and-estimate loop
    pub fn spawn<D, E>(device: D, estimator: E) -> Self
    where
        D: CaptureDevice + 'static,
        E: LandmarkEstimator + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let latest = Arc::new(Mutex::new(None));

        let thread_running = Arc::clone(&running);
        let thread_latest = Arc::clone(&latest);
        let handle = std::thread::spawn(move || {
            track_loop(device, estimator, thread_running, thread_latest);
        });

        Self {
            running,
            latest,
            handle: Some(handle),
        }
    }

    /// Latest known nose position; `None` before the first detection
    pub fn position(&self) -> Option<TrackedPoint> {
        *self
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Horizontal pixel coordinate of the latest detection
    pub fn nose_x(&self) -> Option<f32> {
        self.position().map(|p| p.pos.x)
    }

    /// Signal the loop to exit and block until the thread has joined
    ///
    /// Safe to call more than once; after the first call the device handle
    /// has been released.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("nose tracker thread panicked before joining");
            }
        }
    }
}

impl Drop for NoseTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn track_loop<D, E>(
    mut device: D,
    mut estimator: E,
    running: Arc<AtomicBool>,
    latest: Arc<Mutex<Option<TrackedPoint>>>,
) where
    D: CaptureDevice,
    E: LandmarkEstimator,
{
    while running.load(Ordering::Relaxed) {
        let mut frame = match device.read_frame() {
            Ok(frame) => frame,
            Err(CaptureError::Disconnected) => {
                log::warn!("capture device disconnected, tracking stopped");
                break;
            }
            Err(err) => {
                // Transient: a stalled read just means try again
                log::debug!("camera read failed ({err}), retrying");
                continue;
            }
        };

        frame.flip_horizontal();

        if let Some(norm) = estimator.nose_tip(&frame) {
            let point = TrackedPoint {
                pos: Vec2::new(
                    norm.x * frame.width as f32,
                    norm.y * frame.height as f32,
                ),
                frame_size: Vec2::new(frame.width as f32, frame.height as f32),
            };
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(point);
        }
        // No detection: the published position stays as-is (stale or unknown)
    }
    // device drops here - the capture handle is released exactly once
}
