//! Nose Breakout entry point
//!
//! Wires the game application together and runs a session. The capture
//! device, landmark model, audio backend, and render surface are trait seams;
//! this binary plugs in a synthetic camera and a logging surface so a full
//! session can run headless. Real backends implement the same traits.

use std::f32::consts::TAU;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use nose_breakout::app::App;
use nose_breakout::audio::AudioManager;
use nose_breakout::consts::TICK_RATE;
use nose_breakout::render::{DrawCommand, RenderSurface};
use nose_breakout::tracking::{
    CaptureDevice, CaptureError, Frame, LandmarkEstimator, NoseTracker,
};
use nose_breakout::Settings;

const SETTINGS_PATH: &str = "nose-breakout.json";
const FRAME_W: u32 = 640;
const FRAME_H: u32 = 480;

/// Synthetic camera producing blank frames at the standard capture size
struct SyntheticCamera;

impl CaptureDevice for SyntheticCamera {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        std::thread::sleep(std::time::Duration::from_millis(33));
        Ok(Frame::new(
            FRAME_W,
            FRAME_H,
            3,
            vec![0; (FRAME_W * FRAME_H * 3) as usize],
        ))
    }
}

/// Fake landmark model sweeping the nose across the frame
struct SweepEstimator {
    t: f32,
}

impl LandmarkEstimator for SweepEstimator {
    fn nose_tip(&mut self, _frame: &Frame) -> Option<Vec2> {
        self.t += 0.02;
        Some(Vec2::new(0.5 + 0.4 * (self.t * TAU * 0.05).sin(), 0.5))
    }
}

/// Render surface that reports session progress once a second
struct LogSurface {
    frames: u64,
}

impl RenderSurface for LogSurface {
    fn present(&mut self, commands: &[DrawCommand]) {
        if self.frames % u64::from(TICK_RATE) == 0 {
            log::debug!("frame {}: {} draw commands", self.frames, commands.len());
        }
        self.frames += 1;
    }
}

fn main() {
    env_logger::init();
    log::info!("Nose Breakout starting...");

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Session seed: {}", seed);

    let mut app = App::new(
        seed,
        settings,
        AudioManager::disabled(),
        Box::new(|| {
            Some(NoseTracker::spawn(SyntheticCamera, SweepEstimator {
                t: 0.0,
            }))
        }),
    );

    let mut surface = LogSurface { frames: 0 };
    app.start();
    app.run(&mut surface);

    log::info!(
        "Session over: {:?}, score {}, lives {}",
        app.phase(),
        app.state.score,
        app.state.lives
    );
}
