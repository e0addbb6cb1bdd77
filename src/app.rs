//! Game loop driver and state machine
//!
//! Phases: Title -> Playing -> {GameOver, Win} -> restart -> Title.
//! `Playing` runs as an explicit fixed-rate loop (sleep-to-target, 60 Hz)
//! rather than a self-rescheduling callback, so long sessions never grow the
//! call stack. Each iteration reads the tracker, advances the simulation one
//! tick, dispatches audio cues, and presents a frame; no tick overlaps the
//! next.

use std::time::{Duration, Instant};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::TICK_RATE;
use crate::render::{self, DrawCommand, RenderSurface, Star};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tracking::{NoseTracker, TrackedPoint};

/// Builds a fresh tracking service; called at startup and on every restart.
/// Returning `None` (no camera) leaves the game playable by pointer.
pub type TrackerFactory = Box<dyn FnMut() -> Option<NoseTracker>>;

/// Map a published nose detection to a paddle target x
///
/// The nose offset from the frame center is scaled by the tracking gain;
/// the simulation clamps the result to the paddle range.
pub fn nose_to_screen_x(point: &TrackedPoint, gain: f32) -> f32 {
    (point.pos.x - point.frame_size.x / 2.0) * gain
}

/// Top-level game application
pub struct App {
    pub state: GameState,
    settings: Settings,
    audio: AudioManager,
    stars: Vec<Star>,
    tracker: Option<NoseTracker>,
    make_tracker: TrackerFactory,
    /// One-shot paddle target from the last pointer click
    pointer_x: Option<f32>,
    frame: u64,
    events: Vec<GameEvent>,
}

impl App {
    pub fn new(
        seed: u64,
        settings: Settings,
        mut audio: AudioManager,
        mut make_tracker: TrackerFactory,
    ) -> Self {
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        audio.play(SoundEffect::Intro);

        let mut star_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let stars = render::starfield(&mut star_rng, settings.star_count);
        let tracker = make_tracker();
        if tracker.is_none() {
            log::warn!("No tracking service - paddle is pointer-only");
        }

        Self {
            state: GameState::new(seed),
            settings,
            audio,
            stars,
            tracker,
            make_tracker,
            pointer_x: None,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Pointer click: button presses on static screens, paddle steering
    /// while playing
    pub fn handle_click(&mut self, pos: Vec2) {
        match self.state.phase {
            GamePhase::Title => {
                if render::button_hit(pos) {
                    self.start();
                }
            }
            GamePhase::Playing => {
                self.pointer_x = Some(pos.x);
            }
            GamePhase::GameOver | GamePhase::Win => {
                if render::button_hit(pos) {
                    self.restart();
                }
            }
        }
    }

    /// Leave the title screen and begin play
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Title {
            return;
        }
        self.audio.play(SoundEffect::StartGame);
        self.state.start();
    }

    /// Tear down the session and return to the title screen
    ///
    /// The tracking service is stopped (joining its thread and releasing the
    /// camera) and a fresh one is created.
    pub fn restart(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
        self.tracker = (self.make_tracker)();
        self.state.restart();
        self.pointer_x = None;
        log::info!("Session restarted");
    }

    /// Paddle target for this tick: freshest tracking detection, else the
    /// last pointer click, else hold position
    fn paddle_target(&mut self) -> Option<f32> {
        let tracked = self
            .tracker
            .as_ref()
            .and_then(|t| t.position())
            .map(|p| nose_to_screen_x(&p, self.settings.tracking_gain));
        tracked.or_else(|| self.pointer_x.take())
    }

    /// Advance the simulation one tick and fire audio cues
    pub fn step(&mut self) {
        let input = TickInput {
            target_x: self.paddle_target(),
        };
        self.events.clear();
        tick(&mut self.state, &input, &mut self.events);
        self.audio.play_events(&self.events);
        self.frame += 1;
    }

    /// Assemble this frame's draw commands
    pub fn draw(&self) -> Vec<DrawCommand> {
        render::draw_frame(&self.state, &self.stars, self.frame)
    }

    /// Drive the fixed-rate playing loop until a terminal phase
    ///
    /// Returns immediately when not in `Playing`. The terminal frame (end
    /// screen) is presented before returning.
    pub fn run(&mut self, surface: &mut dyn RenderSurface) {
        let period = Duration::from_secs(1) / TICK_RATE;
        let mut next_tick = Instant::now() + period;

        while self.state.phase == GamePhase::Playing {
            self.step();
            surface.present(&self.draw());

            // Sleep to the target rate; a slow frame skips the nap and the
            // schedule re-anchors rather than spiraling
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
                next_tick += period;
            } else {
                next_tick = now + period;
            }
        }
        surface.present(&self.draw());
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    struct CountingSurface {
        frames: usize,
    }

    impl RenderSurface for CountingSurface {
        fn present(&mut self, _commands: &[DrawCommand]) {
            self.frames += 1;
        }
    }

    fn test_app() -> App {
        App::new(
            5,
            Settings::default(),
            AudioManager::disabled(),
            Box::new(|| None),
        )
    }

    #[test]
    fn click_on_button_starts_the_game() {
        let mut app = test_app();
        app.handle_click(Vec2::new(200.0, 200.0));
        assert_eq!(app.phase(), GamePhase::Title);
        app.handle_click(Vec2::new(0.0, -100.0));
        assert_eq!(app.phase(), GamePhase::Playing);
    }

    #[test]
    fn click_steers_the_paddle_while_playing() {
        let mut app = test_app();
        app.start();
        app.handle_click(Vec2::new(120.0, 0.0));
        app.step();
        assert_eq!(app.state.paddle.center.x, 120.0);

        // The click is one-shot; the paddle then holds position
        app.step();
        assert_eq!(app.state.paddle.center.x, 120.0);
    }

    #[test]
    fn nose_mapping_scales_the_center_offset() {
        let point = TrackedPoint {
            pos: Vec2::new(480.0, 100.0),
            frame_size: Vec2::new(640.0, 480.0),
        };
        assert_eq!(nose_to_screen_x(&point, 2.0), 320.0);

        let centered = TrackedPoint {
            pos: Vec2::new(320.0, 240.0),
            frame_size: Vec2::new(640.0, 480.0),
        };
        assert_eq!(nose_to_screen_x(&centered, 2.0), 0.0);
    }

    #[test]
    fn run_stops_on_terminal_phase() {
        let mut app = test_app();
        app.start();
        // One brick left, ball about to clear it
        app.state.bricks.truncate(1);
        app.state.bricks[0].pos = Vec2::new(0.0, 100.0);
        app.state.ball.pos = Vec2::new(0.0, 96.0);
        app.state.ball.vel = Vec2::new(0.0, 4.0);

        let mut surface = CountingSurface { frames: 0 };
        app.run(&mut surface);
        assert_eq!(app.phase(), GamePhase::Win);
        // At least the winning tick plus the end screen
        assert!(surface.frames >= 2);
    }

    #[test]
    fn restart_returns_to_title_with_fresh_session() {
        let mut app = test_app();
        app.start();
        app.state.lives = 1;
        // Clear of the paddle's span so the descent costs the last life
        app.state.ball.pos = Vec2::new(300.0, -299.0);
        app.state.ball.vel = Vec2::new(0.0, -4.0);
        app.step();
        assert_eq!(app.phase(), GamePhase::GameOver);

        app.handle_click(Vec2::new(0.0, -100.0));
        assert_eq!(app.phase(), GamePhase::Title);
        assert_eq!(app.state.score, 0);
        assert_eq!(app.state.lives, MAX_LIVES);
        assert!(app.state.bricks.is_empty());
    }
}
