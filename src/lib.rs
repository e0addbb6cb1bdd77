//! Nose Breakout - a classic brick-breaker steered by your nose
//!
//! Core modules:
//! - `geom`: Line clipping and circle rasterization (pure functions)
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tracking`: Webcam nose-tracking input service (background thread)
//! - `render`: Draw-command emission for an external surface
//! - `audio`: Fire-and-forget sound cues

pub mod app;
pub mod audio;
pub mod geom;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tracking;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep target (60 Hz)
    pub const TICK_RATE: u32 = 60;

    /// Logical viewport bounds (also the clipping rectangle)
    pub const X_MIN: f32 = -400.0;
    pub const X_MAX: f32 = 400.0;
    pub const Y_MIN: f32 = -300.0;
    pub const Y_MAX: f32 = 300.0;

    /// Paddle geometry - 100x20 rectangle riding the bottom of the field
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_CENTER_Y: f32 = -250.0;
    /// Paddle center is clamped to this horizontal extent
    pub const PADDLE_CLAMP_X: f32 = 350.0;
    /// Ball bounces off the paddle once its center drops below this line
    pub const PADDLE_HIT_Y: f32 = -230.0;
    /// Vertical band in which falling drops can be caught by the paddle
    pub const CATCH_BAND_LOW: f32 = -260.0;
    pub const CATCH_BAND_HIGH: f32 = -240.0;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 5;
    /// Per-axis launch speed (pixels per tick)
    pub const BALL_START_SPEED: f32 = 4.0;

    /// Walls reflect the ball slightly inside the viewport edges
    pub const WALL_X: f32 = 390.0;
    pub const CEILING_Y: f32 = 290.0;
    /// Crossing this line is a life loss, not a bounce
    pub const FLOOR_Y: f32 = -300.0;

    /// Brick field layout
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_SPACING: f32 = 10.0;
    pub const BRICK_FIELD_LEFT: f32 = -395.0;
    pub const BRICK_START_Y: f32 = 150.0;

    /// Scoring and speed ramp
    pub const SCORE_PER_BRICK: u32 = 10;
    /// Ball speed is permanently multiplied once per crossed milestone
    pub const SPEED_RAMP_MILESTONE: u32 = 100;
    pub const SPEED_RAMP_FACTOR: f32 = 1.05;

    /// Lives and falling drops
    pub const MAX_LIVES: u8 = 3;
    /// Chance to spawn a power-up/life-charge pair on life loss
    pub const PICKUP_CHANCE: f64 = 0.3;
    /// Fall speeds in pixels per tick
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    pub const CHARGE_FALL_SPEED: f32 = 2.0;
    /// Charges survive a little past the floor before being discarded
    pub const CHARGE_DISCARD_Y: f32 = -320.0;
}
