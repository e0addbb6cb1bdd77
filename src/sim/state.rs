//! Game state and core simulation types
//!
//! All entities are owned by the session object; nothing lives in globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    Title,
    /// Active gameplay
    Playing,
    /// Run ended with no lives left; restart is explicit
    GameOver,
    /// All bricks cleared; restart is explicit
    Win,
}

/// Events emitted by the simulation for audio/UI side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit,
    BrickBreak,
    SpeedRamp,
    LifeLost,
    PickupCollected,
    GameOver,
    GameWin,
}

/// The ball entity
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed for the whole session
    pub radius: i32,
}

impl Ball {
    /// Ball at the origin serving down-right at base speed
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(BALL_START_SPEED, -BALL_START_SPEED),
            radius: BALL_RADIUS,
        }
    }

    /// Ball radius as f32 for position corrections
    #[inline]
    pub fn radius_f(&self) -> f32 {
        self.radius as f32
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle: an axis-aligned 100x20 rectangle
///
/// Kept as an ordered vertex list (the render path fills it as a polygon)
/// plus a center point for translation and clamping.
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left, bottom-left, bottom-right, top-right
    pub vertices: [Vec2; 4],
    pub center: Vec2,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl Paddle {
    /// Paddle centered at the given x
    pub fn at(center_x: f32) -> Self {
        let cx = center_x.clamp(-PADDLE_CLAMP_X, PADDLE_CLAMP_X);
        let half_w = PADDLE_WIDTH / 2.0;
        let half_h = PADDLE_HEIGHT / 2.0;
        let cy = PADDLE_CENTER_Y;
        Self {
            vertices: [
                Vec2::new(cx - half_w, cy - half_h),
                Vec2::new(cx - half_w, cy + half_h),
                Vec2::new(cx + half_w, cy + half_h),
                Vec2::new(cx + half_w, cy - half_h),
            ],
            center: Vec2::new(cx, cy),
        }
    }

    /// Translate horizontally so the center lands on `x`, clamped to the field
    pub fn move_to(&mut self, x: f32) {
        let target = x.clamp(-PADDLE_CLAMP_X, PADDLE_CLAMP_X);
        let tx = target - self.center.x;
        for v in &mut self.vertices {
            v.x += tx;
        }
        self.center.x += tx;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - PADDLE_WIDTH / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + PADDLE_WIDTH / 2.0
    }

    /// Horizontal catch test shared by ball bounce and drop collection
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.left() < x && x < self.right()
    }
}

/// A destructible brick
#[derive(Debug, Clone, Copy)]
pub struct Brick {
    /// Center position
    pub pos: Vec2,
    pub alive: bool,
}

impl Brick {
    /// Ball-center vs. brick AABB test
    pub fn contains(&self, point: Vec2) -> bool {
        let half_w = BRICK_WIDTH / 2.0;
        let half_h = BRICK_HEIGHT / 2.0;
        self.pos.x - half_w < point.x
            && point.x < self.pos.x + half_w
            && self.pos.y - half_h < point.y
            && point.y < self.pos.y + half_h
    }
}

/// What a falling pickup grants when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Extra-life capsule falling at 3 px/tick
    PowerUp,
    /// Slower life charge falling at 2 px/tick
    LifeCharge,
}

impl PickupKind {
    pub fn fall_speed(&self) -> f32 {
        match self {
            PickupKind::PowerUp => POWERUP_FALL_SPEED,
            PickupKind::LifeCharge => CHARGE_FALL_SPEED,
        }
    }

    /// Vertical position below which an uncollected drop is discarded
    pub fn discard_y(&self) -> f32 {
        match self {
            PickupKind::PowerUp => FLOOR_Y,
            PickupKind::LifeCharge => CHARGE_DISCARD_Y,
        }
    }
}

/// A falling collectible (power-up or life-charge)
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl Pickup {
    /// Spawn at a random x along the top edge
    pub fn spawn(kind: PickupKind, rng: &mut Pcg32) -> Self {
        Self {
            kind,
            pos: Vec2::new(rng.random_range(-PADDLE_CLAMP_X..=PADDLE_CLAMP_X), Y_MAX),
            collected: false,
        }
    }

    /// True when the drop sits in the paddle catch band
    pub fn catchable_by(&self, paddle: &Paddle) -> bool {
        !self.collected
            && (CATCH_BAND_LOW..=CATCH_BAND_HIGH).contains(&self.pos.y)
            && paddle.left() <= self.pos.x
            && self.pos.x <= paddle.right()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Score at which the last speed ramp fired (milestone marker)
    pub last_speed_increase: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub pickups: Vec<Pickup>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            score: 0,
            lives: MAX_LIVES,
            last_speed_increase: 0,
            paddle: Paddle::default(),
            ball: Ball::new(),
            bricks: Vec::new(),
            pickups: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Build the rows x cols brick grid
    pub fn init_bricks(&mut self) {
        self.bricks.clear();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let x = BRICK_FIELD_LEFT
                    + col as f32 * (BRICK_WIDTH + BRICK_SPACING)
                    + BRICK_WIDTH / 2.0;
                let y = BRICK_START_Y - row as f32 * (BRICK_HEIGHT + BRICK_SPACING);
                self.bricks.push(Brick {
                    pos: Vec2::new(x, y),
                    alive: true,
                });
            }
        }
    }

    /// Leave the title screen and begin play
    pub fn start(&mut self) {
        if self.phase != GamePhase::Title {
            return;
        }
        self.score = 0;
        self.lives = MAX_LIVES;
        self.last_speed_increase = 0;
        self.init_bricks();
        self.ball = Ball::new();
        self.paddle = Paddle::default();
        self.pickups.clear();
        self.phase = GamePhase::Playing;
        log::info!("Game started (seed {})", self.seed);
    }

    /// Tear down all entities and return to the title screen
    pub fn restart(&mut self) {
        self.phase = GamePhase::Title;
        self.score = 0;
        self.lives = MAX_LIVES;
        self.last_speed_increase = 0;
        self.ball = Ball::new();
        self.paddle = Paddle::default();
        self.bricks.clear();
        self.pickups.clear();
        self.time_ticks = 0;
    }

    /// Cumulative speed factor from milestones reached so far
    pub fn speed_scale(&self) -> f32 {
        let milestones = self.last_speed_increase / SPEED_RAMP_MILESTONE;
        SPEED_RAMP_FACTOR.powi(milestones as i32)
    }

    /// Reset the ball to the origin after a life loss
    ///
    /// Horizontal direction is randomized; both components carry the
    /// cumulative milestone speed scale so a reset never undoes the ramp.
    pub fn reset_ball(&mut self) {
        let scale = self.speed_scale();
        let dir: f32 = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Vec2::ZERO;
        self.ball.vel = Vec2::new(
            dir * BALL_START_SPEED * scale,
            -BALL_START_SPEED * scale,
        );
    }

    /// Count of bricks still standing
    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddle_clamps_to_field() {
        let mut paddle = Paddle::default();
        paddle.move_to(10_000.0);
        assert_eq!(paddle.center.x, PADDLE_CLAMP_X);
        paddle.move_to(-10_000.0);
        assert_eq!(paddle.center.x, -PADDLE_CLAMP_X);
    }

    #[test]
    fn paddle_vertices_follow_the_center() {
        let mut paddle = Paddle::default();
        paddle.move_to(100.0);
        assert_eq!(paddle.vertices[0], Vec2::new(50.0, -260.0));
        assert_eq!(paddle.vertices[2], Vec2::new(150.0, -240.0));
        assert_eq!(paddle.center, Vec2::new(100.0, PADDLE_CENTER_Y));
    }

    #[test]
    fn brick_grid_has_full_population() {
        let mut state = GameState::new(1);
        state.init_bricks();
        assert_eq!(state.bricks.len(), (BRICK_ROWS * BRICK_COLS) as usize);
        assert_eq!(state.live_bricks(), state.bricks.len());
        // First brick sits against the left edge of the field
        assert_eq!(state.bricks[0].pos, Vec2::new(-360.0, 150.0));
    }

    #[test]
    fn brick_aabb_test() {
        let brick = Brick {
            pos: Vec2::new(0.0, 100.0),
            alive: true,
        };
        assert!(brick.contains(Vec2::new(0.0, 100.0)));
        assert!(brick.contains(Vec2::new(30.0, 110.0)));
        assert!(!brick.contains(Vec2::new(40.0, 100.0)));
        assert!(!brick.contains(Vec2::new(0.0, 120.0)));
    }

    #[test]
    fn restart_resets_everything() {
        let mut state = GameState::new(7);
        state.start();
        state.score = 230;
        state.last_speed_increase = 200;
        state.lives = 1;
        state.ball.pos = Vec2::new(50.0, 50.0);
        state.pickups.push(Pickup {
            kind: PickupKind::PowerUp,
            pos: Vec2::new(0.0, 0.0),
            collected: false,
        });

        state.restart();
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert_eq!(state.ball.vel, Vec2::new(BALL_START_SPEED, -BALL_START_SPEED));
        assert!(state.bricks.is_empty());
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn ball_reset_keeps_the_speed_ramp() {
        let mut state = GameState::new(3);
        state.start();
        state.last_speed_increase = 200; // two milestones
        state.reset_ball();
        let expected = BALL_START_SPEED * SPEED_RAMP_FACTOR * SPEED_RAMP_FACTOR;
        assert!((state.ball.vel.x.abs() - expected).abs() < 1e-5);
        assert!((state.ball.vel.y - -expected).abs() < 1e-5);
    }

    #[test]
    fn speed_scale_counts_milestones() {
        let mut state = GameState::new(1);
        assert_eq!(state.speed_scale(), 1.0);
        state.last_speed_increase = 100;
        assert!((state.speed_scale() - 1.05).abs() < 1e-6);
        state.last_speed_increase = 310;
        assert!((state.speed_scale() - 1.05f32.powi(3)).abs() < 1e-6);
    }
}
