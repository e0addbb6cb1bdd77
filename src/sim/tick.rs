//! Fixed timestep simulation tick
//!
//! Advances one frame of ball physics and collision resolution in a fixed
//! order: integrate, paddle, walls, bricks, life loss, falling pickups,
//! terminal checks. Events for audio/UI side effects are pushed into the
//! caller's buffer.

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Pickup, PickupKind};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested paddle center x (from nose tracking or pointer); `None`
    /// leaves the paddle where it is
    pub target_x: Option<f32>,
}

/// Advance the game state by one frame
///
/// Does nothing outside the `Playing` phase; terminal phases stay terminal
/// until an explicit restart.
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    if let Some(x) = input.target_x {
        state.paddle.move_to(x);
    }

    // 1. Integrate
    state.ball.pos += state.ball.vel;

    // 2. Paddle: force the ball upward and lift it out of the collision band
    if state.ball.pos.y < PADDLE_HIT_Y && state.paddle.spans_x(state.ball.pos.x) {
        state.ball.vel.y = state.ball.vel.y.abs();
        state.ball.pos.y = PADDLE_HIT_Y + state.ball.radius_f();
        events.push(GameEvent::PaddleHit);
    }

    // 3. Walls: side and ceiling reflect; the floor is a life loss, handled below
    if state.ball.pos.x > WALL_X {
        state.ball.vel.x = -state.ball.vel.x.abs();
        state.ball.pos.x = WALL_X - state.ball.radius_f();
    } else if state.ball.pos.x < -WALL_X {
        state.ball.vel.x = state.ball.vel.x.abs();
        state.ball.pos.x = -WALL_X + state.ball.radius_f();
    }
    if state.ball.pos.y > CEILING_Y {
        state.ball.vel.y = -state.ball.vel.y.abs();
        state.ball.pos.y = CEILING_Y - state.ball.radius_f();
    }

    // 4. Bricks: at most one brick breaks per frame (intentional)
    for brick in state.bricks.iter_mut().filter(|b| b.alive) {
        if !brick.contains(state.ball.pos) {
            continue;
        }
        brick.alive = false;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += SCORE_PER_BRICK;
        events.push(GameEvent::BrickBreak);

        // One-time 5% speed ramp each time the score crosses a new
        // multiple of 100
        if state.score / SPEED_RAMP_MILESTONE > state.last_speed_increase / SPEED_RAMP_MILESTONE {
            state.ball.vel *= SPEED_RAMP_FACTOR;
            state.last_speed_increase = state.score;
            events.push(GameEvent::SpeedRamp);
            log::info!(
                "Speed increased at score {}: vel ({:.2}, {:.2})",
                state.score,
                state.ball.vel.x,
                state.ball.vel.y
            );
        }
        break;
    }

    // 5. Life loss: ball fell through the floor
    if state.ball.pos.y < FLOOR_Y {
        state.lives = state.lives.saturating_sub(1);
        state.reset_ball();
        events.push(GameEvent::LifeLost);
        log::info!("Life lost, {} remaining", state.lives);

        if state.rng.random_bool(PICKUP_CHANCE) {
            state
                .pickups
                .push(Pickup::spawn(PickupKind::PowerUp, &mut state.rng));
            state
                .pickups
                .push(Pickup::spawn(PickupKind::LifeCharge, &mut state.rng));
        }
    }

    // 6. Falling pickups: move, collect in the paddle band, discard off-screen
    for pickup in &mut state.pickups {
        pickup.pos.y -= pickup.kind.fall_speed();
        if pickup.catchable_by(&state.paddle) {
            pickup.collected = true;
            state.lives = (state.lives + 1).min(MAX_LIVES);
            events.push(GameEvent::PickupCollected);
        }
    }
    state
        .pickups
        .retain(|p| !p.collected && p.pos.y >= p.kind.discard_y());

    // Terminal checks
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!("Game over, final score {}", state.score);
    } else if state.live_bricks() == 0 {
        state.phase = GamePhase::Win;
        events.push(GameEvent::GameWin);
        log::info!("All bricks cleared, final score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state
    }

    fn run_tick(state: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        tick(state, &TickInput::default(), &mut events);
        events
    }

    #[test]
    fn tick_is_a_noop_outside_playing() {
        let mut state = GameState::new(1);
        let pos = state.ball.pos;
        let events = run_tick(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn paddle_input_is_clamped() {
        let mut state = playing_state();
        let mut events = Vec::new();
        tick(
            &mut state,
            &TickInput {
                target_x: Some(10_000.0),
            },
            &mut events,
        );
        assert_eq!(state.paddle.center.x, PADDLE_CLAMP_X);
    }

    #[test]
    fn paddle_bounce_forces_upward_velocity() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(0.0, -230.0);
        state.ball.vel = Vec2::new(0.0, -4.0);
        let events = run_tick(&mut state);
        assert!(events.contains(&GameEvent::PaddleHit));
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.ball.pos.y, PADDLE_HIT_Y + BALL_RADIUS as f32);
    }

    #[test]
    fn ball_misses_paddle_outside_its_span() {
        let mut state = playing_state();
        state.paddle.move_to(300.0);
        state.ball.pos = Vec2::new(-300.0, -230.0);
        state.ball.vel = Vec2::new(0.0, -4.0);
        let events = run_tick(&mut state);
        assert!(!events.contains(&GameEvent::PaddleHit));
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn side_walls_reflect_and_reposition() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(389.0, 0.0);
        state.ball.vel = Vec2::new(4.0, 0.1);
        run_tick(&mut state);
        assert!(state.ball.vel.x < 0.0);
        assert_eq!(state.ball.pos.x, WALL_X - BALL_RADIUS as f32);

        state.ball.pos = Vec2::new(-389.0, 0.0);
        state.ball.vel = Vec2::new(-4.0, 0.1);
        run_tick(&mut state);
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.ball.pos.x, -WALL_X + BALL_RADIUS as f32);
    }

    #[test]
    fn ceiling_reflects_downward() {
        let mut state = playing_state();
        state.ball.pos = Vec2::new(0.0, 289.0);
        state.ball.vel = Vec2::new(0.1, 4.0);
        run_tick(&mut state);
        assert!(state.ball.vel.y < 0.0);
        assert_eq!(state.ball.pos.y, CEILING_Y - BALL_RADIUS as f32);
    }

    #[test]
    fn brick_hit_scores_and_flips_velocity_once() {
        let mut state = playing_state();
        // Park two live bricks right on top of each other so the ball
        // overlaps both; only the first in iteration order may break.
        state.bricks.truncate(2);
        state.bricks[0].pos = Vec2::new(0.0, 100.0);
        state.bricks[1].pos = Vec2::new(0.0, 100.0);
        state.ball.pos = Vec2::new(0.0, 96.0);
        state.ball.vel = Vec2::new(0.0, 4.0);

        let events = run_tick(&mut state);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::BrickBreak).count(),
            1
        );
        assert_eq!(state.score, SCORE_PER_BRICK);
        assert!(state.ball.vel.y < 0.0, "vertical velocity flipped exactly once");
        assert!(!state.bricks[0].alive);
        assert!(state.bricks[1].alive);
    }

    #[test]
    fn speed_ramp_fires_once_per_milestone() {
        let mut state = playing_state();
        state.score = 90;
        state.bricks[0].pos = Vec2::new(0.0, 100.0);
        state.ball.pos = Vec2::new(0.0, 96.0);
        state.ball.vel = Vec2::new(0.0, 4.0);

        let events = run_tick(&mut state);
        assert!(events.contains(&GameEvent::SpeedRamp));
        assert_eq!(state.score, 100);
        assert_eq!(state.last_speed_increase, 100);
        let ramped = 4.0 * SPEED_RAMP_FACTOR;
        assert!((state.ball.vel.y.abs() - ramped).abs() < 1e-5);

        // 100 -> 110 must not ramp again until 200 is crossed
        let before = state.ball.vel.y.abs();
        state.bricks[1].pos = Vec2::new(200.0, 100.0);
        state.ball.pos = Vec2::new(200.0, 100.0) - state.ball.vel;
        let events = run_tick(&mut state);
        assert!(events.contains(&GameEvent::BrickBreak));
        assert!(!events.contains(&GameEvent::SpeedRamp));
        assert_eq!(state.score, 110);
        assert!((state.ball.vel.y.abs() - before).abs() < 1e-5);
    }

    #[test]
    fn life_loss_resets_ball_and_decrements_lives() {
        let mut state = playing_state();
        // Clear of the paddle's span, or the hit check would rescue the ball
        state.ball.pos = Vec2::new(300.0, -299.0);
        state.ball.vel = Vec2::new(0.0, -4.0);
        let events = run_tick(&mut state);
        assert!(events.contains(&GameEvent::LifeLost));
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert_eq!(state.ball.pos, Vec2::ZERO);
        assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
        assert_eq!(state.ball.vel.y, -BALL_START_SPEED);
    }

    #[test]
    fn game_over_at_zero_lives() {
        let mut state = playing_state();
        state.lives = 1;
        state.ball.pos = Vec2::new(300.0, -299.0);
        state.ball.vel = Vec2::new(0.0, -4.0);
        let events = run_tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver));

        // Terminal phase no longer ticks
        let pos = state.ball.pos;
        let events = run_tick(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn win_when_bricks_run_out_even_on_one_life() {
        let mut state = playing_state();
        state.lives = 1;
        state.bricks.truncate(1);
        state.bricks[0].pos = Vec2::new(0.0, 100.0);
        state.ball.pos = Vec2::new(0.0, 96.0);
        state.ball.vel = Vec2::new(0.0, 4.0);
        let events = run_tick(&mut state);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(events.contains(&GameEvent::GameWin));
    }

    #[test]
    fn pickups_fall_and_get_caught() {
        let mut state = playing_state();
        state.lives = 2;
        state.pickups.push(Pickup {
            kind: PickupKind::LifeCharge,
            pos: Vec2::new(0.0, CATCH_BAND_HIGH + CHARGE_FALL_SPEED),
            collected: false,
        });
        let events = run_tick(&mut state);
        assert!(events.contains(&GameEvent::PickupCollected));
        assert_eq!(state.lives, 3);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn caught_pickup_never_exceeds_max_lives() {
        let mut state = playing_state();
        assert_eq!(state.lives, MAX_LIVES);
        state.pickups.push(Pickup {
            kind: PickupKind::PowerUp,
            pos: Vec2::new(0.0, CATCH_BAND_HIGH + POWERUP_FALL_SPEED),
            collected: false,
        });
        run_tick(&mut state);
        assert_eq!(state.lives, MAX_LIVES);
    }

    #[test]
    fn uncaught_pickups_fall_off_screen() {
        let mut state = playing_state();
        state.paddle.move_to(350.0);
        state.pickups.push(Pickup {
            kind: PickupKind::PowerUp,
            pos: Vec2::new(-300.0, FLOOR_Y + 1.0),
            collected: false,
        });
        run_tick(&mut state);
        assert!(state.pickups.is_empty());
        assert_eq!(state.lives, MAX_LIVES);
    }

    #[test]
    fn pickups_persist_across_frames_until_caught() {
        let mut state = playing_state();
        state.paddle.move_to(-350.0);
        state.pickups.push(Pickup {
            kind: PickupKind::LifeCharge,
            pos: Vec2::new(300.0, 200.0),
            collected: false,
        });
        for _ in 0..10 {
            run_tick(&mut state);
        }
        assert_eq!(state.pickups.len(), 1);
        assert!((state.pickups[0].pos.y - (200.0 - 10.0 * CHARGE_FALL_SPEED)).abs() < 1e-4);
    }
}
