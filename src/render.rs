//! Draw-command emission
//!
//! The core never touches a window or GPU; each frame it assembles a list of
//! [`DrawCommand`]s in the logical coordinate space and hands it to an
//! external [`RenderSurface`]. Polygons arrive pre-clipped, so a surface can
//! rasterize them blindly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::geom::clipped_circle_outline;
use crate::sim::{GamePhase, GameState};

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const SCORE_YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
pub const BRICK_RED: Color = [0.8, 0.0, 0.0, 1.0];
pub const STAR_GRAY: Color = [0.2, 0.2, 0.2, 1.0];
pub const BUTTON_BLUE: Color = [0.0, 0.0, 0.55, 1.0];
pub const POWERUP_GOLD: Color = [1.0, 0.85, 0.2, 1.0];
pub const CHARGE_GREEN: Color = [0.3, 1.0, 0.4, 1.0];

/// Text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing primitive for the external surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled polygon; the vertex chain is closed (first == last)
    FilledPolygon { points: Vec<Vec2>, color: Color },
    /// Small filled dot
    Dot { pos: Vec2, size: f32, color: Color },
    /// Text write
    Text {
        pos: Vec2,
        text: String,
        size: u32,
        align: TextAlign,
        color: Color,
    },
}

/// Rendering surface seam; `present` receives one whole frame
pub trait RenderSurface {
    fn present(&mut self, commands: &[DrawCommand]);
}

/// A background star with a twinkle cycle
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub twinkle_speed: f32,
    pub phase: f32,
}

impl Star {
    /// Size modulated by the per-star sinusoid at the given frame
    pub fn size_at(&self, frame: u64) -> f32 {
        self.size + (self.phase + frame as f32 * self.twinkle_speed).sin() * 0.3
    }
}

/// Generate the fixed background starfield
pub fn starfield(rng: &mut Pcg32, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random_range(X_MIN..=X_MAX),
                rng.random_range(Y_MIN..=Y_MAX),
            ),
            size: rng.random_range(1.0..=3.0),
            twinkle_speed: rng.random_range(0.05..=0.2),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        })
        .collect()
}

/// Start/Restart button placement (hit band x in [-50, 50], y in [-120, -80])
pub const BUTTON_CENTER: Vec2 = Vec2::new(0.0, -100.0);
pub const BUTTON_WIDTH: f32 = 100.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Pointer hit test for the start/restart button
pub fn button_hit(pos: Vec2) -> bool {
    (pos.x - BUTTON_CENTER.x).abs() <= BUTTON_WIDTH / 2.0
        && (pos.y - BUTTON_CENTER.y).abs() <= BUTTON_HEIGHT / 2.0
}

fn rect_polygon(center: Vec2, width: f32, height: f32) -> Vec<Vec2> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    vec![
        Vec2::new(center.x - half_w, center.y - half_h),
        Vec2::new(center.x - half_w, center.y + half_h),
        Vec2::new(center.x + half_w, center.y + half_h),
        Vec2::new(center.x + half_w, center.y - half_h),
        Vec2::new(center.x - half_w, center.y - half_h),
    ]
}

fn button(commands: &mut Vec<DrawCommand>, label: &str) {
    commands.push(DrawCommand::FilledPolygon {
        points: rect_polygon(BUTTON_CENTER, BUTTON_WIDTH, BUTTON_HEIGHT),
        color: BUTTON_BLUE,
    });
    commands.push(DrawCommand::Text {
        pos: BUTTON_CENTER - Vec2::new(0.0, 10.0),
        text: label.to_string(),
        size: 16,
        align: TextAlign::Center,
        color: WHITE,
    });
}

fn score_text(commands: &mut Vec<DrawCommand>, score: u32) {
    commands.push(DrawCommand::Text {
        pos: Vec2::new(-350.0, 250.0),
        text: format!("Score: {score}"),
        size: 16,
        align: TextAlign::Left,
        color: SCORE_YELLOW,
    });
}

/// Assemble the draw-command list for one frame
pub fn draw_frame(state: &GameState, stars: &[Star], frame: u64) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(stars.len() + state.bricks.len() + 16);

    for star in stars {
        commands.push(DrawCommand::Dot {
            pos: star.pos,
            size: star.size_at(frame),
            color: STAR_GRAY,
        });
    }

    match state.phase {
        GamePhase::Title => {
            commands.push(DrawCommand::Text {
                pos: Vec2::new(0.0, 50.0),
                text: "Breakout Game".to_string(),
                size: 36,
                align: TextAlign::Center,
                color: WHITE,
            });
            commands.push(DrawCommand::Text {
                pos: Vec2::new(0.0, -10.0),
                text: "Move your nose to steer - break all bricks".to_string(),
                size: 16,
                align: TextAlign::Center,
                color: WHITE,
            });
            button(&mut commands, "Start");
        }

        GamePhase::Playing => {
            for brick in state.bricks.iter().filter(|b| b.alive) {
                commands.push(DrawCommand::FilledPolygon {
                    points: rect_polygon(brick.pos, BRICK_WIDTH, BRICK_HEIGHT),
                    color: BRICK_RED,
                });
            }

            let mut paddle: Vec<Vec2> = state.paddle.vertices.to_vec();
            paddle.push(state.paddle.vertices[0]);
            commands.push(DrawCommand::FilledPolygon {
                points: paddle,
                color: WHITE,
            });

            let ball = clipped_circle_outline(state.ball.pos, state.ball.radius);
            if !ball.is_empty() {
                commands.push(DrawCommand::FilledPolygon {
                    points: ball,
                    color: WHITE,
                });
            }

            for pickup in &state.pickups {
                let color = match pickup.kind {
                    crate::sim::PickupKind::PowerUp => POWERUP_GOLD,
                    crate::sim::PickupKind::LifeCharge => CHARGE_GREEN,
                };
                commands.push(DrawCommand::Dot {
                    pos: pickup.pos,
                    size: 8.0,
                    color,
                });
            }

            // Life icons along the top-right edge
            for i in 0..state.lives {
                commands.push(DrawCommand::Dot {
                    pos: Vec2::new(300.0 + i as f32 * 40.0, 260.0),
                    size: 10.0,
                    color: POWERUP_GOLD,
                });
            }

            score_text(&mut commands, state.score);
        }

        GamePhase::GameOver => {
            commands.push(DrawCommand::Text {
                pos: Vec2::ZERO,
                text: format!("Game Over!\nFinal Score: {}", state.score),
                size: 36,
                align: TextAlign::Center,
                color: WHITE,
            });
            button(&mut commands, "Restart");
        }

        GamePhase::Win => {
            commands.push(DrawCommand::Text {
                pos: Vec2::ZERO,
                text: format!("You Win!\nFinal Score: {}", state.score),
                size: 36,
                align: TextAlign::Center,
                color: WHITE,
            });
            button(&mut commands, "Restart");
        }
    }

    commands
}
