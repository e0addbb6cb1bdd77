//! Cohen-Sutherland line clipping against the logical viewport
//!
//! Endpoints are classified with a 4-bit outcode; the segment is trivially
//! accepted when both codes are zero, trivially rejected when the codes share
//! a set bit, and otherwise the outside endpoint is pulled onto the violated
//! edge with a parametric intersection until one of the two cases applies.

use glam::Vec2;

use crate::consts::{X_MAX, X_MIN, Y_MAX, Y_MIN};

pub const INSIDE: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;
pub const BOTTOM: u8 = 4;
pub const TOP: u8 = 8;

/// Classify a point relative to the clipping rectangle
pub fn compute_outcode(p: Vec2) -> u8 {
    let mut code = INSIDE;
    if p.x < X_MIN {
        code |= LEFT;
    } else if p.x > X_MAX {
        code |= RIGHT;
    }
    if p.y < Y_MIN {
        code |= BOTTOM;
    } else if p.y > Y_MAX {
        code |= TOP;
    }
    code
}

/// Clip a line segment to the viewport
///
/// Returns the clipped endpoints, or `None` when the segment lies entirely
/// outside the rectangle. Segments fully inside are returned unchanged.
///
/// Axis-aligned segments are handled explicitly: an edge with zero extent on
/// one axis can only violate that axis on both endpoints at once (which is a
/// trivial reject), so the corresponding intersection is never computed with
/// a zero divisor.
pub fn clip_line(mut p1: Vec2, mut p2: Vec2) -> Option<(Vec2, Vec2)> {
    let mut outcode1 = compute_outcode(p1);
    let mut outcode2 = compute_outcode(p2);

    loop {
        if outcode1 == INSIDE && outcode2 == INSIDE {
            return Some((p1, p2));
        }
        if outcode1 & outcode2 != 0 {
            return None;
        }

        // At least one endpoint is outside; clip it against one violated edge.
        let outcode = if outcode1 != INSIDE { outcode1 } else { outcode2 };
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;

        let clipped = if outcode & TOP != 0 {
            let x = if dy == 0.0 {
                p1.x
            } else {
                p1.x + dx * (Y_MAX - p1.y) / dy
            };
            Vec2::new(x, Y_MAX)
        } else if outcode & BOTTOM != 0 {
            let x = if dy == 0.0 {
                p1.x
            } else {
                p1.x + dx * (Y_MIN - p1.y) / dy
            };
            Vec2::new(x, Y_MIN)
        } else if outcode & RIGHT != 0 {
            let y = if dx == 0.0 {
                p1.y
            } else {
                p1.y + dy * (X_MAX - p1.x) / dx
            };
            Vec2::new(X_MAX, y)
        } else {
            let y = if dx == 0.0 {
                p1.y
            } else {
                p1.y + dy * (X_MIN - p1.x) / dx
            };
            Vec2::new(X_MIN, y)
        };

        if outcode == outcode1 {
            p1 = clipped;
            outcode1 = compute_outcode(p1);
        } else {
            p2 = clipped;
            outcode2 = compute_outcode(p2);
        }
    }
}
