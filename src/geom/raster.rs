//! Midpoint circle rasterization
//!
//! Generates the ball outline as a closed polygon: integer-incremental
//! midpoint steps with 8-way symmetry, deduplicated, ordered by angle around
//! the center so the polygon does not self-intersect, then subsampled for a
//! smoother fill.

use glam::Vec2;

use super::clip::clip_line;

/// Target vertex count after subsampling
const OUTLINE_POINTS: usize = 24;

/// Rasterize a circle outline as a closed polygon (first point == last)
///
/// `center` may be fractional; the midpoint steps are computed in integer
/// offsets from it. Returns an empty vec for non-positive radii.
pub fn circle_outline(center: Vec2, radius: i32) -> Vec<Vec2> {
    if radius <= 0 {
        return Vec::new();
    }

    let mut offsets: Vec<(i32, i32)> = Vec::with_capacity(radius as usize * 8 + 8);
    let mut x = 0i32;
    let mut y = radius;
    let mut d = 1 - radius;

    push_octants(&mut offsets, x, y);
    while x < y {
        x += 1;
        if d < 0 {
            d += 2 * x + 1;
        } else {
            y -= 1;
            d += 2 * (x - y) + 1;
        }
        push_octants(&mut offsets, x, y);
    }

    // The octant mirrors overlap on the axes and diagonals
    offsets.sort_unstable();
    offsets.dedup();

    // Order by angle around the center for a proper polygon
    offsets.sort_by(|a, b| {
        let angle_a = (a.1 as f32).atan2(a.0 as f32);
        let angle_b = (b.1 as f32).atan2(b.0 as f32);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let step = (offsets.len() / OUTLINE_POINTS).max(1);
    let mut points: Vec<Vec2> = offsets
        .iter()
        .step_by(step)
        .map(|&(ox, oy)| center + Vec2::new(ox as f32, oy as f32))
        .collect();

    // Close the polygon
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn push_octants(offsets: &mut Vec<(i32, i32)>, x: i32, y: i32) {
    offsets.extend_from_slice(&[
        (x, y),
        (x, -y),
        (-x, y),
        (-x, -y),
        (y, x),
        (y, -x),
        (-y, x),
        (-y, -x),
    ]);
}

/// Rasterize a circle outline and clip it to the viewport
///
/// Each successive edge of the closed outline is clipped independently and
/// the surviving pieces are reassembled into one vertex chain. A clipped
/// edge whose start equals the chain's current tail is not duplicated. The
/// chain is re-closed before returning so it can be filled directly.
///
/// Returns an empty vec when the whole circle is outside the viewport.
pub fn clipped_circle_outline(center: Vec2, radius: i32) -> Vec<Vec2> {
    let outline = circle_outline(center, radius);
    if outline.len() < 2 {
        return Vec::new();
    }

    let mut chain: Vec<Vec2> = Vec::with_capacity(outline.len());
    for pair in outline.windows(2) {
        let Some((c1, c2)) = clip_line(pair[0], pair[1]) else {
            continue;
        };
        if chain.last() != Some(&c1) {
            chain.push(c1);
        }
        chain.push(c2);
    }

    if chain.len() > 1 && chain.first() != chain.last() {
        chain.push(chain[0]);
    }
    chain
}
