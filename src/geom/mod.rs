//! Geometry kernel: viewport clipping and circle rasterization
//!
//! Pure functions, no state. Everything operates in the logical coordinate
//! space X in [-400, 400], Y in [-300, 300].

pub mod clip;
pub mod raster;

pub use clip::{clip_line, compute_outcode, INSIDE, LEFT, RIGHT, BOTTOM, TOP};
pub use raster::{circle_outline, clipped_circle_outline};
