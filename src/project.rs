//! Depth-cue math: pure functions from an authored point (plus the depth
//! toggle and a constants block) to screen position, dot radius, and dot
//! colour. None of these hold state; the frame assembler in [`crate::render`]
//! calls them point by point.

use crate::core::{DepthPoint, GridPoint, Point, Rgb, Vec2};

/// Tunables for the projection stage.
///
/// Defaults match the historical visualizer: 20 px cells, a 50 px margin,
/// dots of base radius 5 clamped to 2..=10, and a 0.05 perspective factor.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DepthConstants {
    pub cell_size: f64,
    pub margin: f64,
    pub perspective_factor: f64,
    pub base_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for DepthConstants {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            margin: 50.0,
            perspective_factor: 0.05,
            base_radius: 5.0,
            min_radius: 2.0,
            max_radius: 10.0,
        }
    }
}

/// A fully projected dot, ready for the canvas collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedDot {
    pub position: Point,
    pub radius: f64,
    pub color: Rgb,
}

/// Orthographic 2-D layout: `origin + point * cell_size`.
pub fn layout_position(p: GridPoint, origin: Vec2, cell_size: f64) -> Point {
    Point::new(
        origin.x + f64::from(p.x) * cell_size,
        origin.y + f64::from(p.y) * cell_size,
    )
}

fn base_position(p: DepthPoint, constants: &DepthConstants) -> Point {
    Point::new(
        constants.margin + f64::from(p.x) * constants.cell_size,
        constants.margin + f64::from(p.y) * constants.cell_size,
    )
}

/// Screen position of a 3-D point.
///
/// With depth disabled this is the orthographic base position regardless of
/// `z`. With depth enabled the point is pushed away from (or pulled toward)
/// the viewport center by `perspective_factor * z * (base - center)`.
pub fn screen_position(
    p: DepthPoint,
    depth_enabled: bool,
    center: Point,
    constants: &DepthConstants,
) -> Point {
    let base = base_position(p, constants);
    if !depth_enabled {
        return base;
    }
    let shift = (base - center) * (constants.perspective_factor * f64::from(p.z));
    base + shift
}

/// Dot radius: constant base radius with depth disabled, otherwise scaled by
/// `1 + z/5` and clamped to `[min_radius, max_radius]`.
pub fn dot_radius(z: i32, depth_enabled: bool, constants: &DepthConstants) -> f64 {
    if !depth_enabled {
        return constants.base_radius;
    }
    let scaled = constants.base_radius * (1.0 + f64::from(z) / 5.0);
    scaled.clamp(constants.min_radius, constants.max_radius)
}

/// Dot colour: fixed dark grey with depth disabled, otherwise a greyscale
/// ramp mapping the conventional z range `[-5, 5]` onto brightness 0..=255.
/// Out-of-range z saturates rather than erroring.
pub fn dot_color(z: i32, depth_enabled: bool) -> Rgb {
    if !depth_enabled {
        return Rgb::DARK_GREY;
    }
    let brightness = 255.0 * ((f64::from(z) + 5.0) / 10.0);
    Rgb::grey(brightness.clamp(0.0, 255.0) as u8)
}

/// Project one 3-D point into its drawable attributes.
pub fn project_point(
    p: DepthPoint,
    depth_enabled: bool,
    center: Point,
    constants: &DepthConstants,
) -> ProjectedDot {
    ProjectedDot {
        position: screen_position(p, depth_enabled, center, constants),
        radius: dot_radius(p.z, depth_enabled, constants),
        color: dot_color(p.z, depth_enabled),
    }
}

/// Pixel position to fractional grid coordinates, rounded to 2 decimals
/// (the cursor readout of the 2-D window).
pub fn grid_coords(pixel: Point, cell_size: f64) -> (f64, f64) {
    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    (round2(pixel.x / cell_size), round2(pixel.y / cell_size))
}
