//! Frame assembly: turn parsed models into an ordered list of drawing
//! primitives. The primitives are what the canvas collaborator consumes; the
//! in-crate CPU rasterizer ([`crate::render_cpu`]) is one such consumer.

use crate::{
    core::{Point, Rgb, Vec2},
    model::{Pattern, PolylineSet},
    project::{self, DepthConstants},
};

/// One drawing primitive, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
    },
    Polyline {
        points: Vec<Point>,
        color: Rgb,
        width: f64,
    },
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Background grid lines every `cell_size` pixels, inset by `inset` on all
/// sides. The 2-D window uses a zero inset, the depth window insets by the
/// grid margin.
pub fn grid_cmds(viewport: Viewport, inset: f64, cell_size: f64) -> Vec<DrawCmd> {
    let mut cmds = Vec::new();
    let w = f64::from(viewport.width);
    let h = f64::from(viewport.height);

    let mut x = inset;
    while x < w - inset {
        cmds.push(DrawCmd::Polyline {
            points: vec![Point::new(x, inset), Point::new(x, h - inset)],
            color: Rgb::GRID_GREY,
            width: 1.0,
        });
        x += cell_size;
    }
    let mut y = inset;
    while y < h - inset {
        cmds.push(DrawCmd::Polyline {
            points: vec![Point::new(inset, y), Point::new(w - inset, y)],
            color: Rgb::GRID_GREY,
            width: 1.0,
        });
        y += cell_size;
    }
    cmds
}

/// Assemble one 2-D frame: background grid, then per-set dots and strokes.
///
/// Every point gets a fixed-size dark-grey dot; polylines with at least two
/// points additionally get an open stroke in the set's display colour.
/// Shorter polylines stay dots-only.
#[tracing::instrument(skip(sets, constants))]
pub fn frame_sets(
    sets: &[PolylineSet],
    viewport: Viewport,
    constants: &DepthConstants,
) -> Vec<DrawCmd> {
    let mut cmds = grid_cmds(viewport, 0.0, constants.cell_size);

    for set in sets {
        for polyline in &set.polylines {
            let screen: Vec<Point> = polyline
                .iter()
                .map(|&p| project::layout_position(p, Vec2::ZERO, constants.cell_size))
                .collect();

            for &pos in &screen {
                cmds.push(DrawCmd::Circle {
                    center: pos,
                    radius: constants.base_radius,
                    color: Rgb::DARK_GREY,
                });
            }
            if screen.len() > 1 {
                cmds.push(DrawCmd::Polyline {
                    points: screen,
                    color: set.display_colour,
                    width: 2.0,
                });
            }
        }
    }

    cmds
}

/// Assemble one 3-D frame for a single pattern: margin-inset grid, then per
/// point a depth-cued dot and per polyline (two points or more) an open
/// stroke in the pattern's authored colour. The stroke colour never depends
/// on the depth toggle; only dots do.
#[tracing::instrument(skip(pattern, constants))]
pub fn frame_pattern(
    pattern: &Pattern,
    depth_enabled: bool,
    viewport: Viewport,
    constants: &DepthConstants,
) -> Vec<DrawCmd> {
    let mut cmds = grid_cmds(viewport, constants.margin, constants.cell_size);
    let center = viewport.center();

    for polyline in &pattern.polylines {
        let mut screen = Vec::with_capacity(polyline.len());
        for &p in polyline {
            let dot = project::project_point(p, depth_enabled, center, constants);
            screen.push(dot.position);
            cmds.push(DrawCmd::Circle {
                center: dot.position,
                radius: dot.radius,
                color: dot.color,
            });
        }
        if screen.len() > 1 {
            cmds.push(DrawCmd::Polyline {
                points: screen,
                color: pattern.color,
                width: 1.0,
            });
        }
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DepthPoint, GridPoint};
    use crate::model::PolylineSet;

    fn viewport() -> Viewport {
        Viewport::new(800, 800)
    }

    #[test]
    fn grid_covers_viewport_without_inset() {
        let cmds = grid_cmds(viewport(), 0.0, 20.0);
        // 40 vertical + 40 horizontal lines for an 800px square, 20px cells
        assert_eq!(cmds.len(), 80);
    }

    #[test]
    fn single_point_polyline_gets_no_stroke() {
        let mut set = PolylineSet::new("lonely");
        set.add_polylines([vec![GridPoint::new(1, 1)]]);
        let cmds = frame_sets(&[set], viewport(), &DepthConstants::default());
        let strokes = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Polyline { width, .. } if *width == 2.0))
            .count();
        let dots = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
            .count();
        assert_eq!(strokes, 0);
        assert_eq!(dots, 1);
    }

    #[test]
    fn pattern_stroke_keeps_authored_colour_under_depth() {
        let pattern = Pattern {
            color: Rgb::new(200, 30, 40),
            polylines: vec![vec![
                DepthPoint::new(0, 0, -5),
                DepthPoint::new(1, 1, 0),
                DepthPoint::new(2, 0, 5),
            ]],
        };
        for depth in [false, true] {
            let cmds = frame_pattern(&pattern, depth, viewport(), &DepthConstants::default());
            let stroke = cmds
                .iter()
                .find_map(|c| match c {
                    DrawCmd::Polyline { color, width, .. } if *width == 1.0 => Some(*color),
                    _ => None,
                })
                .unwrap();
            assert_eq!(stroke, pattern.color);
        }
    }
}
