//! Minimal CPU rasterizer for [`DrawCmd`] lists.
//!
//! Stands in for the windowing canvas: filled circles and stroked open
//! polylines over a solid background, good enough for PNG frame output and
//! for pixel-level tests. No antialiasing.

use image::{Rgba, RgbaImage};

use crate::{
    core::{Point, Rgb},
    render::{DrawCmd, Viewport},
};

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgb) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    img.put_pixel(x as u32, y as u32, Rgba([color.r, color.g, color.b, 255]));
}

fn fill_circle(img: &mut RgbaImage, center: Point, radius: f64, color: Rgb) {
    let r = radius.max(0.0);
    let x0 = (center.x - r).floor() as i64;
    let x1 = (center.x + r).ceil() as i64;
    let y0 = (center.y - r).floor() as i64;
    let y1 = (center.y + r).ceil() as i64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            if dx * dx + dy * dy <= r * r {
                put(img, x, y, color);
            }
        }
    }
}

/// Capsule fill: every pixel within `width / 2` of the segment.
fn stroke_segment(img: &mut RgbaImage, a: Point, b: Point, width: f64, color: Rgb) {
    let half = (width / 2.0).max(0.5);
    let x0 = (a.x.min(b.x) - half).floor() as i64;
    let x1 = (a.x.max(b.x) + half).ceil() as i64;
    let y0 = (a.y.min(b.y) - half).floor() as i64;
    let y1 = (a.y.max(b.y) + half).ceil() as i64;

    let ab = b - a;
    let len2 = ab.hypot2();

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let t = if len2 == 0.0 {
                0.0
            } else {
                ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
            };
            let nearest = a + ab * t;
            if (p - nearest).hypot2() <= half * half {
                put(img, x, y, color);
            }
        }
    }
}

/// Paint a command list onto a fresh surface.
pub fn rasterize(cmds: &[DrawCmd], viewport: Viewport, background: Rgb) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        viewport.width,
        viewport.height,
        Rgba([background.r, background.g, background.b, 255]),
    );

    for cmd in cmds {
        match cmd {
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => fill_circle(&mut img, *center, *radius, *color),
            DrawCmd::Polyline {
                points,
                color,
                width,
            } => {
                for pair in points.windows(2) {
                    stroke_segment(&mut img, pair[0], pair[1], *width, *color);
                }
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_paints_center_and_leaves_background() {
        let cmds = vec![DrawCmd::Circle {
            center: Point::new(10.0, 10.0),
            radius: 3.0,
            color: Rgb::new(10, 20, 30),
        }];
        let img = rasterize(&cmds, Viewport::new(32, 32), Rgb::WHITE);
        assert_eq!(img.get_pixel(10, 10).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(30, 30).0, [255, 255, 255, 255]);
    }

    #[test]
    fn stroke_paints_along_the_segment() {
        let cmds = vec![DrawCmd::Polyline {
            points: vec![Point::new(2.0, 16.0), Point::new(30.0, 16.0)],
            color: Rgb::new(0, 0, 0),
            width: 2.0,
        }];
        let img = rasterize(&cmds, Viewport::new(32, 32), Rgb::WHITE);
        assert_eq!(img.get_pixel(16, 16).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(16, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn offscreen_geometry_is_clipped_not_panicking() {
        let cmds = vec![DrawCmd::Circle {
            center: Point::new(-5.0, -5.0),
            radius: 10.0,
            color: Rgb::new(1, 1, 1),
        }];
        let img = rasterize(&cmds, Viewport::new(8, 8), Rgb::WHITE);
        assert_eq!(img.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }
}
