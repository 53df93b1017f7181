pub use kurbo::{Point, Vec2};

/// 8-bit RGB colour as authored in pattern files.
///
/// Serialized as a 3-tuple `[r, g, b]` so the JSON library format matches the
/// authored `(r,g,b)` shape of the text grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(u8, u8, u8)", into = "(u8, u8, u8)")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default display colour for sets authored without one.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Dot colour when depth cues are disabled.
    pub const DARK_GREY: Rgb = Rgb::new(100, 100, 100);
    /// Background grid line colour.
    pub const GRID_GREY: Rgb = Rgb::new(200, 200, 200);
    /// Frame background.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Equal-channel grey.
    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

/// Authored 2-D grid coordinate (cell units, not pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<GridPoint> for (i32, i32) {
    fn from(p: GridPoint) -> Self {
        (p.x, p.y)
    }
}

/// Authored 3-D grid coordinate.
///
/// `z` is conventionally in `[-5, 5]` but that range is not validated; the
/// depth-cue derivations clamp or saturate instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(i32, i32, i32)", into = "(i32, i32, i32)")]
pub struct DepthPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl DepthPoint {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<(i32, i32, i32)> for DepthPoint {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

impl From<DepthPoint> for (i32, i32, i32) {
    fn from(p: DepthPoint) -> Self {
        (p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_json_is_a_tuple() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[1,2,3]");
        let back: Rgb = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn depth_point_json_is_a_tuple() {
        let p: DepthPoint = serde_json::from_str("[4, 2, -5]").unwrap();
        assert_eq!(p, DepthPoint::new(4, 2, -5));
    }
}
