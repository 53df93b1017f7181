use std::collections::BTreeMap;

use crate::core::{DepthPoint, GridPoint, Rgb};

/// A named, coloured collection of 2-D polylines parsed from the text grammar.
///
/// Names are not required to be unique across a parse result; duplicates
/// coexist as separate entries in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolylineSet {
    pub name: String,
    pub display_colour: Rgb,
    pub polylines: Vec<Vec<GridPoint>>,
}

impl PolylineSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_colour: Rgb::BLUE,
            polylines: Vec::new(),
        }
    }

    pub fn with_colour(name: impl Into<String>, colour: Rgb) -> Self {
        Self {
            name: name.into(),
            display_colour: colour,
            polylines: Vec::new(),
        }
    }

    pub fn add_polylines(&mut self, polylines: impl IntoIterator<Item = Vec<GridPoint>>) {
        self.polylines.extend(polylines);
    }
}

/// A named cable pattern from the 3-D library: authored stroke colour plus
/// depth-aware polylines.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pattern {
    pub color: Rgb,
    pub polylines: Vec<Vec<DepthPoint>>,
}

/// Pattern name to pattern, loaded once at startup and immutable afterwards.
///
/// BTreeMap keeps key iteration (and therefore any default-pattern pick)
/// deterministic.
pub type PatternLibrary = BTreeMap<String, Pattern>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_display_colour_is_blue() {
        assert_eq!(PolylineSet::new("cable1").display_colour, Rgb::BLUE);
    }

    #[test]
    fn pattern_decodes_from_tuple_style_json() {
        let json = r#"{ "color": [255, 0, 0], "polylines": [[[0, 0, -5], [1, 1, 5]]] }"#;
        let p: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(p.color, Rgb::new(255, 0, 0));
        assert_eq!(p.polylines[0][1], DepthPoint::new(1, 1, 5));
    }
}
