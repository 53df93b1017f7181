//! Cablegrid parses knitting cable-pattern descriptions and projects them
//! onto a dot grid with optional depth cues.
//!
//! Two input flavours feed one rendering pipeline:
//!
//! - the 2-D text grammar (`polyline_set[...] = [...]`), parsed leniently by
//!   [`parse_sets`] and hot-reloaded by [`Reloader`]
//! - the 3-D JSON pattern library, loaded fatally-or-not-at-all by
//!   [`load_library`]
//!
//! [`render::frame_sets`] / [`render::frame_pattern`] turn a model into
//! [`DrawCmd`] primitives, and [`render_cpu::rasterize`] paints them for PNG
//! output.
#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod library;
pub mod model;
pub mod parse;
pub mod project;
pub mod reload;
pub mod render;
pub mod render_cpu;

pub use crate::core::{DepthPoint, GridPoint, Rgb};
pub use crate::error::{CablegridError, CablegridResult};
pub use crate::library::load_library;
pub use crate::model::{Pattern, PatternLibrary, PolylineSet};
pub use crate::parse::{parse_sets, write_sets};
pub use crate::project::{DepthConstants, ProjectedDot, project_point};
pub use crate::reload::{FileProvider, Reloader, SystemFiles};
pub use crate::render::{DrawCmd, Viewport};
