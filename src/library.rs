use std::path::Path;

use crate::{
    error::{CablegridError, CablegridResult},
    model::PatternLibrary,
};

/// Load the static 3-D pattern library from a JSON file.
///
/// The file is a single mapping from pattern name to `{ color, polylines }`,
/// decoded structurally. Unlike the 2-D text grammar there is no per-entry
/// recovery: a missing file or a malformed document is fatal to startup.
pub fn load_library(path: &Path) -> CablegridResult<PatternLibrary> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        CablegridError::library(format!("read pattern library '{}': {err}", path.display()))
    })?;
    let library: PatternLibrary = serde_json::from_str(&text).map_err(|err| {
        CablegridError::library(format!("parse pattern library '{}': {err}", path.display()))
    })?;
    tracing::debug!(patterns = library.len(), "loaded pattern library");
    Ok(library)
}
