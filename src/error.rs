/// Crate-wide result alias.
pub type CablegridResult<T> = Result<T, CablegridError>;

/// Error taxonomy for the pattern pipeline.
///
/// `Parse` covers per-statement trouble in the 2-D text grammar (usually
/// logged and recovered, not returned), `Library` covers the fatal 3-D
/// pattern-library load path, and `Render` covers frame assembly and
/// rasterization.
#[derive(thiserror::Error, Debug)]
pub enum CablegridError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("library error: {0}")]
    Library(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CablegridError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn library(msg: impl Into<String>) -> Self {
        Self::Library(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
