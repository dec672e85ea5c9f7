use thiserror::Error;

/// Errors surfaced by a glyph session.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CanvasError {
    #[error("no strokes drawn")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("match failed: {0}")]
    Matcher(#[from] MatchError),
}

/// Errors a matcher reports back for a search.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatchError {
    #[error("matcher unavailable: {0}")]
    Unavailable(String),

    #[error("reference database is empty")]
    EmptyDatabase,
}
