use super::error::MatchError;
use super::{Candidate, Glyph};

/// Looks up a glyph in a reference collection.
///
/// Implementations own the database and the scoring; the session only
/// stores the ranked list they hand back. Glyphs arrive in canonical space
/// and are never empty.
pub trait Matcher {
    fn search(&mut self, glyph: &Glyph) -> Result<Vec<Candidate>, MatchError>;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn search(&mut self, glyph: &Glyph) -> Result<Vec<Candidate>, MatchError> {
        (**self).search(glyph)
    }
}

impl<M: Matcher + ?Sized> Matcher for &mut M {
    fn search(&mut self, glyph: &Glyph) -> Result<Vec<Candidate>, MatchError> {
        (**self).search(glyph)
    }
}
