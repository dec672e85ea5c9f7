//! glyph_canvas: freehand strokes → compact glyphs for character lookup.
//!
//! Collects pen input stroke by stroke, reduces every stroke to its salient
//! vertices, and converts the drawing into a canonical-space [`Glyph`] that
//! an external [`Matcher`] ranks against its reference characters.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use glyph_canvas::{Candidate, Glyph, GlyphSession, MatchError, Matcher, Point, SessionConfig};
//!
//! struct Always;
//!
//! impl Matcher for Always {
//!     fn search(&mut self, _glyph: &Glyph) -> Result<Vec<Candidate>, MatchError> {
//!         Ok(vec![Candidate { character: '一', score: 1.0 }])
//!     }
//! }
//!
//! let mut session = GlyphSession::new(SessionConfig::default(), Always).unwrap();
//! let now = Instant::now();
//! session.pointer_down(Point::new(40.0, 150.0));
//! session.pointer_move(Point::new(150.0, 152.0));
//! session.pointer_up(now);
//! assert_eq!(session.candidate_at(0).map(|c| c.character), Some('一'));
//! ```

#![forbid(unsafe_code)]

mod candidates;
mod glyph_builder;
mod matcher;
mod normalizer;
mod point_stream;
mod session;
mod simplifier;
mod trigger;

pub mod config;
pub mod error;

// Re-export kurbo so hosts build points with the same version.
pub use kurbo;

pub use candidates::CandidateSet;
pub use config::{AutoMatch, SessionConfig};
pub use error::{CanvasError, MatchError};
pub use glyph_builder::build_glyph;
pub use matcher::Matcher;
pub use normalizer::{bounding_box, normalize};
pub use point_stream::PointStream;
pub use session::{GlyphSession, SessionEvent};
pub use simplifier::simplify;
pub use trigger::{RecognitionTrigger, TriggerState};

use serde_derive::{Deserialize, Serialize};

/// A 2D sample. Which space it lives in depends on who produced it.
pub type Point = kurbo::Point;

/// Minimal axis-aligned box around a set of points.
pub type BoundingBox = kurbo::Rect;

/// One pen-down to pen-up trail, in drawing order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Stroke {
        Stroke { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// A whole character, as sent to the matcher.
///
/// Built fresh for every match request; it never shares storage with the
/// strokes being edited.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Glyph {
    pub strokes: Vec<Stroke>,
}

impl Glyph {
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// A ranked character hypothesis returned by the matcher.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub character: char,
    pub score: f32,
}
