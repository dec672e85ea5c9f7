use super::simplifier::simplify;
use super::{Glyph, Stroke};

/// Convert committed strokes (model space) into a canonical-space glyph.
///
/// Each stroke is simplified against `error_threshold`, which is expressed in
/// model space, and only then scaled by `canonical_size / canvas_size`.
/// Stroke order and point order are kept. No strokes in, no strokes out.
pub fn build_glyph(
    strokes: &[Stroke],
    canvas_size: f64,
    canonical_size: f64,
    error_threshold: f64,
) -> Glyph {
    let ratio = canonical_size / canvas_size;
    let strokes = strokes
        .iter()
        .map(|stroke| {
            let points = simplify(&stroke.points, error_threshold)
                .into_iter()
                .map(|pt| (pt.to_vec2() * ratio).to_point())
                .collect();
            Stroke::new(points)
        })
        .collect();
    Glyph { strokes }
}
