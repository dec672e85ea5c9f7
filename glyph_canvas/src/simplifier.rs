//! Stroke simplification: raw pen trail → salient vertices.
//!
//! Recursive farthest-point reduction (Ramer–Douglas–Peucker family) that
//! works on index ranges of a slice and compares squared distances, so no
//! square root is ever taken.

use super::Point;

/// Reduce `points` to the vertices that deviate from their chord by more
/// than `error_threshold` (a squared distance).
///
/// The first and last point always survive. A single-point stroke comes back
/// as that point twice: a zero-length segment the matcher reads as a dot.
pub fn simplify(points: &[Point], error_threshold: f64) -> Vec<Point> {
    let mut res: Vec<Point> = Vec::new();
    let Some(&first) = points.first() else {
        return res;
    };
    res.push(first);
    push_vertices(points, 0, points.len() - 1, error_threshold, &mut res);
    res
}

// Appends the vertices strictly after first_ix, up to and including last_ix.
// The split point ends one half and is skipped at the start of the other,
// so it lands in the result exactly once.
fn push_vertices(
    points: &[Point],
    first_ix: usize,
    last_ix: usize,
    error_threshold: f64,
    res: &mut Vec<Point>,
) {
    match most_deviant(points, first_ix, last_ix) {
        Some((ix, dist)) if dist > error_threshold => {
            push_vertices(points, first_ix, ix, error_threshold, res);
            push_vertices(points, ix, last_ix, error_threshold, res);
        }
        _ => res.push(points[last_ix]),
    }
}

// Finds the interior point farthest from the chord first_ix → last_ix.
// Returns its index and squared perpendicular distance.
//
// For chord vector (a, b) and c = last.y * first.x - last.x * first.y,
// |a * p.y - b * p.x + c| is the deviation scaled by the chord length,
// so its square over (a² + b²) is the squared distance. Ties keep the
// earliest point; a zero-length chord has no meaningful distance.
fn most_deviant(points: &[Point], first_ix: usize, last_ix: usize) -> Option<(usize, f64)> {
    if last_ix <= first_ix + 1 {
        return None;
    }
    let first = points[first_ix];
    let last = points[last_ix];
    let a = last.x - first.x;
    let b = last.y - first.y;
    let c = last.y * first.x - last.x * first.y;

    let mut max = 0f64;
    let mut most_ix = None;
    for (ix, p) in points.iter().enumerate().take(last_ix).skip(first_ix + 1) {
        let dist = (a * p.y - b * p.x + c).abs();
        if dist > max {
            max = dist;
            most_ix = Some(ix);
        }
    }

    let denom = a * a + b * b;
    if denom == 0.0 {
        return None;
    }
    most_ix.map(|ix| (ix, max * max / denom))
}
