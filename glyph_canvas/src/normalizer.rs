//! Fit the drawing into a fixed share of the canvas, centered.

use kurbo::{Affine, Vec2};

use super::error::CanvasError;
use super::{BoundingBox, Stroke};

/// Box enclosing every point of every stroke.
///
/// Fails on a drawing with no points rather than inventing a box.
pub fn bounding_box(strokes: &[Stroke]) -> Result<BoundingBox, CanvasError> {
    let mut points = strokes.iter().flat_map(|stroke| stroke.points.iter());
    let first = points.next().ok_or(CanvasError::EmptyInput)?;
    let mut res = BoundingBox::new(first.x, first.y, first.x, first.y);
    for pt in points {
        if pt.x < res.x0 { res.x0 = pt.x; }
        if pt.x > res.x1 { res.x1 = pt.x; }
        if pt.y < res.y0 { res.y0 = pt.y; }
        if pt.y > res.y1 { res.y1 = pt.y; }
    }
    Ok(res)
}

/// Rescale the strokes in place so their box spans `canvas_size * fill_ratio`
/// on each axis, then move the box to the middle of the canvas.
///
/// An axis with zero extent (a dot, a perfectly straight stroke) keeps its
/// scale and is only centered.
pub fn normalize(strokes: &mut [Stroke], canvas_size: f64, fill_ratio: f64) -> Result<(), CanvasError> {
    let target = canvas_size * fill_ratio;

    let bbox = bounding_box(strokes)?;
    let x_scale = axis_scale(target, bbox.width());
    let y_scale = axis_scale(target, bbox.height());
    transform(strokes, Affine::scale_non_uniform(x_scale, y_scale));

    // Box moved with the scale; measure again before centering
    let bbox = bounding_box(strokes)?;
    let dx = (canvas_size - bbox.width()) / 2.0 - bbox.x0;
    let dy = (canvas_size - bbox.height()) / 2.0 - bbox.y0;
    transform(strokes, Affine::translate(Vec2::new(dx, dy)));

    tracing::debug!(
        "normalized {} strokes: scale ({:.3}, {:.3}), shift ({:.1}, {:.1})",
        strokes.len(), x_scale, y_scale, dx, dy,
    );
    Ok(())
}

fn axis_scale(target: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        target / extent
    } else {
        1.0
    }
}

fn transform(strokes: &mut [Stroke], affine: Affine) {
    for stroke in strokes.iter_mut() {
        for pt in stroke.points.iter_mut() {
            *pt = affine * *pt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    const EPSILON: f64 = 1e-9;

    fn stroke(coords: &[(f64, f64)]) -> Stroke {
        Stroke::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn test_bounding_box() {
        let strokes = vec![
            stroke(&[(10.0, 20.0), (30.0, 60.0)]),
            stroke(&[(50.0, 25.0), (20.0, 40.0)]),
        ];
        let bbox = bounding_box(&strokes).unwrap();
        assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 50.0, 60.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(matches!(bounding_box(&[]), Err(CanvasError::EmptyInput)));
        assert!(matches!(bounding_box(&[Stroke::default()]), Err(CanvasError::EmptyInput)));
    }

    #[test]
    fn test_normalize_fills_and_centers() {
        let mut strokes = vec![
            stroke(&[(10.0, 20.0), (30.0, 60.0)]),
            stroke(&[(50.0, 25.0), (20.0, 40.0)]),
        ];
        normalize(&mut strokes, 300.0, 0.7).unwrap();
        let bbox = bounding_box(&strokes).unwrap();
        assert!((bbox.width() - 210.0).abs() < EPSILON);
        assert!((bbox.height() - 210.0).abs() < EPSILON);
        assert!((bbox.center().x - 150.0).abs() < EPSILON);
        assert!((bbox.center().y - 150.0).abs() < EPSILON);
        // Drawing order untouched
        assert!((strokes[0].points[0].x - 45.0).abs() < EPSILON);
        assert!((strokes[1].points[1].x - 97.5).abs() < EPSILON);
        assert!((strokes[1].points[1].y - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_twice_is_stable() {
        let mut strokes = vec![
            stroke(&[(3.0, 7.0), (91.0, 12.0), (40.0, 80.0)]),
            stroke(&[(15.0, 66.0), (70.0, 61.0)]),
        ];
        normalize(&mut strokes, 240.0, 0.7).unwrap();
        let first = bounding_box(&strokes).unwrap();
        normalize(&mut strokes, 240.0, 0.7).unwrap();
        let second = bounding_box(&strokes).unwrap();
        assert!((first.x0 - second.x0).abs() < EPSILON);
        assert!((first.y0 - second.y0).abs() < EPSILON);
        assert!((first.x1 - second.x1).abs() < EPSILON);
        assert!((first.y1 - second.y1).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_horizontal_stroke() {
        let mut strokes = vec![stroke(&[(10.0, 40.0), (60.0, 40.0)])];
        normalize(&mut strokes, 300.0, 0.7).unwrap();
        let bbox = bounding_box(&strokes).unwrap();
        assert!((bbox.width() - 210.0).abs() < EPSILON);
        assert_eq!(bbox.height(), 0.0);
        assert!((bbox.y0 - 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_single_dot() {
        let mut strokes = vec![stroke(&[(12.0, 250.0)])];
        normalize(&mut strokes, 300.0, 0.7).unwrap();
        assert_eq!(strokes[0].points[0], Point::new(150.0, 150.0));
    }

    #[test]
    fn test_normalize_empty() {
        let mut strokes: Vec<Stroke> = Vec::new();
        assert!(matches!(normalize(&mut strokes, 300.0, 0.7), Err(CanvasError::EmptyInput)));
    }
}
