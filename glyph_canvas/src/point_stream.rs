use super::{Point, Stroke};

/// Raw samples of the stroke currently being drawn.
///
/// No deduplication or smoothing happens here; later stages want the
/// trail exactly as the pen produced it.
#[derive(Debug, Default)]
pub struct PointStream {
    // None while the pen is up
    points: Option<Vec<Point>>,
}

impl PointStream {
    pub fn new() -> PointStream {
        PointStream { points: None }
    }

    /// Start a new stroke. Any unfinished stroke is dropped.
    pub fn begin(&mut self) {
        self.points = Some(Vec::new());
    }

    /// Append a sample, starting a stroke if none is in progress.
    /// Returns the previous last point so the host can draw the new segment.
    pub fn append(&mut self, p: Point) -> Option<Point> {
        let points = self.points.get_or_insert_with(Vec::new);
        let prev = points.last().copied();
        points.push(p);
        prev
    }

    /// Hand over the accumulated points. Nothing comes out of an empty stroke.
    pub fn finish(&mut self) -> Option<Stroke> {
        match self.points.take() {
            Some(points) if !points.is_empty() => Some(Stroke::new(points)),
            _ => None,
        }
    }

    pub fn discard(&mut self) {
        self.points = None;
    }

    pub fn is_active(&self) -> bool {
        self.points.is_some()
    }

    pub fn len(&self) -> usize {
        self.points.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_keeps_raw_order() {
        let mut stream = PointStream::new();
        stream.begin();
        assert_eq!(stream.append(Point::new(1.0, 1.0)), None);
        assert_eq!(stream.append(Point::new(1.0, 1.0)), Some(Point::new(1.0, 1.0)));
        assert_eq!(stream.append(Point::new(4.0, 2.0)), Some(Point::new(1.0, 1.0)));
        let stroke = stream.finish().unwrap();
        // Duplicates survive
        assert_eq!(stroke.points, vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(4.0, 2.0)]);
        assert!(!stream.is_active());
    }

    #[test]
    fn test_finish_without_points() {
        let mut stream = PointStream::new();
        assert!(stream.finish().is_none());
        stream.begin();
        assert!(stream.is_active());
        assert!(stream.finish().is_none());
        assert!(!stream.is_active());
    }

    #[test]
    fn test_discard() {
        let mut stream = PointStream::new();
        stream.append(Point::new(3.0, 3.0));
        assert!(stream.is_active());
        assert_eq!(stream.len(), 1);
        stream.discard();
        assert!(stream.is_empty());
        assert!(stream.finish().is_none());
    }
}
