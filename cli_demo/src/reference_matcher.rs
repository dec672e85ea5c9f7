use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glyph_canvas::{Candidate, Glyph, MatchError, Matcher, Point, Stroke};
use serde_derive::Deserialize;

use crate::match_collector::MatchCollector;

// One reference character as stored on disk: strokes of [x, y] pairs in canonical space
#[derive(Deserialize)]
struct ReferenceEntry {
    character: char,
    strokes: Vec<Vec<[f64; 2]>>,
}

struct Reference {
    character: char,
    glyph: Glyph,
}

/// Toy matcher for the demo: compares stroke endpoints of glyphs with the
/// same stroke count. Good enough to exercise the session end to end.
pub struct ReferenceMatcher {
    references: Vec<Reference>,
    limit: usize,
    canonical_size: f64,
}

impl ReferenceMatcher {
    pub fn load(path: &Path, limit: usize, canonical_size: f64) -> Result<ReferenceMatcher, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let entries: Vec<ReferenceEntry> = serde_json::from_reader(BufReader::new(file))?;
        let references = entries
            .into_iter()
            .map(|entry| Reference {
                character: entry.character,
                glyph: Glyph {
                    strokes: entry
                        .strokes
                        .iter()
                        .map(|stroke| Stroke::new(stroke.iter().map(|pt| Point::new(pt[0], pt[1])).collect()))
                        .collect(),
                },
            })
            .collect();
        Ok(ReferenceMatcher {
            references,
            limit: limit.max(1),
            canonical_size,
        })
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }
}

impl Matcher for ReferenceMatcher {
    fn search(&mut self, glyph: &Glyph) -> Result<Vec<Candidate>, MatchError> {
        if self.references.is_empty() {
            return Err(MatchError::EmptyDatabase);
        }
        let mut res: Vec<Candidate> = Vec::with_capacity(self.limit);
        let mut collector = MatchCollector::new(&mut res, self.limit);
        for reference in &self.references {
            if reference.glyph.stroke_count() != glyph.stroke_count() {
                continue;
            }
            let score = score_glyph(glyph, &reference.glyph, self.canonical_size);
            collector.file_match(Candidate {
                character: reference.character,
                score,
            });
        }
        Ok(res)
    }
}

// 1.0 for identical endpoints, falling towards 0 as they drift apart
fn score_glyph(input: &Glyph, reference: &Glyph, canonical_size: f64) -> f32 {
    let mut total = 0f64;
    let mut count = 0;
    for (a, b) in input.strokes.iter().zip(&reference.strokes) {
        if let (Some(a0), Some(a1), Some(b0), Some(b1)) = (a.first(), a.last(), b.first(), b.last()) {
            total += a0.distance(b0) + a1.distance(b1);
            count += 2;
        }
    }
    if count == 0 {
        return 0.0;
    }
    let mean = total / count as f64 / canonical_size;
    (1.0 / (1.0 + 10.0 * mean)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(strokes: &[&[(f64, f64)]]) -> Glyph {
        Glyph {
            strokes: strokes
                .iter()
                .map(|stroke| Stroke::new(stroke.iter().map(|&(x, y)| Point::new(x, y)).collect()))
                .collect(),
        }
    }

    fn matcher() -> ReferenceMatcher {
        ReferenceMatcher {
            references: vec![
                Reference { character: '一', glyph: glyph(&[&[(45.0, 150.0), (255.0, 150.0)]]) },
                Reference { character: '丨', glyph: glyph(&[&[(150.0, 45.0), (150.0, 255.0)]]) },
                Reference {
                    character: '十',
                    glyph: glyph(&[&[(45.0, 150.0), (255.0, 150.0)], &[(150.0, 45.0), (150.0, 255.0)]]),
                },
            ],
            limit: 5,
            canonical_size: 300.0,
        }
    }

    #[test]
    fn test_exact_reference_scores_one() {
        let mut matcher = matcher();
        let res = matcher.search(&glyph(&[&[(45.0, 150.0), (255.0, 150.0)]])).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].character, '一');
        assert_eq!(res[0].score, 1.0);
        assert!(res[1].score < 1.0);
    }

    #[test]
    fn test_stroke_count_filters() {
        let mut matcher = matcher();
        let res = matcher
            .search(&glyph(&[&[(50.0, 140.0), (250.0, 150.0)], &[(140.0, 50.0), (150.0, 250.0)]]))
            .unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].character, '十');
    }

    #[test]
    fn test_empty_database() {
        let mut matcher = ReferenceMatcher { references: Vec::new(), limit: 5, canonical_size: 300.0 };
        assert_eq!(
            matcher.search(&glyph(&[&[(0.0, 0.0), (1.0, 1.0)]])),
            Err(MatchError::EmptyDatabase)
        );
    }
}
