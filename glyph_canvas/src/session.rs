//! One character being drawn: input, committed strokes, matching, results.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::candidates::CandidateSet;
use super::config::{AutoMatch, SessionConfig};
use super::error::CanvasError;
use super::glyph_builder::build_glyph;
use super::matcher::Matcher;
use super::normalizer::normalize;
use super::point_stream::PointStream;
use super::trigger::{RecognitionTrigger, TriggerState};
use super::{Candidate, Glyph, Point, Stroke};

/// Things the host may want to react to, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    StrokeAdded { index: usize },
    StrokeReverted,
    Cleared,
    Normalized,
    Matched { count: usize },
    MatchFailed,
}

/// Editing state for one handwritten character.
///
/// All methods run on the host's event thread; the matcher call is the only
/// blocking step. Input-driven calls are ignored while the session is locked.
pub struct GlyphSession<M> {
    // canvas_size follows host resizes
    config: SessionConfig,
    stream: PointStream,
    strokes: Vec<Stroke>,
    trigger: RecognitionTrigger,
    candidates: CandidateSet,
    matcher: M,
    locked: bool,
    // Reference glyph the host overlays while drawing
    preview: Option<Glyph>,
    events: Vec<SessionEvent>,
}

impl<M: Matcher> GlyphSession<M> {
    /// Fails with [`CanvasError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: SessionConfig, matcher: M) -> Result<GlyphSession<M>, CanvasError> {
        config.validate()?;
        let trigger = RecognitionTrigger::new(config.auto_match());
        Ok(GlyphSession {
            config,
            stream: PointStream::new(),
            strokes: Vec::new(),
            trigger,
            candidates: CandidateSet::new(),
            matcher,
            locked: false,
            preview: None,
            events: Vec::new(),
        })
    }

    // ── Input ─────────────────────────────────────────────

    /// Pen down at `p`: starts a stroke with its first sample.
    pub fn pointer_down(&mut self, p: Point) {
        if self.locked {
            return;
        }
        self.begin_stroke();
        self.append_point(p);
    }

    /// Pen moved while down. Ignored when no stroke is in progress.
    pub fn pointer_move(&mut self, p: Point) -> Option<Point> {
        if !self.stream.is_active() {
            return None;
        }
        self.append_point(p)
    }

    pub fn pointer_up(&mut self, now: Instant) -> Option<usize> {
        self.finish_stroke(now)
    }

    /// Start an empty stroke, cancelling any pending auto-match.
    pub fn begin_stroke(&mut self) {
        if self.locked {
            return;
        }
        self.stream.begin();
        self.trigger.begin_stroke();
    }

    /// Add a sample to the current stroke, starting one if needed.
    /// Returns the previous sample so the host can draw the new segment.
    pub fn append_point(&mut self, p: Point) -> Option<Point> {
        if self.locked {
            return None;
        }
        if !self.stream.is_active() {
            self.trigger.begin_stroke();
        }
        self.stream.append(p)
    }

    /// Commit the current stroke. Returns its index, or None if there was
    /// nothing to commit.
    ///
    /// With an immediate auto-match policy the match runs here. Its outcome
    /// is reported only through the candidates and a `Matched` or
    /// `MatchFailed` event; call [`GlyphSession::trigger_match`] to get it as a `Result`.
    pub fn finish_stroke(&mut self, now: Instant) -> Option<usize> {
        if self.locked {
            return None;
        }
        let Some(stroke) = self.stream.finish() else {
            self.trigger.abandon_stroke();
            return None;
        };
        debug!("stroke {} committed with {} points", self.strokes.len() + 1, stroke.len());
        self.strokes.push(stroke);
        let index = self.strokes.len() - 1;
        self.events.push(SessionEvent::StrokeAdded { index });

        if self.trigger.finish_stroke(now) {
            let _ = self.run_match();
        }
        Some(index)
    }

    pub fn discard_stroke(&mut self) {
        if self.locked {
            return;
        }
        self.stream.discard();
        self.trigger.abandon_stroke();
    }

    /// Deliver the clock to a pending auto-match.
    /// Returns the match outcome if the delay expired.
    pub fn poll(&mut self, now: Instant) -> Option<Result<usize, CanvasError>> {
        if self.trigger.poll(now) {
            debug!("auto-match delay expired");
            Some(self.run_match())
        } else {
            None
        }
    }

    // ── Editing ───────────────────────────────────────────

    /// Remove the most recent stroke. Removing the last one clears the session.
    pub fn undo_last_stroke(&mut self) -> Option<Stroke> {
        let stroke = self.strokes.pop()?;
        debug!("stroke {} reverted", self.strokes.len() + 1);
        self.events.push(SessionEvent::StrokeReverted);
        if self.strokes.is_empty() {
            self.clear_all();
        }
        Some(stroke)
    }

    /// Drop every stroke and the candidates, and cancel any pending match.
    pub fn clear_all(&mut self) {
        self.stream.discard();
        self.strokes.clear();
        self.candidates.clear();
        self.trigger.reset();
        self.events.push(SessionEvent::Cleared);
        debug!("session cleared");
    }

    /// Fit the drawing to the canvas and match it again.
    pub fn normalize_and_rematch(&mut self) -> Result<usize, CanvasError> {
        normalize(&mut self.strokes, self.config.canvas_size, self.config.fill_ratio)?;
        self.events.push(SessionEvent::Normalized);
        self.trigger_match()
    }

    // ── Matching ──────────────────────────────────────────

    /// Match now, dropping any pending delay. Returns the number of candidates.
    pub fn trigger_match(&mut self) -> Result<usize, CanvasError> {
        if !self.trigger.request() {
            debug!("match already in flight");
            return Ok(self.candidates.count());
        }
        self.run_match()
    }

    // Expects the trigger in Matching; leaves it Idle, or PendingStroke if the pen is down.
    fn run_match(&mut self) -> Result<usize, CanvasError> {
        let glyph = self.export_glyph();
        let res = if glyph.is_empty() {
            self.candidates.clear();
            Err(CanvasError::EmptyInput)
        } else {
            match self.matcher.search(&glyph) {
                Ok(results) => {
                    let count = results.len();
                    info!("matched {} strokes: {} candidates", glyph.stroke_count(), count);
                    self.candidates.replace(results);
                    self.events.push(SessionEvent::Matched { count });
                    Ok(count)
                }
                Err(err) => {
                    warn!("match failed: {}", err);
                    self.candidates.clear();
                    self.events.push(SessionEvent::MatchFailed);
                    Err(err.into())
                }
            }
        };
        self.trigger.complete();
        if self.stream.is_active() {
            // Matched mid-stroke; the pen is still down
            self.trigger.begin_stroke();
        }
        res
    }

    /// The drawing as a canonical-space glyph, as the matcher sees it.
    pub fn export_glyph(&self) -> Glyph {
        build_glyph(
            &self.strokes,
            self.config.canvas_size,
            self.config.canonical_size,
            self.config.error_threshold(self.config.canvas_size),
        )
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.count()
    }

    pub fn candidate_at(&self, ix: usize) -> Option<&Candidate> {
        self.candidates.nth(ix)
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    // ── Settings and state ────────────────────────────────

    /// Negative = manual only, 0 = match on every stroke, positive = delay in ms.
    pub fn set_auto_match_delay(&mut self, msec: i64) {
        let policy = AutoMatch::from_millis(msec);
        self.config.auto_match_delay_ms = policy.as_millis();
        self.trigger.set_policy(policy);
    }

    pub fn auto_match_delay(&self) -> i64 {
        self.trigger.policy().as_millis()
    }

    /// Ignore input until `unlock`. An unfinished stroke is thrown away.
    pub fn lock(&mut self) {
        if self.stream.is_active() {
            self.stream.discard();
            self.trigger.abandon_stroke();
        }
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The host surface changed size. Strokes stay where they are.
    pub fn set_canvas_size(&mut self, size: f64) {
        if size > 0.0 {
            self.config.canvas_size = size;
        } else {
            warn!("ignoring canvas size {}", size);
        }
    }

    pub fn canvas_size(&self) -> f64 {
        self.config.canvas_size
    }

    pub fn set_preview_glyph(&mut self, glyph: Option<Glyph>) {
        self.preview = glyph;
    }

    pub fn preview_glyph(&self) -> Option<&Glyph> {
        self.preview.as_ref()
    }

    /// True if any point has been drawn, finished or not.
    pub fn has_stroke(&self) -> bool {
        !self.stream.is_empty() || !self.strokes.is_empty()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Committed strokes, in model space.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.matcher
    }

    /// Events since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
