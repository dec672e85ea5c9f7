//! Session parameters.

use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

use crate::error::CanvasError;

/// All session parameters in one struct.
/// Deserializable from JSON so hosts can ship presets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Extent of the drawing surface in model units (square canvas).
    /// Hosts update it on resize through `GlyphSession::set_canvas_size`.
    pub canvas_size: f64,
    /// Reference size of canonical match space.
    pub canonical_size: f64,
    /// Fraction of the canvas the glyph fills after normalization.
    pub fill_ratio: f64,
    /// How far (as a fraction of the canvas size) a point may stray from
    /// its chord before simplification keeps it as a vertex.
    pub vertex_tolerance: f64,
    /// Auto-match policy after each stroke:
    /// negative = manual only, 0 = immediately, positive = delay in ms.
    pub auto_match_delay_ms: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_size: 300.0,
            canonical_size: 300.0,
            fill_ratio: 0.7,
            vertex_tolerance: 0.05,
            auto_match_delay_ms: 0,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON preset. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<SessionConfig, CanvasError> {
        let config: SessionConfig = serde_json::from_str(json)
            .map_err(|e| CanvasError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CanvasError> {
        if !(self.canvas_size > 0.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "canvas_size must be positive, got {}",
                self.canvas_size
            )));
        }
        if !(self.canonical_size > 0.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "canonical_size must be positive, got {}",
                self.canonical_size
            )));
        }
        if !(self.fill_ratio > 0.0 && self.fill_ratio <= 1.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "fill_ratio must be in (0, 1], got {}",
                self.fill_ratio
            )));
        }
        if !(self.vertex_tolerance >= 0.0) {
            return Err(CanvasError::InvalidConfig(format!(
                "vertex_tolerance must not be negative, got {}",
                self.vertex_tolerance
            )));
        }
        Ok(())
    }

    /// Squared-distance bound for simplification on a canvas of `canvas_size`.
    ///
    /// The simplifier compares squared distances, so the bound grows with the
    /// square of the canvas size: 5% of 300 gives 15², i.e. 225.
    pub fn error_threshold(&self, canvas_size: f64) -> f64 {
        let deviation = self.vertex_tolerance * canvas_size;
        deviation * deviation
    }

    pub fn auto_match(&self) -> AutoMatch {
        AutoMatch::from_millis(self.auto_match_delay_ms)
    }
}

/// When a finished stroke leads to a match request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoMatch {
    /// Only explicit requests match.
    Manual,
    /// Match as soon as the stroke is committed.
    Immediate,
    /// Match once no new stroke has started for this long.
    After(Duration),
}

impl AutoMatch {
    pub fn from_millis(msec: i64) -> AutoMatch {
        if msec < 0 {
            AutoMatch::Manual
        } else if msec == 0 {
            AutoMatch::Immediate
        } else {
            AutoMatch::After(Duration::from_millis(msec as u64))
        }
    }

    /// Inverse of `from_millis`; `Manual` reads back as -1.
    pub fn as_millis(&self) -> i64 {
        match self {
            AutoMatch::Manual => -1,
            AutoMatch::Immediate => 0,
            AutoMatch::After(delay) => delay.as_millis() as i64,
        }
    }
}
