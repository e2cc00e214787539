use serde::{Deserialize, Serialize};

/// Snap-to-grid configuration in seconds.
///
/// `interval: None` (or zero) disables snapping. `offset` shifts the grid and
/// may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapGrid {
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub offset: f64,
}

impl SnapGrid {
    pub fn new(interval: f64, offset: f64) -> Self {
        Self {
            interval: Some(interval),
            offset,
        }
    }

    /// A grid that leaves every value untouched.
    pub fn off() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.interval, Some(g) if g != 0.0 && g.is_finite())
    }

    /// Snap a time value (seconds) to this grid.
    pub fn quantize(&self, value: f64) -> f64 {
        quantize(value, self.interval.unwrap_or(0.0), self.offset)
    }
}

/// Snap `value` to the nearest `k * interval + offset`.
///
/// A zero or non-finite `interval` returns `value` unchanged.
pub fn quantize(value: f64, interval: f64, offset: f64) -> f64 {
    if interval == 0.0 || !interval.is_finite() {
        return value;
    }
    ((value - offset) / interval).round() * interval + offset
}
