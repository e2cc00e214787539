//! Geometry and tooltip helpers for rendering collaborators.

use std::rc::Rc;

use segue_types::Span;

/// Pixel placement of an interval on a drawable of known width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelExtent {
    pub left: i64,
    pub width: i64,
}

/// Map a span to pixels.
///
/// Both edges are rounded independently, so two intervals sharing a boundary
/// also share a pixel column and no gap appears between them.
pub fn pixel_extent(span: Span, duration: f64, width: f64) -> PixelExtent {
    if duration <= 0.0 || !duration.is_finite() {
        return PixelExtent { left: 0, width: 0 };
    }
    let left = (span.start / duration * width).round() as i64;
    let right = (span.end / duration * width).round() as i64;
    PixelExtent {
        left,
        width: right - left,
    }
}

/// Host-supplied tooltip formatter taking `(start, end)` in seconds.
#[derive(Clone)]
pub struct TimeFormat(Rc<dyn Fn(f64, f64) -> String>);

impl TimeFormat {
    pub fn new(format: impl Fn(f64, f64) -> String + 'static) -> Self {
        Self(Rc::new(format))
    }

    pub fn format(&self, start: f64, end: f64) -> String {
        (self.0)(start, end)
    }
}

impl std::fmt::Debug for TimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TimeFormat(..)")
    }
}

/// Two formatters are equal only when they share the same closure.
impl PartialEq for TimeFormat {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Tooltip text: `m:ss` for a point, `m:ss-m:ss` for a range.
pub fn format_span(start: f64, end: f64) -> String {
    if start == end {
        format_clock(start)
    } else {
        format!("{}-{}", format_clock(start), format_clock(end))
    }
}

fn format_clock(time: f64) -> String {
    let minutes = ((time % 3600.0) / 60.0).floor() as i64;
    let seconds = (time % 60.0).floor() as i64;
    format!("{}:{:02}", minutes, seconds)
}
