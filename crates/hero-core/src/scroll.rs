//! Scroll progress of a tracked element through the viewport.
//!
//! Progress only depends on where the element sits relative to the viewport,
//! so the same offsets work for any element height or viewport size.

use crate::curve::{TransformCurve, TransformMapper};
use crate::error::{invalid, Result, SceneError};
use std::fmt;
use std::str::FromStr;

/// A point on the element lining up with a point on the viewport, both as
/// fractions along the scroll axis (0 = start, 1 = end).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    pub element: f32,
    pub viewport: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOffset {
    pub start: Alignment,
    pub end: Alignment,
}

impl ScrollOffset {
    /// Element start meets viewport end, through element end meeting viewport start.
    pub const ENTER_EXIT: ScrollOffset = ScrollOffset {
        start: Alignment {
            element: 0.0,
            viewport: 1.0,
        },
        end: Alignment {
            element: 1.0,
            viewport: 0.0,
        },
    };

    /// Element pinned at the top of the viewport, through scrolled fully out.
    pub const PIN_EXIT: ScrollOffset = ScrollOffset {
        start: Alignment {
            element: 0.0,
            viewport: 0.0,
        },
        end: Alignment {
            element: 1.0,
            viewport: 0.0,
        },
    };
}

impl Default for ScrollOffset {
    fn default() -> Self {
        Self::ENTER_EXIT
    }
}

fn parse_edge(token: &str) -> Result<f32> {
    match token {
        "start" => Ok(0.0),
        "center" => Ok(0.5),
        "end" => Ok(1.0),
        other => {
            let v = other
                .parse::<f32>()
                .map_err(|_| invalid(format!("unknown scroll edge `{other}`")))?;
            if v.is_finite() {
                Ok(v)
            } else {
                Err(invalid(format!("scroll edge `{other}` is not finite")))
            }
        }
    }
}

impl FromStr for Alignment {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(e), Some(v), None) => Ok(Alignment {
                element: parse_edge(e)?,
                viewport: parse_edge(v)?,
            }),
            _ => Err(invalid(format!(
                "scroll alignment `{s}` must be `<element-edge> <viewport-edge>`"
            ))),
        }
    }
}

impl FromStr for ScrollOffset {
    type Err = SceneError;

    /// Parse `"start end, end start"`.
    fn from_str(s: &str) -> Result<Self> {
        let (a, b) = s
            .split_once(',')
            .ok_or_else(|| invalid(format!("scroll offset `{s}` needs two alignments")))?;
        Ok(ScrollOffset {
            start: a.trim().parse()?,
            end: b.trim().parse()?,
        })
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            self.start.element, self.start.viewport, self.end.element, self.end.viewport
        )
    }
}

/// Element box along the scroll axis, relative to the top of the viewport
/// (what a bounding client rect reports).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementGeometry {
    pub top: f32,
    pub height: f32,
}

/// Normalized progress in \[0, 1\]. A zero-length span reports 0.
pub fn scroll_progress(offset: &ScrollOffset, el: ElementGeometry, viewport_height: f32) -> f32 {
    let to_start = el.top + offset.start.element * el.height - offset.start.viewport * viewport_height;
    let to_end = el.top + offset.end.element * el.height - offset.end.viewport * viewport_height;
    let span = to_start - to_end;
    if !span.is_finite() || span.abs() <= f32::EPSILON {
        return 0.0;
    }
    (to_start / span).clamp(0.0, 1.0)
}

pub struct ScrollProgressTracker {
    label: String,
    offset: ScrollOffset,
    progress: f32,
    degraded: bool,
}

impl ScrollProgressTracker {
    pub fn new(label: impl Into<String>, offset: ScrollOffset) -> Self {
        Self {
            label: label.into(),
            offset,
            progress: 0.0,
            degraded: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn offset(&self) -> &ScrollOffset {
        &self.offset
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn measure(&self, el: Option<ElementGeometry>, viewport_height: f32) -> Result<f32> {
        let el = el.ok_or_else(|| SceneError::MissingObservationTarget(self.label.clone()))?;
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(SceneError::MissingObservationTarget(format!(
                "{}: viewport height {viewport_height}",
                self.label
            )));
        }
        Ok(scroll_progress(&self.offset, el, viewport_height))
    }

    /// Recompute progress. A missing target degrades to a constant 0.
    pub fn update(&mut self, el: Option<ElementGeometry>, viewport_height: f32) -> f32 {
        match self.measure(el, viewport_height) {
            Ok(p) => {
                self.progress = p;
                self.degraded = false;
            }
            Err(e) => {
                if !self.degraded {
                    log::warn!("[scroll] {e}; holding progress at 0");
                }
                self.progress = 0.0;
                self.degraded = true;
            }
        }
        self.progress
    }
}

/// A tracker plus the curves derived from its progress.
pub struct ScrollBinding {
    pub tracker: ScrollProgressTracker,
    pub mapper: TransformMapper,
    values: Vec<f32>,
}

impl ScrollBinding {
    pub fn new(tracker: ScrollProgressTracker, mapper: TransformMapper) -> Self {
        let values = mapper.map(tracker.progress());
        Self {
            tracker,
            mapper,
            values,
        }
    }

    /// Re-sample the element and return every mapped value in registration order.
    pub fn update(&mut self, el: Option<ElementGeometry>, viewport_height: f32) -> &[f32] {
        let p = self.tracker.update(el, viewport_height);
        self.mapper.map_into(p, &mut self.values);
        &self.values
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl ScrollBinding {
    /// Landing copy: drifts down by half its height and fades out over the
    /// first half of scrolling away from the top.
    pub fn hero_content(label: impl Into<String>) -> Self {
        let mut mapper = TransformMapper::new();
        mapper.register("y", TransformCurve::hero_drift());
        mapper.register("opacity", TransformCurve::hero_fade());
        Self::new(ScrollProgressTracker::new(label, ScrollOffset::PIN_EXIT), mapper)
    }

    /// Content section parallaxing upward while it crosses the viewport,
    /// optionally fading at both ends.
    pub fn section(label: impl Into<String>, fade: bool) -> Self {
        let mut mapper = TransformMapper::new();
        mapper.register("y", TransformCurve::section_parallax());
        if fade {
            mapper.register("opacity", TransformCurve::fade_in_out());
        }
        Self::new(ScrollProgressTracker::new(label, ScrollOffset::ENTER_EXIT), mapper)
    }
}
