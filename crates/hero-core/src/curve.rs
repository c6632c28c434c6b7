//! Piecewise-linear progress curves.
//!
//! A single interpolation primitive backs every scroll-driven visual
//! property: parallax offsets, fades and rotations are all
//! [`TransformCurve`]s registered on a [`TransformMapper`].

use crate::constants::*;
use crate::error::{invalid, Result, SceneError};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    pub input: f32,
    pub output: f32,
}

/// Breakpoints sorted by non-decreasing input. Sampling outside the covered
/// domain clamps to the nearest endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformCurve {
    stops: SmallVec<[Breakpoint; 4]>,
}

impl TransformCurve {
    pub fn new(points: impl IntoIterator<Item = (f32, f32)>) -> Result<Self> {
        let stops: SmallVec<[Breakpoint; 4]> = points
            .into_iter()
            .map(|(input, output)| Breakpoint { input, output })
            .collect();
        if stops.len() < 2 {
            return Err(invalid(format!(
                "a curve needs at least two breakpoints, got {}",
                stops.len()
            )));
        }
        if let Some(bad) = stops
            .iter()
            .find(|s| !s.input.is_finite() || !s.output.is_finite())
        {
            return Err(invalid(format!("non-finite breakpoint {:?}", bad)));
        }
        if let Some(w) = stops.windows(2).find(|w| w[1].input < w[0].input) {
            return Err(invalid(format!(
                "breakpoint inputs must be non-decreasing ({} after {})",
                w[1].input, w[0].input
            )));
        }
        Ok(Self { stops })
    }

    /// Build from parallel input/output tables.
    pub fn from_tables(inputs: &[f32], outputs: &[f32]) -> Result<Self> {
        if inputs.len() != outputs.len() {
            return Err(invalid(format!(
                "curve tables differ in length ({} inputs, {} outputs)",
                inputs.len(),
                outputs.len()
            )));
        }
        Self::new(inputs.iter().copied().zip(outputs.iter().copied()))
    }

    /// Two-point curve mapping `domain` onto `range`.
    pub fn linear(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        Self::new([(domain.0, range.0), (domain.1, range.1)])
    }

    /// Vertical drift used by content sections: `[0,1] -> [100,-100]`.
    pub fn section_parallax() -> Self {
        Self::fixed(&[(0.0, SECTION_PARALLAX_PX), (1.0, -SECTION_PARALLAX_PX)])
    }

    /// Slower downward drift against the section scroll: `[0,1] -> [-50,50]`.
    pub fn counter_parallax() -> Self {
        Self::fixed(&[
            (0.0, -SECTION_COUNTER_PARALLAX_PX),
            (1.0, SECTION_COUNTER_PARALLAX_PX),
        ])
    }

    /// Fade in over the first 20% of traversal, hold, fade out over the last 20%.
    pub fn fade_in_out() -> Self {
        Self::fixed(&[
            (0.0, 0.0),
            (FADE_IN_END, 1.0),
            (FADE_OUT_START, 1.0),
            (1.0, 0.0),
        ])
    }

    /// Hero copy drift, in percent of its own height.
    pub fn hero_drift() -> Self {
        Self::fixed(&[(0.0, 0.0), (1.0, HERO_CONTENT_DRIFT_PERCENT)])
    }

    pub fn hero_fade() -> Self {
        Self::fixed(&[(0.0, 1.0), (HERO_FADE_END, 0.0)])
    }

    fn fixed(points: &[(f32, f32)]) -> Self {
        Self {
            stops: points
                .iter()
                .map(|&(input, output)| Breakpoint { input, output })
                .collect(),
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.stops
    }

    pub fn sample(&self, progress: f32) -> f32 {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if progress.is_nan() || progress <= first.input {
            return first.output;
        }
        if progress >= last.input {
            return last.output;
        }
        // first.input < progress < last.input, so 1 <= idx < len
        let idx = self.stops.partition_point(|s| s.input <= progress);
        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        let t = (progress - a.input) / (b.input - a.input);
        a.output + (b.output - a.output) * t
    }
}

impl FromStr for TransformCurve {
    type Err = SceneError;

    /// Parse `"in:out, in:out, ..."`, e.g. `"0:0, 0.2:1, 0.8:1, 1:0"`.
    fn from_str(s: &str) -> Result<Self> {
        let points = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|pair| {
                let (i, o) = pair
                    .split_once(':')
                    .ok_or_else(|| invalid(format!("breakpoint `{pair}` is not `input:output`")))?;
                let input = i
                    .trim()
                    .parse::<f32>()
                    .map_err(|e| invalid(format!("breakpoint input `{i}`: {e}")))?;
                let output = o
                    .trim()
                    .parse::<f32>()
                    .map_err(|e| invalid(format!("breakpoint output `{o}`: {e}")))?;
                Ok((input, output))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(points)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CurveId(pub usize);

/// Any number of independent curves evaluated against one progress source.
#[derive(Clone, Debug, Default)]
pub struct TransformMapper {
    curves: Vec<(String, TransformCurve)>,
    by_name: FnvHashMap<String, CurveId>,
}

impl TransformMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a curve under `name`. Re-registering a name replaces the
    /// curve and keeps its id.
    pub fn register(&mut self, name: impl Into<String>, curve: TransformCurve) -> CurveId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            self.curves[id.0].1 = curve;
            return id;
        }
        let id = CurveId(self.curves.len());
        self.by_name.insert(name.clone(), id);
        self.curves.push((name, curve));
        id
    }

    pub fn id(&self, name: &str) -> Option<CurveId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn value(&self, id: CurveId, progress: f32) -> Option<f32> {
        self.curves.get(id.0).map(|(_, c)| c.sample(progress))
    }

    pub fn value_of(&self, name: &str, progress: f32) -> Option<f32> {
        self.id(name).and_then(|id| self.value(id, progress))
    }

    /// Evaluate every registered curve, in registration order, into `out`.
    pub fn map_into(&self, progress: f32, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.curves.iter().map(|(_, c)| c.sample(progress)));
    }

    pub fn map(&self, progress: f32) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.curves.len());
        self.map_into(progress, &mut out);
        out
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|(n, _)| n.as_str())
    }
}
