// Scene and scroll configuration read from element `data-*` attributes.
// Kept free of web-sys so it can be tested on the host.

use hero_core::{
    CurveId, SceneConfig, SceneError, ScrollBinding, ScrollOffset, ScrollProgressTracker,
    TransformCurve, TransformMapper,
};

fn bad(msg: String) -> SceneError {
    SceneError::InvalidConfiguration(msg)
}

fn parse_attr<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, SceneError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| bad(format!("data-{key}=`{raw}`: {e}")))
}

/// Defaults overridden by `data-particle-count`, `data-half-extent` and `data-seed`.
pub fn scene_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SceneConfig, SceneError> {
    let mut config = SceneConfig::default();
    if let Some(raw) = lookup("particle-count") {
        config.field.count = parse_attr("particle-count", &raw)?;
    }
    if let Some(raw) = lookup("half-extent") {
        config.field.half_extent = parse_attr("half-extent", &raw)?;
    }
    if let Some(raw) = lookup("seed") {
        config.seed = Some(parse_attr("seed", &raw)?);
    }
    config.validate()?;
    Ok(config)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Percent,
}

impl std::str::FromStr for LengthUnit {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, SceneError> {
        match s {
            "px" => Ok(LengthUnit::Px),
            "%" | "percent" => Ok(LengthUnit::Percent),
            other => Err(bad(format!("unknown length unit `{other}`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollStyleSpec {
    pub offset: ScrollOffset,
    pub y: Option<TransformCurve>,
    pub y_unit: LengthUnit,
    pub opacity: Option<TransformCurve>,
    /// Id of the tracked element; `None` tracks the enclosing section.
    pub target: Option<String>,
}

impl ScrollStyleSpec {
    pub fn preset(name: &str) -> Result<Self, SceneError> {
        let section = |opacity| ScrollStyleSpec {
            offset: ScrollOffset::ENTER_EXIT,
            y: Some(TransformCurve::section_parallax()),
            y_unit: LengthUnit::Px,
            opacity,
            target: None,
        };
        match name {
            "hero" => Ok(ScrollStyleSpec {
                offset: ScrollOffset::PIN_EXIT,
                y: Some(TransformCurve::hero_drift()),
                y_unit: LengthUnit::Percent,
                opacity: Some(TransformCurve::hero_fade()),
                target: None,
            }),
            "section" => Ok(section(None)),
            "section-fade" => Ok(section(Some(TransformCurve::fade_in_out()))),
            "section-reverse" => Ok(ScrollStyleSpec {
                y: Some(TransformCurve::counter_parallax()),
                ..section(None)
            }),
            other => Err(bad(format!("unknown scroll preset `{other}`"))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_none() && self.opacity.is_none()
    }

    /// Id of the element to observe for an element whose own id is `own_id`.
    /// An element never observes itself, since its own transform would feed
    /// back into its measured position; that falls back to the enclosing
    /// section like a missing target.
    pub fn observed_id(&self, own_id: &str) -> Option<&str> {
        self.target.as_deref().filter(|id| *id != own_id)
    }
}

/// Read `data-scroll-preset`, then apply `data-scroll-offset`,
/// `data-scroll-y`, `data-scroll-y-unit`, `data-scroll-opacity` and
/// `data-scroll-target` on top. `None` when the element has no scroll styling.
pub fn scroll_spec_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<ScrollStyleSpec>, SceneError> {
    let mut spec = match lookup("scroll-preset") {
        Some(name) => ScrollStyleSpec::preset(name.trim())?,
        None => ScrollStyleSpec {
            offset: ScrollOffset::ENTER_EXIT,
            y: None,
            y_unit: LengthUnit::Px,
            opacity: None,
            target: None,
        },
    };
    if let Some(raw) = lookup("scroll-offset") {
        spec.offset = raw.parse()?;
    }
    if let Some(raw) = lookup("scroll-y") {
        spec.y = Some(raw.parse()?);
    }
    if let Some(raw) = lookup("scroll-y-unit") {
        spec.y_unit = raw.trim().parse()?;
    }
    if let Some(raw) = lookup("scroll-opacity") {
        spec.opacity = Some(raw.parse()?);
    }
    if let Some(raw) = lookup("scroll-target") {
        let id = raw.trim();
        if !id.is_empty() {
            spec.target = Some(id.to_string());
        }
    }
    Ok((!spec.is_empty()).then_some(spec))
}

/// Binding plus the ids of the curves the styles read back.
pub struct StyleBinding {
    pub binding: ScrollBinding,
    pub y: Option<CurveId>,
    pub opacity: Option<CurveId>,
    pub y_unit: LengthUnit,
}

impl StyleBinding {
    pub fn new(label: impl Into<String>, spec: &ScrollStyleSpec) -> Self {
        let mut mapper = TransformMapper::new();
        let y = spec.y.clone().map(|c| mapper.register("y", c));
        let opacity = spec.opacity.clone().map(|c| mapper.register("opacity", c));
        Self {
            binding: ScrollBinding::new(ScrollProgressTracker::new(label, spec.offset), mapper),
            y,
            opacity,
            y_unit: spec.y_unit,
        }
    }

    /// CSS `transform` and `opacity` values for the current progress.
    pub fn css(&self) -> (Option<String>, Option<String>) {
        let values = self.binding.values();
        let transform = self
            .y
            .and_then(|id| values.get(id.0).copied())
            .map(|v| translate_y(v, self.y_unit));
        let opacity = self
            .opacity
            .and_then(|id| values.get(id.0).copied())
            .map(|v| format!("{:.4}", v.clamp(0.0, 1.0)));
        (transform, opacity)
    }
}

pub fn translate_y(value: f32, unit: LengthUnit) -> String {
    match unit {
        LengthUnit::Px => format!("translate3d(0px, {value:.2}px, 0px)"),
        LengthUnit::Percent => format!("translateY({value:.2}%)"),
    }
}
