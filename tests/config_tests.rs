// Host-side tests for data-attribute configuration parsing.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}

use config::*;
use hero_core::{ElementGeometry, ScrollOffset, TransformCurve};
use std::collections::HashMap;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn scene_defaults_without_attributes() {
    let c = scene_config_from(attrs(&[])).unwrap();
    assert_eq!(c.field.count, 1000);
    assert_eq!(c.field.half_extent, 25.0);
    assert_eq!(c.seed, None);
    assert_eq!(c.bodies.len(), 3);
}

#[test]
fn scene_overrides_from_attributes() {
    let c = scene_config_from(attrs(&[
        ("particle-count", "250"),
        ("half-extent", " 10.5 "),
        ("seed", "99"),
    ]))
    .unwrap();
    assert_eq!(c.field.count, 250);
    assert_eq!(c.field.half_extent, 10.5);
    assert_eq!(c.seed, Some(99));
}

#[test]
fn bad_scene_attributes_are_rejected() {
    assert!(scene_config_from(attrs(&[("particle-count", "0")])).is_err());
    assert!(scene_config_from(attrs(&[("particle-count", "-5")])).is_err());
    assert!(scene_config_from(attrs(&[("half-extent", "wide")])).is_err());
}

#[test]
fn elements_without_scroll_attributes_are_skipped() {
    assert_eq!(scroll_spec_from(attrs(&[])).unwrap(), None);
    // an offset alone styles nothing
    assert_eq!(
        scroll_spec_from(attrs(&[("scroll-offset", "start end, end start")])).unwrap(),
        None
    );
}

#[test]
fn presets_match_the_landing_sections() {
    let hero = scroll_spec_from(attrs(&[("scroll-preset", "hero")]))
        .unwrap()
        .unwrap();
    assert_eq!(hero.offset, ScrollOffset::PIN_EXIT);
    assert_eq!(hero.y_unit, LengthUnit::Percent);
    assert_eq!(hero.opacity, Some(TransformCurve::hero_fade()));

    let about = scroll_spec_from(attrs(&[("scroll-preset", "section-fade")]))
        .unwrap()
        .unwrap();
    assert_eq!(about.offset, ScrollOffset::ENTER_EXIT);
    assert_eq!(about.y, Some(TransformCurve::section_parallax()));
    assert_eq!(about.opacity, Some(TransformCurve::fade_in_out()));

    assert!(scroll_spec_from(attrs(&[("scroll-preset", "spiral")])).is_err());
}

#[test]
fn explicit_attributes_override_the_preset() {
    let spec = scroll_spec_from(attrs(&[
        ("scroll-preset", "section"),
        ("scroll-y", "0:-40, 1:40"),
        ("scroll-y-unit", "%"),
        ("scroll-target", "projects"),
    ]))
    .unwrap()
    .unwrap();
    assert_eq!(spec.y.as_ref().map(|c| c.sample(0.0)), Some(-40.0));
    assert_eq!(spec.y_unit, LengthUnit::Percent);
    assert_eq!(spec.target.as_deref(), Some("projects"));
    assert!(scroll_spec_from(attrs(&[("scroll-y", "0:1, 1")])).is_err());
    assert!(scroll_spec_from(attrs(&[("scroll-y", "0:1, 1:0"), ("scroll-y-unit", "em")])).is_err());
}

#[test]
fn style_binding_emits_css() {
    let spec = ScrollStyleSpec::preset("section-fade").unwrap();
    let mut style = StyleBinding::new("about", &spec);
    style.binding.update(
        Some(ElementGeometry {
            top: 800.0,
            height: 400.0,
        }),
        800.0,
    );
    let (transform, opacity) = style.css();
    assert_eq!(transform.as_deref(), Some("translate3d(0px, 100.00px, 0px)"));
    assert_eq!(opacity.as_deref(), Some("0.0000"));

    style.binding.update(None, 800.0);
    assert_eq!(style.binding.tracker.progress(), 0.0);

    let hero = StyleBinding::new("home", &ScrollStyleSpec::preset("hero").unwrap());
    let (transform, opacity) = hero.css();
    assert_eq!(transform.as_deref(), Some("translateY(0.00%)"));
    assert_eq!(opacity.as_deref(), Some("1.0000"));
}

#[test]
fn reverse_preset_drifts_downward_at_half_range() {
    let spec = ScrollStyleSpec::preset("section-reverse").unwrap();
    let y = spec.y.unwrap();
    assert_eq!(y.sample(0.0), -50.0);
    assert_eq!(y.sample(0.5), 0.0);
    assert_eq!(y.sample(1.0), 50.0);
    assert_eq!(y, TransformCurve::counter_parallax());
}

#[test]
fn element_never_observes_itself() {
    let own = scroll_spec_from(attrs(&[("scroll-preset", "section"), ("scroll-target", "about")]))
        .unwrap()
        .unwrap();
    assert_eq!(own.observed_id("about"), None);
    assert_eq!(own.observed_id("about-copy"), Some("about"));

    let implicit = ScrollStyleSpec::preset("section-fade").unwrap();
    assert_eq!(implicit.observed_id(""), None);
}
