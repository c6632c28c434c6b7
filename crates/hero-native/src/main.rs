use std::env;
use std::thread;
use std::time::{Duration, Instant};

use hero_core::{
    ElementGeometry, FrameScheduler, HeroScene, PixelDensityGovernor, SceneConfig, ScrollBinding,
};

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
const VIEWPORT_HEIGHT: f32 = 900.0;
const SCROLL_SPEED_PX_PER_SEC: f32 = 400.0;

/// Page sections laid out top to bottom: (label, top in page px, height).
const SECTIONS: [(&str, f32, f32); 3] = [
    ("about", 900.0, 1200.0),
    ("projects", 2100.0, 1600.0),
    ("contact", 3700.0, 1000.0),
];

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames: u64 = env_parse("HERO_FRAMES").unwrap_or(600);
    let mut config = SceneConfig {
        seed: env_parse("HERO_SEED"),
        ..SceneConfig::default()
    };
    if let Some(count) = env_parse::<u32>("HERO_PARTICLES") {
        config.field.count = count;
    }

    let scene = HeroScene::new(config)?;
    let mut scheduler = FrameScheduler::new();
    let mount = scene.mount(&mut scheduler);
    scheduler.start();

    let mut hero = ScrollBinding::hero_content("home");
    let mut sections: Vec<ScrollBinding> = SECTIONS
        .iter()
        .map(|(label, _, _)| ScrollBinding::section(*label, *label == "about"))
        .collect();
    let mut governor = PixelDensityGovernor::new();

    let started = Instant::now();
    let mut last = started;
    for frame in 0..frames {
        let report = scheduler.tick();
        let now = Instant::now();
        governor.observe((now - last).as_secs_f32());
        last = now;

        // scroll events come from their own source; here a steady scroll
        let scroll_y = started.elapsed().as_secs_f32() * SCROLL_SPEED_PX_PER_SEC;
        let hero_values = hero
            .update(
                Some(ElementGeometry {
                    top: -scroll_y,
                    height: VIEWPORT_HEIGHT,
                }),
                VIEWPORT_HEIGHT,
            )
            .to_vec();
        for (binding, (_, top, height)) in sections.iter_mut().zip(SECTIONS.iter()) {
            binding.update(
                Some(ElementGeometry {
                    top: top - scroll_y,
                    height: *height,
                }),
                VIEWPORT_HEIGHT,
            );
        }

        if frame % 60 == 0 {
            let out = scene.frame_output()?;
            let sphere = scene.node_position("sphere")?.unwrap_or_default();
            log::info!(
                "[frame {frame}] t={:.2}s ran={} skipped={} field=({:.3},{:.3}) sphere.y={:.3} eye=({:.2},{:.2},{:.2}) hero(y={:.1}%, a={:.2}) dpr×{:.1}",
                out.elapsed,
                report.ran,
                report.skipped,
                out.field_rotation.x,
                out.field_rotation.y,
                sphere.y,
                out.camera_eye.x,
                out.camera_eye.y,
                out.camera_eye.z,
                hero_values.first().copied().unwrap_or(0.0),
                hero_values.get(1).copied().unwrap_or(1.0),
                governor.factor(),
            );
            for s in &sections {
                log::debug!(
                    "  [{}] progress={:.3} values={:?}",
                    s.tracker.label(),
                    s.tracker.progress(),
                    s.values()
                );
            }
        }

        let spent = now.elapsed();
        if spent < FRAME_INTERVAL {
            thread::sleep(FRAME_INTERVAL - spent);
        }
    }

    mount.release(&mut scheduler);
    scheduler.unmount();
    Ok(())
}
