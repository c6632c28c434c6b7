//! Scene-animation core for the landing view.
//!
//! Platform-free: the browser and native front-ends own the host scheduler
//! and the renderer, this crate owns particle generation, per-frame motion
//! and the scroll-progress curves.

pub mod camera;
pub mod constants;
pub mod curve;
pub mod error;
pub mod float;
pub mod graph;
pub mod particles;
pub mod perf;
pub mod scene;
pub mod scheduler;
pub mod scroll;
pub mod sphere;

pub use camera::*;
pub use constants::*;
pub use curve::*;
pub use error::*;
pub use float::*;
pub use graph::*;
pub use particles::*;
pub use perf::*;
pub use scene::*;
pub use scheduler::*;
pub use scroll::*;
pub use sphere::*;
