//! Lux - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a flat, lane-batched sphere scene.
//! Spheres are the only primitive; each ray scans the scene linearly,
//! testing four spheres per batched quadratic solve.

pub mod rng;

mod camera;
mod integrator;
mod material;
mod renderer;
mod scene;

pub use camera::Camera;
pub use integrator::{ray_color, sky_gradient};
pub use material::{Color, Material, Scatter};
pub use renderer::{
    color_to_rgb, linear_to_gamma, render, render_pixel, render_serial, ImageBuffer, RenderConfig,
};
pub use scene::{HitRecord, Scene, LANES};

/// Re-export common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
