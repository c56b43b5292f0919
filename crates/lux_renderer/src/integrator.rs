//! The bounce loop: trace one camera sample to a colour.

use lux_math::{Interval, Ray};
use rand::RngCore;

use crate::material::Color;
use crate::scene::Scene;

/// Lower bound for hit searches after a bounce, so the new ray cannot
/// re-intersect the surface it just left (shadow acne).
const RAY_EPSILON: f32 = 1e-4;

/// Far clip for hit searches; effectively infinite for any scene.
const T_MAX: f32 = f32::MAX;

/// Trace `ray` through `scene`, following scatter events until the ray is
/// absorbed, escapes to the sky, or spends its bounce budget.
///
/// The loop multiplies material attenuations into a running throughput; an
/// escaped ray contributes the sky colour filtered by that throughput, an
/// absorbed or depth-exhausted ray contributes nothing.
pub fn ray_color(ray: &Ray, scene: &Scene, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..max_depth {
        match scene.hit(&ray, Interval::new(RAY_EPSILON, T_MAX)) {
            None => return throughput * sky_gradient(&ray),
            Some(rec) => match rec.material.scatter(&ray, rec.normal, rng) {
                Some(scatter) => {
                    throughput *= scatter.attenuation;
                    ray = Ray::new(rec.point, scatter.direction);
                }
                // Absorbed, e.g. a fuzzed reflection into the surface
                None => return Color::ZERO,
            },
        }
    }

    // Out of bounces; the remaining light is treated as lost
    Color::ZERO
}

/// Background: white at the horizon blending to sky blue at the zenith.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}
