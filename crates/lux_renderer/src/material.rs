//! Surface scattering models.

use lux_math::{Ray, Vec3};
use rand::RngCore;

use crate::rng;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a scatter event: the outgoing direction and the colour filter
/// applied to light carried along it.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    pub direction: Vec3,
    pub attenuation: Color,
}

/// Closed set of surface models.
///
/// Small enough to be `Copy`, so spheres share definitions through the
/// scene's material arena without ownership plumbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f32 },
    Dielectric { ior: f32 },
}

impl Material {
    /// Diffuse material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Metal with a fuzz of 0.0 (perfect mirror) to 1.0 (very rough).
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Glass-like material (ior 1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(ior: f32) -> Self {
        Self::Dielectric { ior }
    }

    /// Scatter an incoming ray at a hit point with the given outward normal.
    ///
    /// Returns `None` if the ray is absorbed. The incoming direction must be
    /// unit length; scattered directions are unit length.
    pub fn scatter(&self, ray_in: &Ray, normal: Vec3, rng: &mut dyn RngCore) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = normal + rng::unit_vector(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = normal;
                }

                Some(Scatter {
                    direction: direction.normalize(),
                    attenuation: albedo,
                })
            }
            Material::Metal { albedo, fuzz } => {
                let mut direction = reflect(ray_in.direction, normal);
                if fuzz > 0.0 {
                    direction += fuzz * rng::in_unit_sphere(rng);
                }
                let direction = direction.normalize();

                // A fuzzed reflection pointing back into the surface is absorbed
                (direction.dot(normal) > 0.0).then(|| Scatter {
                    direction,
                    attenuation: albedo,
                })
            }
            Material::Dielectric { ior } => {
                let mut cos_theta = (-ray_in.direction.dot(normal)).min(1.0);
                let entering = cos_theta > 0.0;

                let (normal, ior_ratio) = if entering {
                    (normal, 1.0 / ior)
                } else {
                    (-normal, ior)
                };
                if !entering {
                    cos_theta = -cos_theta;
                }
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ior_ratio * sin_theta > 1.0;
                let direction =
                    if cannot_refract || rng::uniform_f32(rng) < schlick(cos_theta, ior_ratio) {
                        reflect(ray_in.direction, normal).normalize()
                    } else {
                        refract(ray_in.direction, normal, cos_theta, ior_ratio)
                    };

                Some(Scatter {
                    direction,
                    attenuation: Color::ONE,
                })
            }
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface, given the incidence cosine.
#[inline]
fn refract(v: Vec3, n: Vec3, cos_theta: f32, ior_ratio: f32) -> Vec3 {
    let r_out_perp = ior_ratio * (v + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    (r_out_perp + r_out_parallel).normalize()
}

/// Schlick's approximation for reflectance.
#[inline]
fn schlick(cos_theta: f32, ior_ratio: f32) -> f32 {
    let r0 = ((1.0 - ior_ratio) / (1.0 + ior_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}
