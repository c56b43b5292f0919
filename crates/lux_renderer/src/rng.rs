//! Sampling helpers on top of a caller-owned generator.
//!
//! Every function takes the generator by mutable reference. Workers own one
//! generator each; sharing one across threads would race and break
//! reproducibility.

use std::f32::consts::TAU;

use lux_math::Vec3;
use rand::RngCore;

/// Hard cap on rejection-sampling attempts. The acceptance probability per
/// attempt is ~0.52 for the ball and ~0.79 for the disk, so reaching the cap
/// means the generator is broken, not unlucky.
const MAX_REJECTION_ATTEMPTS: u32 = 500;

/// Uniform f32 in [0, 1), from the high 23 bits of `next_u32`.
///
/// The bits fill the mantissa of a float in [1, 2), which is then shifted
/// down; every one of the 2^23 representable results is equally likely.
#[inline]
pub fn uniform_f32(rng: &mut dyn RngCore) -> f32 {
    f32::from_bits(0x3f80_0000 | (rng.next_u32() >> 9)) - 1.0
}

/// Uniform f32 in [-1, 1).
#[inline]
pub fn uniform_f32_signed(rng: &mut dyn RngCore) -> f32 {
    2.0 * uniform_f32(rng) - 1.0
}

/// Uniform direction on the surface of the unit sphere.
pub fn unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = uniform_f32_signed(rng);
    let r = (1.0 - z * z).sqrt();
    let azimuth = TAU * uniform_f32(rng);
    Vec3::new(r * azimuth.cos(), r * azimuth.sin(), z)
}

/// Uniform point inside the unit ball, used to fuzz metal reflections.
pub fn in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(
            uniform_f32_signed(rng),
            uniform_f32_signed(rng),
            uniform_f32_signed(rng),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    panic!("unit sphere sampler exceeded {MAX_REJECTION_ATTEMPTS} rejection attempts");
}

/// Uniform point inside the unit disk on z = 0, used for lens offsets.
pub fn in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(uniform_f32_signed(rng), uniform_f32_signed(rng), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    panic!("unit disk sampler exceeded {MAX_REJECTION_ATTEMPTS} rejection attempts");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let x = uniform_f32(&mut rng);
            assert!((0.0..1.0).contains(&x), "uniform_f32 out of range: {}", x);

            let s = uniform_f32_signed(&mut rng);
            assert!(
                (-1.0..1.0).contains(&s),
                "uniform_f32_signed out of range: {}",
                s
            );
        }
    }

    #[test]
    fn test_uniform_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(uniform_f32(&mut a), uniform_f32(&mut b));
        }
    }

    #[test]
    fn test_unit_vector_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_in_unit_sphere_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_in_unit_disk_flat_and_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }
}
