//! Flat sphere scene with lane-batched intersection.
//!
//! Spheres are stored column-wise in groups of [`LANES`], one glam `Vec4`
//! lane per sphere, so a single quadratic solve tests a whole batch against
//! the ray. No spatial pruning: every batch is scanned per ray, which is
//! fine for scenes of a few hundred spheres.

use glam::Vec4;
use lux_math::{Interval, Ray, Vec3};

use crate::material::Material;

/// Spheres tested per batched solve; one `Vec4` lane per sphere.
pub const LANES: usize = 4;

/// Columnar storage for one batch of spheres.
#[derive(Debug, Clone, Copy)]
struct SphereBatch {
    cx: Vec4,
    cy: Vec4,
    cz: Vec4,
    radius: Vec4,
}

impl SphereBatch {
    /// All lanes hold the padding sentinel: centre at the origin, radius 0.
    /// For a unit ray direction the sentinel's discriminant is
    /// h^2 - |oc|^2 <= 0 (Cauchy-Schwarz), so a padded lane can never win
    /// the hit reduction.
    const EMPTY: Self = Self {
        cx: Vec4::ZERO,
        cy: Vec4::ZERO,
        cz: Vec4::ZERO,
        radius: Vec4::ZERO,
    };

    fn set_lane(&mut self, lane: usize, centre: Vec3, radius: f32) {
        self.cx = insert_lane(self.cx, lane, centre.x);
        self.cy = insert_lane(self.cy, lane, centre.y);
        self.cz = insert_lane(self.cz, lane, centre.z);
        self.radius = insert_lane(self.radius, lane, radius);
    }
}

fn insert_lane(v: Vec4, lane: usize, value: f32) -> Vec4 {
    let mut lanes = v.to_array();
    lanes[lane] = value;
    Vec4::from_array(lanes)
}

/// Lane-wise square root.
#[inline]
fn sqrt_lanes(v: Vec4) -> Vec4 {
    Vec4::new(v.x.sqrt(), v.y.sqrt(), v.z.sqrt(), v.w.sqrt())
}

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Ray parameter at the intersection
    pub t: f32,
    /// Intersection point in world space
    pub point: Vec3,
    /// Outward surface normal, unit length
    pub normal: Vec3,
    /// Material of the hit sphere
    pub material: Material,
}

/// Append-only sphere collection, read-only once rendering starts.
///
/// Scalar centres and radii are kept alongside the batches so the winning
/// sphere's normal is reconstructed once per hit rather than per lane.
pub struct Scene {
    batches: Vec<SphereBatch>,
    centres: Vec<Vec3>,
    radii: Vec<f32>,
    materials: Vec<Material>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            centres: Vec::new(),
            radii: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, centre: Vec3, radius: f32, material: Material) {
        let index = self.centres.len();
        let (batch, lane) = (index / LANES, index % LANES);
        if lane == 0 {
            self.batches.push(SphereBatch::EMPTY);
        }
        self.batches[batch].set_lane(lane, centre, radius);

        self.centres.push(centre);
        self.radii.push(radius);
        self.materials.push(material);
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.centres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.centres.is_empty()
    }

    /// Closest hit with `ray_t.min < t < ray_t.max`, or `None`.
    ///
    /// Assumes a unit ray direction, so the quadratic's leading coefficient
    /// is 1 and the roots are h -+ sqrt(h^2 - c).
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let origin_x = Vec4::splat(ray.origin.x);
        let origin_y = Vec4::splat(ray.origin.y);
        let origin_z = Vec4::splat(ray.origin.z);
        let dir_x = Vec4::splat(ray.direction.x);
        let dir_y = Vec4::splat(ray.direction.y);
        let dir_z = Vec4::splat(ray.direction.z);
        let t_min = Vec4::splat(ray_t.min);

        let mut closest = ray_t.max;
        let mut best = None;

        for (batch_index, batch) in self.batches.iter().enumerate() {
            let oc_x = batch.cx - origin_x;
            let oc_y = batch.cy - origin_y;
            let oc_z = batch.cz - origin_z;

            let h = oc_x * dir_x + oc_y * dir_y + oc_z * dir_z;
            let c = oc_x * oc_x + oc_y * oc_y + oc_z * oc_z - batch.radius * batch.radius;
            let disc = h * h - c;

            let may_hit = disc.cmpgt(Vec4::ZERO);
            if !may_hit.any() {
                continue;
            }

            // Clamp missed lanes to zero before the root; they are masked
            // out of the reduction below.
            let sqrt_d = sqrt_lanes(disc.max(Vec4::ZERO));
            let t0 = h - sqrt_d;
            let t1 = h + sqrt_d;

            // Near root if it clears t_min, else the far root
            let t = Vec4::select(t0.cmpgt(t_min), t0, t1);
            let valid = may_hit & t.cmpgt(t_min) & t.cmplt(Vec4::splat(closest));
            if valid.any() {
                let candidates = Vec4::select(valid, t, Vec4::splat(f32::MAX));
                let lane_t = candidates.min_element();
                let lane = candidates
                    .cmpeq(Vec4::splat(lane_t))
                    .bitmask()
                    .trailing_zeros() as usize;
                closest = lane_t;
                best = Some(batch_index * LANES + lane);
            }
        }

        best.map(|index| {
            let point = ray.at(closest);
            let normal = (point - self.centres[index]) / self.radii[index];
            HitRecord {
                t: closest,
                point,
                normal,
                material: self.materials[index],
            }
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    fn gray() -> Material {
        Material::lambertian(Color::new(0.5, 0.5, 0.5))
    }

    fn full_range() -> Interval {
        Interval::new(1e-4, f32::MAX)
    }

    #[test]
    fn test_head_on_hit() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -2.0), 0.5, gray());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, full_range()).unwrap();

        // distance to centre minus radius
        assert!((rec.t - 1.5).abs() < 1e-5);
        assert!((rec.point - Vec3::new(0.0, 0.0, -1.5)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!(((rec.point - Vec3::new(0.0, 0.0, -2.0)).length() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss_returns_none() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -2.0), 0.5, gray());

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_hit_is_pure() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -2.0), 0.5, gray());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let a = scene.hit(&ray, full_range()).unwrap();
        let b = scene.hit(&ray, full_range()).unwrap();
        assert_eq!(a.t, b.t);
        assert_eq!(a.point, b.point);
        assert_eq!(a.normal, b.normal);
    }

    #[test]
    fn test_padding_never_hits() {
        // One sphere leaves three sentinel lanes at the origin; a ray
        // passing straight through the origin must not see them.
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(100.0, 0.0, 0.0), 1.0, gray());

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&ray, full_range()).is_none());

        // Origin exactly on a sentinel centre
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_nearest_across_batches() {
        // Six spheres span two batches; the nearest along the ray wins
        // regardless of insertion order.
        let mut scene = Scene::new();
        for (i, z) in [-9.0, -7.0, -11.0, -5.0, -3.0, -13.0].iter().enumerate() {
            scene.add_sphere(Vec3::new(0.0, 0.0, *z), 0.5, gray());
            assert_eq!(scene.len(), i + 1);
        }

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, full_range()).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-5); // sphere at z = -3
    }

    #[test]
    fn test_t_max_bounds_search() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -10.0), 0.5, gray());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(&ray, Interval::new(1e-4, 5.0)).is_none());
        assert!(scene.hit(&ray, Interval::new(1e-4, 20.0)).is_some());
    }

    #[test]
    fn test_inside_sphere_takes_far_root() {
        // From the centre, the near root is negative; the far root at
        // t = radius is the hit.
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 0.0), 2.0, gray());

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let rec = scene.hit(&ray, full_range()).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_t_min_skips_self_intersection() {
        // A ray starting on the surface must not re-hit it at t = 0.
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -2.0), 1.0, gray());

        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = scene.hit(&ray, full_range()).unwrap();
        // Passes through and exits the far side
        assert!((rec.t - 2.0).abs() < 1e-4);
    }
}
