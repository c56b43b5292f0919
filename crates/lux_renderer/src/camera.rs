//! Camera for ray generation.

use lux_math::{Ray, Vec3};
use rand::RngCore;

use crate::rng;

/// Camera for generating rays into the scene.
///
/// Configure with the builder methods, then call [`initialize`] before
/// generating rays. An up vector parallel to the view direction produces a
/// NaN basis; keeping them apart is the caller's responsibility.
///
/// [`initialize`]: Camera::initialize
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,     // Vertical field of view in degrees
    aperture: f32, // Lens disk radius; 0 disables defocus blur
    focus_dist: f32,

    // Cached computed values (set by initialize())
    centre: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            // Cached values (initialized to defaults)
            centre: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings: vertical fov in degrees, lens radius, focus distance.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.centre = self.look_from;

        // Viewport dimensions on the focus plane
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera basis
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.centre - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        self.defocus_disk_u = self.u * self.aperture;
        self.defocus_disk_v = self.v * self.aperture;
    }

    /// Generate a ray for pixel (i, j) with random sub-pixel jitter and,
    /// when the aperture is open, a random lens offset. The direction is
    /// normalized; the scene's batched quadratic relies on that.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.aperture <= 0.0 {
            self.centre
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, (pixel_sample - ray_origin).normalize())
    }

    /// Sample a point on the lens disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = rng::in_unit_disk(rng);
        self.centre + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        rng::uniform_f32(rng) - 0.5,
        rng::uniform_f32(rng) - 0.5,
        0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis_orthonormal() {
        let mut camera = Camera::new()
            .with_resolution(800, 600)
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.1, 10.0);
        camera.initialize();

        assert!(camera.u.dot(camera.v).abs() < 1e-6);
        assert!(camera.u.dot(camera.w).abs() < 1e-6);
        assert!(camera.v.dot(camera.w).abs() < 1e-6);
        assert!((camera.u.length() - 1.0).abs() < 1e-6);
        assert!((camera.v.length() - 1.0).abs() < 1e-6);
        assert!((camera.w.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_resolution(800, 600)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();

        assert_eq!(camera.centre, Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new()
            .with_resolution(100, 100)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);

        // Centre ray points roughly towards -Z, and is unit length
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction.z < 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pinhole_origin_fixed() {
        let mut camera = Camera::new()
            .with_resolution(100, 100)
            .with_position(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 0.0, 5.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..10 {
            let ray = camera.get_ray(i, i, &mut rng);
            assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        }
    }
}
