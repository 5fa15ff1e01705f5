//! Camera for ray generation.
//!
//! The screen is a rectangle centered on `screen_center`, perpendicular to
//! the view direction `screen_center - eye`. Pixel `(0, 0)` is the top-left
//! corner of the screen.

use crate::sampling::{task_rng, BiasContext};
use crate::World;
use lumen_core::{scene::vec3, CameraDescription, Channel, Raster};
use lumen_math::{DVec2, Ray, Vec3, VecExt};

/// World up direction used to orient the screen.
const UP: Vec3 = Vec3::Y;

/// Pinhole or thin-lens camera. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    screen_center: Vec3,
    image_width: u32,
    image_height: u32,
    half_width: f64,
    half_height: f64,

    // Lens settings
    aperture: f64,
    focus_distance: f64,

    // Screen basis: view vector, unit right, unit up
    w: Vec3,
    u: Vec3,
    v: Vec3,
}

impl Camera {
    /// Camera with an explicit screen size in world units.
    ///
    /// The view direction must not be parallel to the world up vector.
    pub fn new(
        eye: Vec3,
        screen_center: Vec3,
        image_width: u32,
        image_height: u32,
        half_width: f64,
        half_height: f64,
    ) -> Self {
        assert!(image_width > 0 && image_height > 0, "image must not be empty");
        assert!(half_width > 0.0 && half_height > 0.0, "screen must not be empty");

        let w = screen_center - eye;
        assert!(!w.is_zero(), "eye and screen center coincide");
        assert!(!w.is_parallel(UP), "view direction {w} is parallel to the up vector");

        let u = w.cross(UP).unit_vec();
        let v = u.cross(w).unit_vec();

        Self {
            eye,
            screen_center,
            image_width,
            image_height,
            half_width,
            half_height,
            aperture: 0.0,
            focus_distance: w.length(),
            w,
            u,
            v,
        }
    }

    /// Camera sized by a horizontal field of view in radians. The screen
    /// height follows the image aspect ratio.
    pub fn with_fov(eye: Vec3, screen_center: Vec3, image_width: u32, image_height: u32, hfov: f64) -> Self {
        assert!(
            hfov > 0.0 && hfov < std::f64::consts::PI,
            "field of view must be in (0, pi), got {hfov}"
        );
        let half_width = (screen_center - eye).length() * (hfov / 2.0).tan();
        let half_height = half_width * image_height as f64 / image_width as f64;
        Self::new(eye, screen_center, image_width, image_height, half_width, half_height)
    }

    /// Set lens settings. Zero aperture is a pinhole.
    pub fn with_lens(mut self, aperture: f64, focus_distance: f64) -> Self {
        assert!(aperture >= 0.0, "aperture must not be negative, got {aperture}");
        assert!(focus_distance > 0.0, "focus distance must be positive, got {focus_distance}");
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    /// Camera for a validated scene description.
    pub fn from_description(desc: &CameraDescription, image_width: u32, image_height: u32) -> Self {
        let camera = Self::with_fov(
            vec3(desc.eye),
            vec3(desc.screen_center),
            image_width,
            image_height,
            desc.fov_degrees.to_radians(),
        );
        let focus = desc.focus_distance.unwrap_or(camera.focus_distance);
        camera.with_lens(desc.aperture, focus)
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn screen_center(&self) -> Vec3 {
        self.screen_center
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    pub fn focus_distance(&self) -> f64 {
        self.focus_distance
    }

    /// Unit vectors pointing right and up on the screen.
    pub fn basis(&self) -> (Vec3, Vec3) {
        (self.u, self.v)
    }

    /// Direction from the eye through a point of the screen, without lens
    /// effects. `jitter` is the offset inside the pixel, in [0, 1)².
    fn screen_direction(&self, x: u32, y: u32, jitter: DVec2) -> Vec3 {
        let sx = (2.0 * (x as f64 + jitter.x) / self.image_width as f64 - 1.0) * self.half_width;
        let sy = (1.0 - 2.0 * (y as f64 + jitter.y) / self.image_height as f64) * self.half_height;
        self.w + sx * self.u + sy * self.v
    }

    /// Primary ray for pixel `(x, y)`.
    ///
    /// `jitter` moves the sample inside the pixel. `lens` is a point in the
    /// unit disk; the ray starts that far from the eye, scaled by the
    /// aperture, and passes through the point the pinhole ray would hit on
    /// the focus plane.
    pub fn primary_ray(&self, x: u32, y: u32, jitter: DVec2, lens: DVec2) -> Ray {
        let dir = self.screen_direction(x, y, jitter);
        if self.aperture <= 0.0 {
            return Ray::new(self.eye, dir);
        }

        // Focus plane is parallel to the screen
        let focus_point = self.eye + dir * (self.focus_distance / self.w.length());
        let origin = self.eye + self.aperture * (lens.x * self.u + lens.y * self.v);
        Ray::new(origin, focus_point - origin)
    }

    /// Render one sample of every pixel.
    ///
    /// `bias` supplies the per-pixel jitter and lens positions;
    /// `diffuse_seed` seeds the generator used by materials.
    pub fn render<T: Channel>(
        &self,
        world: &World,
        bias: &mut BiasContext,
        diffuse_seed: u64,
        max_bounces: u32,
    ) -> Raster<T> {
        let mut image = Raster::new(self.image_width, self.image_height);
        let mut rng = task_rng(diffuse_seed);

        for y in 0..self.image_height {
            for x in 0..self.image_width {
                let jitter = bias.sub_pixel();
                debug_assert!((0.0..1.0).contains(&jitter.x) && (0.0..1.0).contains(&jitter.y));
                let lens = if self.aperture > 0.0 {
                    bias.lens()
                } else {
                    DVec2::ZERO
                };

                let ray = self.primary_ray(x, y, jitter, lens);
                image.set(x, y, world.trace(ray, &mut rng, max_bounces));
            }
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 4, 2, 2.0, 1.0)
    }

    #[test]
    fn test_basis() {
        let cam = camera();
        let (u, v) = cam.basis();
        assert!(u.approx_eq(Vec3::X, 1e-12));
        assert!(v.approx_eq(Vec3::Y, 1e-12));
        assert_eq!(cam.focus_distance(), 1.0);
    }

    #[test]
    fn test_pixel_corners() {
        let cam = camera();
        // Top-left corner of the screen
        let ray = cam.primary_ray(0, 0, DVec2::ZERO, DVec2::ZERO);
        assert!(ray.direction().approx_eq(Vec3::new(-2.0, 1.0, -1.0).unit_vec(), 1e-12));
        // Screen center
        let ray = cam.primary_ray(2, 1, DVec2::ZERO, DVec2::ZERO);
        assert!(ray.direction().approx_eq(-Vec3::Z, 1e-12));
        assert_eq!(ray.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_jitter_moves_inside_pixel() {
        let cam = camera();
        let corner = cam.primary_ray(1, 0, DVec2::ZERO, DVec2::ZERO);
        let jittered = cam.primary_ray(1, 0, DVec2::new(0.5, 0.5), DVec2::ZERO);
        assert_ne!(corner.direction(), jittered.direction());
        // Right and down
        assert!(jittered.direction().x > corner.direction().x);
        assert!(jittered.direction().y < corner.direction().y);
    }

    #[test]
    fn test_with_fov() {
        let cam = Camera::with_fov(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), 200, 100, 90f64.to_radians());
        assert!((cam.half_width() - 2.0).abs() < 1e-12);
        assert!((cam.half_height() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lens_rays_meet_at_focus() {
        let cam = Camera::with_fov(
            Vec3::new(13.0, 2.0, 3.0),
            Vec3::new(6.5, 1.0, 1.5),
            60,
            40,
            28f64.to_radians(),
        )
        .with_lens(0.3, 10.0);

        let pinhole = Camera::with_fov(
            Vec3::new(13.0, 2.0, 3.0),
            Vec3::new(6.5, 1.0, 1.5),
            60,
            40,
            28f64.to_radians(),
        );
        let jitter = DVec2::new(0.25, 0.75);
        let center_ray = pinhole.primary_ray(17, 29, jitter, DVec2::ZERO);
        // Pinhole ray meets the focus plane 10 units along the view axis
        let view = (cam.screen_center() - cam.eye()).unit_vec();
        let focus = center_ray.at(10.0 / center_ray.direction().dot(view));

        for lens in [DVec2::new(0.5, 0.0), DVec2::new(-0.3, 0.6), DVec2::new(0.1, -0.9)] {
            let ray = cam.primary_ray(17, 29, jitter, lens);
            assert_ne!(ray.origin(), cam.eye());
            let t = (focus - ray.origin()).length();
            assert!(ray.at(t).approx_eq(focus, 1e-9), "{} misses {}", ray.at(t), focus);
        }
    }

    #[test]
    fn test_from_description() {
        let desc = CameraDescription {
            eye: [0.0, 0.0, 0.0],
            screen_center: [0.0, 0.0, -3.0],
            fov_degrees: 90.0,
            aperture: 0.0,
            focus_distance: None,
        };
        let cam = Camera::from_description(&desc, 8, 8);
        assert_eq!(cam.focus_distance(), 3.0);
        assert!((cam.half_width() - 3.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "parallel to the up vector")]
    fn test_rejects_vertical_view() {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), 4, 4, 1.0, 1.0);
    }

    #[test]
    fn test_render_size() {
        let world = World::new();
        let image: Raster<u8> = camera().render(&world, &mut BiasContext::disabled(), 1, 4);
        assert_eq!((image.width(), image.height()), (4, 2));
        // Empty world: the top row sees more blue than the bottom row
        assert!(image.get(0, 0).r <= image.get(0, 1).r);
    }
}
