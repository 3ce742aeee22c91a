use crate::hittable::Hittable;
use crate::math::{degrees_to_radians, random_double, Color, Point3, Vec3};
use crate::ray::Ray;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::io::Write;

/// Immutable render settings: everything needed to derive the camera's
/// orthonormal basis, viewport, and per-sample jitter.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub background: Color,
    pub vfov: f64,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vec3,
    pub defocus_angle: f64,
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::new(0.70, 0.80, 1.00),
            vfov: 20.0,
            lookfrom: Point3::new(13.0, 2.0, 3.0),
            lookat: Point3::zero(),
            vup: Vec3::unit_y(),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

/// A fully-derived camera ready to cast primary rays: the viewport basis,
/// pixel deltas, and defocus disk are all computed once in [`Camera::new`]
/// rather than per-ray.
pub struct Camera {
    config: CameraConfig,
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let image_height = ((config.image_width as f64 / config.aspect_ratio) as u32).max(1);

        let center = config.lookfrom;
        let theta = degrees_to_radians(config.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (config.image_width as f64 / image_height as f64);

        let w = (config.lookfrom - config.lookat).normalized();
        let u = config.vup.cross(w).normalized();
        let v = w.cross(u);

        let viewport_u = u * viewport_width;
        let viewport_v = -v * viewport_height;

        let pixel_delta_u = viewport_u / config.image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left = center - viewport_u / 2.0 - viewport_v / 2.0 - w * config.focus_dist;
        let pixel00_loc = viewport_upper_left + (pixel_delta_u + pixel_delta_v) * 0.5;

        let defocus_radius = config.focus_dist * degrees_to_radians(config.defocus_angle / 2.0).tan();
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        Self {
            config,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u,
            defocus_disk_v,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    fn defocus_disk_sample(&self, rng: &mut SmallRng) -> Point3 {
        let p = Vec3::random_in_unit_disk(rng);
        self.center + self.defocus_disk_u * p.x + self.defocus_disk_v * p.y
    }

    /// A randomly jittered primary ray through pixel `(i, j)`, with a
    /// shutter time sampled uniformly in `[0, 1)` for motion blur.
    fn get_ray(&self, i: u32, j: u32, rng: &mut SmallRng) -> Ray {
        let offset_x = -0.5 + random_double(rng);
        let offset_y = -0.5 + random_double(rng);
        let pixel_sample = self.pixel00_loc
            + self.pixel_delta_u * (i as f64 + offset_x)
            + self.pixel_delta_v * (j as f64 + offset_y);

        let origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let direction = pixel_sample - origin;
        Ray::with_time(origin, direction, random_double(rng))
    }

    /// The five-step radiance estimator: terminate at `max_depth`, test the
    /// closest hit, add the surface's own emission, recurse on the
    /// scattered ray weighted by attenuation, or fall back to `background`
    /// on a miss.
    fn ray_color(&self, ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut SmallRng) -> Color {
        if depth == 0 {
            return Color::zero();
        }

        let Some(hit) = world.hit(ray, crate::math::Interval::new(0.001, f64::INFINITY)) else {
            return self.config.background;
        };

        let emitted = hit.material.emitted(hit.u, hit.v, hit.p);

        match hit.material.scatter(ray, &hit, rng) {
            Some((attenuation, scattered)) => {
                emitted + attenuation.hadamard(self.ray_color(&scattered, depth - 1, world, rng))
            }
            None => emitted,
        }
    }

    /// Renders the full frame as rows of `(image_width)` linear-RGB pixels,
    /// one scanline per `rayon` task with its own thread-local RNG. Calls
    /// `on_pixel` for every finished, gamma-corrected pixel, in arbitrary
    /// completion order — a host can use it to mirror progress to a live
    /// display without the renderer depending on a UI crate.
    pub fn render(
        &self,
        world: &dyn Hittable,
        seed: u64,
        on_pixel: impl Fn(u32, u32, Color) + Sync,
    ) -> Vec<Vec<Color>> {
        let height = self.image_height;
        let width = self.config.image_width;
        let spp = self.config.samples_per_pixel;
        let max_depth = self.config.max_depth;

        (0..height)
            .into_par_iter()
            .map(|j| {
                let mut rng = SmallRng::seed_from_u64(seed ^ (j as u64).wrapping_mul(0x9E3779B97F4A7C15));
                let mut row = Vec::with_capacity(width as usize);
                for i in 0..width {
                    let mut accum = Color::zero();
                    for _ in 0..spp {
                        let ray = self.get_ray(i, j, &mut rng);
                        accum += self.ray_color(&ray, max_depth, world, &mut rng);
                    }
                    let pixel = (accum / spp as f64).gamma_correct();
                    on_pixel(i, j, pixel);
                    row.push(pixel);
                }
                row
            })
            .collect()
    }

    /// Renders and reports scanline progress to stderr, matching the
    /// teacher's `\r`-overwritten single-line progress style.
    pub fn render_with_progress(&self, world: &dyn Hittable, seed: u64) -> Vec<Vec<Color>> {
        let height = self.image_height;
        let rows = self.render(world, seed, |_, _, _| {});
        eprint!("\rRendering... 100% ");
        let _ = std::io::stderr().flush();
        eprintln!("\nFinished {height} scanlines.");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::{HittableList, Sphere};
    use crate::material::Lambertian;
    use std::sync::Arc;

    #[test]
    fn image_height_is_derived_from_width_and_aspect_ratio() {
        let cam = Camera::new(CameraConfig {
            image_width: 400,
            aspect_ratio: 2.0,
            ..CameraConfig::default()
        });
        assert_eq!(cam.image_height(), 200);
    }

    #[test]
    fn image_height_never_rounds_down_to_zero() {
        let cam = Camera::new(CameraConfig {
            image_width: 1,
            aspect_ratio: 1000.0,
            ..CameraConfig::default()
        });
        assert_eq!(cam.image_height(), 1);
    }

    #[test]
    fn defocus_angle_zero_always_originates_from_the_camera_center() {
        let cam = Camera::new(CameraConfig {
            defocus_angle: 0.0,
            ..CameraConfig::default()
        });
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let ray = cam.get_ray(0, 0, &mut rng);
            assert_eq!(ray.origin, cam.center);
        }
    }

    #[test]
    fn miss_returns_the_background_color() {
        let cam = Camera::new(CameraConfig::default());
        let world = HittableList::new();
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let mut rng = SmallRng::seed_from_u64(1);
        let color = cam.ray_color(&ray, 50, &world, &mut rng);
        assert_eq!(color, cam.config.background);
    }

    #[test]
    fn render_produces_the_requested_resolution() {
        let cam = Camera::new(CameraConfig {
            image_width: 8,
            aspect_ratio: 2.0,
            samples_per_pixel: 2,
            max_depth: 4,
            ..CameraConfig::default()
        });
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::stationary(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
        )));
        let rows = cam.render(&world, 7, |_, _, _| {});
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 8));
    }
}
