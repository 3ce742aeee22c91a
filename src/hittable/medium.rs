use super::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};
use crate::math::{random_double, Aabb, Color, Interval, Vec3};
use crate::ray::Ray;
use crate::texture::Texture;
use std::sync::Arc;

/// A constant-density participating medium (fog, smoke): a ray crossing the
/// boundary geometry has a Beer-Lambert-distributed chance of scattering
/// before it exits, independent of the angle or point of entry. The
/// boundary must be convex for the "first exit after entry" logic below to
/// be correct.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }

    pub fn textured(boundary: Arc<dyn Hittable>, density: f64, texture: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::textured(texture)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let mut rec1 = self.boundary.hit(ray, Interval::UNIVERSE)?;
        let mut rec2 = self
            .boundary
            .hit(ray, Interval::new(rec1.t + 0.0001, f64::INFINITY))?;

        if rec1.t < t_range.min {
            rec1.t = t_range.min;
        }
        if rec2.t > t_range.max {
            rec2.t = t_range.max;
        }
        if rec1.t >= rec2.t {
            return None;
        }
        if rec1.t < 0.0 {
            rec1.t = 0.0;
        }

        let ray_length = ray.direction.length();
        let distance_inside_boundary = (rec2.t - rec1.t) * ray_length;
        let hit_distance = self.neg_inv_density * random_double(&mut rand::thread_rng()).ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = rec1.t + hit_distance / ray_length;
        let p = ray.at(t);

        Some(HitRecord {
            p,
            normal: Vec3::unit_x(), // arbitrary: isotropic scattering ignores it
            t,
            time: ray.time,
            u: 0.0,
            v: 0.0,
            front_face: true,
            material: self.phase_function.clone(),
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Sphere;
    use crate::material::Lambertian;
    use crate::math::Point3;

    fn shell() -> Arc<dyn Hittable> {
        Arc::new(Sphere::stationary(
            Point3::zero(),
            1.0,
            Arc::new(Lambertian::new(Color::ones())),
        ))
    }

    #[test]
    fn ray_missing_the_boundary_never_scatters() {
        let medium = ConstantMedium::new(shell(), 1.0, Color::ones());
        let ray = Ray::new(Point3::new(10.0, 10.0, -5.0), Vec3::unit_z());
        assert!(medium.hit(&ray, Interval::new(0.0, f64::INFINITY)).is_none());
    }

    #[test]
    fn dense_medium_almost_always_scatters_a_crossing_ray() {
        let medium = ConstantMedium::new(shell(), 200.0, Color::ones());
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let mut scatters = 0;
        for _ in 0..200 {
            if medium.hit(&ray, Interval::new(0.0, f64::INFINITY)).is_some() {
                scatters += 1;
            }
        }
        assert!(scatters > 150);
    }

    #[test]
    fn bounding_box_matches_the_boundary() {
        let medium = ConstantMedium::new(shell(), 1.0, Color::ones());
        let expected = shell().bounding_box();
        let got = medium.bounding_box();
        assert_eq!(got.x, expected.x);
        assert_eq!(got.y, expected.y);
        assert_eq!(got.z, expected.z);
    }
}
