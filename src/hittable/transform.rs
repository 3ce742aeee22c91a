use super::{HitRecord, Hittable};
use crate::math::{degrees_to_radians, Aabb, Interval, Point3, Vec3};
use crate::ray::Ray;
use std::sync::Arc;

/// Shifts a child node by a constant offset. Implemented by transforming
/// the incoming ray into the child's object space (subtracting the offset),
/// intersecting there, then translating the resulting hit point back out —
/// cheaper than transforming the geometry itself.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let offset_ray = Ray::with_time(ray.origin - self.offset, ray.direction, ray.time);
        let mut hit = self.object.hit(&offset_ray, t_range)?;
        hit.p = hit.p + self.offset;
        Some(hit)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates a child node about the Y axis by a fixed angle, again by
/// transforming rays into object space rather than the geometry itself.
/// The child's bounding box is rebuilt by rotating all eight corners of the
/// original box and taking their extent, which is a correct (if loose)
/// over-approximation for any rotation angle.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f64,
    cos_theta: f64,
    bbox: Aabb,
}

impl RotateY {
    pub fn new(object: Arc<dyn Hittable>, angle_degrees: f64) -> Self {
        let radians = degrees_to_radians(angle_degrees);
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();
        let original = object.bounding_box();

        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let x = i as f64 * original.x.max + (1 - i) as f64 * original.x.min;
                    let y = j as f64 * original.y.max + (1 - j) as f64 * original.y.min;
                    let z = k as f64 * original.z.max + (1 - k) as f64 * original.z.min;

                    let newx = cos_theta * x + sin_theta * z;
                    let newz = -sin_theta * x + cos_theta * z;
                    let tester = Vec3::new(newx, y, newz);

                    min.x = min.x.min(tester.x);
                    max.x = max.x.max(tester.x);
                    min.y = min.y.min(tester.y);
                    max.y = max.y.max(tester.y);
                    min.z = min.z.min(tester.z);
                    max.z = max.z.max(tester.z);
                }
            }
        }

        Self {
            object,
            sin_theta,
            cos_theta,
            bbox: Aabb::from_points(min, max),
        }
    }

    fn into_object_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn into_world_space(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let origin = self.into_object_space(ray.origin);
        let direction = self.into_object_space(ray.direction);
        let rotated_ray = Ray::with_time(origin, direction, ray.time);

        let mut hit = self.object.hit(&rotated_ray, t_range)?;
        hit.p = self.into_world_space(hit.p);
        hit.normal = self.into_world_space(hit.normal);
        Some(hit)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Sphere;
    use crate::material::Lambertian;
    use crate::math::Color;
    use std::f64::consts::PI;

    fn mat() -> Arc<dyn crate::material::Material> {
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn translate_shifts_the_bounding_box_and_hit_point() {
        let sphere = Arc::new(Sphere::stationary(Point3::zero(), 1.0, mat()));
        let moved = Translate::new(sphere, Vec3::new(5.0, 0.0, 0.0));
        let ray = Ray::new(Point3::new(5.0, 0.0, -5.0), Vec3::unit_z());
        let hit = moved.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.p.x - 5.0).abs() < 1e-9);
        assert!((moved.bounding_box().x.min - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_y_round_trips_object_and_world_space() {
        let sphere = Arc::new(Sphere::stationary(Point3::zero(), 1.0, mat()));
        let rotated = RotateY::new(sphere, 60.0);
        let v = Vec3::new(3.0, 6.0, 21.0);
        let object_space = rotated.into_object_space(v);
        let back = rotated.into_world_space(object_space);
        assert!((back.x - v.x).abs() < 1e-9);
        assert!((back.y - v.y).abs() < 1e-9);
        assert!((back.z - v.z).abs() < 1e-9);
    }

    #[test]
    fn rotate_y_by_pi_over_3_matches_known_coordinates() {
        let sphere = Arc::new(Sphere::stationary(Point3::zero(), 1.0, mat()));
        let rotated = RotateY::new(sphere, 60.0);
        assert!((rotated.sin_theta - (PI / 3.0).sin()).abs() < 1e-9);
        assert!((rotated.cos_theta - (PI / 3.0).cos()).abs() < 1e-9);
    }
}
