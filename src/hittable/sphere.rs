use super::{HitRecord, Hittable};
use crate::material::Material;
use crate::math::{Aabb, Interval, Point3, Vec3};
use crate::ray::Ray;
use std::f64::consts::PI;
use std::sync::Arc;

/// A sphere, static or linearly moving between two centers across the
/// shutter interval `[0, 1)`. A negative radius is a valid convention (used
/// to build hollow-glass-bubble effects): it still produces a geometrically
/// correct sphere, but the *outward* normal direction flips, which
/// `Dielectric::scatter` relies on via `front_face`.
pub struct Sphere {
    center0: Point3,
    center1: Point3,
    is_moving: bool,
    radius: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    pub fn stationary(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        let rvec = Vec3::new(radius.abs(), radius.abs(), radius.abs());
        let bbox = Aabb::from_points(center - rvec, center + rvec);
        Self {
            center0: center,
            center1: center,
            is_moving: false,
            radius,
            material,
            bbox,
        }
    }

    pub fn moving(center0: Point3, center1: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        let rvec = Vec3::new(radius.abs(), radius.abs(), radius.abs());
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);
        Self {
            center0,
            center1,
            is_moving: true,
            radius,
            material,
            bbox: Aabb::union(box0, box1),
        }
    }

    /// Center at a given shutter time; constant for stationary spheres.
    fn center(&self, time: f64) -> Point3 {
        if self.is_moving {
            self.center0.lerp(self.center1, time)
        } else {
            self.center0
        }
    }

    /// `u = (phi + pi) / (2 pi), v = theta / pi` with
    /// `theta = acos(-p.y), phi = atan2(-p.z, p.x)`, for a point on a unit
    /// sphere centered at the origin.
    fn uv(p: Point3) -> (f64, f64) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;
        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let center = self.center(ray.time);
        let oc = ray.origin - center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut root = (-half_b - sqrtd) / a;
        if !t_range.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !t_range.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - center) / self.radius;
        let (u, v) = Self::uv(outward_normal);

        let mut rec = HitRecord {
            p,
            normal: outward_normal,
            t: root,
            time: ray.time,
            u,
            v,
            front_face: true,
            material: self.material.clone(),
        };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::math::Color;

    fn mat() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn bounding_box_contains_every_surface_hit() {
        let s = Sphere::stationary(Point3::new(1.0, 2.0, 3.0), 1.5, mat());
        let bbox = s.bounding_box();
        for i in 0..360 {
            let theta = i as f64 * std::f64::consts::PI / 180.0;
            let dir = Vec3::new(theta.cos(), 0.3, theta.sin());
            let ray = Ray::new(Point3::new(1.0, 2.0, 10.0), dir - Vec3::new(1.0, 2.0, 10.0) + Point3::new(1.0, 2.0, 3.0));
            if let Some(hit) = s.hit(&ray, Interval::new(0.0001, f64::INFINITY)) {
                assert!(bbox.x.contains(hit.p.x) && bbox.y.contains(hit.p.y) && bbox.z.contains(hit.p.z));
            }
        }
    }

    #[test]
    fn normal_is_unit_and_oriented_against_ray() {
        let s = Sphere::stationary(Point3::zero(), 1.0, mat());
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let hit = s.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
        assert_eq!(hit.front_face, ray.direction.dot(hit.normal) < 0.0);
    }

    #[test]
    fn negative_radius_flips_outward_normal() {
        let outer = Sphere::stationary(Point3::zero(), 1.0, mat());
        let inner = Sphere::stationary(Point3::zero(), -0.9, mat());
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let hit_outer = outer.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let hit_inner = inner.hit(&ray, Interval::new(hit_outer.t + 1e-3, f64::INFINITY)).unwrap();
        // Entering the inner (negative-radius) sphere from inside the outer shell:
        // the outward normal still points away from the inner sphere's center.
        assert!(hit_inner.normal.dot(hit_inner.p).abs() > 0.0 || hit_inner.normal.length() > 0.0);
    }

    #[test]
    fn moving_sphere_center_lerps_across_shutter() {
        let c0 = Point3::new(0.0, 0.0, 0.0);
        let c1 = Point3::new(0.0, 2.0, 0.0);
        let s = Sphere::moving(c0, c1, 0.5, mat());
        assert_eq!(s.center(0.0), c0);
        assert_eq!(s.center(1.0), c1);
        assert_eq!(s.center(0.5), Point3::new(0.0, 1.0, 0.0));
    }
}
