use super::{HitRecord, Hittable};
use crate::material::Material;
use crate::math::{Aabb, Interval, Point3, Vec3};
use crate::ray::Ray;
use std::sync::Arc;

/// A planar quadrilateral spanned by `q + alpha*u + beta*v` for
/// `alpha, beta` in `[0, 1]`. Also the basis for [`Triangle`], which clips
/// to the `alpha + beta <= 1` half.
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    w: Vec3, // u x v, scaled by 1/(n.n), for fast alpha/beta extraction
    normal: Vec3,
    d: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
    is_triangle: bool,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::build(q, u, v, material, false)
    }

    fn build(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>, is_triangle: bool) -> Self {
        let n = u.cross(v);
        let normal = n.normalized();
        let d = normal.dot(q);
        let w = n / n.dot(n);
        let bbox = Aabb::union(
            Aabb::from_points(q, q + u + v),
            Aabb::from_points(q + u, q + v),
        );
        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
            is_triangle,
        }
    }

    /// Given planar hit coordinates, tests whether they fall within this
    /// shape's 2-D extent and, if so, fills in `u`/`v` surface coordinates
    /// on the record. Quads accept `[0,1]x[0,1]`; triangles additionally
    /// require `alpha + beta <= 1`.
    fn within_bounds(&self, alpha: f64, beta: f64) -> Option<(f64, f64)> {
        let unit = Interval::new(0.0, 1.0);
        if self.is_triangle {
            if alpha < 0.0 || beta < 0.0 || alpha + beta > 1.0 {
                return None;
            }
        } else if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }
        Some((alpha, beta))
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !t_range.contains(t) {
            return None;
        }

        let intersection = ray.at(t);
        let planar_hitpt = intersection - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        let (u, v) = self.within_bounds(alpha, beta)?;

        let mut rec = HitRecord {
            p: intersection,
            normal: self.normal,
            t,
            time: ray.time,
            u,
            v,
            front_face: true,
            material: self.material.clone(),
        };
        rec.set_face_normal(ray, self.normal);
        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A triangle, expressed as the `alpha + beta <= 1` half of the quad
/// spanned by `q, q+u, q+v`.
pub struct Triangle(Quad);

impl Triangle {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self(Quad::build(q, u, v, material, true))
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        self.0.hit(ray, t_range)
    }

    fn bounding_box(&self) -> Aabb {
        self.0.bounding_box()
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
    fn ray_through_center_hits_with_midpoint_uv() {
        let quad = Quad::new(
            Point3::new(-1.0, -1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            mat(),
        );
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let hit = quad.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.u - 0.5).abs() < 1e-9 && (hit.v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ray_outside_quad_extent_misses() {
        let quad = Quad::new(
            Point3::new(-1.0, -1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            mat(),
        );
        let ray = Ray::new(Point3::new(10.0, 10.0, -5.0), Vec3::unit_z());
        assert!(quad.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn triangle_rejects_the_far_half_of_the_quad() {
        let tri = Triangle::new(
            Point3::zero(),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            mat(),
        );
        // Point at alpha=0.9, beta=0.9 is inside the quad but outside the triangle.
        let ray = Ray::new(Point3::new(1.8, 1.8, -5.0), Vec3::unit_z());
        assert!(tri.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn parallel_ray_never_hits() {
        let quad = Quad::new(Point3::zero(), Vec3::unit_x(), Vec3::unit_y(), mat());
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_x());
        assert!(quad.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }
}
