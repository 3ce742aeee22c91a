use super::{HitRecord, Hittable, HittableList, Quad};
use crate::material::Material;
use crate::math::{Aabb, Interval, Point3, Vec3};
use crate::ray::Ray;
use std::sync::Arc;

/// An axis-aligned box built from six [`Quad`] faces, rather than the
/// slab-distance formulation some raytracers use — this keeps cuboids
/// uniform with every other quad-based primitive (uv coordinates, the
/// `alpha`/`beta` hit test) instead of a separate code path.
pub struct Cuboid {
    sides: HittableList,
    bbox: Aabb,
}

impl Cuboid {
    /// Builds a box with the given two opposite corners (any order).
    pub fn new(a: Point3, b: Point3, material: Arc<dyn Material>) -> Self {
        let min = Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));

        let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
        let dy = Vec3::new(0.0, max.y - min.y, 0.0);
        let dz = Vec3::new(0.0, 0.0, max.z - min.z);

        let mut sides = HittableList::new();
        sides.add(Arc::new(Quad::new(
            Point3::new(min.x, min.y, max.z),
            dx,
            dy,
            material.clone(),
        ))); // front
        sides.add(Arc::new(Quad::new(
            Point3::new(max.x, min.y, max.z),
            -dz,
            dy,
            material.clone(),
        ))); // right
        sides.add(Arc::new(Quad::new(
            Point3::new(max.x, min.y, min.z),
            -dx,
            dy,
            material.clone(),
        ))); // back
        sides.add(Arc::new(Quad::new(
            Point3::new(min.x, min.y, min.z),
            dz,
            dy,
            material.clone(),
        ))); // left
        sides.add(Arc::new(Quad::new(
            Point3::new(min.x, max.y, max.z),
            dx,
            -dz,
            material.clone(),
        ))); // top
        sides.add(Arc::new(Quad::new(
            Point3::new(min.x, min.y, min.z),
            dx,
            dz,
            material,
        ))); // bottom

        let bbox = sides.bounding_box();
        Self { sides, bbox }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        self.sides.hit(ray, t_range)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
