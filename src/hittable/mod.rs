//! The scene graph: a [`Hittable`] is any node that can be intersected by a
//! ray and report a bounding box. Primitives, combinators (lists,
//! transforms, participating media) and the BVH all implement it
//! uniformly, so the integrator never needs to know which kind of node it
//! is traversing.

mod cuboid;
mod list;
mod medium;
mod mesh;
mod quad;
mod sphere;
mod transform;

pub use cuboid::Cuboid;
pub use list::HittableList;
pub use medium::ConstantMedium;
pub use mesh::Mesh;
pub use quad::{Quad, Triangle};
pub use sphere::Sphere;
pub use transform::{RotateY, Translate};

use crate::material::Material;
use crate::math::{Aabb, Interval, Point3, Vec3};
use crate::ray::Ray;
use std::sync::Arc;

/// The outcome of a successful intersection: hit point, oriented normal,
/// ray parameter, surface coordinates, the ray's shutter time (threaded
/// through to the scattered ray for moving geometry), and a shared
/// reference to the surface's material.
#[derive(Clone)]
pub struct HitRecord {
    pub p: Point3,
    pub normal: Vec3,
    pub t: f64,
    pub time: f64,
    pub u: f64,
    pub v: f64,
    pub front_face: bool,
    pub material: Arc<dyn Material>,
}

impl HitRecord {
    /// Orients `normal` against the incoming ray and records which side was
    /// hit. `outward_normal` must already be unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Any intersectable, bounded scene node: primitives, combinators
/// (`HittableList`, `Translate`, `RotateY`, `ConstantMedium`), and the BVH
/// itself all implement this uniformly.
pub trait Hittable: Send + Sync {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord>;
    fn bounding_box(&self) -> Aabb;
}

impl Hittable for Arc<dyn Hittable> {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        self.as_ref().hit(ray, t_range)
    }

    fn bounding_box(&self) -> Aabb {
        self.as_ref().bounding_box()
    }
}
