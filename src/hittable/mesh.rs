use super::{HitRecord, Hittable, HittableList, Triangle};
use crate::material::Material;
use crate::math::{Aabb, Interval, Point3};
use crate::ray::Ray;
use std::sync::Arc;

/// A triangle mesh: a vertex array plus a flat list of triangle index
/// triples, expanded once at construction time into a [`HittableList`] of
/// [`Triangle`]s sharing one material. Built from the minimal Wavefront OBJ
/// subset the loader understands (`v` and `f` lines only).
pub struct Mesh {
    triangles: HittableList,
    bbox: Aabb,
}

impl Mesh {
    /// `faces` are zero-based vertex indices into `vertices`, three per
    /// triangle.
    pub fn new(vertices: &[Point3], faces: &[[u32; 3]], material: Arc<dyn Material>) -> Self {
        let mut triangles = HittableList::new();
        for face in faces {
            let [i, j, k] = *face;
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                vertices.get(i as usize),
                vertices.get(j as usize),
                vertices.get(k as usize),
            ) else {
                continue;
            };
            triangles.add(Arc::new(Triangle::new(v0, v1 - v0, v2 - v0, material.clone())));
        }
        let bbox = triangles.bounding_box();
        Self { triangles, bbox }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        self.triangles.hit(ray, t_range)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
