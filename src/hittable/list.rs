use super::{HitRecord, Hittable};
use crate::math::{Aabb, Interval};
use crate::ray::Ray;
use std::sync::Arc;

/// An unordered collection of [`Hittable`] nodes, hit by testing each child
/// and keeping the closest. Its own bounding box is the union of all
/// children's boxes, recomputed whenever a child is added.
#[derive(Default, Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::union(self.bbox, object.bounding_box());
        self.objects.push(object);
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Hittable>> {
        self.objects.iter()
    }

    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        let mut closest_so_far = t_range.max;
        let mut best: Option<HitRecord> = None;

        for object in &self.objects {
            if let Some(hit) = object.hit(ray, Interval::new(t_range.min, closest_so_far)) {
                closest_so_far = hit.t;
                best = Some(hit);
            }
        }
        best
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
