use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::math::{Aabb, Interval};
use crate::ray::Ray;
use std::sync::Arc;

/// A binary bounding volume hierarchy over a set of [`Hittable`] leaves.
/// Traversal prunes whole subtrees by testing the node's own box before
/// recursing, which turns naive O(n) scene intersection into O(log n) for
/// scenes with many primitives.
///
/// The split axis is always the node's current longest axis rather than a
/// randomly chosen one: it is deterministic, reproducible across runs with
/// the same scene, and tends to produce tighter child boxes than a random
/// pick.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    pub fn from_list(list: HittableList) -> Self {
        let mut objects = list.into_objects();
        let len = objects.len();
        Self::build(&mut objects, 0, len)
    }

    fn build(objects: &mut [Arc<dyn Hittable>], start: usize, end: usize) -> Self {
        let mut bbox = Aabb::EMPTY;
        for obj in &objects[start..end] {
            bbox = Aabb::union(bbox, obj.bounding_box());
        }
        let axis = bbox.longest_axis();

        let span = end - start;
        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match span {
            0 => {
                let leaf: Arc<dyn Hittable> = Arc::new(EmptyLeaf);
                (leaf.clone(), leaf)
            }
            1 => (objects[start].clone(), objects[start].clone()),
            2 => {
                if Self::axis_min(&objects[start], axis) <= Self::axis_min(&objects[start + 1], axis) {
                    (objects[start].clone(), objects[start + 1].clone())
                } else {
                    (objects[start + 1].clone(), objects[start].clone())
                }
            }
            _ => {
                objects[start..end]
                    .sort_by(|a, b| Self::axis_min(a, axis).total_cmp(&Self::axis_min(b, axis)));
                let mid = start + span / 2;
                let left = Arc::new(Self::build(objects, start, mid));
                let right = Arc::new(Self::build(objects, mid, end));
                (left, right)
            }
        };

        Self { left, right, bbox }
    }

    fn axis_min(object: &Arc<dyn Hittable>, axis: usize) -> f64 {
        object.bounding_box().axis(axis).min
    }
}

/// The leaf a degenerate (empty) build produces: never hit, contributes
/// nothing to the scene's bounding box.
struct EmptyLeaf;

impl Hittable for EmptyLeaf {
    fn hit(&self, _ray: &Ray, _t_range: Interval) -> Option<HitRecord> {
        None
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::EMPTY
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<HitRecord> {
        if !self.bbox.hit(ray, t_range) {
            return None;
        }

        let hit_left = self.left.hit(ray, t_range);
        let right_max = hit_left.as_ref().map_or(t_range.max, |h| h.t);
        let hit_right = self.right.hit(ray, Interval::new(t_range.min, right_max));

        hit_right.or(hit_left)
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
    use crate::math::{Color, Point3, Vec3};

    fn mat() -> Arc<dyn crate::material::Material> {
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)))
    }

    fn scattered_spheres() -> HittableList {
        let mut list = HittableList::new();
        for i in 0..20 {
            let x = (i as f64) * 2.0 - 20.0;
            list.add(Arc::new(Sphere::stationary(Point3::new(x, 0.0, 0.0), 0.4, mat())));
        }
        list
    }

    #[test]
    fn bvh_agrees_with_the_naive_list_it_was_built_from() {
        let list = scattered_spheres();
        let flat = list.clone();
        let bvh = BvhNode::from_list(list);

        for i in 0..200 {
            let origin = Point3::new(-20.0, 0.0, -50.0 + i as f64 * 0.3);
            let ray = Ray::new(origin, Vec3::new(1.0, 0.0, 10.0));
            let a = flat.hit(&ray, Interval::new(0.001, f64::INFINITY)).map(|h| h.t);
            let b = bvh.hit(&ray, Interval::new(0.001, f64::INFINITY)).map(|h| h.t);
            match (a, b) {
                (Some(ta), Some(tb)) => assert!((ta - tb).abs() < 1e-6),
                (None, None) => {}
                other => panic!("bvh/list disagreed on a hit: {other:?}"),
            }
        }
    }

    #[test]
    fn bounding_box_is_the_union_of_all_leaves() {
        let list = scattered_spheres();
        let expected = list.bounding_box();
        let bvh = BvhNode::from_list(list);
        let got = bvh.bounding_box();
        assert!((got.x.min - expected.x.min).abs() < 1e-9);
        assert!((got.x.max - expected.x.max).abs() < 1e-9);
    }

    #[test]
    fn empty_list_builds_a_harmless_empty_bvh() {
        let bvh = BvhNode::from_list(HittableList::new());
        let ray = Ray::new(Point3::new(0.0, 0.0, -10.0), Vec3::unit_z());
        assert!(bvh.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
        let box_ = bvh.bounding_box();
        assert!(!box_.x.surrounds(0.0) || box_.x.size() == 0.0);
    }

    #[test]
    fn two_leaf_split_orders_children_by_axis_min() {
        let mut list = HittableList::new();
        list.add(Arc::new(Sphere::stationary(Point3::new(5.0, 0.0, 0.0), 1.0, mat())));
        list.add(Arc::new(Sphere::stationary(Point3::new(-5.0, 0.0, 0.0), 1.0, mat())));
        let bvh = BvhNode::from_list(list);
        // Both orderings must still produce correct hits regardless of
        // which child ends up left/right.
        let ray = Ray::new(Point3::new(-5.0, 0.0, -10.0), Vec3::unit_z());
        assert!(bvh.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_some());
    }
}
