use super::{Interval, Point3, Vec3};
use crate::ray::Ray;

/// An axis-aligned bounding box — the intersection of three [`Interval`]
/// slabs, one per axis. The bounding volume used throughout the BVH and by
/// every `Hittable`.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Builds a box from two arbitrary corner points, taking componentwise
    /// min/max so callers may pass extrema in either order.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
        .pad()
    }

    pub fn union(a: Aabb, b: Aabb) -> Self {
        Self {
            x: Interval::union(a.x, b.x),
            y: Interval::union(a.y, b.y),
            z: Interval::union(a.z, b.z),
        }
    }

    /// Widens any axis with near-zero extent by a small epsilon, so planar
    /// primitives (quads, triangles) never hand the BVH a degenerate slab.
    pub fn pad(self) -> Self {
        const DELTA: f64 = 1e-4;
        let x = if self.x.size() < DELTA {
            self.x.expand(DELTA)
        } else {
            self.x
        };
        let y = if self.y.size() < DELTA {
            self.y.expand(DELTA)
        } else {
            self.y
        };
        let z = if self.z.size() < DELTA {
            self.z.expand(DELTA)
        } else {
            self.z
        };
        Self { x, y, z }
    }

    #[inline]
    pub fn axis(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Index of the longest axis (0=x, 1=y, 2=z) — the split dimension used
    /// by the BVH's top-down midpoint build.
    pub fn longest_axis(&self) -> usize {
        let (dx, dy, dz) = (self.x.size(), self.y.size(), self.z.size());
        if dx > dy && dx > dz {
            0
        } else if dy > dz {
            1
        } else {
            2
        }
    }

    pub fn translate(self, offset: Vec3) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }

    /// Slab-method ray-box intersection. Rejects as soon as any axis's
    /// clipped interval collapses (`hi <= lo`); relies on IEEE-754
    /// semantics to handle rays parallel to a slab (division by zero
    /// direction yields +/-inf, which a subsequent min/max handles without
    /// ever treating a NaN comparison as a hit).
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut t_min = ray_t.min;
        let mut t_max = ray_t.max;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let orig = ray.origin[axis];
            let mut t0 = (self.axis(axis).min - orig) * inv_d;
            let mut t1 = (self.axis(axis).max - orig) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn from_points_accepts_either_corner_order() {
        let a = Aabb::from_points(Point3::new(1.0, 1.0, 1.0), Point3::new(-1.0, -1.0, -1.0));
        let b = Aabb::from_points(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
        assert_eq!(a.z, b.z);
    }

    #[test]
    fn pad_gives_non_degenerate_axis() {
        let b = Aabb::new(
            Interval::new(0.0, 0.0),
            Interval::new(-1.0, 1.0),
            Interval::new(-1.0, 1.0),
        )
        .pad();
        assert!(b.x.size() > 0.0);
    }

    #[test]
    fn union_is_symmetric_under_slab_test() {
        let a = Aabb::from_points(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let u = Aabb::union(a, a);
        let r = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::unit_x());
        assert_eq!(a.hit(&r, Interval::UNIVERSE), u.hit(&r, Interval::UNIVERSE));
    }

    #[test]
    fn longest_axis_picks_the_widest() {
        let b = Aabb::new(
            Interval::new(0.0, 10.0),
            Interval::new(0.0, 1.0),
            Interval::new(0.0, 2.0),
        );
        assert_eq!(b.longest_axis(), 0);
    }
}
