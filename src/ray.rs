use crate::math::{Point3, Vec3};

/// A parametric ray `p(t) = origin + t * direction`, carrying a shutter
/// time so moving geometry (and the integrator's motion blur support) can
/// sample the scene at the instant the ray was cast.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub time: f64,
}

impl Ray {
    #[inline(always)]
    pub const fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            time: 0.0,
        }
    }

    #[inline(always)]
    pub const fn with_time(origin: Point3, direction: Vec3, time: f64) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    #[inline(always)]
    pub fn at(self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
