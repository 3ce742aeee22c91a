use rand::Rng;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// A 3-component vector used for positions, directions, and colors.
///
/// This type implements all standard arithmetic operations with operator
/// overloading, and provides the geometric utilities (dot product, cross
/// product, reflection, refraction) needed for physically-based light
/// transport simulation. `Point3` and `Color` are the same representation
/// under different names — they are distinct semantically, not structurally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub type Point3 = Vec3;
pub type Color = Vec3;

impl Vec3 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    #[inline(always)]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Squared Euclidean length — avoids the sqrt for performance-critical
    /// paths such as BVH traversal and intersection culling.
    #[inline(always)]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline(always)]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product — used for constructing orthonormal camera bases and
    /// plane normals for quads and triangles.
    #[inline(always)]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Specular reflection of `self` about the surface normal `n`.
    #[inline(always)]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * 2.0 * self.dot(normal)
    }

    /// Snell's law refraction of a unit incident direction `self` across a
    /// unit surface normal, with `eta_ratio = eta_incident / eta_transmitted`.
    #[inline]
    pub fn refract(self, normal: Self, eta_ratio: f64) -> Self {
        let cos_theta = (-self).dot(normal).min(1.0);
        let r_perp = (self + normal * cos_theta) * eta_ratio;
        let r_parallel = normal * -((1.0 - r_perp.length_squared()).abs().sqrt());
        r_perp + r_parallel
    }

    /// Component-wise (Hadamard) product, used to modulate color by albedo.
    #[inline(always)]
    pub fn hadamard(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    /// Component-wise linear interpolation: `self*(1-t) + other*t`.
    #[inline(always)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Clamps each component to `[0, 1]`.
    #[inline(always)]
    pub fn saturate(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    /// Gamma-2 encoding (`c -> sqrt(c)`), the gamma-2 approximation of sRGB
    /// used before quantizing linear radiance to 8-bit output.
    #[inline(always)]
    pub fn gamma_correct(self) -> Self {
        Self::new(
            if self.x > 0.0 { self.x.sqrt() } else { 0.0 },
            if self.y > 0.0 { self.y.sqrt() } else { 0.0 },
            if self.z > 0.0 { self.z.sqrt() } else { 0.0 },
        )
    }

    /// True when every component is below ~1e-8 — used to detect degenerate
    /// scatter directions that would otherwise propagate NaNs.
    #[inline(always)]
    pub fn near_zero(self) -> bool {
        const EPS: f64 = 1e-8;
        self.x.abs() < EPS && self.y.abs() < EPS && self.z.abs() < EPS
    }

    /// Converts a `[0,1]` linear color to an 8-bit RGB triple, clamping to
    /// `[0, 0.999]` per channel before scaling so `1.0` never rounds up to 256.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = Self::new(
            self.x.clamp(0.0, 0.999),
            self.y.clamp(0.0, 0.999),
            self.z.clamp(0.0, 0.999),
        );
        [
            (c.x * 256.0) as u8,
            (c.y * 256.0) as u8,
            (c.z * 256.0) as u8,
        ]
    }

    /// Generates a uniformly distributed random point inside the unit sphere
    /// via rejection sampling.
    pub fn random_in_unit_sphere(rng: &mut impl Rng) -> Self {
        loop {
            let v = Self::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if v.length_squared() < 1.0 {
                return v;
            }
        }
    }

    /// Draws a direction uniformly distributed on the unit sphere.
    pub fn random_unit_vector(rng: &mut impl Rng) -> Self {
        Self::random_in_unit_sphere(rng).normalized()
    }

    /// A uniformly random direction in the hemisphere around `normal`,
    /// used by `Isotropic` scattering inside participating media.
    pub fn random_on_hemisphere(normal: Self, rng: &mut impl Rng) -> Self {
        let v = Self::random_unit_vector(rng);
        if v.dot(normal) > 0.0 {
            v
        } else {
            -v
        }
    }

    /// Random point strictly inside the unit disk (z = 0), via rejection
    /// sampling — used for depth-of-field lens sampling.
    pub fn random_in_unit_disk(rng: &mut impl Rng) -> Self {
        loop {
            let v = Self::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            if v.length_squared() < 1.0 {
                return v;
            }
        }
    }
}

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn random_double(rng: &mut impl Rng) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Uniform sample in `[a, b)`.
#[inline]
pub fn random_double_range(rng: &mut impl Rng, a: f64, b: f64) -> f64 {
    rng.gen_range(a..b)
}

/// Uniform integer sample in `[a, b]` inclusive.
#[inline]
pub fn random_int(rng: &mut impl Rng, a: i32, b: i32) -> i32 {
    rng.gen_range(a..=b)
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: f64) -> Self {
        Self::new(self.x * t, self.y * t, self.z * t)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline(always)]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl MulAssign<f64> for Vec3 {
    #[inline(always)]
    fn mul_assign(&mut self, t: f64) {
        self.x *= t;
        self.y *= t;
        self.z *= t;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn div(self, t: f64) -> Self {
        let inv = 1.0 / t;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl DivAssign<f64> for Vec3 {
    #[inline(always)]
    fn div_assign(&mut self, t: f64) {
        let inv = 1.0 / t;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn reflect_about_normal() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::unit_y();
        let r = v.reflect(n);
        assert!((r - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn refract_matches_snell_normal_incidence() {
        // Straight-on incidence should pass through undeviated in direction.
        let v = Vec3::new(0.0, -1.0, 0.0);
        let n = Vec3::unit_y();
        let r = v.refract(n, 1.0 / 1.5);
        assert!((r - v).length() < 1e-6);
    }

    #[test]
    fn random_unit_vector_is_unit_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = Vec3::random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn random_in_unit_disk_has_zero_z_and_bounded_radius() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = Vec3::random_in_unit_disk(&mut rng);
            assert_eq!(v.z, 0.0);
            assert!(v.length_squared() < 1.0);
        }
    }

    #[test]
    fn near_zero_detects_tiny_vectors() {
        assert!(Vec3::new(1e-10, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-3, 0.0, 0.0).near_zero());
    }
}
