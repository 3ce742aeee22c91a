use crate::math::{random_int, Point3};
use rand::Rng;

const POINT_COUNT: usize = 256;

/// A 256-entry random float table plus three independent 256-entry
/// permutations (one per axis), combined by XOR-ing the permuted indices.
/// This is the lattice-noise scheme from "Ray Tracing: The Next Week" —
/// simple, not gradient (Perlin-improved) noise.
pub struct Perlin {
    ranfloat: [f64; POINT_COUNT],
    perm_x: [i32; POINT_COUNT],
    perm_y: [i32; POINT_COUNT],
    perm_z: [i32; POINT_COUNT],
}

impl Perlin {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut ranfloat = [0.0; POINT_COUNT];
        for v in ranfloat.iter_mut() {
            *v = rng.gen_range(0.0..1.0);
        }
        Self {
            ranfloat,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    /// `noise(p) = table[perm_x[i] ^ perm_y[j] ^ perm_z[k]]` with
    /// `i,j,k = floor(4*coord) & 255`.
    pub fn noise(&self, p: Point3) -> f64 {
        let i = ((4.0 * p.x) as i32 & 255) as usize;
        let j = ((4.0 * p.y) as i32 & 255) as usize;
        let k = ((4.0 * p.z) as i32 & 255) as usize;
        let idx = (self.perm_x[i] ^ self.perm_y[j] ^ self.perm_z[k]) as usize;
        self.ranfloat[idx]
    }

    fn generate_perm(rng: &mut impl Rng) -> [i32; POINT_COUNT] {
        let mut p = [0i32; POINT_COUNT];
        for (i, v) in p.iter_mut().enumerate() {
            *v = i as i32;
        }
        for i in (1..POINT_COUNT).rev() {
            let target = random_int(rng, 0, i as i32) as usize;
            p.swap(i, target);
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn noise_is_deterministic_for_a_fixed_table() {
        let mut rng = SmallRng::seed_from_u64(1);
        let p = Perlin::new(&mut rng);
        let pt = Point3::new(1.5, 2.5, 3.5);
        assert_eq!(p.noise(pt), p.noise(pt));
    }

    #[test]
    fn noise_stays_in_unit_range() {
        let mut rng = SmallRng::seed_from_u64(2);
        let p = Perlin::new(&mut rng);
        for i in 0..50 {
            let v = p.noise(Point3::new(i as f64 * 0.3, -i as f64, i as f64 * 1.7));
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
