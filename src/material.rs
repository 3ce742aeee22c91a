use crate::hittable::HitRecord;
use crate::math::{random_double, Color, Point3, Vec3};
use crate::ray::Ray;
use crate::texture::{SolidColor, Texture};
use rand::Rng;
use std::sync::Arc;

/// The BRDF/emission abstraction. A material either scatters the incident
/// ray (returning an attenuation and a new ray) or absorbs it (`None`);
/// independently, it may emit radiance of its own.
///
/// Invariant: for energy-conserving materials, every attenuation channel
/// returned by `scatter` lies in `[0, 1]`.
pub trait Material: Send + Sync {
    fn scatter(&self, ray_in: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)>;

    /// Emitted radiance at the given surface coordinates / world point.
    /// Zero for every material except `DiffuseLight`.
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::zero()
    }
}

/// Ideal diffuse (Lambertian) reflection: the scatter direction is the
/// surface normal perturbed by a random unit vector, which importance-
/// samples the cosine-weighted BRDF.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)> {
        let mut scatter_direction = hit.normal + Vec3::random_unit_vector(rng);
        if scatter_direction.near_zero() {
            scatter_direction = hit.normal;
        }
        let scattered = Ray::with_time(hit.p, scatter_direction, hit.time);
        let attenuation = self.albedo.value(hit.u, hit.v, hit.p);
        Some((attenuation, scattered))
    }
}

/// Specular reflection perturbed by `fuzz * random_unit_vector`. A
/// scattered direction that ends up pointing into the surface means the
/// ray is absorbed rather than producing a below-surface bounce.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)> {
        let reflected = ray_in.direction.normalized().reflect(hit.normal);
        let scattered = Ray::with_time(
            hit.p,
            reflected + Vec3::random_unit_vector(rng) * self.fuzz,
            hit.time,
        );
        if scattered.direction.dot(hit.normal) > 0.0 {
            Some((self.albedo, scattered))
        } else {
            None
        }
    }
}

/// A colorless dielectric (glass, water) that reflects or refracts
/// according to Snell's law and Schlick's reflectance approximation.
pub struct Dielectric {
    ior: f64,
}

impl Dielectric {
    pub const fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// `r0 = ((1-eta)/(1+eta))^2; R = r0 + (1-r0)(1-cos)^5`.
    fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)> {
        let eta_ratio = if hit.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };
        let unit_direction = ray_in.direction.normalized();
        let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        let cannot_refract = eta_ratio * sin_theta > 1.0;
        let u: f64 = random_double(rng);
        let direction = if cannot_refract || Self::reflectance(cos_theta, eta_ratio) > u {
            unit_direction.reflect(hit.normal)
        } else {
            unit_direction.refract(hit.normal, eta_ratio)
        };

        let scattered = Ray::with_time(hit.p, direction, hit.time);
        Some((Color::ones(), scattered))
    }
}

/// An area-light material: absorbs everything (`scatter` is always
/// `None`) and emits the backing texture's value at every surface point.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(color: Color) -> Self {
        Self {
            emit: Arc::new(SolidColor::new(color)),
        }
    }

    pub fn textured(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _hit: &HitRecord, _rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)> {
        None
    }

    fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Isotropic scattering: every outgoing direction is equally likely. Used
/// exclusively as the material of a [`ConstantMedium`](crate::hittable::ConstantMedium)'s
/// synthetic scattering events.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    pub fn textured(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, _ray_in: &Ray, hit: &HitRecord, rng: &mut dyn rand::RngCore) -> Option<(Color, Ray)> {
        let scattered = Ray::with_time(hit.p, Vec3::random_unit_vector(rng), hit.time);
        Some((self.albedo.value(hit.u, hit.v, hit.p), scattered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HitRecord;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn hit_at_origin(normal: Vec3, front_face: bool) -> HitRecord {
        HitRecord {
            p: Point3::zero(),
            normal,
            t: 1.0,
            time: 0.0,
            u: 0.0,
            v: 0.0,
            front_face,
            material: Arc::new(Lambertian::new(Color::ones())),
        }
    }

    #[test]
    fn metal_never_scatters_below_the_surface() {
        let mat = Metal::new(Color::ones(), 0.0);
        let normal = Vec3::unit_y();
        let hit = hit_at_origin(normal, true);
        let ray_in = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.0));
        if let Some((_, scattered)) = mat.scatter(&ray_in, &hit, &mut SmallRng::seed_from_u64(1)) {
            assert!(scattered.direction.dot(normal) > 0.0);
        }
    }

    #[test]
    fn dielectric_is_colorless() {
        let mat = Dielectric::new(1.5);
        let hit = hit_at_origin(Vec3::unit_y(), true);
        let ray_in = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rng = SmallRng::seed_from_u64(3);
        let (attenuation, _) = mat.scatter(&ray_in, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, Color::ones());
    }

    #[test]
    fn diffuse_light_never_scatters() {
        let mat = DiffuseLight::new(Color::new(4.0, 4.0, 4.0));
        let hit = hit_at_origin(Vec3::unit_y(), true);
        let ray_in = Ray::new(Point3::zero(), Vec3::unit_x());
        assert!(mat
            .scatter(&ray_in, &hit, &mut SmallRng::seed_from_u64(1))
            .is_none());
        assert_eq!(mat.emitted(0.0, 0.0, Point3::zero()), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn lambertian_substitutes_normal_for_degenerate_direction() {
        // Not practical to force near_zero() via RNG deterministically here;
        // this checks the non-degenerate path always stays on the outward side.
        let mat = Lambertian::new(Color::new(0.5, 0.5, 0.5));
        let hit = hit_at_origin(Vec3::unit_y(), true);
        let ray_in = Ray::new(Point3::zero(), Vec3::unit_x());
        let (atten, scattered) = mat
            .scatter(&ray_in, &hit, &mut SmallRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(atten, Color::new(0.5, 0.5, 0.5));
        assert!(scattered.direction.length() > 0.0);
    }
}
