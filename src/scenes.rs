//! Named scene presets: each assembles a world ([`HittableList`], optionally
//! wrapped in a [`BvhNode`]) and a matching [`CameraConfig`], mirroring the
//! book-derived reference scenes this renderer is built to reproduce.

use crate::bvh::BvhNode;
use crate::camera::CameraConfig;
use crate::hittable::{ConstantMedium, Cuboid, Hittable, HittableList, Mesh, Quad, RotateY, Sphere, Translate};
use crate::material::{Dielectric, DiffuseLight, Lambertian, Material, Metal};
use crate::math::{random_double, random_double_range, Color, Point3, Vec3};
use crate::obj;
use crate::perlin::Perlin;
use crate::texture::{CheckerTexture, NoiseTexture};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

/// A scene ready to render: its geometry and the camera it was composed
/// for.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: CameraConfig,
}

/// A few hundred random small spheres around three large "hero" spheres,
/// the canonical closing scene of "Ray Tracing in One Weekend".
/// `use_bvh` lets callers compare flat-list vs BVH-accelerated traversal
/// over the same geometry.
pub fn random_spheres(use_bvh: bool, seed: u64) -> Scene {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let ground_material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_double(&mut rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_double(&mut rng),
                0.2,
                b as f64 + 0.9 * random_double(&mut rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() > 0.9 {
                if choose_mat < 0.8 {
                    let albedo = random_color(&mut rng).hadamard(random_color(&mut rng));
                    let material: Arc<dyn Material> = Arc::new(Lambertian::new(albedo));
                    let center2 = center + Vec3::new(0.0, random_double_range(&mut rng, 0.0, 0.5), 0.0);
                    world.add(Arc::new(Sphere::moving(center, center2, 0.2, material)));
                } else if choose_mat < 0.95 {
                    let albedo = random_color_range(&mut rng, 0.5, 1.0);
                    let fuzz = random_double_range(&mut rng, 0.0, 0.5);
                    let material: Arc<dyn Material> = Arc::new(Metal::new(albedo, fuzz));
                    world.add(Arc::new(Sphere::stationary(center, 0.2, material)));
                } else {
                    let material: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
                    world.add(Arc::new(Sphere::stationary(center, 0.2, material)));
                }
            }
        }
    }

    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let world: Arc<dyn Hittable> = if use_bvh {
        Arc::new(BvhNode::from_list(world))
    } else {
        Arc::new(world)
    };

    Scene {
        world,
        camera: CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::new(0.70, 0.80, 1.00),
            vfov: 20.0,
            lookfrom: Point3::new(13.0, 2.0, 3.0),
            lookat: Point3::zero(),
            vup: Vec3::unit_y(),
            defocus_angle: 0.6,
            focus_dist: 10.0,
        },
    }
}

fn random_color(rng: &mut SmallRng) -> Color {
    Color::new(random_double(rng), random_double(rng), random_double(rng))
}

fn random_color_range(rng: &mut SmallRng, lo: f64, hi: f64) -> Color {
    Color::new(
        random_double_range(rng, lo, hi),
        random_double_range(rng, lo, hi),
        random_double_range(rng, lo, hi),
    )
}

/// A single hollow glass sphere (negative inner radius) over a checkered
/// ground plane, the classic dielectric-bubble demonstration.
pub fn hollow_glass_sphere() -> Scene {
    let mut world = HittableList::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(checker)),
    )));

    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, 1.0, 0.0),
        -0.9,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    Scene {
        world: Arc::new(world),
        camera: CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::new(0.70, 0.80, 1.00),
            vfov: 20.0,
            lookfrom: Point3::new(13.0, 2.0, 3.0),
            lookat: Point3::zero(),
            vup: Vec3::unit_y(),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        },
    }
}

/// Two Perlin-noise marble spheres lit only by two emissive surfaces — a
/// sphere and a quad — against a black background.
pub fn simple_light(seed: u64) -> Scene {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let noise = Arc::new(NoiseTexture::new(Perlin::new(&mut rng), 4.0));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::textured(noise.clone())),
    )));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::textured(noise)),
    )));

    let light = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));
    world.add(Arc::new(Sphere::stationary(Point3::new(0.0, 7.0, 0.0), 2.0, light.clone())));
    world.add(Arc::new(Quad::new(
        Point3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    )));

    Scene {
        world: Arc::new(world),
        camera: CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::zero(),
            vfov: 20.0,
            lookfrom: Point3::new(26.0, 3.0, 6.0),
            lookat: Point3::new(0.0, 2.0, 0.0),
            vup: Vec3::unit_y(),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        },
    }
}

/// A single imported triangle mesh lit by a sphere and a quad light over a
/// Perlin-noise ground sphere, the mesh-import counterpart of the
/// Nefertiti/dragon demo scenes.
///
/// A mesh file that fails to load is not fatal: the load error is logged to
/// stderr and the scene renders with an empty mesh (the ground sphere and
/// lights still render) rather than aborting.
pub fn mesh_scene(path: impl AsRef<Path>, seed: u64) -> Scene {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let light = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));
    world.add(Arc::new(Sphere::stationary(Point3::new(0.0, 5.0, 0.0), 2.0, light.clone())));
    world.add(Arc::new(Quad::new(
        Point3::new(4.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    )));

    let noise = Arc::new(NoiseTexture::new(Perlin::new(&mut rng), 4.0));
    world.add(Arc::new(Sphere::stationary(
        Point3::new(0.0, -1000.0, 0.0),
        996.0,
        Arc::new(Lambertian::textured(noise)),
    )));

    let mesh_material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let mesh = match obj::load(path.as_ref()) {
        Ok(obj_mesh) => Mesh::new(&obj_mesh.vertices, &obj_mesh.faces, mesh_material),
        Err(err) => {
            eprintln!("mesh-scene: {err}; rendering without the imported mesh");
            Mesh::new(&[], &[], mesh_material)
        }
    };
    world.add(Arc::new(BvhNode::from_list({
        let mut one = HittableList::new();
        one.add(Arc::new(mesh));
        one
    })));

    Scene {
        world: Arc::new(world),
        camera: CameraConfig {
            aspect_ratio: 1.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::zero(),
            vfov: 70.0,
            lookfrom: Point3::new(-5.0, 0.0, 12.0),
            lookat: Point3::zero(),
            vup: Vec3::unit_y(),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        },
    }
}

fn cornell_box_walls_and_boxes(light_color: Color, light_corner: Point3, light_u: Vec3, light_v: Vec3) -> HittableList {
    let mut world = HittableList::new();

    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(light_color));

    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::zero(),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        light_corner, light_u, light_v, light,
    )));
    world.add(Arc::new(Quad::new(
        Point3::zero(),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white,
    )));

    world
}

fn cornell_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 1.0,
        image_width: 600,
        samples_per_pixel: 200,
        max_depth: 50,
        background: Color::zero(),
        vfov: 40.0,
        lookfrom: Point3::new(278.0, 278.0, -800.0),
        lookat: Point3::new(278.0, 278.0, 0.0),
        vup: Vec3::unit_y(),
        defocus_angle: 0.0,
        focus_dist: 10.0,
    }
}

/// The canonical Cornell box: red/green/white walls, a small ceiling
/// light, and two rotated boxes of differing height.
pub fn cornell_box() -> Scene {
    let mut world = cornell_box_walls_and_boxes(
        Color::new(15.0, 15.0, 15.0),
        Point3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
    );

    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));

    let box1: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Point3::zero(),
        Point3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let box1 = Arc::new(RotateY::new(box1, 15.0));
    let box1 = Arc::new(Translate::new(box1, Vec3::new(265.0, 0.0, 295.0)));
    world.add(box1);

    let box2: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::zero(), Point3::new(165.0, 165.0, 165.0), white));
    let box2 = Arc::new(RotateY::new(box2, -18.0));
    let box2 = Arc::new(Translate::new(box2, Vec3::new(130.0, 0.0, 65.0)));
    world.add(box2);

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(),
    }
}

/// The Cornell box with both boxes replaced by constant-density fog/smoke
/// volumes, demonstrating Beer-Lambert participating media.
pub fn cornell_smoke() -> Scene {
    let mut world = cornell_box_walls_and_boxes(
        Color::new(7.0, 7.0, 7.0),
        Point3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
    );

    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));

    let box1: Arc<dyn Hittable> = Arc::new(Cuboid::new(
        Point3::zero(),
        Point3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let box1 = Arc::new(RotateY::new(box1, 15.0));
    let box1: Arc<dyn Hittable> = Arc::new(Translate::new(box1, Vec3::new(265.0, 0.0, 295.0)));

    let box2: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::zero(), Point3::new(165.0, 165.0, 165.0), white));
    let box2 = Arc::new(RotateY::new(box2, -18.0));
    let box2: Arc<dyn Hittable> = Arc::new(Translate::new(box2, Vec3::new(130.0, 0.0, 65.0)));

    world.add(Arc::new(ConstantMedium::new(box1, 0.01, Color::zero())));
    world.add(Arc::new(ConstantMedium::new(box2, 0.01, Color::ones())));

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Interval;
    use crate::ray::Ray;

    #[test]
    fn random_spheres_bvh_and_flat_list_agree_on_a_sample_of_rays() {
        let flat = random_spheres(false, 99);
        let bvh = random_spheres(true, 99);

        for i in 0..50 {
            let origin = Point3::new(13.0, 2.0, 3.0);
            let dir = Point3::new(-13.0 + i as f64 * 0.5, -2.0, -3.0);
            let ray = Ray::new(origin, dir);
            let a = flat.world.hit(&ray, Interval::new(0.001, f64::INFINITY)).map(|h| h.t);
            let b = bvh.world.hit(&ray, Interval::new(0.001, f64::INFINITY)).map(|h| h.t);
            match (a, b) {
                (Some(ta), Some(tb)) => assert!((ta - tb).abs() < 1e-6),
                (None, None) => {}
                other => panic!("flat/bvh disagreement: {other:?}"),
            }
        }
    }

    #[test]
    fn cornell_box_camera_looks_down_positive_z_into_the_room() {
        let scene = cornell_box();
        assert_eq!(scene.camera.lookfrom, Point3::new(278.0, 278.0, -800.0));
        assert_eq!(scene.camera.background, Color::zero());
    }

    #[test]
    fn hollow_glass_sphere_scene_has_five_objects() {
        let scene = hollow_glass_sphere();
        let bbox = scene.world.bounding_box();
        assert!(bbox.x.size() > 0.0);
    }

    #[test]
    fn mesh_scene_falls_back_to_an_empty_mesh_on_a_missing_file() {
        let scene = mesh_scene("/nonexistent/path/to/mesh.obj", 7);
        // Straight down onto the noise-textured ground sphere: present
        // whether or not the mesh load succeeded.
        let ray = Ray::new(Point3::new(0.0, 500.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(scene.world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_some());
    }
}
