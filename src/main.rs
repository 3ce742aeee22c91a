//! # lumentrace
//!
//! An offline, CPU-based Monte Carlo path tracer that renders a scene to a
//! PPM image file.
//!
//! ## Rendering equation
//!
//! ```text
//!   L_o(p, ω_o) = L_e(p, ω_o) + ∫_Ω f_r(p, ω_i, ω_o) · L_i(p, ω_i) · |cos θ_i| dω_i
//! ```
//!
//! Each material's `scatter` importance-samples its BRDF lobe; the
//! integrator recursively traces the scattered ray to evaluate `L_i`.

use clap::Parser;
use lumentrace::camera::{Camera, CameraConfig};
use lumentrace::output::write_ppm;
use lumentrace::scenes::{self, Scene};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

/// lumentrace — an offline Monte Carlo path tracer
#[derive(Parser, Debug)]
#[command(
    name = "lumentrace",
    version,
    about = "An offline, CPU-based Monte Carlo path tracer",
    after_help = "EXAMPLES:\n  \
                  lumentrace --scene cornell-box --spp 200 --out cornell.ppm\n  \
                  lumentrace --scene random-spheres --no-bvh --width 400\n  \
                  lumentrace --scene cornell-smoke --spp 400 --bounces 50\n  \
                  lumentrace --scene mesh --mesh ./dragon.obj --spp 100"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::RandomSpheres)]
    scene: ScenePreset,

    /// Output image width in pixels. Height is derived from the scene's
    /// aspect ratio.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Samples per pixel — higher values reduce noise at the cost of render
    /// time.
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum ray bounce depth.
    #[arg(long)]
    bounces: Option<u32>,

    /// Disable BVH acceleration (random-spheres preset only; used to
    /// compare flat-list vs BVH traversal).
    #[arg(long)]
    no_bvh: bool,

    /// Random seed driving scene composition and per-pixel sampling.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Wavefront OBJ file to import (mesh preset only). A missing or
    /// unreadable file logs a diagnostic and renders the scene without the
    /// mesh rather than aborting.
    #[arg(long, default_value = "mesh.obj")]
    mesh: PathBuf,

    /// Output PPM file path.
    #[arg(short, long, default_value = "render.ppm")]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ScenePreset {
    /// Several hundred random spheres around three large hero spheres
    RandomSpheres,
    /// A single hollow glass sphere over a checkered ground plane
    HollowGlass,
    /// Two Perlin-noise marble spheres lit by emissive surfaces
    SimpleLight,
    /// The canonical Cornell box
    CornellBox,
    /// The Cornell box with fog/smoke participating media
    CornellSmoke,
    /// An imported triangle mesh over a Perlin-noise ground sphere
    Mesh,
}

impl ScenePreset {
    fn build(self, use_bvh: bool, seed: u64, mesh_path: &std::path::Path) -> Scene {
        match self {
            ScenePreset::RandomSpheres => scenes::random_spheres(use_bvh, seed),
            ScenePreset::HollowGlass => scenes::hollow_glass_sphere(),
            ScenePreset::SimpleLight => scenes::simple_light(seed),
            ScenePreset::CornellBox => scenes::cornell_box(),
            ScenePreset::CornellSmoke => scenes::cornell_smoke(),
            ScenePreset::Mesh => scenes::mesh_scene(mesh_path, seed),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ScenePreset::RandomSpheres => "random-spheres",
            ScenePreset::HollowGlass => "hollow-glass",
            ScenePreset::SimpleLight => "simple-light",
            ScenePreset::CornellBox => "cornell-box",
            ScenePreset::CornellSmoke => "cornell-smoke",
            ScenePreset::Mesh => "mesh",
        }
    }
}

fn print_header(scene_name: &str, config: &CameraConfig) {
    eprintln!();
    eprintln!("  lumentrace — offline path tracer");
    eprintln!();
    eprintln!("  Scene:      {scene_name}");
    eprintln!(
        "  Resolution: {}x{} (aspect {:.3})",
        config.image_width,
        (config.image_width as f64 / config.aspect_ratio) as u32,
        config.aspect_ratio
    );
    eprintln!("  Samples:    {} spp", config.samples_per_pixel);
    eprintln!("  Max depth:  {}", config.max_depth);
    eprintln!();
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let Scene { world, mut camera } = cli.scene.build(!cli.no_bvh, cli.seed, &cli.mesh);

    if let Some(width) = cli.width {
        camera.image_width = width;
    }
    if let Some(spp) = cli.spp {
        camera.samples_per_pixel = spp;
    }
    if let Some(bounces) = cli.bounces {
        camera.max_depth = bounces;
    }

    print_header(cli.scene.name(), &camera);

    let cam = Camera::new(camera);

    let t0 = Instant::now();
    let rows = cam.render_with_progress(world.as_ref(), cli.seed);
    let elapsed = t0.elapsed();

    let total_rays =
        cam.image_width() as u64 * cam.image_height() as u64 * camera.samples_per_pixel as u64;
    let mrays = total_rays as f64 / elapsed.as_secs_f64() / 1e6;
    eprintln!(
        "  Time: {:.2}s | {:.2}M primary samples | {:.2} Mray/s",
        elapsed.as_secs_f64(),
        total_rays as f64 / 1e6,
        mrays
    );

    let file = File::create(&cli.out)?;
    write_ppm(BufWriter::new(file), cam.image_width(), cam.image_height(), &rows)?;
    eprintln!("  Wrote {}", cli.out.display());

    Ok(())
}
