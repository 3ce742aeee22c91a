//! An offline, CPU-based Monte Carlo path tracer: a scene graph of
//! intersectable primitives bound to physically-based materials, traced
//! through a thin-lens camera model and resolved via unidirectional path
//! tracing into a gamma-corrected raster.

pub mod bvh;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod material;
pub mod math;
pub mod obj;
pub mod output;
pub mod perlin;
pub mod ray;
pub mod scenes;
pub mod texture;

pub use camera::{Camera, CameraConfig};
pub use error::{RenderError, Result};
pub use ray::Ray;
pub use scenes::Scene;
