use std::path::PathBuf;

/// User-facing configuration errors, surfaced at scene-construction time.
///
/// Numerical degeneracies (zero-area triangles, near-parallel rays, NaN
/// inputs) and out-of-range lookups are not represented here: they resolve
/// locally ("no hit", a clamped read, the solid-cyan debug texture) rather
/// than propagate as errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("aspect ratio must be positive, got {0}")]
    ZeroAspectRatio(f64),

    #[error("could not read texture image {path:?}: {source}")]
    TextureUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not read mesh file {path:?}: {source}")]
    MeshUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
