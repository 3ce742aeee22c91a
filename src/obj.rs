//! A minimal Wavefront OBJ reader: only vertex (`v x y z`) and triangular
//! face (`f i j k`) lines are understood. Every other line — comments,
//! normals, texture coordinates, groups, materials — is silently skipped,
//! which is enough to load the triangle meshes this renderer consumes.

use crate::error::{RenderError, Result};
use crate::math::Point3;
use std::fs;
use std::path::Path;

/// The raw geometry extracted from an OBJ file: a vertex array and
/// zero-based triangle index triples (OBJ indices are 1-based on disk).
pub struct ObjMesh {
    pub vertices: Vec<Point3>,
    pub faces: Vec<[u32; 3]>,
}

/// Parses OBJ text already in memory. Malformed numeric fields on a `v` or
/// `f` line cause that line to be skipped rather than aborting the whole
/// load — a single corrupt line in a large mesh file is not worth losing
/// everything else in it.
pub fn parse(source: &str) -> ObjMesh {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Option<Vec<f64>> = tokens.map(|t| t.parse::<f64>().ok()).collect();
                if let Some(c) = coords {
                    if c.len() >= 3 {
                        vertices.push(Point3::new(c[0], c[1], c[2]));
                    }
                }
            }
            Some("f") => {
                let indices: Option<Vec<u32>> = tokens
                    .map(|t| leading_index(t).parse::<u32>().ok())
                    .collect();
                if let Some(idx) = indices {
                    if idx.len() >= 3 && idx.iter().all(|&i| i > 0) {
                        faces.push([idx[0] - 1, idx[1] - 1, idx[2] - 1]);
                    }
                }
            }
            _ => {}
        }
    }

    ObjMesh { vertices, faces }
}

/// OBJ face tokens may carry `/vt/vn` suffixes (`3/1/2`); only the leading
/// vertex index is needed here.
fn leading_index(token: &str) -> &str {
    token.split('/').next().unwrap_or(token)
}

/// Reads and parses an OBJ file from disk. A missing or unreadable file is
/// reported as [`RenderError::MeshUnreadable`]; callers that want a softer
/// fallback (an empty mesh with a stderr diagnostic) should catch it.
pub fn load(path: impl AsRef<Path>) -> Result<ObjMesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RenderError::MeshUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text))
}
