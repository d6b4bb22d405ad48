//! Polygon model data: points, quads, and per-quad attributes.
//!
//! Triangles are quads with a repeated vertex.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use blue_core::{Fix16Vec3, Rgb1555};

#[derive(Debug)]
pub enum ModelError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    VertexOutOfRange { quad: usize, vertex: u16, points: usize },
    AttributeCountMismatch { quads: usize, attributes: usize },
    Empty,
    /// `Object3d::transform` before a successful `prepare`.
    NotPrepared,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io { path, source } => {
                write!(f, "failed to read model {}: {source}", path.display())
            }
            ModelError::Parse { path, source } => {
                write!(f, "invalid model {}: {source}", path.display())
            }
            ModelError::VertexOutOfRange {
                quad,
                vertex,
                points,
            } => write!(
                f,
                "quad {quad} references vertex {vertex}, model has {points} points"
            ),
            ModelError::AttributeCountMismatch { quads, attributes } => {
                write!(f, "{quads} quads but {attributes} attributes")
            }
            ModelError::Empty => write!(f, "model has no quads"),
            ModelError::NotPrepared => write!(f, "object transformed before prepare"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io { source, .. } => Some(source),
            ModelError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub vertices: [u16; 4],
    /// Outward face normal in model space.
    pub normal: Fix16Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub color: Rgb1555,
    #[serde(default)]
    pub double_sided: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonData {
    pub points: Vec<Fix16Vec3>,
    pub quads: Vec<Quad>,
    pub attributes: Vec<Attribute>,
}

impl PolygonData {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.quads.is_empty() {
            return Err(ModelError::Empty);
        }
        if self.attributes.len() != self.quads.len() {
            return Err(ModelError::AttributeCountMismatch {
                quads: self.quads.len(),
                attributes: self.attributes.len(),
            });
        }
        for (index, quad) in self.quads.iter().enumerate() {
            if let Some(&vertex) = quad
                .vertices
                .iter()
                .find(|&&v| usize::from(v) >= self.points.len())
            {
                return Err(ModelError::VertexOutOfRange {
                    quad: index,
                    vertex,
                    points: self.points.len(),
                });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and validate a JSON model file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json(&text).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Built-in model by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "cube" => Some(cube()),
            "plane" => Some(plane()),
            "pyramid" => Some(pyramid()),
            _ => None,
        }
    }
}

pub const BUILTIN_MODELS: [&str; 3] = ["cube", "plane", "pyramid"];

fn p(x: i32, y: i32, z: i32) -> Fix16Vec3 {
    Fix16Vec3::from_int(x, y, z)
}

fn quad(vertices: [u16; 4], normal: Fix16Vec3) -> Quad {
    Quad { vertices, normal }
}

fn solid(r: u8, g: u8, b: u8) -> Attribute {
    Attribute {
        color: Rgb1555::new(1, r, g, b),
        double_sided: false,
    }
}

/// Cube of edge 40 centred on the origin.
pub fn cube() -> PolygonData {
    const H: i32 = 20;
    PolygonData {
        points: vec![
            p(-H, -H, -H),
            p(H, -H, -H),
            p(H, H, -H),
            p(-H, H, -H),
            p(-H, -H, H),
            p(H, -H, H),
            p(H, H, H),
            p(-H, H, H),
        ],
        quads: vec![
            quad([0, 1, 2, 3], p(0, 0, -1)),
            quad([5, 4, 7, 6], p(0, 0, 1)),
            quad([4, 0, 3, 7], p(-1, 0, 0)),
            quad([1, 5, 6, 2], p(1, 0, 0)),
            quad([4, 5, 1, 0], p(0, -1, 0)),
            quad([3, 2, 6, 7], p(0, 1, 0)),
        ],
        attributes: vec![
            solid(31, 0, 0),
            solid(0, 31, 0),
            solid(0, 0, 31),
            solid(31, 31, 0),
            solid(0, 31, 31),
            solid(31, 0, 31),
        ],
    }
}

/// Double-sided square in the XY plane.
pub fn plane() -> PolygonData {
    const H: i32 = 30;
    PolygonData {
        points: vec![p(-H, -H, 0), p(H, -H, 0), p(H, H, 0), p(-H, H, 0)],
        quads: vec![quad([0, 1, 2, 3], p(0, 0, -1))],
        attributes: vec![Attribute {
            color: Rgb1555::new(1, 31, 31, 31),
            double_sided: true,
        }],
    }
}

/// Square pyramid, apex towards -Y.
pub fn pyramid() -> PolygonData {
    const H: i32 = 20;
    PolygonData {
        points: vec![
            p(-H, H, -H),
            p(H, H, -H),
            p(H, H, H),
            p(-H, H, H),
            p(0, -H, 0),
        ],
        quads: vec![
            quad([0, 1, 2, 3], p(0, 1, 0)),
            quad([0, 4, 4, 1], Fix16Vec3::from_f64(0.0, -0.447, -0.894)),
            quad([1, 4, 4, 2], Fix16Vec3::from_f64(0.894, -0.447, 0.0)),
            quad([2, 4, 4, 3], Fix16Vec3::from_f64(0.0, -0.447, 0.894)),
            quad([3, 4, 4, 0], Fix16Vec3::from_f64(-0.894, -0.447, 0.0)),
        ],
        attributes: vec![
            solid(16, 16, 16),
            solid(31, 8, 8),
            solid(8, 31, 8),
            solid(8, 8, 31),
            solid(31, 31, 8),
        ],
    }
}
