//! UV sphere generation

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use thiserror::Error;

/// Mesh generation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A segment count was zero
    #[error("Invalid segment count: latitude {latitude}, longitude {longitude}")]
    InvalidSegments { latitude: u32, longitude: u32 },
    /// Radius was not a positive number
    #[error("Invalid radius: {0}")]
    InvalidRadius(f32),
}

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Which axis the sphere's poles sit on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SphereOrientation {
    /// Poles on ±Z, longitude sweeps the XY plane
    PolesZ,
    /// Poles on ±Y, longitude sweeps the XZ plane
    #[default]
    PolesY,
}

/// Indexed triangle mesh of a sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Build a latitude/longitude sphere.
///
/// Produces `(latitude + 1) * (longitude + 1)` vertices, duplicating the seam
/// column and pole rows so every quad has its own UV-ready corners.
pub fn uv_sphere(
    radius: f32,
    latitude_segments: u32,
    longitude_segments: u32,
    orientation: SphereOrientation,
) -> MeshResult<SphereMesh> {
    if latitude_segments == 0 || longitude_segments == 0 {
        return Err(MeshError::InvalidSegments {
            latitude: latitude_segments,
            longitude: longitude_segments,
        });
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::InvalidRadius(radius));
    }

    let rows = latitude_segments + 1;
    let cols = longitude_segments + 1;
    let mut positions = Vec::with_capacity((rows * cols) as usize);
    let mut normals = Vec::with_capacity((rows * cols) as usize);

    for lat in 0..rows {
        let theta = lat as f32 * PI / latitude_segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..cols {
            let phi = lon as f32 * TAU / longitude_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let unit = match orientation {
                SphereOrientation::PolesZ => {
                    Vec3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta)
                }
                SphereOrientation::PolesY => {
                    Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi)
                }
            };
            positions.push(unit * radius);
            normals.push(unit.normalize());
        }
    }

    let mut indices = Vec::with_capacity((6 * latitude_segments * longitude_segments) as usize);
    for lat in 0..latitude_segments {
        for lon in 0..longitude_segments {
            let current = lat * cols + lon;
            let next = current + cols;

            match orientation {
                SphereOrientation::PolesZ => indices.extend_from_slice(&[
                    current,
                    next + 1,
                    current + 1,
                    current,
                    next,
                    next + 1,
                ]),
                SphereOrientation::PolesY => indices.extend_from_slice(&[
                    current,
                    next,
                    next + 1,
                    current,
                    next + 1,
                    current + 1,
                ]),
            }
        }
    }

    Ok(SphereMesh {
        positions,
        normals,
        indices,
    })
}
