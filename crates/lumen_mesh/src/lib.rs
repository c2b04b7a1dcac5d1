//! Lumen Mesh - Procedural Geometry
//!
//! Latitude/longitude spheres for pickups and debug gizmos. Output is plain
//! vertex and index arrays ready for upload by the host renderer.
//!
//! # Example
//!
//! ```ignore
//! use lumen_mesh::prelude::*;
//!
//! let sphere = uv_sphere(1.0, 16, 16, SphereOrientation::PolesZ)?;
//! assert_eq!(sphere.triangle_count(), 2 * 16 * 16);
//! ```

pub mod sphere;

pub mod prelude {
    pub use crate::sphere::{uv_sphere, MeshError, MeshResult, SphereMesh, SphereOrientation};
}

pub use prelude::*;
