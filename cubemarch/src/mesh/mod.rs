//! Lattice sampling and meshing
//!
//! This module implements classic marching cubes: the sampled volume is
//! divided into a regular lattice of cubes, each cube's corners are classified
//! as inside or outside the shape, and the resulting 8-bit case selects a set
//! of triangles from a fixed table.
//!
//! The resulting meshes are **not** guaranteed to be watertight or manifold,
//! and triangles from neighboring cubes do not share vertices.  Normals are
//! flat-shaded: each triangle's face normal is copied to all three of its
//! vertices.
//!
//! The resulting [`Mesh`] objects can be written out as PLY or STL files.
//!
//! Here's a full example:
//!
//! ```
//! use cubemarch::{
//!     field::Field,
//!     mesh::{Mesh, Settings},
//! };
//!
//! let settings = Settings {
//!     volume_min: -1.5,
//!     volume_max: 1.5,
//!     stepsize: 0.25,
//!     ..Default::default()
//! };
//! let mesh = Mesh::build(&Field::Sphere, &settings)?;
//! assert!(mesh.triangle_count() > 0);
//!
//! // Open a file to write, e.g.
//! // let mut f = std::fs::File::create("out.ply")?;
//! # let mut f = vec![];
//! mesh.write_ply(&mut f, Some("unit sphere"))?;
//! # Ok::<(), cubemarch::Error>(())
//! ```

mod classify;
mod emit;
mod input;
mod normals;
mod output;
mod pool;

pub mod tables;

#[doc(hidden)]
pub mod types;

use crate::{Error, field::ScalarField};

pub use classify::Cube;
pub use emit::{VertexPlacement, edge_vertices};
pub use input::PlyMesh;
pub use normals::{flat_normals, triangle_normal};
pub use output::Provenance;
pub use pool::ThreadPool;

/// Largest number of cubes allowed along a single axis
pub const MAX_CUBES_PER_AXIS: usize = 1 << 16;

////////////////////////////////////////////////////////////////////////////////

/// A triangle soup with per-vertex normals
///
/// Vertices are stored in emission order; triangle `k` is made of vertices
/// `3k`, `3k + 1`, and `3k + 2`.  `normals` is parallel to `vertices`.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions, three per triangle
    pub vertices: Vec<nalgebra::Vector3<f32>>,
    /// Vertex normals, three per triangle
    pub normals: Vec<nalgebra::Vector3<f32>>,
}

impl Mesh {
    /// Builds a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the given field and builds a mesh of its isosurface
    ///
    /// Settings are validated before any sampling happens.  Output is
    /// deterministic: the same field and settings always produce bit-identical
    /// vertices and normals, regardless of thread count.
    pub fn build<F: ScalarField + ?Sized>(
        field: &F,
        settings: &Settings,
    ) -> Result<Self, Error> {
        let lattice = settings.validate()?;
        log::debug!(
            "sampling {0}x{0}x{0} lattice ({1} cubes) on {2} thread(s)",
            lattice.count,
            lattice.cube_count(),
            settings.threads.map(ThreadPool::thread_count).unwrap_or(1)
        );

        let vertices = classify::scan(field, &lattice, settings);
        let (normals, degenerate) = normals::compute(&vertices, settings.threads);
        if degenerate > 0 {
            log::debug!("{degenerate} degenerate triangles");
        }

        let out = Self { vertices, normals };
        log::debug!("built mesh with {} triangles", out.triangle_count());
        Ok(out)
    }

    /// Returns the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Checks whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over triangles as `[a, b, c]` vertex triples
    pub fn triangles(
        &self,
    ) -> impl Iterator<Item = &[nalgebra::Vector3<f32>]> + '_ {
        self.vertices.chunks_exact(3)
    }

    /// Returns vertex positions as a flat `[x0, y0, z0, x1, ...]` list
    pub fn flat_vertices(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    /// Returns vertex normals as a flat `[x0, y0, z0, x1, ...]` list
    pub fn flat_normals(&self) -> Vec<f32> {
        self.normals.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Settings when sampling a field and building a mesh
///
/// The same bounds are used along all three axes.
pub struct Settings<'a> {
    /// Threshold between inside (`f < isovalue`) and outside
    pub isovalue: f32,

    /// Lower bound of the sampled volume
    pub volume_min: f32,

    /// Upper bound of the sampled volume (exclusive for cube origins)
    pub volume_max: f32,

    /// Side length of each cube
    pub stepsize: f32,

    /// Strategy for placing vertices along cube edges
    pub placement: VertexPlacement,

    /// Thread pool to use for meshing
    ///
    /// If this is `None`, then meshing is done in a single thread; otherwise,
    /// the provided pool is used.
    pub threads: Option<&'a ThreadPool>,
}

impl Default for Settings<'_> {
    fn default() -> Self {
        Self {
            isovalue: 0.0,
            volume_min: -1.0,
            volume_max: 1.0,
            stepsize: 0.1,
            placement: VertexPlacement::default(),
            threads: None,
        }
    }
}

impl Settings<'_> {
    /// Checks that the settings describe a non-empty lattice
    pub fn validate(&self) -> Result<Lattice, Error> {
        if ![self.isovalue, self.volume_min, self.volume_max, self.stepsize]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(Error::NonFiniteSettings);
        }
        if self.stepsize <= 0.0 {
            return Err(Error::BadStepSize(self.stepsize));
        }
        if self.volume_min >= self.volume_max {
            return Err(Error::BadBounds {
                min: self.volume_min,
                max: self.volume_max,
            });
        }
        let span = self.volume_max as f64 - self.volume_min as f64;
        let count = (span / self.stepsize as f64).ceil();
        if count > MAX_CUBES_PER_AXIS as f64 {
            return Err(Error::LatticeTooLarge(count as usize));
        }
        Ok(Lattice {
            min: self.volume_min,
            step: self.stepsize,
            count: count as usize,
        })
    }
}

/// A validated cubic lattice of cube origins
///
/// Origins along each axis are `min + i * step` for `i` in `0..count`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lattice {
    min: f32,
    step: f32,
    count: usize,
}

impl Lattice {
    /// Returns the number of cubes along each axis
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the side length of each cube
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Returns the total number of cubes in the lattice
    ///
    /// This is computed in `u64`, since it may not fit in a 32-bit `usize`.
    pub fn cube_count(&self) -> u64 {
        (self.count as u64).pow(3)
    }

    /// Returns the origin coordinate of the `i`'th cube along an axis
    pub fn coord(&self, i: usize) -> f32 {
        self.min + i as f32 * self.step
    }
}
