//! `cubemarch` extracts triangle meshes from implicit surfaces using marching
//! cubes.
//!
//! An **implicit surface** is the set of points where a scalar field
//! `f(x, y, z)` equals some **isovalue**.  By convention, if
//! `f(x, y, z) < isovalue`, then that position is **inside** the shape;
//! otherwise, it's **outside**.
//!
//! # Fields
//! Anything implementing [`ScalarField`](crate::field::ScalarField) can be
//! meshed, including plain closures:
//! ```
//! use cubemarch::field::ScalarField;
//!
//! let sphere = |x: f32, y: f32, z: f32| x * x + y * y + z * z - 1.0;
//! assert_eq!(sphere.eval(1.0, 0.0, 0.0), 0.0);
//! ```
//!
//! A handful of named fields live in [`Field`](crate::field::Field), which is
//! handy for command-line tools.
//!
//! # Meshing
//! [`Mesh::build`](crate::mesh::Mesh::build) divides the volume into a regular
//! lattice of cubes, classifies each cube's corners, and looks up the cube's
//! triangles in a fixed 256-entry table.  Normals are flat-shaded.
//!
//! ```
//! use cubemarch::{field::Field, mesh::{Mesh, Settings, VertexPlacement}};
//!
//! let settings = Settings {
//!     volume_min: -2.0,
//!     volume_max: 2.0,
//!     stepsize: 0.2,
//!     placement: VertexPlacement::Interpolated,
//!     ..Default::default()
//! };
//! let mesh = Mesh::build(&Field::Torus, &settings)?;
//! assert_eq!(mesh.vertices.len(), mesh.normals.len());
//! # Ok::<(), cubemarch::Error>(())
//! ```
//!
//! The resulting mesh can be saved as an ASCII PLY file (with normals) or a
//! binary STL file, and PLY files can be read back with
//! [`PlyMesh`](crate::mesh::PlyMesh).
#![warn(missing_docs)]

mod error;
pub use error::Error;

pub mod field;
pub mod mesh;
