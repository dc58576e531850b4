//! Flat-shaded normal computation
use super::ThreadPool;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Returns the unit normal of the triangle `(a, b, c)`
///
/// The normal is `normalize((b - a) × (c - a))`.  For a degenerate triangle
/// (zero area, or so thin that the direction is meaningless), this returns
/// the zero vector instead.
pub fn triangle_normal(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
) -> Vector3<f32> {
    let ab = b - a;
    let ac = c - a;
    let n = ab.cross(&ac);
    let len = n.norm();
    if len <= f32::EPSILON * ab.norm() * ac.norm() {
        Vector3::zeros()
    } else {
        n / len
    }
}

/// Computes one normal per vertex, with each triangle's normal copied to
/// all three of its vertices
///
/// # Panics
/// If `vertices.len()` is not a multiple of 3
pub fn flat_normals(vertices: &[Vector3<f32>]) -> Vec<Vector3<f32>> {
    assert_eq!(vertices.len() % 3, 0, "vertices must form triangles");
    vertices
        .chunks_exact(3)
        .flat_map(|t| [triangle_normal(t[0], t[1], t[2]); 3])
        .collect()
}

/// Computes normals, optionally in parallel
///
/// Returns the normals and the number of degenerate triangles.
pub(crate) fn compute(
    vertices: &[Vector3<f32>],
    threads: Option<&ThreadPool>,
) -> (Vec<Vector3<f32>>, usize) {
    let normals = match threads {
        None => flat_normals(vertices),
        Some(pool) => pool.run(|| {
            vertices
                .par_chunks_exact(3)
                .flat_map_iter(|t| [triangle_normal(t[0], t[1], t[2]); 3])
                .collect::<Vec<_>>()
        }),
    };
    let degenerate = normals
        .iter()
        .step_by(3)
        .filter(|n| **n == Vector3::zeros())
        .count();
    (normals, degenerate)
}
