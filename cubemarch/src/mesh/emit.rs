//! Conversion from edge lists to world-space vertices
use super::{classify::Cube, types::Edge};
use nalgebra::Vector3;

/// Strategy for placing a vertex on a cube edge that crosses the surface
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum VertexPlacement {
    /// Always use the edge's geometric midpoint
    ///
    /// Positional error is bounded by the step size, independent of the
    /// field's shape.
    #[default]
    Midpoint,

    /// Interpolate linearly between the edge's two corner values, placing
    /// the vertex where the field is estimated to equal the isovalue
    Interpolated,
}

/// Converts an edge list into world-space vertices using edge midpoints
///
/// One vertex is returned for each edge, in input order (which preserves the
/// triangle winding from the case table).  Each vertex is positioned at
/// `origin + size * midpoint`.
///
/// # Panics
/// If any edge index is `>= 12`
pub fn edge_vertices(
    edges: &[u8],
    origin: Vector3<f32>,
    size: f32,
) -> Vec<Vector3<f32>> {
    edges
        .iter()
        .map(|e| origin + Vector3::from(Edge::new(*e).midpoint()) * size)
        .collect()
}

/// Appends one vertex per edge to `out`
///
/// # Panics
/// If `edges` is not a whole number of triangles
pub(crate) fn emit(
    edges: &[u8],
    cube: &Cube,
    isovalue: f32,
    placement: VertexPlacement,
    out: &mut Vec<Vector3<f32>>,
) {
    assert_eq!(edges.len() % 3, 0, "edges must form triangles");
    out.extend(edges.iter().map(|e| {
        let e = Edge::new(*e);
        let offset = match placement {
            VertexPlacement::Midpoint => Vector3::from(e.midpoint()),
            VertexPlacement::Interpolated => interpolate(e, cube, isovalue),
        };
        cube.origin + offset * cube.size
    }));
}

/// Finds the fractional position along `e` where the field crosses the
/// isovalue, assuming it varies linearly between the two corners
fn interpolate(e: Edge, cube: &Cube, isovalue: f32) -> Vector3<f32> {
    let (a, b) = e.corners();
    let (va, vb) = (cube.values[a.index()], cube.values[b.index()]);
    let pa = Vector3::from(a.offset());
    let pb = Vector3::from(b.offset());

    let d = vb - va;
    let t = if d.abs() < f32::EPSILON {
        0.5
    } else {
        ((isovalue - va) / d).clamp(0.0, 1.0)
    };
    pa + (pb - pa) * t
}
