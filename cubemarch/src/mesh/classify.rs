//! Lattice scan and per-cube classification
use super::{
    Lattice, Settings, emit, tables,
    types::{CaseMask, Corner},
};
use crate::field::ScalarField;
use nalgebra::Vector3;
use rayon::prelude::*;

/// A single sampled cube
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cube {
    /// Position of the back-bottom-left corner
    pub origin: Vector3<f32>,
    /// Side length
    pub size: f32,
    /// Field values at each corner, indexed by [`Corner::index`]
    pub values: [f32; 8],
}

impl Cube {
    /// Samples the field at each corner of the cube
    pub fn sample<F: ScalarField + ?Sized>(
        field: &F,
        origin: Vector3<f32>,
        size: f32,
    ) -> Self {
        let values = std::array::from_fn(|i| {
            let p = Self::corner_at(origin, size, Corner::new(i as u8));
            field.eval(p.x, p.y, p.z)
        });
        Self {
            origin,
            size,
            values,
        }
    }

    /// Returns the world-space position of the given corner
    pub fn corner(&self, c: Corner) -> Vector3<f32> {
        Self::corner_at(self.origin, self.size, c)
    }

    fn corner_at(origin: Vector3<f32>, size: f32, c: Corner) -> Vector3<f32> {
        origin + Vector3::from(c.offset()) * size
    }

    /// Builds the case mask, with corners strictly below `isovalue` inside
    pub fn mask(&self, isovalue: f32) -> CaseMask {
        CaseMask::from_fn(|c| self.values[c.index()] < isovalue)
    }
}

/// Scans the whole lattice, returning vertices in lattice order
///
/// Cubes are visited with Y as the outer axis, X as the middle axis, and Z
/// as the inner axis.  When a thread pool is provided, each Y slab is meshed
/// independently and the results are concatenated in slab order, so the
/// output is identical to a single-threaded scan.
pub(crate) fn scan<F: ScalarField + ?Sized>(
    field: &F,
    lattice: &Lattice,
    settings: &Settings,
) -> Vec<Vector3<f32>> {
    match settings.threads {
        None => {
            let mut out = vec![];
            for j in 0..lattice.count() {
                scan_slab(field, lattice, settings, j, &mut out);
            }
            out
        }
        Some(pool) => {
            let slabs: Vec<Vec<Vector3<f32>>> = pool.run(|| {
                (0..lattice.count())
                    .into_par_iter()
                    .map(|j| {
                        let mut out = vec![];
                        scan_slab(field, lattice, settings, j, &mut out);
                        out
                    })
                    .collect()
            });
            slabs.concat()
        }
    }
}

/// Meshes every cube whose origin has the `j`'th Y coordinate
fn scan_slab<F: ScalarField + ?Sized>(
    field: &F,
    lattice: &Lattice,
    settings: &Settings,
    j: usize,
    out: &mut Vec<Vector3<f32>>,
) {
    let y = lattice.coord(j);
    for i in 0..lattice.count() {
        let x = lattice.coord(i);
        for k in 0..lattice.count() {
            let z = lattice.coord(k);
            let cube =
                Cube::sample(field, Vector3::new(x, y, z), lattice.step());
            let mask = cube.mask(settings.isovalue);
            if mask.is_uniform() {
                continue;
            }
            emit::emit(
                tables::lookup(mask.index()),
                &cube,
                settings.isovalue,
                settings.placement,
                out,
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::types::{X, Y, Z};

    #[test]
    fn cube_corners() {
        let cube = Cube::sample(
            &|x: f32, y: f32, z: f32| x + 10.0 * y + 100.0 * z,
            Vector3::new(1.0, 2.0, 3.0),
            0.5,
        );
        assert_eq!(cube.values[0], 1.0 + 20.0 + 300.0);
        assert_eq!(cube.values[(X | Y | Z).index()], 1.5 + 25.0 + 350.0);
        assert_eq!(cube.corner(Corner::from(Z)), Vector3::new(1.0, 2.0, 3.5));
    }

    #[test]
    fn strict_comparison() {
        let cube = Cube {
            origin: Vector3::zeros(),
            size: 1.0,
            values: [0.0; 8],
        };
        // Values equal to the isovalue are outside
        assert_eq!(cube.mask(0.0).index(), 0);
        assert_eq!(cube.mask(0.1).index(), 255);
    }

    #[test]
    fn scan_order() {
        // Plane at y = 0.5, sampled on a 2x2x2 lattice of unit cubes; only
        // the j = 0 slab crosses the surface.
        let f = |_x: f32, y: f32, _z: f32| y - 0.5;
        let settings = Settings {
            volume_min: 0.0,
            volume_max: 2.0,
            stepsize: 1.0,
            ..Default::default()
        };
        let lattice = settings.validate().unwrap();
        let out = scan(&f, &lattice, &settings);
        assert_eq!(out.len(), 4 * 6);

        // Z is the innermost axis, then X.  The second vertex of each cube
        // is on edge 8, which is at the cube's X and Z origin.
        let origins: Vec<_> =
            out.chunks(6).map(|c| (c[1].x, c[1].z)).collect();
        assert_eq!(origins, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(out.iter().all(|v| v.y == 0.5));
    }
}
