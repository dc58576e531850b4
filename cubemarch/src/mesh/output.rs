//! Mesh output implementation
use super::{Mesh, Settings};
use crate::Error;
use std::{
    io::{BufWriter, Write},
    path::Path,
};

/// Provenance metadata, written as the comment line of a PLY file
///
/// ```
/// # use cubemarch::mesh::{Provenance, Settings};
/// let p = Provenance::new("wavy", &Settings::default());
/// assert_eq!(
///     p.to_string(),
///     "Scalar field: 'wavy', Isovalue: 0, Min. volume: -1, \
///      Max. volume: 1, Stepsize: 0.1"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Provenance {
    /// Name of the sampled field
    pub field: String,
    /// Isovalue used for classification
    pub isovalue: f32,
    /// Lower bound of the sampled volume
    pub volume_min: f32,
    /// Upper bound of the sampled volume
    pub volume_max: f32,
    /// Cube side length
    pub stepsize: f32,
}

impl Provenance {
    /// Records the field name and sampling settings
    pub fn new<S: Into<String>>(field: S, settings: &Settings) -> Self {
        Self {
            field: field.into(),
            isovalue: settings.isovalue,
            volume_min: settings.volume_min,
            volume_max: settings.volume_max,
            stepsize: settings.stepsize,
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scalar field: '{}', Isovalue: {}, Min. volume: {}, \
             Max. volume: {}, Stepsize: {}",
            self.field,
            self.isovalue,
            self.volume_min,
            self.volume_max,
            self.stepsize
        )
    }
}

impl Mesh {
    /// Writes an ASCII PLY file to the given output
    ///
    /// Each vertex is written with its position and normal; face `k` always
    /// refers to vertices `3k`, `3k + 1`, and `3k + 2`.
    ///
    /// # Panics
    /// If `normals` and `vertices` have different lengths, or if the vertex
    /// count is not a multiple of 3
    pub fn write_ply<F: std::io::Write>(
        &self,
        out: &mut F,
        comment: Option<&str>,
    ) -> Result<(), Error> {
        assert_eq!(self.vertices.len(), self.normals.len());
        assert_eq!(self.vertices.len() % 3, 0);

        // We're going to do many small writes and will typically be writing to
        // a file, so using a `BufWriter` saves excessive syscalls.
        let mut out = BufWriter::new(out);
        let vertex_count = self.vertex_count();
        let face_count = self.triangle_count();

        writeln!(out, "ply")?;
        writeln!(out, "format ascii 1.0")?;
        if let Some(c) = comment {
            // A comment can't span lines without corrupting the header
            writeln!(out, "comment {}", c.replace(['\r', '\n'], " "))?;
        }
        writeln!(out, "element vertex {vertex_count}")?;
        for p in ["x", "y", "z", "nx", "ny", "nz"] {
            writeln!(out, "property float {p}")?;
        }
        writeln!(out, "element face {face_count}")?;
        writeln!(out, "property list uchar uint vertex_indices")?;
        writeln!(out, "end_header")?;

        for (v, n) in self.vertices.iter().zip(&self.normals) {
            writeln!(out, "{} {} {} {} {} {}", v.x, v.y, v.z, n.x, n.y, n.z)?;
        }
        for i in (0..vertex_count).step_by(3) {
            writeln!(out, "3 {} {} {}", i, i + 1, i + 2)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Writes a binary STL to the given output
    ///
    /// # Panics
    /// Under the same conditions as [`Mesh::write_ply`]
    pub fn write_stl<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), Error> {
        assert_eq!(self.vertices.len(), self.normals.len());
        assert_eq!(self.vertices.len() % 3, 0);

        let mut out = BufWriter::new(out);
        const HEADER: &[u8] =
            b"This is a binary STL file exported by cubemarch";
        static_assertions::const_assert!(HEADER.len() <= 80);
        out.write_all(HEADER)?;
        out.write_all(&[0u8; 80 - HEADER.len()])?;
        out.write_all(&(self.triangle_count() as u32).to_le_bytes())?;
        for (t, n) in self.triangles().zip(self.normals.chunks_exact(3)) {
            for p in &n[0] {
                out.write_all(&p.to_le_bytes())?;
            }
            for v in t {
                for p in v {
                    out.write_all(&p.to_le_bytes())?;
                }
            }
            out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
        }
        out.flush()?;
        Ok(())
    }

    /// Saves an ASCII PLY file to the given path
    ///
    /// The file is written to a temporary location in the same directory,
    /// then moved into place, so readers never see a partial file.  If
    /// anything fails, the destination is left untouched.
    ///
    /// # Panics
    /// Under the same conditions as [`Mesh::write_ply`]
    pub fn save_ply<P: AsRef<Path>>(
        &self,
        path: P,
        comment: Option<&str>,
    ) -> Result<(), Error> {
        save_atomic(path.as_ref(), |f| self.write_ply(f, comment))
    }

    /// Saves a binary STL file to the given path
    ///
    /// This has the same atomicity guarantees (and panics) as
    /// [`Mesh::save_ply`].
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        save_atomic(path.as_ref(), |f| self.write_stl(f))
    }
}

fn save_atomic<W>(path: &Path, write: W) -> Result<(), Error>
where
    W: FnOnce(&mut std::fs::File) -> Result<(), Error>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    log::info!("wrote {path:?}");
    Ok(())
}
