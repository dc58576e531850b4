//! ASCII PLY reader
use crate::Error;
use nalgebra::Vector3;
use std::io::BufRead;

/// A triangle mesh loaded from an ASCII PLY file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlyMesh {
    /// Comment lines from the header
    pub comments: Vec<String>,
    /// Vertex positions
    pub vertices: Vec<Vector3<f32>>,
    /// Vertex normals; empty if the file has no `nx`, `ny`, `nz` properties
    pub normals: Vec<Vector3<f32>>,
    /// Triangles, as indexes into [`vertices`](Self::vertices)
    pub faces: Vec<Vector3<usize>>,
}

/// Which element the header is currently describing
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Element {
    Vertex,
    Face,
}

/// Parsed header information
#[derive(Default)]
struct Header {
    comments: Vec<String>,
    vertex_count: usize,
    face_count: usize,
    /// Names of each vertex property, in file order
    properties: Vec<String>,
}

impl Header {
    fn column(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p == name)
    }
}

/// Line-oriented reader that tracks line numbers for error reporting
struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn next(&mut self) -> Result<String, Error> {
        self.line += 1;
        match self.inner.next() {
            Some(s) => Ok(s?),
            None => Err(self.error("unexpected end of file")),
        }
    }

    fn error<S: Into<String>>(&self, reason: S) -> Error {
        Error::ParseError {
            line: self.line,
            reason: reason.into(),
        }
    }
}

impl PlyMesh {
    /// Opens and reads the PLY file at the given path
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let f = std::fs::File::open(path)?;
        Self::read(std::io::BufReader::new(f))
    }

    /// Reads an ASCII PLY file
    ///
    /// Vertex properties may appear in any order; properties other than
    /// `x y z nx ny nz` are skipped.  Only triangular faces are supported.
    pub fn read<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lines = Lines {
            inner: reader.lines(),
            line: 0,
        };
        let header = Self::read_header(&mut lines)?;

        let columns = ["x", "y", "z"].map(|p| header.column(p));
        let [Some(x), Some(y), Some(z)] = columns else {
            return Err(lines.error("vertex element is missing x, y, or z"));
        };
        let normals = ["nx", "ny", "nz"].map(|p| header.column(p));
        let normal_columns = match normals {
            [Some(a), Some(b), Some(c)] => Some([a, b, c]),
            [None, None, None] => None,
            _ => return Err(lines.error("incomplete vertex normal")),
        };

        let mut out = PlyMesh {
            comments: header.comments,
            vertices: Vec::with_capacity(header.vertex_count),
            normals: Vec::with_capacity(
                normal_columns.map(|_| header.vertex_count).unwrap_or(0),
            ),
            faces: Vec::with_capacity(header.face_count),
        };

        let mut row = vec![];
        for _ in 0..header.vertex_count {
            let line = lines.next()?;
            row.clear();
            for word in line.split_whitespace() {
                let v: f32 = word.parse().map_err(|_| {
                    lines.error(format!("invalid float '{word}'"))
                })?;
                row.push(v);
            }
            if row.len() != header.properties.len() {
                return Err(lines.error(format!(
                    "expected {} values, got {}",
                    header.properties.len(),
                    row.len()
                )));
            }
            out.vertices.push(Vector3::new(row[x], row[y], row[z]));
            if let Some([a, b, c]) = normal_columns {
                out.normals.push(Vector3::new(row[a], row[b], row[c]));
            }
        }

        for _ in 0..header.face_count {
            let line = lines.next()?;
            let mut words = line.split_whitespace();
            if words.next() != Some("3") {
                return Err(lines.error("only triangular faces are supported"));
            }
            let mut face = Vector3::zeros();
            for i in 0..3 {
                let word = words
                    .next()
                    .ok_or_else(|| lines.error("missing vertex index"))?;
                let v: usize = word.parse().map_err(|_| {
                    lines.error(format!("invalid vertex index '{word}'"))
                })?;
                if v >= header.vertex_count {
                    return Err(lines.error(format!(
                        "vertex index {v} is out of range"
                    )));
                }
                face[i] = v;
            }
            if words.next().is_some() {
                return Err(lines.error("trailing data after face"));
            }
            out.faces.push(face);
        }
        Ok(out)
    }

    fn read_header<R: BufRead>(lines: &mut Lines<R>) -> Result<Header, Error> {
        if lines.next()?.trim() != "ply" {
            return Err(lines.error("missing 'ply' magic"));
        }
        let format = lines.next()?;
        if format.split_whitespace().collect::<Vec<_>>()
            != ["format", "ascii", "1.0"]
        {
            return Err(lines.error(format!("unsupported format '{format}'")));
        }

        let mut header = Header::default();
        let mut element = None;
        loop {
            let line = lines.next()?;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                ["end_header"] => break,
                ["comment", ..] => header.comments.push(
                    line.trim_start()
                        .trim_start_matches("comment")
                        .trim()
                        .to_owned(),
                ),
                ["element", name, count] => {
                    let count: usize = count.parse().map_err(|_| {
                        lines.error(format!("invalid element count '{count}'"))
                    })?;
                    element = Some(match *name {
                        "vertex" => {
                            header.vertex_count = count;
                            Element::Vertex
                        }
                        "face" => {
                            header.face_count = count;
                            Element::Face
                        }
                        _ => {
                            return Err(lines.error(format!(
                                "unsupported element '{name}'"
                            )));
                        }
                    });
                }
                ["property", "list", _, _, _]
                    if element == Some(Element::Face) => {}
                ["property", ty, name] if element == Some(Element::Vertex) => {
                    if !matches!(*ty, "float" | "float32" | "double" | "float64")
                    {
                        return Err(lines.error(format!(
                            "unsupported vertex property type '{ty}'"
                        )));
                    }
                    header.properties.push(name.to_string());
                }
                _ => {
                    return Err(
                        lines.error(format!("unexpected header line '{line}'"))
                    );
                }
            }
        }
        Ok(header)
    }

    /// Checks whether face `k` is `(3k, 3k + 1, 3k + 2)` for every face
    pub fn has_sequential_faces(&self) -> bool {
        self.faces
            .iter()
            .enumerate()
            .all(|(k, f)| *f == Vector3::new(3 * k, 3 * k + 1, 3 * k + 2))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CUBE_CORNER: &str = "\
ply
format ascii 1.0
comment made by hand
element vertex 3
property float nx
property float x
property float ny
property float y
property float nz
property float z
property float u
element face 1
property list uchar uint vertex_indices
end_header
0 1 0 2 1 3 0.5
0 4 0 5 1 6 0.5
0 7 0 8 1 9 0.5
3 0 1 2
";

    #[test]
    fn property_order() {
        let m = PlyMesh::read(CUBE_CORNER.as_bytes()).unwrap();
        assert_eq!(m.comments, vec!["made by hand".to_owned()]);
        assert_eq!(
            m.vertices,
            vec![
                Vector3::new(1.0, 2.0, 3.0),
                Vector3::new(4.0, 5.0, 6.0),
                Vector3::new(7.0, 8.0, 9.0),
            ]
        );
        assert_eq!(m.normals, vec![Vector3::new(0.0, 0.0, 1.0); 3]);
        assert_eq!(m.faces, vec![Vector3::new(0, 1, 2)]);
        assert!(m.has_sequential_faces());
    }

    #[test]
    fn bad_magic() {
        let err = PlyMesh::read("obj\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ParseError { line: 1, .. }), "{err}");
    }

    #[test]
    fn truncated() {
        let text = CUBE_CORNER.replace("3 0 1 2\n", "");
        let err = PlyMesh::read(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ParseError { line: 18, .. }), "{err}");
    }

    #[test]
    fn bad_index() {
        let text = CUBE_CORNER.replace("3 0 1 2", "3 0 1 3");
        let err = PlyMesh::read(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn quad_face() {
        let text = CUBE_CORNER.replace("3 0 1 2", "4 0 1 2 0");
        assert!(PlyMesh::read(text.as_bytes()).is_err());
    }

    #[test]
    fn bad_float() {
        let text = CUBE_CORNER.replace("0 4 0 5", "0 four 0 5");
        let err = PlyMesh::read(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ParseError { line: 16, .. }), "{err}");
    }

    #[test]
    fn binary_unsupported() {
        let text = CUBE_CORNER
            .replace("format ascii 1.0", "format binary_little_endian 1.0");
        assert!(PlyMesh::read(text.as_bytes()).is_err());
    }
}
