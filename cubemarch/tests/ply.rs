use approx::assert_relative_eq;
use cubemarch::{
    Error,
    field::Field,
    mesh::{Mesh, PlyMesh, Provenance, Settings},
};

fn torus<'a>() -> (Mesh, Settings<'a>) {
    let settings = Settings {
        volume_min: -2.0,
        volume_max: 2.0,
        stepsize: 0.2,
        ..Default::default()
    };
    let mesh = Mesh::build(&Field::Torus, &settings).unwrap();
    assert!(!mesh.is_empty());
    (mesh, settings)
}

#[test]
fn test_ply_round_trip() {
    let (mesh, settings) = torus();
    let comment = Provenance::new("torus", &settings).to_string();

    let mut out = vec![];
    mesh.write_ply(&mut out, Some(comment.as_str())).unwrap();
    let ply = PlyMesh::read(out.as_slice()).unwrap();

    assert_eq!(ply.comments, vec![comment]);
    assert_eq!(ply.vertices.len(), mesh.vertex_count());
    assert_eq!(ply.faces.len(), mesh.triangle_count());
    assert!(ply.has_sequential_faces());
    for (a, b) in ply.vertices.iter().zip(&mesh.vertices) {
        assert_relative_eq!(*a, *b);
    }
    for (a, b) in ply.normals.iter().zip(&mesh.normals) {
        assert_relative_eq!(*a, *b);
    }
}

#[test]
fn test_save_ply() {
    let (mesh, _) = torus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("torus.ply");

    mesh.save_ply(&path, Some("torus")).unwrap();
    let ply = PlyMesh::open(&path).unwrap();
    assert_eq!(ply.comments, vec!["torus".to_owned()]);
    assert_eq!(ply.vertices.len(), mesh.vertex_count());
}

#[test]
fn test_save_overwrites_in_place() {
    let (mesh, _) = torus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ply");

    Mesh::new().save_ply(&path, None).unwrap();
    assert!(PlyMesh::open(&path).unwrap().vertices.is_empty());

    mesh.save_ply(&path, None).unwrap();
    let ply = PlyMesh::open(&path).unwrap();
    assert_eq!(ply.vertices.len(), mesh.vertex_count());

    // No temporary files are left behind
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_save_into_missing_directory() {
    let (mesh, _) = torus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.ply");

    let err = mesh.save_ply(&path, None).unwrap_err();
    assert!(matches!(err, Error::IoError(..)), "{err}");
    assert!(!path.exists());
}

#[test]
fn test_save_stl() {
    let (mesh, _) = torus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("torus.stl");

    mesh.save_stl(&path).unwrap();
    let data = std::fs::read(&path).unwrap();
    assert_eq!(data.len(), 84 + 50 * mesh.triangle_count());
    assert_eq!(
        &data[80..84],
        &(mesh.triangle_count() as u32).to_le_bytes()
    );
}
