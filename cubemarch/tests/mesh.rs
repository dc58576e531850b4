use approx::assert_relative_eq;
use cubemarch::{
    field::Field,
    mesh::{Mesh, Settings, ThreadPool, VertexPlacement, edge_vertices, tables},
};
use nalgebra::Vector3;

fn sphere(x: f32, y: f32, z: f32) -> f32 {
    x * x + y * y + z * z - 1.0
}

fn sphere_settings<'a>() -> Settings<'a> {
    Settings {
        volume_min: -1.5,
        volume_max: 1.5,
        stepsize: 0.1,
        ..Default::default()
    }
}

#[test]
fn test_sphere_vertices_near_surface() {
    let settings = sphere_settings();
    let mesh = Mesh::build(&sphere, &settings).unwrap();
    assert!(mesh.vertex_count() > 0);
    assert_eq!(mesh.vertices.len() % 3, 0);
    assert_eq!(mesh.vertices.len(), mesh.normals.len());
    for v in &mesh.vertices {
        let err = (v.norm() - 1.0).abs();
        assert!(err <= settings.stepsize, "invalid vertex at {v:?}: {err}");
    }
}

#[test]
fn test_sphere_normals_point_outward() {
    let mesh = Mesh::build(&sphere, &sphere_settings()).unwrap();
    for (t, n) in mesh.triangles().zip(mesh.normals.chunks_exact(3)) {
        let center = (t[0] + t[1] + t[2]) / 3.0;
        assert!(n[0].dot(&center) > 0.0, "inward normal {n:?} at {center:?}");
    }
}

#[test]
fn test_interpolation_is_more_accurate() {
    let mean_err = |placement| {
        let settings = Settings {
            placement,
            ..sphere_settings()
        };
        let mesh = Mesh::build(&sphere, &settings).unwrap();
        let total: f32 =
            mesh.vertices.iter().map(|v| (v.norm() - 1.0).abs()).sum();
        total / mesh.vertex_count() as f32
    };
    let midpoint = mean_err(VertexPlacement::Midpoint);
    let interpolated = mean_err(VertexPlacement::Interpolated);
    assert!(
        interpolated < midpoint,
        "interpolated error {interpolated} >= midpoint error {midpoint}"
    );
}

#[test]
fn test_empty_field() {
    let settings = Settings {
        volume_min: -3.0,
        volume_max: 3.0,
        stepsize: 0.5,
        isovalue: 0.5,
        ..Default::default()
    };
    let mesh =
        Mesh::build(&|_x: f32, _y: f32, _z: f32| 1.0f32, &settings).unwrap();
    assert!(mesh.is_empty());
    assert!(mesh.normals.is_empty());

    // Uniformly inside is also empty
    let mesh =
        Mesh::build(&|_x: f32, _y: f32, _z: f32| -1.0f32, &settings).unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn test_single_corner_cube() {
    // A single cube at (2, 2, 2) with only its back-bottom-left corner inside
    let settings = Settings {
        volume_min: 2.0,
        volume_max: 2.5,
        stepsize: 0.5,
        ..Default::default()
    };
    let f = |x: f32, y: f32, z: f32| (x - 2.0) + (y - 2.0) + (z - 2.0) - 0.25;
    let mesh = Mesh::build(&f, &settings).unwrap();

    assert_eq!(tables::lookup(1), &[0, 8, 3]);
    let origin = Vector3::new(2.0, 2.0, 2.0);
    let expected = edge_vertices(&[0, 8, 3], origin, 0.5);
    assert_eq!(mesh.vertices, expected);
    assert_eq!(
        expected,
        vec![
            Vector3::new(2.25, 2.0, 2.0),
            Vector3::new(2.0, 2.25, 2.0),
            Vector3::new(2.0, 2.0, 2.25),
        ]
    );

    // The normal points away from the inside corner
    let n = Vector3::new(1.0, 1.0, 1.0).normalize();
    for m in &mesh.normals {
        assert_relative_eq!(*m, n, epsilon = 1e-6);
    }
}

#[test]
fn test_planar_field() {
    let settings = Settings {
        volume_min: -1.0,
        volume_max: 1.0,
        stepsize: 0.1,
        ..Default::default()
    };
    let mesh =
        Mesh::build(&|_x: f32, y: f32, _z: f32| y - 0.33, &settings).unwrap();
    assert!(!mesh.is_empty());

    let sign = mesh.normals[0].y.signum();
    for n in &mesh.normals {
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(*n, Vector3::new(0.0, sign, 0.0), epsilon = 1e-6);
    }
    for v in &mesh.vertices {
        assert!((v.y - 0.33).abs() <= settings.stepsize);
    }
}

#[test]
fn test_determinism() {
    let settings = Settings {
        volume_min: -4.0,
        volume_max: 4.0,
        stepsize: 0.25,
        ..Default::default()
    };
    let a = Mesh::build(&Field::Wavy, &settings).unwrap();
    let b = Mesh::build(&Field::Wavy, &settings).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a.flat_vertices(), b.flat_vertices());
    assert_eq!(a.flat_normals(), b.flat_normals());
}

#[test]
fn test_threads_match_single_threaded() {
    let pool = ThreadPool::Custom(
        rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap(),
    );
    for placement in [VertexPlacement::Midpoint, VertexPlacement::Interpolated]
    {
        let single = Settings {
            volume_min: -2.0,
            volume_max: 2.0,
            stepsize: 0.15,
            placement,
            ..Default::default()
        };
        let expected = Mesh::build(&Field::Hyperboloid, &single).unwrap();
        for threads in [&pool, &ThreadPool::Global] {
            let settings = Settings {
                threads: Some(threads),
                ..single
            };
            let actual = Mesh::build(&Field::Hyperboloid, &settings).unwrap();
            assert_eq!(actual, expected);
        }
    }
}

#[test]
fn test_rejects_bad_settings() {
    let settings = Settings {
        stepsize: -0.1,
        ..Default::default()
    };
    let err = Mesh::build(&Field::Sphere, &settings).unwrap_err();
    assert!(err.to_string().contains("step size"), "{err}");

    let settings = Settings {
        volume_min: 1.0,
        volume_max: -1.0,
        ..Default::default()
    };
    let err = Mesh::build(&Field::Sphere, &settings).unwrap_err();
    assert!(matches!(err, cubemarch::Error::BadBounds { .. }), "{err}");
}
