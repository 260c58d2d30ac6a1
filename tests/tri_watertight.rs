//! Exercises the BVH and the triangle intersection routine together and
//! checks that a closed mesh has no gaps: every ray from its interior must
//! register both `intersect_test` and `intersect` as a hit. The mesh here
//! is a regular icosahedron built in-crate (mesh file loading is out of
//! scope for this core), which is convex and closed by construction.

use cgmath::EuclideanSpace;
use rand::distributions::{Distribution, UnitSphereSurface};
use rand::thread_rng;

use lumen_transport::mailbox::Mailbox;
use lumen_transport::primitive::{GeometricPrimitive, Primitive};
use lumen_transport::scene::Scene;
use lumen_transport::shapes::triangle::TriangleMesh;
use lumen_transport::{Float, Point3f, Ray, Transform, Vec3f};

fn icosahedron_mesh() -> std::sync::Arc<TriangleMesh> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let vertices: Vec<Point3f> = vec![
        Point3f::new(-1.0, phi, 0.0), Point3f::new(1.0, phi, 0.0),
        Point3f::new(-1.0, -phi, 0.0), Point3f::new(1.0, -phi, 0.0),
        Point3f::new(0.0, -1.0, phi), Point3f::new(0.0, 1.0, phi),
        Point3f::new(0.0, -1.0, -phi), Point3f::new(0.0, 1.0, -phi),
        Point3f::new(phi, 0.0, -1.0), Point3f::new(phi, 0.0, 1.0),
        Point3f::new(-phi, 0.0, -1.0), Point3f::new(-phi, 0.0, 1.0),
    ];

    let indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    std::sync::Arc::new(TriangleMesh::new(
        Transform::IDENTITY,
        indices,
        vertices,
        None,
        None,
        None,
        false,
    ))
}

fn icosahedron_scene() -> Scene<'static> {
    let mesh = icosahedron_mesh();
    let prims: Vec<GeometricPrimitive<_>> = mesh
        .iter_triangles()
        .map(|tri| GeometricPrimitive { shape: tri, material: None, light: None, medium: None })
        .collect();

    // Leaked so the BVH/Scene (whose lifetime is tied to the primitives'
    // storage) can outlive this function without a self-referential struct.
    let prims: &'static mut [GeometricPrimitive<lumen_transport::shapes::triangle::Triangle>] =
        Box::leak(prims.into_boxed_slice());
    let prim_refs: Vec<&'static dyn Primitive> = prims.iter().map(|p| p as &dyn Primitive).collect();

    let bvh = lumen_transport::bvh::BVH::build(prim_refs);
    let lights: Vec<&'static mut dyn lumen_transport::light::Light> = vec![];
    Scene::new(bvh, lights)
}

#[test]
fn icosahedron_is_watertight_from_center() {
    let scene = icosahedron_scene();
    let mut rng = thread_rng();

    UnitSphereSurface::new()
        .sample_iter(&mut rng)
        .take(100_000)
        .for_each(|[x, y, z]: [f64; 3]| {
            let dir = Vec3f::new(x as Float, y as Float, z as Float);
            let mut ray = Ray::new(Point3f::origin(), dir);
            let mut mailbox = Mailbox::new();

            assert!(scene.intersect_test(&ray, &mut mailbox));
            mailbox.clear();
            scene.intersect(&mut ray, &mut mailbox).expect("ray from the interior must hit the shell");
        });
}
