//! A closed, shadowless, constant-albedo enclosure lit only by a uniform
//! environment light. Any surface integrator that accounts for all orders
//! of diffuse interreflection must converge to `radiance / (1 - albedo)`
//! at every point on the inner wall, since each bounce multiplies the
//! previous contribution by the (constant) albedo.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use bumpalo::Bump;
use cgmath::EuclideanSpace;

use lumen_transport::integrator::direct_lighting::{DirectLightingIntegrator, LightStrategy};
use lumen_transport::integrator::path::PathIntegrator;
use lumen_transport::integrator::{IntegratorRadiance, TraceCtx};
use lumen_transport::light::infinite::InfiniteAreaLight;
use lumen_transport::mailbox::Mailbox;
use lumen_transport::material::matte::MatteMaterial;
use lumen_transport::medium::{FilterVolumeIntegrator, MediaStack, Medium};
use lumen_transport::primitive::GeometricPrimitive;
use lumen_transport::render::RenderParams;
use lumen_transport::sampler::random::RandomSampler;
use lumen_transport::sampler::Sampler;
use lumen_transport::shapes::sphere::Sphere;
use lumen_transport::spectrum::Spectrum;
use lumen_transport::texture::ConstantTexture;
use lumen_transport::{Differential, Point3f, Ray, RayDifferential, Transform, Vec3f};

const ALBEDO: f32 = 0.5;
const ENV_RADIANCE: f32 = 1.0;

/// Builds a furnace: a sphere of radius 10 centered at the origin, inside
/// out (`reverse_orientation`) so its shading normal points back toward the
/// interior, matte with constant albedo `ALBEDO`, lit by a uniform
/// environment light of radiance `ENV_RADIANCE`.
fn furnace_radiance(integrator: &impl IntegratorRadiance) -> Spectrum {
    let object_to_world = Transform::IDENTITY;
    let world_to_object = Transform::IDENTITY;
    let sphere = Sphere::new(&object_to_world, &world_to_object, true, 10.0, -10.0, 10.0, 360.0);

    let diffuse = Arc::new(ConstantTexture(Spectrum::uniform(ALBEDO)));
    let material: Arc<MatteMaterial> = Arc::new(MatteMaterial::new(diffuse));

    let wall = GeometricPrimitive { shape: sphere, material: Some(material), light: None, medium: None };
    let prims: Vec<&dyn lumen_transport::primitive::Primitive> = vec![&wall];
    let bvh = lumen_transport::bvh::BVH::build(prims);

    let mut env = InfiniteAreaLight::new_uniform(Spectrum::uniform(ENV_RADIANCE), Transform::IDENTITY);
    let lights: Vec<&mut dyn lumen_transport::light::Light> = vec![&mut env];
    let scene = lumen_transport::scene::Scene::new(bvh, lights);

    let mut sampler = RandomSampler::new_with_seed(1, 0);
    sampler.start_pixel(lumen_transport::Point2i::new(0, 0));

    let arena = Bump::new();
    let mut mailbox = Mailbox::new();
    let mut media = MediaStack::new(Medium::vacuum());
    let volume = FilterVolumeIntegrator;
    let mut ctx = TraceCtx {
        arena: &arena,
        mailbox: &mut mailbox,
        media: &mut media,
        volume: &volume,
        params: RenderParams::default(),
    };

    let dir = Vec3f::new(0.0, 0.0, 1.0);
    let mut ray = RayDifferential {
        ray: Ray::new(Point3f::origin(), dir),
        diff: None::<Differential>,
    };

    integrator.incident_radiance(&mut ray, &scene, &mut sampler, &mut ctx, 0)
}

#[test]
fn furnace_test_path() {
    let integrator = PathIntegrator::new(30, 1.0);
    let radiance = furnace_radiance(&integrator);

    let expected = ENV_RADIANCE / (1.0 - ALBEDO);
    for comp in <[f32; 3]>::from(radiance).iter() {
        // Russian roulette introduces some variance at a single sample.
        assert_abs_diff_eq!(*comp, expected, epsilon = 0.2);
    }
}

#[test]
fn furnace_test_path_no_rr() {
    let integrator = PathIntegrator::new(30, 0.0);
    let radiance = furnace_radiance(&integrator);

    let expected = ENV_RADIANCE / (1.0 - ALBEDO);
    for comp in <[f32; 3]>::from(radiance).iter() {
        // No stochastic termination: every path runs to max_depth, so a
        // single sample should already be close to the analytic value.
        assert_abs_diff_eq!(*comp, expected, epsilon = 0.05);
    }
}

#[test]
fn furnace_test_directlighting() {
    let integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleOne, 3);
    let radiance = furnace_radiance(&integrator);

    // Direct lighting only accounts for a single bounce off the
    // environment: albedo * incoming radiance, no further interreflection.
    let expected = ALBEDO * ENV_RADIANCE;
    for comp in <[f32; 3]>::from(radiance).iter() {
        assert_abs_diff_eq!(*comp, expected, epsilon = 0.05);
    }
}
