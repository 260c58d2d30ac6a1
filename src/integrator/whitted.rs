use crate::integrator::{uniform_sample_one_light, IntegratorRadiance, TraceCtx};
use crate::scene::Scene;
use crate::sampler::Sampler;
use crate::material::TransportMode;
use crate::RayDifferential;
use crate::spectrum::Spectrum;

/// Recursive Whitted-style integrator: direct lighting (MIS over lights and
/// the BSDF) at every hit, plus recursion through perfectly specular lobes
/// up to `max_depth`. No indirect diffuse/glossy bounce -- that's what
/// `integrator::path` adds.
pub struct WhittedIntegrator {
    pub max_depth: u16,
}

impl IntegratorRadiance for WhittedIntegrator {
    fn preprocess(&mut self, _scene: &Scene, _sampler: &mut dyn Sampler) {}

    fn incident_radiance(&self, ray: &mut RayDifferential, scene: &Scene, sampler: &mut dyn Sampler, ctx: &mut TraceCtx, depth: u16) -> Spectrum {
        let mut radiance = Spectrum::new(0.0);

        let mut isect = match scene.intersect(&mut ray.ray, ctx.mailbox) {
            Some(isect) => isect,
            None => return ctx.apply_volume(&ray.ray, sampler, scene.environment_emitted_radiance(ray)),
        };

        let wo = isect.wo;

        radiance += isect.emitted_radiance(wo);

        let bsdf = match isect.compute_scattering_functions(ray, ctx.arena, false, TransportMode::Radiance) {
            Some(bsdf) => bsdf,
            None => return self.incident_radiance(&mut isect.spawn_ray_with_dfferentials(ray.ray.dir, ray.diff), scene, sampler, ctx, depth),
        };

        radiance += uniform_sample_one_light(&isect, &bsdf, scene, ctx, sampler);

        if depth + 1 < self.max_depth {
            radiance += self.specular_reflect(ray, &isect, &bsdf, scene, sampler, ctx, depth);
            radiance += self.specular_transmit(ray, &isect, &bsdf, scene, sampler, ctx, depth);
        }

        ctx.apply_volume(&ray.ray, sampler, radiance)
    }
}
