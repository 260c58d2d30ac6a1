use crate::integrator::{estimate_direct_bsdf_sampled, estimate_direct_light_sampled, uniform_sample_one_light, IntegratorRadiance, TraceCtx};
use crate::sampler::Sampler;
use crate::material::TransportMode;
use crate::RayDifferential;
use crate::spectrum::Spectrum;
use crate::scene::Scene;
use crate::Float;

pub enum LightStrategy {
    UniformSampleAll,
    UniformSampleOne,
}

pub struct DirectLightingIntegrator {
    strategy: LightStrategy,
    max_depth: u16,
}

impl DirectLightingIntegrator {
    pub fn new(strategy: LightStrategy, max_depth: u16) -> Self {
        Self { strategy, max_depth }
    }
}

impl IntegratorRadiance for DirectLightingIntegrator {
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

        if !scene.lights.is_empty() {
            match self.strategy {
                LightStrategy::UniformSampleAll => {
                    let n_light = ctx.params.num_light_samples.min(ctx.params.max_light_samples).max(1);
                    let n_bsdf = ctx.params.num_bsdf_samples.min(ctx.params.max_bsdf_samples).max(1);

                    for light in scene.lights.iter() {
                        let mut light_sum = Spectrum::new(0.0);
                        for _ in 0..n_light {
                            let u_light = sampler.get_2d();
                            light_sum += estimate_direct_light_sampled(&bsdf, &isect, light.as_ref(), u_light, scene, ctx);
                        }
                        radiance += light_sum / n_light as Float;

                        let mut bsdf_sum = Spectrum::new(0.0);
                        for _ in 0..n_bsdf {
                            let u_scattering = sampler.get_2d();
                            bsdf_sum += estimate_direct_bsdf_sampled(&bsdf, &isect, u_scattering, light.as_ref(), scene, ctx);
                        }
                        radiance += bsdf_sum / n_bsdf as Float;
                    }
                }
                LightStrategy::UniformSampleOne => {
                    radiance += uniform_sample_one_light(&isect, &bsdf, scene, ctx, sampler);
                }
            };
        }

        if depth + 1 < self.max_depth {
            radiance += self.specular_reflect(ray, &isect, &bsdf, scene, sampler, ctx, depth);
            radiance += self.specular_transmit(ray, &isect, &bsdf, scene, sampler, ctx, depth);
        }

        ctx.apply_volume(&ray.ray, sampler, radiance)
    }
}
