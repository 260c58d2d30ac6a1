use crate::texture::TextureRef;
use crate::spectrum::Spectrum;
use crate::material::{Material, TransportMode};
use crate::interaction::SurfaceInteraction;
use bumpalo::Bump;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::LambertianReflection;

pub struct MatteMaterial {
    diffuse: TextureRef<Spectrum>,
    // TODO sigma, bump map
}

impl MatteMaterial {
    pub fn new(diffuse: TextureRef<Spectrum>) -> Self {
        Self { diffuse }
    }
}

impl Material for MatteMaterial {
    fn compute_scattering_functions<'a>(&self, si: &SurfaceInteraction, arena: &'a Bump, _mode: TransportMode, _allow_multiple_lobes: bool) -> Bsdf<'a> {
        let mut bsdf = Bsdf::new(si, 1.0);

        let r = self.diffuse.evaluate(si).clamp_positive();
        if !r.is_black() {
            let lambertian = arena.alloc(LambertianReflection { r });
            bsdf.add(lambertian)
        }
        bsdf
    }
}
