use crate::texture::TextureRef;
use crate::spectrum::Spectrum;
use crate::{Float, SurfaceInteraction};
use crate::material::{Material, TransportMode};
use bumpalo::Bump;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::cook_torrance::CookTorranceReflection;

/// Diffuse/glossy plastic-like material: a Lambertian base coat with a
/// Ward-distributed specular highlight, the two blended by how reflective
/// the diffuse color itself is.
pub struct CookTorranceMaterial {
    kd: TextureRef<Spectrum>,
    ks: TextureRef<Spectrum>,
    roughness: TextureRef<Float>,
    eta: Float,
}

impl CookTorranceMaterial {
    pub fn new(kd: TextureRef<Spectrum>, ks: TextureRef<Spectrum>, roughness: TextureRef<Float>, eta: Float) -> Self {
        CookTorranceMaterial { kd, ks, roughness, eta }
    }
}

impl Material for CookTorranceMaterial {
    fn compute_scattering_functions<'a>(&self, si: &SurfaceInteraction, arena: &'a Bump, _mode: TransportMode, _allow_multiple_lobes: bool) -> Bsdf<'a> {
        let mut bsdf = Bsdf::new(si, 1.0);
        let kd = self.kd.evaluate(si);
        let ks = self.ks.evaluate(si);
        if !kd.is_black() || !ks.is_black() {
            let roughness = self.roughness.evaluate(si);
            let reflection = CookTorranceReflection::new(kd, ks, roughness, self.eta);
            bsdf.add(arena.alloc(reflection));
        }
        bsdf
    }
}
