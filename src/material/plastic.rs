use crate::texture::TextureRef;
use crate::spectrum::Spectrum;
use crate::{Float, SurfaceInteraction};
use crate::material::{Material, TransportMode};
use bumpalo::Bump;
use crate::reflection::bsdf::Bsdf;
use crate::reflection::PlasticSpecular;

/// Plastic: a dielectric coating that specularly reflects some light and
/// lets the rest through to scatter diffusely, picked by the Fresnel term.
pub struct PlasticMaterial {
    kr: TextureRef<Spectrum>,
    kt: TextureRef<Spectrum>,
    eta: Float,
}

impl PlasticMaterial {
    pub fn new(kr: TextureRef<Spectrum>, kt: TextureRef<Spectrum>, eta: Float) -> Self {
        PlasticMaterial { kr, kt, eta }
    }
}

impl Material for PlasticMaterial {
    fn compute_scattering_functions<'a>(&self, si: &SurfaceInteraction, arena: &'a Bump, _mode: TransportMode, _allow_multiple_lobes: bool) -> Bsdf<'a> {
        let mut bsdf = Bsdf::new(si, self.eta);
        let kr = self.kr.evaluate(si).clamp_positive();
        let kt = self.kt.evaluate(si).clamp_positive();
        if !kr.is_black() || !kt.is_black() {
            let specular = PlasticSpecular::new(kr, kt, 1.0, self.eta);
            bsdf.add(arena.alloc(specular));
        }
        bsdf
    }
}
