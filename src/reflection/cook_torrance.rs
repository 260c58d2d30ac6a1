use cgmath::InnerSpace;

use crate::{Vec3f, Float, Point2f};
use crate::spectrum::Spectrum;
use crate::sampling::cosine_sample_hemisphere;
use crate::fresnel::fresnel_dielectric;
use crate::reflection::{BxDF, BxDFType, ScatterSample, same_hemisphere, reflect, cos_theta, abs_cos_theta};
use crate::reflection::microfacet::{WardDistribution, MicrofacetDistribution};

/// Diffuse/specular mixture weighted by how much each term contributes
/// (the diffuse color's luminance), with an isotropic Ward specular lobe
/// and a non-Smith masking term. Doesn't fit `Bsdf`'s uniform pick among
/// components, since the mixture weight isn't 50/50, so the weighting is
/// handled internally rather than by adding two separate BxDFs.
#[derive(Debug)]
pub struct CookTorranceReflection {
    diffuse: Spectrum,
    specular: Spectrum,
    distribution: WardDistribution,
    eta: Float,
    diff_weight: Float,
}

impl CookTorranceReflection {
    pub fn new(diffuse: Spectrum, specular: Spectrum, roughness: Float, eta: Float) -> Self {
        let diff_weight = diffuse.luminance().clamp(0.0, 1.0);
        Self {
            diffuse,
            specular,
            distribution: WardDistribution::new(WardDistribution::roughness_to_alpha(roughness)),
            eta,
            diff_weight,
        }
    }
}

impl BxDF for CookTorranceReflection {
    fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::DIFFUSE | BxDFType::GLOSSY
    }

    fn f(&self, wo: Vec3f, wi: Vec3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::uniform(0.0);
        }
        let diffuse_term = self.diffuse * std::f32::consts::FRAC_1_PI;

        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        let wh = wi + wo;
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 || wh == Vec3f::new(0.0, 0.0, 0.0) {
            return diffuse_term;
        }
        let wh = wh.normalize();
        let nh = cos_theta(wh).max(0.0);
        let vh = wo.dot(wh).max(1.0e-4);

        let d = self.distribution.d(wh);
        let g = Float::min(1.0, 2.0 * nh * Float::min(cos_theta_o, cos_theta_i) / vh);
        let fr = fresnel_dielectric(vh, 1.0, self.eta);

        let specular_term = self.specular * (d * g * fr / (std::f32::consts::PI * cos_theta_o));

        diffuse_term + specular_term
    }

    fn sample_f(&self, wo: Vec3f, sample: Point2f) -> Option<ScatterSample> {
        let wi = if sample.x < self.diff_weight {
            let u = Point2f::new(sample.x / self.diff_weight, sample.y);
            let mut wi = cosine_sample_hemisphere(u);
            if wo.z < 0.0 {
                wi.z *= -1.0;
            }
            wi
        } else {
            let u = Point2f::new(
                (sample.x - self.diff_weight) / (1.0 - self.diff_weight),
                sample.y,
            );
            let wh = self.distribution.sample_wh(wo, u);
            reflect(wo, wh)
        };

        if !same_hemisphere(wo, wi) {
            return None;
        }

        let pdf = self.pdf(wo, wi);
        if pdf == 0.0 {
            return None;
        }
        Some(ScatterSample { f: self.f(wo, wi), wi, pdf, sampled_type: self.get_type() })
    }

    fn pdf(&self, wo: Vec3f, wi: Vec3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        let diffuse_pdf = abs_cos_theta(wi) * std::f32::consts::FRAC_1_PI;
        let wh = (wo + wi).normalize();
        let specular_pdf = self.distribution.pdf(wo, wh) / (4.0 * wo.dot(wh));
        self.diff_weight * diffuse_pdf + (1.0 - self.diff_weight) * specular_pdf
    }
}
