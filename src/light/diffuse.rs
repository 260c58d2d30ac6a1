use std::sync::Arc;

use cgmath::InnerSpace;

use crate::{Float, Point2f, Transform, Vec3f};
use crate::spectrum::Spectrum;
use crate::shapes::Shape;
use crate::interaction::SurfaceHit;
use crate::math::abs_dot;
use crate::light::{AreaLight, AreaLightBuilder, Light, LightFlags, LiSample, VisibilityTester};

pub struct DiffuseAreaLight<S: Shape> {
    emit: Spectrum,
    shape: Arc<S>,
    area: Float,
    two_sided: bool,
}

impl<S: Shape> DiffuseAreaLight<S> {
    pub fn new(emit: Spectrum, shape: Arc<S>, two_sided: bool) -> Self {
        let area = shape.area();
        Self { emit, shape, area, two_sided }
    }
}

impl<S: Shape> Light for DiffuseAreaLight<S> {
    fn flags(&self) -> LightFlags {
        LightFlags::Area
    }

    fn light_to_world(&self) -> &Transform {
        self.shape.object_to_world()
    }

    fn world_to_light(&self) -> &Transform {
        self.shape.world_to_object()
    }

    fn sample_incident_radiance(&self, reference: &SurfaceHit, u: Point2f) -> LiSample {
        let p_shape = self.shape.sample(u);

        let d = p_shape.p - reference.p;
        if d.magnitude2() == 0.0 {
            return LiSample {
                radiance: Spectrum::new(0.0),
                wi: Vec3f::new(0.0, 0.0, 1.0),
                pdf: 0.0,
                vis: VisibilityTester { p0: *reference, p1: p_shape },
            };
        }

        let dist2 = d.magnitude2();
        let wi = d.normalize();

        let pdf = self.shape.pdf(p_shape) * dist2 / abs_dot(p_shape.n.0, -wi).max(1.0e-7);
        let vis = VisibilityTester { p0: *reference, p1: p_shape };
        let radiance = self.emitted_radiance(p_shape, -wi);

        LiSample { radiance, wi, pdf, vis }
    }

    fn pdf_incident_radiance(&self, reference: &SurfaceHit, wi: Vec3f) -> Float {
        let ray = reference.spawn_ray(wi);
        match self.shape.intersect(&ray) {
            Some((_, isect)) => {
                let dist2 = (isect.hit.p - reference.p).magnitude2();
                let denom = abs_dot(isect.hit.n.0, -wi) * self.area;
                if denom == 0.0 {
                    0.0
                } else {
                    dist2 / denom
                }
            }
            None => 0.0,
        }
    }
}

impl<S: Shape> AreaLight for DiffuseAreaLight<S> {
    fn emitted_radiance(&self, hit: SurfaceHit, w: Vec3f) -> Spectrum {
        if self.two_sided || hit.n.0.dot(w) > 0.0 {
            self.emit
        } else {
            Spectrum::new(0.0)
        }
    }

    fn as_light(&self) -> &dyn Light {
        self
    }
}

pub struct DiffuseAreaLightBuilder {
    pub emit: Spectrum,
    pub two_sided: bool,
}

impl<S: Shape> AreaLightBuilder<S> for DiffuseAreaLightBuilder {
    type Target = DiffuseAreaLight<S>;

    fn create(self, shape: Arc<S>) -> Self::Target {
        DiffuseAreaLight::new(self.emit, shape, self.two_sided)
    }
}
