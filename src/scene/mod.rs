use crate::bvh::BVH;
use crate::{SurfaceInteraction, Ray, Bounds3f};
use crate::light::Light;
use crate::mailbox::Mailbox;

pub struct SceneBuilder {

}

pub struct Scene<'p> {
    pub primitives_aggregate: BVH<'p>,
    pub lights: Vec<&'p dyn Light>,
}

impl<'p> Scene<'p> {

    pub fn new(primitives: BVH<'p>, lights: Vec<&'p mut dyn Light>) -> Self {
        // preprocess needs `&mut self` so that lights which depend on the
        // scene's bounds (distant, infinite) can record it; reborrow down
        // to a shared reference once that's done, since nothing else needs
        // to mutate a light afterwards.
        let lights = lights.into_iter()
            .map(|light| {
                light.preprocess(&primitives);
                &*light
            })
            .collect();

        Self {
            primitives_aggregate: primitives,
            lights
        }
    }

    pub fn environment_emitted_radiance(&self, ray: &crate::RayDifferential) -> crate::spectrum::Spectrum {
        self.lights.iter()
            .fold(crate::spectrum::Spectrum::new(0.0), |acc, light| acc + light.environment_emitted_radiance(ray))
    }

    pub fn intersect(&self, ray: &mut Ray, mailbox: &mut Mailbox) -> Option<SurfaceInteraction> {
        self.primitives_aggregate.intersect(ray, mailbox)
    }

    pub fn intersect_test(&self, ray: &Ray, mailbox: &mut Mailbox) -> bool {
        self.primitives_aggregate.intersect_test(ray, mailbox)
    }

    pub fn world_bound(&self) -> Bounds3f {
        self.primitives_aggregate.bounds
    }
}