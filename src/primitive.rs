use std::sync::Arc;

use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::SurfaceInteraction;
use crate::light::AreaLight;
use crate::material::Material;
use crate::medium::Medium;
use crate::shapes::Shape;

/// Anything that can be intersected by a ray and that knows how to shade
/// itself once hit: a piece of geometry plus (optionally) the material and
/// area light attached to it.
pub trait Primitive: Sync + Send {
    fn world_bound(&self) -> Bounds3f;

    /// Intersects `ray`, shortening `ray.t_max` to the hit distance on success
    /// so that further primitives tested against the same ray can reject
    /// farther hits cheaply.
    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction>;

    fn intersect_test(&self, ray: &Ray) -> bool;

    fn material(&self) -> Option<&dyn Material>;

    fn area_light(&self) -> Option<&dyn AreaLight>;

    /// The medium filling the interior of this primitive, if it's a
    /// refractive boundary (e.g. glass). `None` means the interior is
    /// optically identical to whatever medium surrounds the primitive
    /// (vacuum, for anything opaque -- there's no transmitted ray to
    /// carry a medium change on in that case anyway).
    fn medium(&self) -> Option<Medium> {
        None
    }
}

/// A single shape paired with the material and (optional) area light that sit
/// on its surface. The workhorse `Primitive` impl; aggregates like `BVH` hold
/// trait objects over these rather than anything shape-specific.
pub struct GeometricPrimitive<S: Shape> {
    pub shape: S,
    pub material: Option<Arc<dyn Material>>,
    pub light: Option<Arc<dyn AreaLight>>,
    pub medium: Option<Medium>,
}

impl<S: Shape> Primitive for GeometricPrimitive<S> {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction> {
        let (t_hit, mut si) = self.shape.intersect(ray)?;
        debug_assert!(t_hit <= ray.t_max);
        ray.t_max = t_hit;
        si.primitive = Some(self);
        Some(si)
    }

    fn intersect_test(&self, ray: &Ray) -> bool {
        self.shape.intersect_test(ray)
    }

    fn material(&self) -> Option<&dyn Material> {
        self.material.as_ref().map(|m| m.as_ref())
    }

    fn area_light(&self) -> Option<&dyn AreaLight> {
        self.light.as_ref().map(|l| l.as_ref())
    }

    fn medium(&self) -> Option<Medium> {
        self.medium
    }
}
