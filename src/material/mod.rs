use crate::interaction::SurfaceInteraction;
use bumpalo::Bump;
use crate::reflection::bsdf::Bsdf;

pub mod matte;
pub mod glass;
pub mod metal;
pub mod mirror;
pub mod plastic;
pub mod cook_torrance;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransportMode {
    Radiance,
    Importance,
}

/// Something that turns a surface hit into a [`Bsdf`]: the set of BxDF lobes
/// a ray scattering off that point should sample from. `arena` backs the
/// BxDFs themselves, which borrow from it rather than being boxed, so their
/// lifetime is tied to the path/sample currently being traced.
pub trait Material: Sync + Send {
    fn compute_scattering_functions<'a>(
        &self,
        si: &SurfaceInteraction,
        arena: &'a Bump,
        mode: TransportMode,
        allow_multiple_lobes: bool
    ) -> Bsdf<'a>;
}
