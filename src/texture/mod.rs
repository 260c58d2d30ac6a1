use crate::interaction::SurfaceInteraction;
use std::sync::Arc;

pub mod checkerboard;
pub mod image;
pub mod mapping;
pub mod uv;

pub trait Texture: Sync + Send {
    type Output;

    fn evaluate(&self, si: &SurfaceInteraction) -> Self::Output;
}

/// Most materials store their texture-valued parameters behind this alias
/// rather than being generic over the texture type, matching the way
/// parsed scene descriptions hand back trait objects.
pub type TextureRef<T> = Arc<dyn Texture<Output = T>>;

impl<T: Texture + ?Sized> Texture for Arc<T> {
    type Output = T::Output;

    fn evaluate(&self, si: &SurfaceInteraction) -> Self::Output {
        (**self).evaluate(si)
    }
}

pub struct ConstantTexture<T: Copy>(pub T);

impl<T: Copy + Sync + Send> Texture for ConstantTexture<T> {
    type Output = T;

    fn evaluate(&self, _si: &SurfaceInteraction) -> T {
        self.0
    }
}
