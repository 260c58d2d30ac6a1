use crate::{Point2f, Vec2f, SurfaceInteraction, Float};
use std::sync::Arc;

#[derive(Copy, Clone)]
pub struct TexCoords {
    pub st: Point2f,
    pub dst_dx: Vec2f,
    pub dst_dy: Vec2f,
}

pub trait TextureMapping2D: Sync + Send {
    fn map(&self, si: &SurfaceInteraction) -> TexCoords;
}

impl<M: TextureMapping2D + ?Sized> TextureMapping2D for Arc<M> {
    fn map(&self, si: &SurfaceInteraction) -> TexCoords {
        (**self).map(si)
    }
}

pub struct UVMapping {
    pub scale_u: Float,
    pub scale_v: Float,
    pub offset_u: Float,
    pub offset_v: Float,
}

impl UVMapping {
    pub fn new(scale_u: Float, scale_v: Float, offset_u: Float, offset_v: Float) -> Self {
        Self { scale_u, scale_v, offset_u, offset_v }
    }
}

impl TextureMapping2D for UVMapping {
    fn map(&self, si: &SurfaceInteraction) -> TexCoords {
        let st = Point2f::new(
            self.scale_u * si.uv.x + self.offset_u,
            self.scale_v * si.uv.y + self.offset_v,
        );

        let (dudx, dvdx, dudy, dvdy) = match si.tex_diffs {
            Some(diffs) => (diffs.dudx, diffs.dvdx, diffs.dudy, diffs.dvdy),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        let dst_dx = Vec2f::new(self.scale_u * dudx, self.scale_v * dvdx);
        let dst_dy = Vec2f::new(self.scale_u * dudy, self.scale_v * dvdy);

        TexCoords { st, dst_dx, dst_dy }
    }
}
