use crate::geometry::bounds::Bounds3f;
use crate::geometry::{Ray, Transform};
use crate::geometry::transform::Transformable;
use crate::interaction::{SurfaceInteraction, SurfaceHit};
use crate::{Float, Point2f};

pub mod sphere;
pub mod triangle;
pub mod parallelogram;

/// A piece of geometry that can be intersected by a ray and sampled for
/// direct lighting. Implementors own (or borrow) their own object-to-world
/// transform rather than taking one generically, since the transform is
/// needed at both intersection time (to report a world-space hit) and
/// bounding time (to report a world-space `Bounds3f`).
pub trait Shape: Sync + Send {
    fn object_bound(&self) -> Bounds3f;

    fn world_bound(&self) -> Bounds3f {
        self.object_to_world().transform(self.object_bound())
    }

    fn object_to_world(&self) -> &Transform;

    fn world_to_object(&self) -> &Transform;

    fn reverse_orientation(&self) -> bool;

    fn transform_swaps_handedness(&self) -> bool {
        self.object_to_world().swaps_handedness()
    }

    /// Whether the geometric and shading normals need to be flipped to point
    /// to the side of the surface light leaves from, combining the
    /// user-requested `ReverseOrientation` with any handedness flip
    /// introduced by the object-to-world transform.
    fn flip_normals(&self) -> bool {
        self.reverse_orientation() ^ self.transform_swaps_handedness()
    }

    fn area(&self) -> Float;

    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceInteraction)>;

    fn intersect_test(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }

    /// Samples a point on the shape's surface, uniformly with respect to
    /// surface area.
    fn sample(&self, u: Point2f) -> SurfaceHit;

    /// `1 / area` for a uniform-area sampling strategy; the default
    /// implementation suffices for any shape whose `sample` is uniform over
    /// area as documented above.
    fn pdf(&self, _hit: SurfaceHit) -> Float {
        1.0 / self.area()
    }
}
