use cgmath::{EuclideanSpace, InnerSpace};

use crate::Float;
use crate::geometry::{Transform, Ray};
use crate::geometry::transform::Transformable;
use crate::geometry::bounds::Bounds3;
use crate::shapes::Shape;
use crate::interaction::{SurfaceInteraction, SurfaceHit, DiffGeom};
use crate::err_float::gamma;
use crate::{Point2f, Point3f, Vec3f, Normal3};

/// A flat parallelogram spanned by two edge vectors from a corner, in
/// object space. The corner sits at the object-space origin; `side1` and
/// `side2` need not be orthogonal or axis-aligned. Used for rectangular
/// area lights (a Cornell-box-style ceiling panel is `side1`/`side2`
/// orthogonal and axis-aligned, but nothing here requires that).
pub struct Parallelogram<'t> {
    object_to_world: &'t Transform,
    world_to_object: &'t Transform,
    reverse_orientation: bool,

    side1: Vec3f,
    side2: Vec3f,
}

impl<'t> Parallelogram<'t> {
    pub fn new(
        object_to_world: &'t Transform,
        world_to_object: &'t Transform,
        reverse_orientation: bool,
        side1: Vec3f,
        side2: Vec3f,
    ) -> Self {
        Self { object_to_world, world_to_object, reverse_orientation, side1, side2 }
    }
}

impl<'t> Shape for Parallelogram<'t> {
    fn object_bound(&self) -> Bounds3<f32> {
        let corners = [
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(0.0, 0.0, 0.0) + self.side1,
            Point3f::new(0.0, 0.0, 0.0) + self.side2,
            Point3f::new(0.0, 0.0, 0.0) + self.side1 + self.side2,
        ];
        corners.iter().fold(Bounds3::empty(), |b: Bounds3<f32>, &p| b.join_point(&p))
    }

    fn object_to_world(&self) -> &Transform {
        self.object_to_world
    }

    fn world_to_object(&self) -> &Transform {
        self.world_to_object
    }

    fn reverse_orientation(&self) -> bool {
        self.reverse_orientation
    }

    fn area(&self) -> Float {
        self.side1.cross(self.side2).magnitude()
    }

    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceInteraction)> {
        let ray = ray.transform(*self.world_to_object);

        let n = self.side1.cross(self.side2);
        let denom = n.dot(ray.dir);
        if denom.abs() < 1.0e-7 {
            return None;
        }

        let t = -n.dot(ray.origin.to_vec()) / denom;
        if t <= 0.0 || t >= ray.t_max {
            return None;
        }

        let p_hit = ray.at(t);
        let p_vec = p_hit.to_vec();

        let s2xn = self.side2.cross(n);
        let det = self.side1.dot(s2xn);
        if det.abs() < 1.0e-12 {
            return None;
        }
        let u = p_vec.dot(s2xn) / det;
        let v = self.side1.dot(p_vec.cross(n)) / det;
        if u < 0.0 || u > 1.0 || v < 0.0 || v > 1.0 {
            return None;
        }

        let p_err = gamma(5) * Vec3f::new(p_vec.x.abs(), p_vec.y.abs(), p_vec.z.abs());

        let geom = DiffGeom {
            dpdu: self.side1,
            dpdv: self.side2,
            dndu: Normal3::new(0.0, 0.0, 0.0),
            dndv: Normal3::new(0.0, 0.0, 0.0),
        };

        let mut isect = SurfaceInteraction::new(
            p_hit,
            p_err,
            ray.time,
            Point2f::new(u, v),
            -ray.dir,
            Normal3(n.normalize()),
            geom,
        );

        if self.flip_normals() {
            isect.hit.n = isect.hit.n * -1.0;
            isect.shading_n = isect.shading_n * -1.0;
        }

        let world_isect = isect.transform(*self.object_to_world);
        Some((t, world_isect))
    }

    fn sample(&self, u: Point2f) -> SurfaceHit {
        let p_obj = Point3f::new(0.0, 0.0, 0.0) + self.side1 * u.x + self.side2 * u.y;
        let n = Normal3(self.side1.cross(self.side2).normalize());

        let p_vec = p_obj.to_vec();
        let p_err = gamma(5) * Vec3f::new(p_vec.x.abs(), p_vec.y.abs(), p_vec.z.abs());

        let hit = SurfaceHit {
            p: p_obj,
            p_err,
            time: 0.0,
            n: if self.reverse_orientation { n * -1.0 } else { n },
        };
        hit.transform(*self.object_to_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_unit_square_is_one() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let para = Parallelogram::new(
            &object_to_world, &world_to_object, false,
            Vec3f::new(1.0, 0.0, 0.0), Vec3f::new(0.0, 1.0, 0.0),
        );
        assert!((para.area() - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn ray_through_center_hits_panel() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let para = Parallelogram::new(
            &object_to_world, &world_to_object, false,
            Vec3f::new(2.0, 0.0, 0.0), Vec3f::new(0.0, 2.0, 0.0),
        );
        let ray = Ray::new(Point3f::new(1.0, 1.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        let (t, isect) = para.intersect(&ray).expect("ray should hit the panel");
        assert!((t - 5.0).abs() < 1.0e-4);
        assert!((isect.hit.p.x - 1.0).abs() < 1.0e-4);
        assert!((isect.hit.p.y - 1.0).abs() < 1.0e-4);
    }

    #[test]
    fn ray_outside_bounds_misses() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let para = Parallelogram::new(
            &object_to_world, &world_to_object, false,
            Vec3f::new(1.0, 0.0, 0.0), Vec3f::new(0.0, 1.0, 0.0),
        );
        let ray = Ray::new(Point3f::new(5.0, 5.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        assert!(para.intersect(&ray).is_none());
    }
}
