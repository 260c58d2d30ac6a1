use cgmath::{EuclideanSpace, InnerSpace};

use crate::Float;
use crate::geometry::{Transform, Ray};
use crate::geometry::transform::{Transformable, TransformableErr};
use crate::shapes::Shape;
use crate::geometry::bounds::Bounds3;
use crate::interaction::{SurfaceInteraction, SurfaceHit, DiffGeom};
use crate::err_float::{EFloat, gamma, quadratic_efloat};
use crate::{Point2f, Point3f, Vec3f, Normal3};
use crate::sampling::uniform_sample_sphere;

pub struct Sphere<'t> {
    object_to_world: &'t Transform,
    world_to_object: &'t Transform,
    reverse_orientation: bool,

    radius: Float,
    z_min: Float,
    z_max: Float,
    theta_min: Float,
    theta_max: Float,
    phi_max: Float
}

impl<'t> Sphere<'t> {
    pub fn new(
        object_to_world: &'t Transform,
        world_to_object: &'t Transform,
        reverse_orientation: bool,
        radius: Float,
        z_min: Float,
        z_max: Float,
        phi_max: Float
    ) -> Self {
        Self {
            object_to_world, world_to_object, reverse_orientation,
            radius,
            z_min: Float::min(z_min, z_max).clamp(-radius, radius),

            z_max: Float::max(z_min, z_max).clamp(-radius, radius),
            theta_min: Float::clamp(z_min / radius, -1.0, 1.0).acos(),
            theta_max: Float::clamp(z_max / radius, -1.0, 1.0).acos(),
            phi_max: phi_max.clamp(0.0, 360.0).to_radians()
        }
    }

    pub fn whole(object_to_world: &'t Transform, world_to_object: &'t Transform, radius: Float) -> Self {
        Self::new(object_to_world, world_to_object, false, radius, -radius, radius, 360.0)
    }
}

impl<'t> Shape for Sphere<'t> {
    fn object_bound(&self) -> Bounds3<f32> {
        bounds3f!((-self.radius, -self.radius, self.z_min), (self.radius, self.radius, self.z_max))
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
        self.phi_max * self.radius * (self.z_max - self.z_min)
    }

    fn intersect(&self, ray: &Ray) -> Option<(Float, SurfaceInteraction)> {
        let (ray, (o_err, d_err)) = ray.tf_exact_to_err(*self.world_to_object);

        let ox = EFloat::new(ray.origin.x, o_err.x);
        let oy = EFloat::new(ray.origin.y, o_err.y);
        let oz = EFloat::new(ray.origin.z, o_err.z);
        let dx = EFloat::new(ray.dir.x, d_err.x);
        let dy = EFloat::new(ray.dir.y, d_err.y);
        let dz = EFloat::new(ray.dir.z, d_err.z);

        let a = dx * dx + dy * dy + dz * dz;
        let b = (dx * ox + dy * oy + dz * oz) * EFloat::from(2.0);
        let c = ox * ox + oy * oy + oz * oz - EFloat::from(self.radius) * EFloat::from(self.radius);

        let (t0, t1) = quadratic_efloat(a, b, c)?;

        if t0.upper_bound() > ray.t_max || t1.lower_bound() <= 0.0 {
            return None;
        }
        let mut t_shape_hit = t0;
        if t_shape_hit.lower_bound() <= 0.0 {
            t_shape_hit = t1;
            if t_shape_hit.upper_bound() > ray.t_max {
                return None;
            }
        }

        let compute_hit = |t_shape_hit: EFloat| -> Option<(Point3f, Float, Float)> {
            let mut p_hit = ray.origin + ray.dir * t_shape_hit.val();
            let rescale = self.radius / p_hit.to_vec().magnitude();
            p_hit = Point3f::from_vec(p_hit.to_vec() * rescale);
            if p_hit.x == 0.0 && p_hit.y == 0.0 {
                p_hit.x = 1.0e-5 * self.radius;
            }
            let mut phi = p_hit.y.atan2(p_hit.x);
            if phi < 0.0 {
                phi += 2.0 * crate::consts::PI;
            }

            if (self.z_min > -self.radius && p_hit.z < self.z_min)
                || (self.z_max < self.radius && p_hit.z > self.z_max)
                || phi > self.phi_max
            {
                return None;
            }
            Some((p_hit, phi, t_shape_hit.val()))
        };

        let (p_hit, phi, t_hit) = match compute_hit(t_shape_hit) {
            Some(hit) => hit,
            None => {
                if t_shape_hit.val() == t1.val() {
                    return None;
                }
                t_shape_hit = t1;
                if t_shape_hit.upper_bound() > ray.t_max {
                    return None;
                }
                compute_hit(t_shape_hit)?
            }
        };

        let u = phi / self.phi_max;
        let theta = Float::clamp(p_hit.z / self.radius, -1.0, 1.0).acos();
        let v = (theta - self.theta_min) / (self.theta_max - self.theta_min);

        let z_radius = (p_hit.x * p_hit.x + p_hit.y * p_hit.y).sqrt();
        let inv_z_radius = 1.0 / z_radius;
        let cos_phi = p_hit.x * inv_z_radius;
        let sin_phi = p_hit.y * inv_z_radius;
        let dpdu = Vec3f::new(-self.phi_max * p_hit.y, self.phi_max * p_hit.x, 0.0);
        let dpdv = (self.theta_max - self.theta_min) *
            Vec3f::new(p_hit.z * cos_phi, p_hit.z * sin_phi, -self.radius * theta.sin());

        let p_hit_vec = p_hit.to_vec();
        let p_err = gamma(5) * Vec3f::new(p_hit_vec.x.abs(), p_hit_vec.y.abs(), p_hit_vec.z.abs());

        let geom = DiffGeom {
            dpdu,
            dpdv,
            dndu: Normal3::new(0.0, 0.0, 0.0),
            dndv: Normal3::new(0.0, 0.0, 0.0),
        };

        let n = Normal3(p_hit.to_vec().normalize());

        let mut isect = SurfaceInteraction::new(
            p_hit,
            p_err,
            ray.time,
            Point2f::new(u, v),
            -ray.dir,
            n,
            geom,
        );

        if self.flip_normals() {
            isect.hit.n = isect.hit.n * -1.0;
            isect.shading_n = isect.shading_n * -1.0;
        }

        let world_isect = isect.transform(*self.object_to_world);
        Some((t_hit, world_isect))
    }

    fn sample(&self, u: Point2f) -> SurfaceHit {
        let p_obj = Point3f::new(0.0, 0.0, 0.0) + self.radius * uniform_sample_sphere(u);
        let n = Normal3(p_obj.to_vec().normalize());

        let p_obj_vec = p_obj.to_vec();
        let p_err = gamma(5) * Vec3f::new(p_obj_vec.x.abs(), p_obj_vec.y.abs(), p_obj_vec.z.abs());

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
    fn area_of_unit_sphere_is_four_pi() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let sphere = Sphere::whole(&object_to_world, &world_to_object, 1.0);
        assert!((sphere.area() - 4.0 * crate::consts::PI).abs() < 1.0e-4);
    }

    #[test]
    fn ray_through_center_hits_near_side() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let sphere = Sphere::whole(&object_to_world, &world_to_object, 1.0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        let (t, isect) = sphere.intersect(&ray).expect("ray should hit sphere");
        assert!((t - 4.0).abs() < 1.0e-4);
        assert!((isect.hit.p.z - (-1.0)).abs() < 1.0e-4);
    }

    #[test]
    fn ray_missing_sphere_returns_none() {
        let object_to_world = Transform::IDENTITY;
        let world_to_object = Transform::IDENTITY;
        let sphere = Sphere::whole(&object_to_world, &world_to_object, 1.0);
        let ray = Ray::new(Point3f::new(5.0, 5.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect(&ray).is_none());
    }
}
